//! Per-item step state machine.
//!
//! An [`OrderStatus`] walks an ordered, non-empty list of production steps one
//! step at a time. Every step it lands on is timestamped; revisiting a step
//! overwrites its timestamp.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{Clock, DomainError, DomainResult, StepId, ValueObject};

/// Position of an item in its production pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StatusRecord")]
pub struct OrderStatus {
    steps: Vec<StepId>,
    current_step_index: usize,
    status_updates: BTreeMap<StepId, DateTime<Utc>>,
}

/// Unvalidated wire form; deserialization goes through [`OrderStatus::restore`].
#[derive(Deserialize)]
struct StatusRecord {
    steps: Vec<StepId>,
    current_step_index: usize,
    status_updates: BTreeMap<StepId, DateTime<Utc>>,
}

impl TryFrom<StatusRecord> for OrderStatus {
    type Error = DomainError;

    fn try_from(record: StatusRecord) -> Result<Self, Self::Error> {
        Self::restore(
            record.steps,
            record.current_step_index,
            record.status_updates,
        )
    }
}

impl OrderStatus {
    /// Start at the first step, timestamped with `started_at`.
    pub fn new(steps: Vec<StepId>, started_at: DateTime<Utc>) -> DomainResult<Self> {
        let first = *steps
            .first()
            .ok_or_else(|| DomainError::validation("a status needs at least one step"))?;

        let mut status_updates = BTreeMap::new();
        status_updates.insert(first, started_at);

        Ok(Self {
            steps,
            current_step_index: 0,
            status_updates,
        })
    }

    /// Start at the first step, timestamped with the clock's "now".
    pub fn start(steps: Vec<StepId>, clock: &dyn Clock) -> DomainResult<Self> {
        Self::new(steps, clock.now())
    }

    /// Rebuild a status from persisted parts.
    pub fn restore(
        steps: Vec<StepId>,
        current_step_index: usize,
        status_updates: BTreeMap<StepId, DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if steps.is_empty() {
            return Err(DomainError::validation("a status needs at least one step"));
        }
        if current_step_index >= steps.len() {
            return Err(DomainError::invalid_state(format!(
                "step index {current_step_index} out of range for {} steps",
                steps.len()
            )));
        }

        Ok(Self {
            steps,
            current_step_index,
            status_updates,
        })
    }

    pub fn can_move_to_next_step(&self) -> bool {
        self.current_step_index < self.steps.len() - 1
    }

    pub fn can_move_to_previous_step(&self) -> bool {
        self.current_step_index > 0
    }

    pub fn is_terminal(&self) -> bool {
        !self.can_move_to_next_step()
    }

    pub fn move_to_next_step(&mut self, clock: &dyn Clock) -> DomainResult<()> {
        if !self.can_move_to_next_step() {
            return Err(DomainError::invalid_state("already at final step"));
        }
        self.current_step_index += 1;
        self.record_current_step(clock.now());
        Ok(())
    }

    pub fn move_to_previous_step(&mut self, clock: &dyn Clock) -> DomainResult<()> {
        if !self.can_move_to_previous_step() {
            return Err(DomainError::invalid_state("already at first step"));
        }
        self.current_step_index -= 1;
        self.record_current_step(clock.now());
        Ok(())
    }

    /// Copy of this status moved one step forward.
    pub fn advanced(&self, clock: &dyn Clock) -> DomainResult<Self> {
        let mut next = self.clone();
        next.move_to_next_step(clock)?;
        Ok(next)
    }

    /// Copy of this status moved one step back.
    pub fn retreated(&self, clock: &dyn Clock) -> DomainResult<Self> {
        let mut previous = self.clone();
        previous.move_to_previous_step(clock)?;
        Ok(previous)
    }

    fn record_current_step(&mut self, at: DateTime<Utc>) {
        self.status_updates.insert(self.current_step_id(), at);
    }

    pub fn current_step_id(&self) -> StepId {
        self.steps[self.current_step_index]
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn steps(&self) -> &[StepId] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn status_updates(&self) -> &BTreeMap<StepId, DateTime<Utc>> {
        &self.status_updates
    }

    pub fn step_timestamp(&self, step: StepId) -> Option<DateTime<Utc>> {
        self.status_updates.get(&step).copied()
    }

    pub fn progress(&self) -> OrderProgress {
        OrderProgress {
            current_step: self.current_step_index,
            total_steps: self.steps.len(),
            current_step_id: self.current_step_id(),
            step_history: self.status_updates.clone(),
        }
    }
}

impl ValueObject for OrderStatus {}

/// Read-only progress view of a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProgress {
    pub current_step: usize,
    pub total_steps: usize,
    pub current_step_id: StepId,
    pub step_history: BTreeMap<StepId, DateTime<Utc>>,
}

impl OrderProgress {
    pub fn percent_complete(&self) -> f64 {
        (self.current_step as f64 / self.total_steps as f64) * 100.0
    }
}
