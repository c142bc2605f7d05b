//! Completion time forecasting.
//!
//! The estimate is a pure function of the order composition (quantity and unit
//! processing minutes per item) and the priority flag. Every "is it late yet"
//! question reads the current instant from an injected [`Clock`].

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{Clock, DomainError, DomainResult, ItemId};

use crate::timeline::OrderTimeline;

/// Minutes per unit used when an item has no processing time of its own.
pub const DEFAULT_UNIT_MINUTES: u32 = 10;

/// Priority orders are estimated 25% faster.
pub const PRIORITY_MULTIPLIER: f64 = 0.75;

/// Tunables of the estimation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationPolicy {
    pub default_unit_minutes: u32,
    pub priority_multiplier: f64,
}

impl Default for EstimationPolicy {
    fn default() -> Self {
        Self {
            default_unit_minutes: DEFAULT_UNIT_MINUTES,
            priority_multiplier: PRIORITY_MULTIPLIER,
        }
    }
}

impl EstimationPolicy {
    pub fn validate(&self) -> DomainResult<()> {
        if self.default_unit_minutes == 0 {
            return Err(DomainError::validation(
                "default_unit_minutes must be positive",
            ));
        }
        if !(self.priority_multiplier > 0.0 && self.priority_multiplier <= 1.0) {
            return Err(DomainError::validation(
                "priority_multiplier must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Immutable estimate of how long an order takes to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EstimationRecord")]
pub struct OrderEstimation {
    item_quantities: BTreeMap<ItemId, u32>,
    item_processing_minutes: BTreeMap<ItemId, u32>,
    priority: bool,
    policy: EstimationPolicy,
}

/// Wire form; deserialization re-runs the constructor checks.
#[derive(Deserialize)]
struct EstimationRecord {
    item_quantities: BTreeMap<ItemId, u32>,
    item_processing_minutes: BTreeMap<ItemId, u32>,
    priority: bool,
    #[serde(default)]
    policy: EstimationPolicy,
}

impl TryFrom<EstimationRecord> for OrderEstimation {
    type Error = DomainError;

    fn try_from(record: EstimationRecord) -> Result<Self, Self::Error> {
        Self::with_policy(
            record.item_quantities,
            record.item_processing_minutes,
            record.priority,
            record.policy,
        )
    }
}

impl OrderEstimation {
    pub fn new(
        item_quantities: BTreeMap<ItemId, u32>,
        item_processing_minutes: BTreeMap<ItemId, u32>,
        priority: bool,
    ) -> DomainResult<Self> {
        Self::with_policy(
            item_quantities,
            item_processing_minutes,
            priority,
            EstimationPolicy::default(),
        )
    }

    pub fn with_policy(
        item_quantities: BTreeMap<ItemId, u32>,
        item_processing_minutes: BTreeMap<ItemId, u32>,
        priority: bool,
        policy: EstimationPolicy,
    ) -> DomainResult<Self> {
        policy.validate()?;
        if let Some((item_id, _)) = item_quantities.iter().find(|(_, quantity)| **quantity == 0) {
            return Err(DomainError::validation(format!(
                "quantity for item {item_id} must be positive"
            )));
        }

        Ok(Self {
            item_quantities,
            item_processing_minutes,
            priority,
            policy,
        })
    }

    pub fn is_priority(&self) -> bool {
        self.priority
    }

    pub fn policy(&self) -> &EstimationPolicy {
        &self.policy
    }

    pub fn item_quantities(&self) -> &BTreeMap<ItemId, u32> {
        &self.item_quantities
    }

    pub fn item_processing_minutes(&self) -> &BTreeMap<ItemId, u32> {
        &self.item_processing_minutes
    }

    fn unit_minutes(&self, item_id: ItemId) -> u64 {
        u64::from(
            self.item_processing_minutes
                .get(&item_id)
                .copied()
                .unwrap_or(self.policy.default_unit_minutes),
        )
    }

    fn with_priority(&self, minutes: u64) -> u64 {
        if self.priority {
            (minutes as f64 * self.policy.priority_multiplier).floor() as u64
        } else {
            minutes
        }
    }

    pub fn total_estimated_minutes(&self) -> u64 {
        let total: u64 = self
            .item_quantities
            .iter()
            .map(|(item_id, quantity)| u64::from(*quantity) * self.unit_minutes(*item_id))
            .sum();
        self.with_priority(total)
    }

    pub fn estimated_duration(&self) -> Duration {
        minutes(self.total_estimated_minutes())
    }

    pub fn estimated_completion(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        start
            .checked_add_signed(self.estimated_duration())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Estimated duration of every item on its own, priority applied.
    pub fn item_estimations(&self) -> BTreeMap<ItemId, Duration> {
        self.item_quantities
            .iter()
            .map(|(item_id, quantity)| {
                let raw = u64::from(*quantity) * self.unit_minutes(*item_id);
                (*item_id, minutes(self.with_priority(raw)))
            })
            .collect()
    }

    pub fn is_delayed(&self, timeline: &OrderTimeline, clock: &dyn Clock) -> bool {
        clock.now() > self.estimated_completion(timeline.order_created())
    }

    /// Elapsed share of the estimate in percent, clamped to 100.
    ///
    /// An order with nothing to estimate counts as complete.
    pub fn completion_percentage(&self, timeline: &OrderTimeline, clock: &dyn Clock) -> f64 {
        let total = self.total_estimated_minutes();
        if total == 0 {
            return 100.0;
        }
        let elapsed = (clock.now() - timeline.order_created()).num_minutes().max(0);
        ((elapsed as f64 * 100.0) / total as f64).min(100.0)
    }

    /// Per item: is it past its own estimate, counted from its first observation?
    pub fn item_delay_status(
        &self,
        timeline: &OrderTimeline,
        clock: &dyn Clock,
    ) -> BTreeMap<ItemId, bool> {
        let now = clock.now();
        self.item_estimations()
            .into_iter()
            .map(|(item_id, estimate)| {
                let started = timeline
                    .item_started_at(item_id)
                    .unwrap_or(timeline.order_created());
                let due = started
                    .checked_add_signed(estimate)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                (item_id, now > due)
            })
            .collect()
    }
}

fn minutes(total: u64) -> Duration {
    i64::try_from(total)
        .ok()
        .and_then(Duration::try_minutes)
        .unwrap_or(Duration::MAX)
}
