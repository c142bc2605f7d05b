//! Per-order history ledger.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{ItemId, StepId};

/// Timestamps of every (item, step) pair observed on an order.
///
/// Entries are upserted and never removed: recording a step an item already
/// visited replaces that step's timestamp instead of adding a second entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTimeline {
    order_created: DateTime<Utc>,
    priority: bool,
    item_status_timestamps: BTreeMap<ItemId, BTreeMap<StepId, DateTime<Utc>>>,
}

impl OrderTimeline {
    pub fn new(order_created: DateTime<Utc>, priority: bool) -> Self {
        Self {
            order_created,
            priority,
            item_status_timestamps: BTreeMap::new(),
        }
    }

    pub fn record_item_status(&mut self, item_id: ItemId, step_id: StepId, timestamp: DateTime<Utc>) {
        self.item_status_timestamps
            .entry(item_id)
            .or_default()
            .insert(step_id, timestamp);
    }

    /// Span between the earliest and latest observation of an item.
    pub fn item_duration(&self, item_id: ItemId) -> Duration {
        let Some(timestamps) = self.item_status_timestamps.get(&item_id) else {
            return Duration::zero();
        };
        match (timestamps.values().min(), timestamps.values().max()) {
            (Some(earliest), Some(latest)) => *latest - *earliest,
            _ => Duration::zero(),
        }
    }

    /// Span between order creation and the latest observation of any item.
    pub fn total_duration(&self) -> Duration {
        match self.all_timestamps().max() {
            Some(latest) => latest - self.order_created,
            None => Duration::zero(),
        }
    }

    /// Latest observation of any item, or the creation time when nothing was recorded.
    pub fn latest_update(&self) -> DateTime<Utc> {
        self.all_timestamps().max().unwrap_or(self.order_created)
    }

    /// Earliest observation of an item.
    pub fn item_started_at(&self, item_id: ItemId) -> Option<DateTime<Utc>> {
        self.item_status_timestamps
            .get(&item_id)
            .and_then(|timestamps| timestamps.values().min().copied())
    }

    pub fn item_timeline(&self, item_id: ItemId) -> Option<&BTreeMap<StepId, DateTime<Utc>>> {
        self.item_status_timestamps.get(&item_id)
    }

    pub fn has_status(&self, item_id: ItemId, step_id: StepId) -> bool {
        self.status_timestamp(item_id, step_id).is_some()
    }

    pub fn status_timestamp(&self, item_id: ItemId, step_id: StepId) -> Option<DateTime<Utc>> {
        self.item_status_timestamps
            .get(&item_id)
            .and_then(|timestamps| timestamps.get(&step_id).copied())
    }

    /// Steps of an item ordered by when they were observed.
    ///
    /// Recomputed from the ledger on every call.
    pub fn item_statuses_sorted(
        &self,
        item_id: ItemId,
    ) -> impl Iterator<Item = (StepId, DateTime<Utc>)> + use<> {
        let mut entries: Vec<(StepId, DateTime<Utc>)> = self
            .item_status_timestamps
            .get(&item_id)
            .map(|timestamps| timestamps.iter().map(|(step, at)| (*step, *at)).collect())
            .unwrap_or_default();
        entries.sort_by_key(|(_, at)| *at);
        entries.into_iter()
    }

    pub fn order_created(&self) -> DateTime<Utc> {
        self.order_created
    }

    pub fn is_priority(&self) -> bool {
        self.priority
    }

    fn all_timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.item_status_timestamps
            .values()
            .flat_map(|timestamps| timestamps.values().copied())
    }
}
