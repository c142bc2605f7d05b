use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use orderflow_core::{AggregateRoot, Clock, DomainError, ItemId, OrderId, SystemClock};
use orderflow_events::EventEnvelope;

use crate::customer::CustomerInfo;
use crate::error::OrderError;
use crate::estimation::OrderEstimation;
use crate::events::{ItemAdded, ItemStatusChanged, OrderCreated, OrderEvent, ProductTypeChanged};
use crate::item::OrderItem;
use crate::status::OrderStatus;
use crate::timeline::OrderTimeline;
use crate::transition::ProductTypeTransition;

/// Aggregate type name stamped on every envelope.
pub const AGGREGATE_TYPE: &str = "production.order";

/// Everything needed to construct an [`Order`].
///
/// `id`, `customer_info`, `timeline` and `estimation` are mandatory; `items`
/// defaults to empty and the clock to [`SystemClock`].
#[derive(Debug, Default)]
pub struct OrderParts {
    pub id: Option<OrderId>,
    pub customer_info: Option<CustomerInfo>,
    pub timeline: Option<OrderTimeline>,
    pub estimation: Option<OrderEstimation>,
    pub items: Vec<OrderItem>,
    pub clock: Option<Arc<dyn Clock>>,
}

impl OrderParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: OrderId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_customer_info(mut self, customer_info: CustomerInfo) -> Self {
        self.customer_info = Some(customer_info);
        self
    }

    pub fn with_timeline(mut self, timeline: OrderTimeline) -> Self {
        self.timeline = Some(timeline);
        self
    }

    pub fn with_estimation(mut self, estimation: OrderEstimation) -> Self {
        self.estimation = Some(estimation);
        self
    }

    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = OrderItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }
}

/// Serializable state of an order: items, timeline and estimation.
///
/// Events are not part of the snapshot; a restored order starts a new log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub customer_info: CustomerInfo,
    pub items: Vec<OrderItem>,
    pub timeline: OrderTimeline,
    pub estimation: OrderEstimation,
}

/// Aggregate root: Order.
///
/// Owns its items, timeline and event log. Every mutation either fully
/// succeeds (item replaced, timeline updated, event appended) or returns an
/// error before touching any state.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    customer_info: CustomerInfo,
    items: BTreeMap<ItemId, OrderItem>,
    timeline: OrderTimeline,
    estimation: OrderEstimation,
    events: Vec<EventEnvelope<OrderEvent>>,
    clock: Arc<dyn Clock>,
}

impl Order {
    pub fn new(parts: OrderParts) -> Result<Self, OrderError> {
        let OrderParts {
            id,
            customer_info,
            timeline,
            estimation,
            items: initial_items,
            clock,
        } = parts;

        let id = id.ok_or_else(|| DomainError::invariant("order must have an id"))?;
        let customer_info = customer_info
            .ok_or_else(|| DomainError::invariant("order must have customer information"))?;
        let timeline = timeline.ok_or_else(|| DomainError::invariant("order must have a timeline"))?;
        let estimation =
            estimation.ok_or_else(|| DomainError::invariant("order must have an estimation"))?;
        let clock = clock.unwrap_or_else(|| Arc::new(SystemClock));

        if timeline.is_priority() != estimation.is_priority() {
            return Err(DomainError::invariant(
                "timeline and estimation disagree on order priority",
            )
            .into());
        }

        let mut items = BTreeMap::new();
        for item in initial_items {
            let item_id = item.item_id();
            if items.insert(item_id, item).is_some() {
                return Err(OrderError::DuplicateItem(item_id));
            }
        }

        let mut order = Self {
            id,
            customer_info,
            items,
            timeline,
            estimation,
            events: Vec::new(),
            clock,
        };
        let created = OrderEvent::OrderCreated(OrderCreated {
            order_id: order.id,
            customer_name: order.customer_info.name().to_owned(),
            priority: order.timeline.is_priority(),
            occurred_at: order.clock.now(),
        });
        order.record(created);
        Ok(order)
    }

    /// Rebuild an order from a snapshot, as a persistence collaborator would.
    ///
    /// Fails when the rebuilt order does not satisfy [`Order::invariants_hold`].
    pub fn from_snapshot(snapshot: OrderSnapshot, clock: Arc<dyn Clock>) -> Result<Self, OrderError> {
        let order = Self::new(
            OrderParts::new()
                .with_id(snapshot.id)
                .with_customer_info(snapshot.customer_info)
                .with_timeline(snapshot.timeline)
                .with_estimation(snapshot.estimation)
                .with_items(snapshot.items)
                .with_clock(clock),
        )?;
        if !order.invariants_hold() {
            return Err(DomainError::invariant(format!(
                "snapshot of order {} is inconsistent",
                order.id
            ))
            .into());
        }
        Ok(order)
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            id: self.id,
            customer_info: self.customer_info.clone(),
            items: self.items.values().cloned().collect(),
            timeline: self.timeline.clone(),
            estimation: self.estimation.clone(),
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_info(&self) -> &CustomerInfo {
        &self.customer_info
    }

    pub fn timeline(&self) -> &OrderTimeline {
        &self.timeline
    }

    pub fn estimation(&self) -> &OrderEstimation {
        &self.estimation
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Items ordered by catalog item id.
    pub fn items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn find_item(&self, item_id: ItemId) -> Option<&OrderItem> {
        self.items.get(&item_id)
    }

    pub fn has_item(&self, item_id: ItemId) -> bool {
        self.items.contains_key(&item_id)
    }

    /// Event payloads in the order they were recorded.
    pub fn events(&self) -> impl Iterator<Item = &OrderEvent> {
        self.events.iter().map(EventEnvelope::payload)
    }

    pub fn envelopes(&self) -> &[EventEnvelope<OrderEvent>] {
        &self.events
    }

    /// Structural consistency of the aggregate.
    pub fn invariants_hold(&self) -> bool {
        let keyed_by_own_id = self
            .items
            .iter()
            .all(|(item_id, item)| *item_id == item.item_id() && item.quantity() > 0);
        let starts_with_creation = matches!(
            self.events.first().map(EventEnvelope::payload),
            Some(OrderEvent::OrderCreated(_))
        );
        let events_belong_here = self.events.iter().all(|e| e.payload().order_id() == self.id);

        keyed_by_own_id
            && starts_with_creation
            && events_belong_here
            && self.timeline.is_priority() == self.estimation.is_priority()
    }

    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        let item_id = item.item_id();
        if self.items.contains_key(&item_id) {
            return Err(OrderError::DuplicateItem(item_id));
        }

        let event = OrderEvent::ItemAdded(ItemAdded {
            order_id: self.id,
            item: item.clone(),
            occurred_at: self.clock.now(),
        });
        self.items.insert(item_id, item);
        self.record(event);
        Ok(())
    }

    /// Replace an item's status with `new_status`, one step away from the current one.
    ///
    /// The timeline entry is stamped with the order clock's "now", whatever
    /// timestamps `new_status` carries.
    pub fn update_item_status(
        &mut self,
        item_id: ItemId,
        new_status: OrderStatus,
    ) -> Result<(), OrderError> {
        let current = self
            .items
            .get(&item_id)
            .ok_or(OrderError::ItemNotFound(item_id))?;
        if !current.can_change_status(&new_status) {
            return Err(OrderError::status_transition(
                item_id,
                current.status(),
                &new_status,
            ));
        }

        let updated = current.with_status(new_status.clone())?;
        let old_status = current.status().clone();
        let now = self.clock.now();

        self.items.insert(item_id, updated);
        self.timeline
            .record_item_status(item_id, new_status.current_step_id(), now);
        self.record(OrderEvent::ItemStatusChanged(ItemStatusChanged {
            order_id: self.id,
            item_id,
            old_status,
            new_status,
            occurred_at: now,
        }));
        Ok(())
    }

    /// Give a generic item the pipeline of a concrete product type.
    ///
    /// The new status is anchored at the item's first recorded step, or at
    /// order creation when nothing was recorded yet.
    pub fn update_item_product_type(
        &mut self,
        item_id: ItemId,
        transition: &ProductTypeTransition,
    ) -> Result<(), OrderError> {
        let current = self
            .items
            .get(&item_id)
            .ok_or(OrderError::ItemNotFound(item_id))?;
        if transition.item_id() != item_id {
            return Err(OrderError::product_type_transition(
                item_id,
                format!("transition was built for item {}", transition.item_id()),
            ));
        }
        if !current.can_change_product_type() {
            return Err(OrderError::product_type_transition(
                item_id,
                format!(
                    "item has product type {}; only generic items can be reclassified",
                    current.product_type_id()
                ),
            ));
        }
        if !transition.is_valid_transition() {
            return Err(OrderError::product_type_transition(
                item_id,
                "target product type must not be generic",
            ));
        }

        let anchor = self
            .timeline
            .item_started_at(item_id)
            .unwrap_or(self.timeline.order_created());
        let new_status = transition
            .create_new_order_status(anchor)
            .map_err(|e| OrderError::product_type_transition(item_id, e.to_string()))?;
        let old_product_type_id = current.product_type_id();
        let updated = current.with_new_product_type(
            transition.target_product_type_id(),
            transition.target_product_type_name(),
            new_status,
        )?;

        self.items.insert(item_id, updated);
        self.record(OrderEvent::ProductTypeChanged(ProductTypeChanged {
            order_id: self.id,
            item_id,
            old_product_type_id,
            new_product_type_id: transition.target_product_type_id(),
            occurred_at: self.clock.now(),
        }));
        Ok(())
    }

    pub fn is_delayed(&self) -> bool {
        self.estimation.is_delayed(&self.timeline, self.clock.as_ref())
    }

    pub fn completion_percentage(&self) -> f64 {
        self.estimation
            .completion_percentage(&self.timeline, self.clock.as_ref())
    }

    pub fn item_delay_status(&self) -> BTreeMap<ItemId, bool> {
        self.estimation
            .item_delay_status(&self.timeline, self.clock.as_ref())
    }

    fn record(&mut self, event: OrderEvent) {
        let sequence_number = self.events.len() as u64 + 1;
        self.events.push(EventEnvelope::record(
            self.id,
            AGGREGATE_TYPE,
            sequence_number,
            event,
        ));
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.events.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use orderflow_core::{FixedClock, ProductTypeId, StepId};

    use crate::catalog::{CatalogItem, ProductType};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap()
    }

    fn steps(ids: &[u64]) -> Vec<StepId> {
        ids.iter().copied().map(StepId::new).collect()
    }

    fn typed(id: u64, clock: &FixedClock) -> OrderItem {
        let item = CatalogItem {
            id: ItemId::new(id),
            name: format!("item-{id}"),
            product_type_id: ProductTypeId::new(2),
            image: None,
        };
        OrderItem::new(item, 1, "Mugs", OrderStatus::start(steps(&[10, 20, 30]), clock).unwrap())
            .unwrap()
    }

    fn generic(id: u64, clock: &FixedClock) -> OrderItem {
        let item = CatalogItem::generic(ItemId::new(id), format!("item-{id}"), None);
        OrderItem::new(item, 1, "Generic", OrderStatus::start(steps(&[1]), clock).unwrap()).unwrap()
    }

    fn parts(clock: Arc<FixedClock>) -> OrderParts {
        let quantities = BTreeMap::from([(ItemId::new(1), 2)]);
        let minutes = BTreeMap::from([(ItemId::new(1), 10)]);
        OrderParts::new()
            .with_id(OrderId::new(42).unwrap())
            .with_customer_info(CustomerInfo::new("Acme", "", false).unwrap())
            .with_timeline(OrderTimeline::new(created(), false))
            .with_estimation(OrderEstimation::new(quantities, minutes, false).unwrap())
            .with_clock(clock)
    }

    #[test]
    fn missing_mandatory_parts_are_invariant_violations() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut incomplete = parts(clock);
        incomplete.timeline = None;

        let err = Order::new(incomplete).unwrap_err();
        assert!(matches!(
            err,
            OrderError::Domain(DomainError::InvariantViolation(_))
        ));
        assert!(Order::new(OrderParts::new()).is_err());
    }

    #[test]
    fn construction_records_a_created_event() {
        let clock = Arc::new(FixedClock::new(created()));
        let order = Order::new(parts(clock)).unwrap();

        assert_eq!(order.version(), 1);
        assert_eq!(order.item_count(), 0);
        assert!(order.invariants_hold());
        assert!(matches!(
            order.events().next(),
            Some(OrderEvent::OrderCreated(e)) if e.order_id == OrderId::new(42).unwrap()
        ));
        assert_eq!(order.envelopes()[0].sequence_number(), 1);
        assert_eq!(order.envelopes()[0].aggregate_type(), AGGREGATE_TYPE);
    }

    #[test]
    fn priority_mismatch_is_rejected() {
        let clock = Arc::new(FixedClock::new(created()));
        let err = Order::new(parts(clock).with_timeline(OrderTimeline::new(created(), true))).unwrap_err();
        assert!(matches!(err, OrderError::Domain(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn duplicate_items_are_rejected_without_recording() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();

        order.add_item(typed(1, &clock)).unwrap();
        let err = order.add_item(typed(1, &clock)).unwrap_err();

        assert_eq!(err, OrderError::DuplicateItem(ItemId::new(1)));
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.version(), 2);
    }

    #[test]
    fn status_updates_replace_item_and_record_timeline() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(typed(1, &clock)).unwrap();

        clock.advance(Duration::minutes(5));
        let next = order.find_item(ItemId::new(1)).unwrap().status().advanced(clock.as_ref()).unwrap();
        order.update_item_status(ItemId::new(1), next).unwrap();

        let item = order.find_item(ItemId::new(1)).unwrap();
        assert_eq!(item.current_step_id(), StepId::new(20));
        assert_eq!(
            order.timeline().status_timestamp(ItemId::new(1), StepId::new(20)),
            Some(created() + Duration::minutes(5))
        );
        match order.events().last() {
            Some(OrderEvent::ItemStatusChanged(e)) => assert!(e.is_progression()),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn rejected_status_update_leaves_order_untouched() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(typed(1, &clock)).unwrap();

        let skip = order
            .find_item(ItemId::new(1))
            .unwrap()
            .status()
            .advanced(clock.as_ref())
            .and_then(|s| s.advanced(clock.as_ref()))
            .unwrap();
        let before = order.snapshot();

        let err = order.update_item_status(ItemId::new(1), skip).unwrap_err();
        assert!(matches!(err, OrderError::InvalidStatusTransition { .. }));
        assert_eq!(err.item_id(), Some(ItemId::new(1)));
        assert_eq!(order.snapshot(), before);
        assert_eq!(order.version(), 2);
    }

    #[test]
    fn unknown_items_are_reported() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        let status = OrderStatus::start(steps(&[1, 2]), clock.as_ref()).unwrap();

        assert_eq!(
            order.update_item_status(ItemId::new(9), status).unwrap_err(),
            OrderError::ItemNotFound(ItemId::new(9))
        );
    }

    #[test]
    fn product_type_change_anchors_at_order_creation_without_history() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(generic(3, &clock)).unwrap();
        clock.advance(Duration::hours(2));

        let transition = ProductTypeTransition::new(
            ItemId::new(3),
            ProductTypeId::GENERIC,
            ProductType::new(ProductTypeId::new(5), "Frames", steps(&[7, 8, 9])),
        )
        .unwrap();
        order.update_item_product_type(ItemId::new(3), &transition).unwrap();

        let item = order.find_item(ItemId::new(3)).unwrap();
        assert_eq!(item.product_type_id(), ProductTypeId::new(5));
        assert_eq!(item.current_step_index(), 0);
        assert_eq!(item.status().step_timestamp(StepId::new(7)), Some(created()));
        assert!(matches!(
            order.events().last(),
            Some(OrderEvent::ProductTypeChanged(e)) if e.is_initial_assignment()
        ));
    }

    #[test]
    fn product_type_change_on_typed_item_fails() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(typed(1, &clock)).unwrap();

        let transition = ProductTypeTransition::new(
            ItemId::new(1),
            ProductTypeId::GENERIC,
            ProductType::new(ProductTypeId::new(5), "Frames", steps(&[7])),
        )
        .unwrap();
        let err = order.update_item_product_type(ItemId::new(1), &transition).unwrap_err();

        assert!(matches!(err, OrderError::InvalidProductTypeTransition { .. }));
        assert_eq!(order.find_item(ItemId::new(1)).unwrap().product_type_id(), ProductTypeId::new(2));
    }

    fn frames_transition(item_id: u64) -> ProductTypeTransition {
        ProductTypeTransition::new(
            ItemId::new(item_id),
            ProductTypeId::GENERIC,
            ProductType::new(ProductTypeId::new(5), "Frames", steps(&[7, 8])),
        )
        .unwrap()
    }

    fn assert_rejected_without_changes(
        order: &mut Order,
        item_id: ItemId,
        transition: &ProductTypeTransition,
    ) -> OrderError {
        let before = order.snapshot();
        let version = order.version();
        let err = order.update_item_product_type(item_id, transition).unwrap_err();
        assert_eq!(order.snapshot(), before);
        assert_eq!(order.version(), version);
        err
    }

    #[test]
    fn product_type_change_for_unknown_item_is_reported() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(generic(3, &clock)).unwrap();

        let err = assert_rejected_without_changes(&mut order, ItemId::new(9), &frames_transition(9));
        assert_eq!(err, OrderError::ItemNotFound(ItemId::new(9)));
    }

    #[test]
    fn product_type_change_to_generic_target_is_rejected() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(generic(3, &clock)).unwrap();

        let transition = ProductTypeTransition::new(
            ItemId::new(3),
            ProductTypeId::GENERIC,
            ProductType::new(ProductTypeId::GENERIC, "Generic", steps(&[1, 2])),
        )
        .unwrap();
        let err = assert_rejected_without_changes(&mut order, ItemId::new(3), &transition);
        assert!(matches!(
            err,
            OrderError::InvalidProductTypeTransition { item_id, .. } if item_id == ItemId::new(3)
        ));
    }

    #[test]
    fn product_type_change_to_empty_pipeline_is_rejected() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(generic(3, &clock)).unwrap();

        let transition = ProductTypeTransition::new(
            ItemId::new(3),
            ProductTypeId::GENERIC,
            ProductType::new(ProductTypeId::new(5), "Frames", Vec::new()),
        )
        .unwrap();
        let err = assert_rejected_without_changes(&mut order, ItemId::new(3), &transition);
        assert!(matches!(err, OrderError::InvalidProductTypeTransition { .. }));
    }

    #[test]
    fn transition_built_for_another_item_is_rejected() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(generic(3, &clock)).unwrap();
        order.add_item(generic(5, &clock)).unwrap();

        let err = assert_rejected_without_changes(&mut order, ItemId::new(3), &frames_transition(5));
        assert!(matches!(err, OrderError::InvalidProductTypeTransition { .. }));
        assert!(order.find_item(ItemId::new(3)).unwrap().is_generic_type());
    }

    #[test]
    fn status_change_is_stamped_with_the_order_clock() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(typed(1, &clock)).unwrap();

        let month_ago = created() - Duration::days(30);
        let stale = OrderStatus::restore(
            steps(&[10, 20, 30]),
            1,
            BTreeMap::from([(StepId::new(10), created()), (StepId::new(20), month_ago)]),
        )
        .unwrap();
        clock.advance(Duration::minutes(30));
        order.update_item_status(ItemId::new(1), stale).unwrap();

        let now = created() + Duration::minutes(30);
        assert_eq!(
            order.timeline().status_timestamp(ItemId::new(1), StepId::new(20)),
            Some(now)
        );
        assert_eq!(order.timeline().total_duration(), Duration::minutes(30));
        assert!(matches!(
            order.events().last(),
            Some(OrderEvent::ItemStatusChanged(e)) if e.occurred_at == now
        ));
    }

    #[test]
    fn created_event_priority_follows_the_timeline() {
        let clock = Arc::new(FixedClock::new(created()));
        let order = Order::new(
            parts(clock).with_customer_info(CustomerInfo::new("Acme", "", true).unwrap()),
        )
        .unwrap();

        assert!(matches!(
            order.events().next(),
            Some(OrderEvent::OrderCreated(e)) if !e.priority
        ));
    }

    #[test]
    fn tampered_snapshots_do_not_load() {
        let clock = Arc::new(FixedClock::new(created()));
        let mut order = Order::new(parts(clock.clone())).unwrap();
        order.add_item(typed(1, &clock)).unwrap();
        let valid = serde_json::to_value(order.snapshot()).unwrap();

        let tampered: [(&[&str], serde_json::Value); 4] = [
            (&["items", "0", "quantity"], serde_json::json!(0)),
            (&["estimation", "item_quantities", "1"], serde_json::json!(0)),
            (&["estimation", "policy", "priority_multiplier"], serde_json::json!(3.0)),
            (&["customer_info", "name"], serde_json::json!("   ")),
        ];
        for (path, replacement) in tampered {
            let mut value = valid.clone();
            let pointer = format!("/{}", path.join("/"));
            *value.pointer_mut(&pointer).unwrap() = replacement;
            assert!(
                serde_json::from_value::<OrderSnapshot>(value).is_err(),
                "{pointer} was accepted"
            );
        }

        let mut snapshot: OrderSnapshot = serde_json::from_value(valid).unwrap();
        snapshot.timeline = OrderTimeline::new(created(), true);
        assert!(matches!(
            Order::from_snapshot(snapshot, clock).unwrap_err(),
            OrderError::Domain(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn queries_delegate_to_estimation() {
        let clock = Arc::new(FixedClock::new(created()));
        let order = Order::new(parts(clock.clone())).unwrap();

        clock.advance(Duration::minutes(10));
        assert_eq!(order.completion_percentage(), 50.0);
        assert!(!order.is_delayed());

        clock.advance(Duration::minutes(11));
        assert!(order.is_delayed());
        assert_eq!(order.item_delay_status().get(&ItemId::new(1)), Some(&true));
    }
}
