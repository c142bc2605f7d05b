use std::collections::BTreeMap;
use std::sync::Arc;

use orderflow_core::{Clock, DomainError, DomainResult, ItemId, OrderId, SystemClock};

use crate::catalog::{CatalogItem, ProductType};
use crate::customer::CustomerInfo;
use crate::error::OrderError;
use crate::estimation::{EstimationPolicy, OrderEstimation};
use crate::item::OrderItem;
use crate::order::{Order, OrderParts};
use crate::status::OrderStatus;
use crate::timeline::OrderTimeline;

/// Builds new orders and their items against one clock and estimation policy.
#[derive(Debug, Clone)]
pub struct OrderFactory {
    clock: Arc<dyn Clock>,
    policy: EstimationPolicy,
}

impl Default for OrderFactory {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl OrderFactory {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            policy: EstimationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: EstimationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// A new order with no items, created "now".
    pub fn create_order(
        &self,
        id: OrderId,
        customer_info: CustomerInfo,
        item_quantities: BTreeMap<ItemId, u32>,
        item_processing_minutes: BTreeMap<ItemId, u32>,
        priority: bool,
    ) -> Result<Order, OrderError> {
        let timeline = OrderTimeline::new(self.clock.now(), priority);
        let estimation = OrderEstimation::with_policy(
            item_quantities,
            item_processing_minutes,
            priority,
            self.policy,
        )?;

        Order::new(
            OrderParts::new()
                .with_id(id)
                .with_customer_info(customer_info)
                .with_timeline(timeline)
                .with_estimation(estimation)
                .with_clock(self.clock.clone()),
        )
    }

    /// An item at the first step of `product_type`'s pipeline.
    pub fn order_item(
        &self,
        catalog_item: CatalogItem,
        product_type: &ProductType,
        quantity: u32,
    ) -> DomainResult<OrderItem> {
        if catalog_item.product_type_id != product_type.id {
            return Err(DomainError::validation(format!(
                "item {} has product type {}, not {}",
                catalog_item.id, catalog_item.product_type_id, product_type.id
            )));
        }
        let status = OrderStatus::start(product_type.steps.clone(), self.clock.as_ref())?;
        OrderItem::new(catalog_item, quantity, product_type.name.clone(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use orderflow_core::{FixedClock, ProductTypeId, StepId};

    fn factory() -> OrderFactory {
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 6, 0, 0).unwrap();
        OrderFactory::new(Arc::new(FixedClock::new(now)))
    }

    #[test]
    fn create_order_wires_timeline_and_estimation() {
        let factory = factory();
        let order = factory
            .create_order(
                OrderId::new(11).unwrap(),
                CustomerInfo::new("Acme", "rush", true).unwrap(),
                BTreeMap::from([(ItemId::new(1), 4)]),
                BTreeMap::from([(ItemId::new(1), 10)]),
                true,
            )
            .unwrap();

        assert_eq!(order.timeline().order_created(), factory.clock().now());
        assert!(order.timeline().is_priority());
        assert_eq!(order.estimation().total_estimated_minutes(), 30);
    }

    #[test]
    fn create_order_rejects_zero_quantities() {
        let err = factory()
            .create_order(
                OrderId::new(11).unwrap(),
                CustomerInfo::new("Acme", "", false).unwrap(),
                BTreeMap::from([(ItemId::new(1), 0)]),
                BTreeMap::new(),
                false,
            )
            .unwrap_err();
        assert!(matches!(err, OrderError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn order_item_starts_at_first_step() {
        let factory = factory();
        let product_type = ProductType::new(ProductTypeId::new(2), "Mugs", vec![StepId::new(5), StepId::new(6)]);
        let item = CatalogItem {
            id: ItemId::new(1),
            name: "Mug".into(),
            product_type_id: ProductTypeId::new(2),
            image: None,
        };

        let order_item = factory.order_item(item.clone(), &product_type, 3).unwrap();
        assert_eq!(order_item.current_step_id(), StepId::new(5));
        assert_eq!(order_item.product_type_name(), "Mugs");
        assert_eq!(
            order_item.status().step_timestamp(StepId::new(5)),
            Some(factory.clock().now())
        );

        let other = ProductType::new(ProductTypeId::new(3), "Frames", vec![StepId::new(1)]);
        assert!(factory.order_item(item, &other, 1).is_err());
    }
}
