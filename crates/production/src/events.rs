use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{ItemId, OrderId, ProductTypeId};
use orderflow_events::Event;

use crate::item::OrderItem;
use crate::status::OrderStatus;

/// Event: OrderCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub customer_name: String,
    pub priority: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub order_id: OrderId,
    pub item: OrderItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemStatusChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatusChanged {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub old_status: OrderStatus,
    pub new_status: OrderStatus,
    pub occurred_at: DateTime<Utc>,
}

impl ItemStatusChanged {
    pub fn is_progression(&self) -> bool {
        self.new_status.current_step_index() > self.old_status.current_step_index()
    }

    pub fn is_regression(&self) -> bool {
        self.new_status.current_step_index() < self.old_status.current_step_index()
    }
}

/// Event: ProductTypeChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTypeChanged {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub old_product_type_id: ProductTypeId,
    pub new_product_type_id: ProductTypeId,
    pub occurred_at: DateTime<Utc>,
}

impl ProductTypeChanged {
    /// The item left the generic type for its first concrete pipeline.
    pub fn is_initial_assignment(&self) -> bool {
        self.old_product_type_id.is_generic()
    }
}

/// Everything that can happen to an order, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    OrderCreated(OrderCreated),
    ItemAdded(ItemAdded),
    ItemStatusChanged(ItemStatusChanged),
    ProductTypeChanged(ProductTypeChanged),
}

impl OrderEvent {
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::OrderCreated(e) => e.order_id,
            OrderEvent::ItemAdded(e) => e.order_id,
            OrderEvent::ItemStatusChanged(e) => e.order_id,
            OrderEvent::ProductTypeChanged(e) => e.order_id,
        }
    }

    /// The item this event concerns, if any.
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            OrderEvent::OrderCreated(_) => None,
            OrderEvent::ItemAdded(e) => Some(e.item.item_id()),
            OrderEvent::ItemStatusChanged(e) => Some(e.item_id),
            OrderEvent::ProductTypeChanged(e) => Some(e.item_id),
        }
    }
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated(_) => "production.order.created",
            OrderEvent::ItemAdded(_) => "production.order.item_added",
            OrderEvent::ItemStatusChanged(_) => "production.order.item_status_changed",
            OrderEvent::ProductTypeChanged(_) => "production.order.product_type_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderCreated(e) => e.occurred_at,
            OrderEvent::ItemAdded(e) => e.occurred_at,
            OrderEvent::ItemStatusChanged(e) => e.occurred_at,
            OrderEvent::ProductTypeChanged(e) => e.occurred_at,
        }
    }
}
