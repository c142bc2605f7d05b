//! Named mutation requests against an [`Order`].

use orderflow_core::{DomainError, ItemId};
use orderflow_events::Command;

use crate::error::OrderError;
use crate::order::Order;
use crate::specification::{self, Specification};
use crate::status::OrderStatus;
use crate::transition::ProductTypeTransition;

/// Command: move an item to a neighbouring step of its pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateItemStatusCommand {
    item_id: ItemId,
    new_status: OrderStatus,
}

impl UpdateItemStatusCommand {
    pub fn new(item_id: ItemId, new_status: OrderStatus) -> Self {
        Self { item_id, new_status }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn new_status(&self) -> &OrderStatus {
        &self.new_status
    }
}

impl Command for UpdateItemStatusCommand {
    type Aggregate = Order;
    type Error = OrderError;

    fn command_type(&self) -> &'static str {
        "production.order.update_item_status"
    }

    fn execute(&self, order: &mut Order) -> Result<(), OrderError> {
        if specification::is_generic_item(self.item_id).is_satisfied_by(order) {
            return Err(OrderError::product_type_transition(
                self.item_id,
                "generic items have no pipeline; assign a concrete product type before moving steps",
            ));
        }
        order.update_item_status(self.item_id, self.new_status.clone())
    }
}

/// Command: reclassify a generic item into a concrete product type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProductTypeCommand {
    item_id: ItemId,
    transition: ProductTypeTransition,
}

impl UpdateProductTypeCommand {
    pub fn new(item_id: ItemId, transition: ProductTypeTransition) -> Result<Self, DomainError> {
        if transition.item_id() != item_id {
            return Err(DomainError::validation(format!(
                "transition targets item {}, command targets item {item_id}",
                transition.item_id()
            )));
        }
        Ok(Self { item_id, transition })
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn transition(&self) -> &ProductTypeTransition {
        &self.transition
    }
}

impl Command for UpdateProductTypeCommand {
    type Aggregate = Order;
    type Error = OrderError;

    fn command_type(&self) -> &'static str {
        "production.order.update_product_type"
    }

    fn execute(&self, order: &mut Order) -> Result<(), OrderError> {
        let allowed = specification::and(
            specification::has_item(self.item_id),
            specification::can_change_product_type(self.item_id),
        );
        if !allowed.is_satisfied_by(order) {
            return Err(DomainError::invalid_state(format!(
                "cannot update product type for item {}: item not found or cannot change type",
                self.item_id
            ))
            .into());
        }
        order.update_item_product_type(self.item_id, &self.transition)
    }
}
