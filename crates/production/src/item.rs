use serde::{Deserialize, Serialize};

use orderflow_core::{DomainError, DomainResult, ItemId, ProductTypeId, StepId, ValueObject};

use crate::catalog::CatalogItem;
use crate::status::OrderStatus;

/// One line of an order: a catalog item, how many, and where it is in production.
///
/// Immutable; status and product type changes produce a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderItemRecord")]
pub struct OrderItem {
    item: CatalogItem,
    quantity: u32,
    product_type_name: String,
    status: OrderStatus,
}

#[derive(Deserialize)]
struct OrderItemRecord {
    item: CatalogItem,
    quantity: u32,
    product_type_name: String,
    status: OrderStatus,
}

impl TryFrom<OrderItemRecord> for OrderItem {
    type Error = DomainError;

    fn try_from(record: OrderItemRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.item,
            record.quantity,
            record.product_type_name,
            record.status,
        )
    }
}

impl OrderItem {
    pub fn new(
        item: CatalogItem,
        quantity: u32,
        product_type_name: impl Into<String>,
        status: OrderStatus,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be greater than 0"));
        }
        Ok(Self {
            item,
            quantity,
            product_type_name: product_type_name.into(),
            status,
        })
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn item_id(&self) -> ItemId {
        self.item.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn product_type_id(&self) -> ProductTypeId {
        self.item.product_type_id
    }

    pub fn product_type_name(&self) -> &str {
        &self.product_type_name
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn is_generic_type(&self) -> bool {
        self.item.is_generic()
    }

    pub fn can_change_product_type(&self) -> bool {
        self.is_generic_type()
    }

    /// Generic items never move; typed items move one step at a time along
    /// their own pipeline.
    pub fn can_change_status(&self, new_status: &OrderStatus) -> bool {
        if self.is_generic_type() || new_status.steps() != self.status.steps() {
            return false;
        }
        self.status
            .current_step_index()
            .abs_diff(new_status.current_step_index())
            == 1
    }

    pub fn with_status(&self, new_status: OrderStatus) -> DomainResult<Self> {
        if !self.can_change_status(&new_status) {
            return Err(DomainError::invalid_state(format!(
                "item {} cannot move from step {} to step {}",
                self.item.id,
                self.status.current_step_index(),
                new_status.current_step_index()
            )));
        }
        Ok(Self {
            status: new_status,
            ..self.clone()
        })
    }

    pub fn with_new_product_type(
        &self,
        product_type_id: ProductTypeId,
        product_type_name: impl Into<String>,
        new_status: OrderStatus,
    ) -> DomainResult<Self> {
        if !self.can_change_product_type() {
            return Err(DomainError::invalid_state(format!(
                "item {} is not generic; its product type is fixed",
                self.item.id
            )));
        }
        Ok(Self {
            item: self.item.with_product_type(product_type_id),
            quantity: self.quantity,
            product_type_name: product_type_name.into(),
            status: new_status,
        })
    }

    pub fn current_step_id(&self) -> StepId {
        self.status.current_step_id()
    }

    pub fn current_step_index(&self) -> usize {
        self.status.current_step_index()
    }

    pub fn total_steps(&self) -> usize {
        self.status.step_count()
    }
}

impl ValueObject for OrderItem {}

impl core::fmt::Display for OrderItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "item {} '{}' x{} [{}] step {}/{}",
            self.item.id,
            self.item.name,
            self.quantity,
            self.product_type_name,
            self.current_step_index() + 1,
            self.total_steps()
        )
    }
}
