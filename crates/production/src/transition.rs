//! Reclassification of generic items into a concrete product type.

use chrono::{DateTime, Utc};

use orderflow_core::{DomainError, DomainResult, ItemId, ProductTypeId, StepId};

use crate::catalog::ProductType;
use crate::status::OrderStatus;

/// A single-use request to give a generic item a concrete pipeline.
///
/// Only items of the generic product type (0) can be reclassified; building a
/// transition from anything else is a programming error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTypeTransition {
    item_id: ItemId,
    source_product_type_id: ProductTypeId,
    target: ProductType,
}

impl ProductTypeTransition {
    pub fn new(
        item_id: ItemId,
        source_product_type_id: ProductTypeId,
        target: ProductType,
    ) -> DomainResult<Self> {
        if !source_product_type_id.is_generic() {
            return Err(DomainError::invalid_state(format!(
                "can only transition from the generic product type ({}), got {}",
                ProductTypeId::GENERIC,
                source_product_type_id
            )));
        }
        Ok(Self {
            item_id,
            source_product_type_id,
            target,
        })
    }

    /// Fresh status at the first step of the target pipeline, timestamped with
    /// `initial_step_time`.
    pub fn create_new_order_status(&self, initial_step_time: DateTime<Utc>) -> DomainResult<OrderStatus> {
        OrderStatus::new(self.target.steps.clone(), initial_step_time)
    }

    pub fn is_valid_transition(&self) -> bool {
        self.source_product_type_id.is_generic() && !self.target.id.is_generic()
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn source_product_type_id(&self) -> ProductTypeId {
        self.source_product_type_id
    }

    pub fn target_product_type_id(&self) -> ProductTypeId {
        self.target.id
    }

    pub fn target_product_type_name(&self) -> &str {
        &self.target.name
    }

    pub fn target_steps(&self) -> &[StepId] {
        &self.target.steps
    }
}
