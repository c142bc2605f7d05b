//! Order business rule errors.

use thiserror::Error;

use orderflow_core::{DomainError, ItemId};

use crate::status::OrderStatus;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Validation, invariant and state machine failures from the building blocks.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(
        "invalid status transition for item {item_id}: cannot move from step {} to step {}",
        .current.current_step_index(),
        .target.current_step_index()
    )]
    InvalidStatusTransition {
        item_id: ItemId,
        current: Box<OrderStatus>,
        target: Box<OrderStatus>,
    },

    #[error("invalid product type transition for item {item_id}: {reason}")]
    InvalidProductTypeTransition { item_id: ItemId, reason: String },

    #[error("item {0} is not part of the order")]
    ItemNotFound(ItemId),

    #[error("item {0} is already part of the order")]
    DuplicateItem(ItemId),
}

impl OrderError {
    pub fn status_transition(item_id: ItemId, current: &OrderStatus, target: &OrderStatus) -> Self {
        Self::InvalidStatusTransition {
            item_id,
            current: Box::new(current.clone()),
            target: Box::new(target.clone()),
        }
    }

    pub fn product_type_transition(item_id: ItemId, reason: impl Into<String>) -> Self {
        Self::InvalidProductTypeTransition {
            item_id,
            reason: reason.into(),
        }
    }

    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            OrderError::InvalidStatusTransition { item_id, .. }
            | OrderError::InvalidProductTypeTransition { item_id, .. } => Some(*item_id),
            OrderError::ItemNotFound(item_id) | OrderError::DuplicateItem(item_id) => Some(*item_id),
            OrderError::Domain(_) => None,
        }
    }
}
