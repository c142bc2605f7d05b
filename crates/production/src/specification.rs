//! Composable business-rule predicates.
//!
//! A specification is any `Fn(&T) -> bool`. [`and`], [`or`] and [`not`]
//! combine specifications into new ones and evaluate left to right with the
//! usual short-circuiting.

use orderflow_core::ItemId;

use crate::order::Order;

pub trait Specification<T: ?Sized> {
    fn is_satisfied_by(&self, candidate: &T) -> bool;
}

impl<T: ?Sized, F> Specification<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self(candidate)
    }
}

/// Satisfied when both are; `right` is not evaluated if `left` fails.
pub fn and<T: ?Sized>(
    left: impl Specification<T>,
    right: impl Specification<T>,
) -> impl Specification<T> {
    move |candidate: &T| left.is_satisfied_by(candidate) && right.is_satisfied_by(candidate)
}

/// Satisfied when either is; `right` is not evaluated if `left` holds.
pub fn or<T: ?Sized>(
    left: impl Specification<T>,
    right: impl Specification<T>,
) -> impl Specification<T> {
    move |candidate: &T| left.is_satisfied_by(candidate) || right.is_satisfied_by(candidate)
}

pub fn not<T: ?Sized>(inner: impl Specification<T>) -> impl Specification<T> {
    move |candidate: &T| !inner.is_satisfied_by(candidate)
}

pub fn has_item(item_id: ItemId) -> impl Specification<Order> {
    move |order: &Order| order.has_item(item_id)
}

/// The item exists and is still generic.
pub fn can_change_product_type(item_id: ItemId) -> impl Specification<Order> {
    move |order: &Order| {
        order
            .find_item(item_id)
            .is_some_and(|item| item.can_change_product_type())
    }
}

pub fn is_generic_item(item_id: ItemId) -> impl Specification<Order> {
    move |order: &Order| {
        order
            .find_item(item_id)
            .is_some_and(|item| item.is_generic_type())
    }
}

pub fn order_invariants_hold() -> impl Specification<Order> {
    |order: &Order| order.invariants_hold()
}
