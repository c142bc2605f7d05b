//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new value. In this domain that applies to customer metadata, step
/// state machines and order items alike: an item whose status changes is
/// replaced by a new item rather than edited in place.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct CustomerInfo { name: String, notes: String, priority: bool }
///
/// impl ValueObject for CustomerInfo {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
