//! Aggregate root trait for the order domain.

/// Aggregate root marker + minimal interface.
///
/// An aggregate root is the only entry point through which its children are
/// mutated. The trait stays small so the aggregate decides how it models
/// state changes without pulling in infrastructure concerns.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Corresponds to the number of domain events recorded by this instance,
    /// so the value only ever grows while the aggregate is alive.
    fn version(&self) -> u64;
}
