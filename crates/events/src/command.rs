use orderflow_core::AggregateRoot;

/// A command targets a specific aggregate (command abstraction).
///
/// Commands represent **intent**: a request to perform exactly one mutation on an
/// aggregate. They are bound to their parameters at construction, validated
/// eagerly there, and re-check their preconditions against the live aggregate in
/// `execute` before delegating to the aggregate's own mutation method.
///
/// ## Command vs Event
///
/// - **Command**: Intent to do something (e.g., "move item 7 to its next step")
/// - **Event**: Fact that something happened (e.g., "item 7 moved from step 20 to 30")
///
/// A rejected command leaves the aggregate untouched.
///
/// ## Design Constraints
///
/// Commands must be:
/// - **Cloneable**: Commands may be copied for retries, logging, etc.
/// - **Send + Sync + 'static**: Commands own their data and may cross thread boundaries
///   before they reach the aggregate.
///
/// Commands carry no persistence responsibility.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    type Aggregate: AggregateRoot;
    type Error: core::fmt::Display + core::fmt::Debug;

    /// Stable command name, used for logging.
    fn command_type(&self) -> &'static str;

    /// Validate preconditions and perform the mutation.
    fn execute(&self, aggregate: &mut Self::Aggregate) -> Result<(), Self::Error>;
}
