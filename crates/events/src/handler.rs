use tracing::{debug, warn};

use orderflow_core::AggregateRoot;

use crate::Command;

/// Execute a command against an aggregate (no IO, no async).
///
/// This is the single entry point callers use to mutate an aggregate:
///
/// 1. **Validate**: the command checks its preconditions against the aggregate
/// 2. **Mutate**: the command calls exactly one aggregate method, which records events
///
/// The aggregate's `version()` is logged before and after so rejected commands are
/// visible as "no new events" in traces.
pub fn execute<C>(aggregate: &mut C::Aggregate, command: &C) -> Result<(), C::Error>
where
    C: Command,
    <C::Aggregate as AggregateRoot>::Id: core::fmt::Display,
{
    let span = tracing::debug_span!(
        "command",
        command = command.command_type(),
        aggregate_id = %aggregate.id(),
    );
    let _guard = span.enter();

    let version_before = aggregate.version();
    match command.execute(aggregate) {
        Ok(()) => {
            debug!(
                version_before,
                version_after = aggregate.version(),
                "command applied"
            );
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "command rejected");
            Err(e)
        }
    }
}
