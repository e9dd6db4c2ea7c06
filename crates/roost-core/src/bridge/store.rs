use super::events::Event;
use super::types::Command;

/// Trait for dispatching bridge commands.
///
/// Decouples the command definitions from their execution. The supervisor is
/// the production implementation; tests implement it to observe dispatch
/// behavior without a window or a backend.
///
/// # Semantics
///
/// - **Ordering**: Commands execute in the order received, each processed to
///   completion before the next. No implicit batching, no interleaving.
/// - **Delivery**: At-most-once per user action. There is no acknowledgement
///   channel back to the UI.
/// - **Dropped commands**: A command that references a torn-down window
///   returns `Ok(vec![])` - silently dropped, never an error. A race between
///   window teardown and a queued command is expected and must not crash the
///   host.
/// - **Events**: On success, dispatch returns the `Event`s describing what
///   actually changed, in order. Callers can use these to react without
///   polling window state.
pub trait Store {
    type Error;
    fn dispatch(&mut self, cmd: Command) -> Result<Vec<Event>, Self::Error>;
}
