//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders, a table macro and serde-loadable
//! specs for creating machines with minimal boilerplate.

pub mod error;
pub mod event;
pub mod machine;
pub mod macros;
pub mod spec;

pub use error::BuildError;
pub use event::EventBuilder;
pub use machine::MachineBuilder;
pub use spec::{EventSpec, MachineSpec};

use crate::core::{EventContext, Guard, State};
use crate::machine::EventDefinition;

/// Create an unguarded event.
///
/// # Example
///
/// ```
/// use statebound::builder::simple_event;
///
/// let event = simple_event::<(), _, _>("make", ["started"], "finished");
/// assert!(event.guards.is_empty());
/// ```
pub fn simple_event<T, I, S>(name: &str, from: I, to: impl Into<State>) -> EventDefinition<T>
where
    I: IntoIterator<Item = S>,
    S: Into<State>,
{
    EventDefinition::new(name, from, to)
}

/// Create an event with a single guard predicate.
///
/// # Example
///
/// ```
/// use statebound::builder::guarded_event;
/// use statebound::EventContext;
///
/// struct Order { paid: bool }
///
/// let event = guarded_event("ship", ["paid"], "shipped", |ctx: &EventContext<'_, Order>| {
///     ctx.subject().paid
/// });
/// assert_eq!(event.guards.len(), 1);
/// ```
pub fn guarded_event<T, I, S, F>(
    name: &str,
    from: I,
    to: impl Into<State>,
    guard: F,
) -> EventDefinition<T>
where
    I: IntoIterator<Item = S>,
    S: Into<State>,
    F: Fn(&EventContext<'_, T>) -> bool + Send + Sync + 'static,
{
    let mut event = EventDefinition::new(name, from, to);
    event.guards.push(Guard::new(guard));
    event
}
