//! Builder for constructing event definitions.

use crate::builder::error::BuildError;
use crate::core::{EventContext, Guard, State};
use crate::machine::{BoxError, EventDefinition, Hook};

/// Builder for constructing event definitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use statebound::builder::EventBuilder;
/// use serde_json::Value;
///
/// let ship = EventBuilder::<Value>::new()
///     .name("ship")
///     .from("paid")
///     .to("shipped")
///     .when(|ctx| ctx.subject()["address"].is_string())
///     .build()
///     .unwrap();
///
/// assert_eq!(ship.guards.len(), 1);
/// ```
pub struct EventBuilder<T> {
    name: Option<String>,
    from: Vec<State>,
    to: Option<State>,
    guards: Vec<Guard<T>>,
    before: Option<Hook<T>>,
    after: Option<Hook<T>>,
}

impl<T> EventBuilder<T> {
    /// Create a new event builder.
    pub fn new() -> Self {
        Self {
            name: None,
            from: Vec::new(),
            to: None,
            guards: Vec::new(),
            before: None,
            after: None,
        }
    }

    /// Set the event name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a source state (at least one required).
    pub fn from(mut self, state: impl Into<State>) -> Self {
        self.from.push(state.into());
        self
    }

    /// Add several source states.
    pub fn from_any<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.from.extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: impl Into<State>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Append a guard. Guards run in the order they were added.
    pub fn guard(mut self, guard: Guard<T>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Append a guard from a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&EventContext<'_, T>) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Append a guard that can fail with a domain error.
    pub fn try_when<F>(self, predicate: F) -> Self
    where
        F: Fn(&EventContext<'_, T>) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.guard(Guard::fallible(predicate))
    }

    /// Set the hook run before the state is written.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&EventContext<'_, T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.before = Some(Hook::new(hook));
        self
    }

    /// Set the hook run after the state is written.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&EventContext<'_, T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.after = Some(Hook::new(hook));
        self
    }

    /// Build the event definition.
    pub fn build(self) -> Result<EventDefinition<T>, BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        if self.from.is_empty() {
            return Err(BuildError::NoSources { event: name });
        }
        let Some(to) = self.to else {
            return Err(BuildError::MissingDestination { event: name });
        };

        Ok(EventDefinition {
            name,
            from: self.from,
            to,
            guards: self.guards,
            before: self.before,
            after: self.after,
        })
    }
}

impl<T> Default for EventBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
