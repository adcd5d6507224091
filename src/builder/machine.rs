//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::event::EventBuilder;
use crate::core::{EventContext, Guard};
use crate::machine::{BoxError, EventDefinition, Hook, LockScope, Machine};

/// Builder for constructing machines with a fluent API.
///
/// Events are kept in the order they were added; that order is the order
/// `permitted_events` reports them in.
pub struct MachineBuilder<T> {
    attribute: String,
    events: Vec<EventDefinition<T>>,
    lock_scope: LockScope,
}

impl<T> MachineBuilder<T> {
    /// Create a builder for subjects whose state lives under `attribute`.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            events: Vec::new(),
            lock_scope: LockScope::default(),
        }
    }

    /// Add an event using a builder.
    /// Returns an error if the builder fails validation.
    pub fn event(mut self, builder: EventBuilder<T>) -> Result<Self, BuildError> {
        let event = builder.build()?;
        self.events.push(event);
        Ok(self)
    }

    /// Add a pre-built event.
    pub fn add_event(mut self, event: EventDefinition<T>) -> Self {
        self.events.push(event);
        self
    }

    /// Add multiple events at once.
    pub fn events(mut self, events: Vec<EventDefinition<T>>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn lock_scope(mut self, scope: LockScope) -> Self {
        self.lock_scope = scope;
        self
    }

    /// Append a guard to every definition of an already-added event.
    pub fn guard(mut self, event: &str, guard: Guard<T>) -> Result<Self, BuildError> {
        self.definitions_of(event)?
            .for_each(|definition| definition.guards.push(guard.clone()));
        Ok(self)
    }

    /// Append a closure guard to an already-added event.
    pub fn when<F>(self, event: &str, predicate: F) -> Result<Self, BuildError>
    where
        F: Fn(&EventContext<'_, T>) -> bool + Send + Sync + 'static,
    {
        self.guard(event, Guard::new(predicate))
    }

    /// Set the before-hook of an already-added event.
    pub fn before<F>(mut self, event: &str, hook: F) -> Result<Self, BuildError>
    where
        F: Fn(&EventContext<'_, T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let hook = Hook::new(hook);
        self.definitions_of(event)?
            .for_each(|definition| definition.before = Some(hook.clone()));
        Ok(self)
    }

    /// Set the after-hook of an already-added event.
    pub fn after<F>(mut self, event: &str, hook: F) -> Result<Self, BuildError>
    where
        F: Fn(&EventContext<'_, T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let hook = Hook::new(hook);
        self.definitions_of(event)?
            .for_each(|definition| definition.after = Some(hook.clone()));
        Ok(self)
    }

    /// Build the machine. Any table is accepted, including an empty one.
    pub fn build(self) -> Machine<T> {
        Machine::new(self.attribute, self.events).with_lock_scope(self.lock_scope)
    }

    fn definitions_of<'a>(
        &'a mut self,
        event: &'a str,
    ) -> Result<impl Iterator<Item = &'a mut EventDefinition<T>> + 'a, BuildError> {
        if !self.events.iter().any(|definition| definition.name == event) {
            return Err(BuildError::UndefinedEvent {
                event: event.to_owned(),
            });
        }
        Ok(self
            .events
            .iter_mut()
            .filter(move |definition| definition.name == event))
    }
}
