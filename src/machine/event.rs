//! Event definitions: the input a machine is built from.

use crate::core::{Guard, State};
use crate::machine::callbacks::Hook;
use std::fmt;

/// A named event: the states it may fire from, where it leads, the guards
/// that must accept it, and optional hooks around the mutation.
///
/// Use [`EventBuilder`](crate::builder::EventBuilder) for a fluent API.
pub struct EventDefinition<T> {
    pub name: String,
    pub from: Vec<State>,
    pub to: State,
    pub guards: Vec<Guard<T>>,
    pub before: Option<Hook<T>>,
    pub after: Option<Hook<T>>,
}

impl<T> EventDefinition<T> {
    /// An unguarded event without hooks.
    pub fn new<I, S>(name: impl Into<String>, from: I, to: impl Into<State>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        Self {
            name: name.into(),
            from: from.into_iter().map(Into::into).collect(),
            to: to.into(),
            guards: Vec::new(),
            before: None,
            after: None,
        }
    }

    /// True if `state` is one of this event's sources.
    pub fn fires_from(&self, state: &State) -> bool {
        self.from.contains(state)
    }
}

impl<T> Clone for EventDefinition<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            guards: self.guards.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<T> fmt::Debug for EventDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDefinition")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guards", &self.guards.len())
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collects_sources() {
        let event: EventDefinition<()> = EventDefinition::new("cancel", ["draft", "paid"], "cancelled");

        assert_eq!(event.name, "cancel");
        assert!(event.fires_from(&State::from("paid")));
        assert!(!event.fires_from(&State::from("cancelled")));
        assert!(event.guards.is_empty());
    }
}
