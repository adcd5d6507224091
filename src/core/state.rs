//! State identifiers.
//!
//! A state is an opaque, string-like label. Two states are equal when their
//! labels are equal; states carry no ordering and no behaviour of their own.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque state identifier.
///
/// `State` wraps a `String` and serializes transparently, so a subject with a
/// `status: State` field round-trips through JSON as a plain string.
///
/// # Example
///
/// ```rust
/// use statebound::State;
///
/// let started = State::from("started");
/// assert_eq!(started.as_str(), "started");
/// assert_eq!(started, State::new("started"));
/// assert_eq!(started.to_string(), "started");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    /// Create a state from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        State(name.into())
    }

    /// Borrow the state's label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the state, returning its label.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// True if the label is empty.
    ///
    /// An empty label is still a valid state; this exists for persistence
    /// layers that map `NULL`/empty columns to "no state yet".
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        State(name.to_owned())
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        State(name)
    }
}

impl From<&State> for State {
    fn from(state: &State) -> Self {
        state.clone()
    }
}

impl AsRef<str> for State {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for State {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for State {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
