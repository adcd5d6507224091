//! Declarative machine definitions loadable from configuration.
//!
//! A spec carries the transition table only. Guards and hooks are code and
//! are attached afterwards through [`MachineBuilder`].

use crate::builder::error::BuildError;
use crate::builder::machine::MachineBuilder;
use crate::core::State;
use crate::machine::{EventDefinition, LockScope};
use serde::{Deserialize, Serialize};

/// One event in a declarative definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    pub from: Vec<State>,
    pub to: State,
}

impl<T> From<EventSpec> for EventDefinition<T> {
    fn from(spec: EventSpec) -> Self {
        EventDefinition::new(spec.name, spec.from, spec.to)
    }
}

/// A machine's transition table as data.
///
/// # Example
///
/// ```rust
/// use statebound::builder::MachineSpec;
///
/// let spec = MachineSpec::from_json(r#"{
///     "attribute": "status",
///     "events": [
///         { "name": "pay", "from": ["draft"], "to": "paid" },
///         { "name": "cancel", "from": ["draft", "paid"], "to": "cancelled" }
///     ]
/// }"#).unwrap();
///
/// let machine = spec.into_builder::<serde_json::Value>().build();
/// assert_eq!(machine.transitions().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSpec {
    pub attribute: String,
    #[serde(default)]
    pub lock_scope: LockScope,
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

impl MachineSpec {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, BuildError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Start a builder seeded with this spec's attribute, lock scope and
    /// events.
    pub fn into_builder<T>(self) -> MachineBuilder<T> {
        let events = self.events.into_iter().map(EventDefinition::from).collect();
        MachineBuilder::new(self.attribute)
            .lock_scope(self.lock_scope)
            .events(events)
    }
}
