//! Registry mapping subject types to their machines.
//!
//! The registry is a convenience for code that handles several kinds of
//! subject and wants to dispatch by type. Code that knows its subject type
//! should keep the `Arc<Machine<T>>` handle returned by
//! [`Registry::register`] and call the machine directly; that path cannot
//! fail with an unregistered-type error.
//!
//! Registration takes `&mut self` and dispatch takes `&self`, so the borrow
//! checker confines registration to a setup phase: once the registry is
//! shared (`Arc<Registry>`), it can no longer change.

use crate::core::{State, StateAccessor};
use crate::machine::{EventDefinition, FireOptions, FsmError, InternalError, Machine, Result};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

struct Entry {
    type_name: &'static str,
    machine: Arc<dyn Any + Send + Sync>,
}

/// Subject type -> machine.
///
/// # Example
///
/// ```rust
/// use statebound::{events, FireOptions, HasState, Registry, State};
///
/// struct Order {
///     status: State,
/// }
///
/// impl HasState for Order {
///     fn state(&self) -> State {
///         self.status.clone()
///     }
///
///     fn set_state(&mut self, state: State) {
///         self.status = state;
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.register::<Order>("status", events! {
///     "pay": ["draft"] => "paid",
/// });
///
/// let mut order = Order { status: State::from("draft") };
/// registry.fire(&mut order, "pay").unwrap();
/// assert_eq!(order.status, "paid");
/// ```
#[derive(Default)]
pub struct Registry {
    machines: HashMap<TypeId, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a machine for `T` and store it, replacing any machine already
    /// registered for `T`. Returns a handle to the new machine.
    pub fn register<T>(
        &mut self,
        attribute: impl Into<String>,
        events: Vec<EventDefinition<T>>,
    ) -> Arc<Machine<T>>
    where
        T: StateAccessor + 'static,
    {
        self.register_machine(Machine::new(attribute, events))
    }

    /// Store an already-built machine for `T`, replacing any previous one.
    pub fn register_machine<T>(&mut self, machine: Machine<T>) -> Arc<Machine<T>>
    where
        T: StateAccessor + 'static,
    {
        let machine = Arc::new(machine);
        let entry = Entry {
            type_name: type_name::<T>(),
            machine: machine.clone(),
        };
        if self.machines.insert(TypeId::of::<T>(), entry).is_some() {
            debug!(subject = type_name::<T>(), "machine replaced");
        } else {
            debug!(subject = type_name::<T>(), "machine registered");
        }
        machine
    }

    /// The machine registered for `T`.
    pub fn machine<T>(&self) -> Result<Arc<Machine<T>>>
    where
        T: StateAccessor + 'static,
    {
        let unregistered = || {
            trace!(subject = type_name::<T>(), "no machine registered");
            FsmError::from(InternalError::Unregistered {
                type_name: type_name::<T>(),
            })
        };
        let entry = self.machines.get(&TypeId::of::<T>()).ok_or_else(unregistered)?;
        Arc::clone(&entry.machine)
            .downcast::<Machine<T>>()
            .map_err(|_| unregistered())
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.machines.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Names of the registered subject types, sorted.
    pub fn subject_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.machines.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }

    /// See [`Machine::fire`].
    pub fn fire<T>(&self, subject: &mut T, event: &str) -> Result<()>
    where
        T: StateAccessor + 'static,
    {
        self.machine::<T>()?.fire(subject, event)
    }

    /// See [`Machine::fire_shared`].
    pub fn fire_shared<T>(&self, subject: &Mutex<T>, event: &str) -> Result<()>
    where
        T: StateAccessor + 'static,
    {
        self.machine::<T>()?.fire_shared(subject, event)
    }

    /// See [`Machine::may_fire`].
    pub fn may_fire<T>(&self, subject: &T, event: &str, options: FireOptions) -> Result<bool>
    where
        T: StateAccessor + 'static,
    {
        self.machine::<T>()?.may_fire(subject, event, options)
    }

    /// See [`Machine::permitted_events`].
    pub fn permitted_events<T>(&self, subject: &T, options: FireOptions) -> Result<Vec<String>>
    where
        T: StateAccessor + 'static,
    {
        self.machine::<T>()?.permitted_events(subject, options)
    }

    /// See [`Machine::permitted_states`].
    pub fn permitted_states<T>(&self, subject: &T, options: FireOptions) -> Result<Vec<State>>
    where
        T: StateAccessor + 'static,
    {
        self.machine::<T>()?.permitted_states(subject, options)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("subjects", &self.subject_types())
            .finish()
    }
}
