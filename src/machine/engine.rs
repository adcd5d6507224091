//! The transition-resolution engine.

use crate::core::{EventContext, GuardChain, GuardOutcome, State, StateAccessor};
use crate::machine::callbacks::{CallbackRegistry, Callbacks};
use crate::machine::error::{FsmError, Result};
use crate::machine::event::EventDefinition;
use crate::machine::options::{FireOptions, LockScope};
use crate::machine::table::{PermittedIndex, TransitionRow, TransitionTable};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, trace};

/// Immutable transition rules for one kind of subject.
///
/// A machine is built once from a complete list of event definitions and
/// never changes afterwards, so it can be shared freely (`Arc<Machine<T>>`)
/// and queried concurrently. Firing takes the subject by `&mut`, which makes
/// resolve, guard evaluation and mutation one atomic step for that subject.
///
/// # Example
///
/// ```rust
/// use statebound::{EventDefinition, FireOptions, Machine, State};
/// use serde_json::json;
///
/// let machine = Machine::new(
///     "status",
///     vec![EventDefinition::new("make", ["started"], "finished")],
/// );
///
/// let mut job = json!({ "status": "started" });
/// assert!(machine.may_fire(&job, "make", FireOptions::default()).unwrap());
///
/// machine.fire(&mut job, "make").unwrap();
/// assert_eq!(job["status"], "finished");
/// assert!(machine.permitted_events(&job, FireOptions::default()).unwrap().is_empty());
/// ```
pub struct Machine<T> {
    attribute: String,
    transitions: TransitionTable,
    guards: HashMap<String, GuardChain<T>>,
    callbacks: CallbackRegistry<T>,
    permitted: PermittedIndex,
    events: Vec<String>,
    lock_scope: LockScope,
    lock: Mutex<()>,
}

impl<T> Machine<T> {
    /// Build a machine.
    ///
    /// `attribute` names where state lives on record-shaped subjects; typed
    /// [`HasState`](crate::HasState) subjects ignore it. Each `(event,
    /// source)` pair becomes one table row; when a pair repeats, the later
    /// definition's destination wins. Guards and hooks are keyed by event
    /// name, so a repeated event name also replaces them. Empty definitions,
    /// unreachable states and duplicate destinations are all accepted.
    pub fn new(attribute: impl Into<String>, definitions: Vec<EventDefinition<T>>) -> Self {
        let mut transitions = TransitionTable::new();
        let mut guards = HashMap::new();
        let mut callbacks = CallbackRegistry::default();
        let mut events: Vec<String> = Vec::new();

        for definition in definitions {
            let EventDefinition {
                name,
                from,
                to,
                guards: chain,
                before,
                after,
            } = definition;

            for source in from {
                if let Some(previous) = transitions.insert(&name, source.clone(), to.clone()) {
                    trace!(event = %name, from = %source, %previous, to = %to, "transition redefined");
                }
            }
            guards.insert(name.clone(), GuardChain::new(chain));
            callbacks.insert(&name, Callbacks { before, after });
            if !events.contains(&name) {
                events.push(name);
            }
        }

        let permitted = PermittedIndex::from_table(&transitions);

        Self {
            attribute: attribute.into(),
            transitions,
            guards,
            callbacks,
            permitted,
            events,
            lock_scope: LockScope::default(),
            lock: Mutex::new(()),
        }
    }

    /// Set how the hook/mutation section is serialized.
    pub fn with_lock_scope(mut self, scope: LockScope) -> Self {
        self.lock_scope = scope;
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn lock_scope(&self) -> LockScope {
        self.lock_scope
    }

    /// Distinct event names, in definition order.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Every transition row, in definition order.
    pub fn transitions(&self) -> &[TransitionRow] {
        self.transitions.rows()
    }

    /// Where `event` leads from `state`, if anywhere.
    pub fn destination(&self, event: &str, state: &State) -> Option<&State> {
        self.transitions.get(event, state)
    }
}

impl<T: StateAccessor> Machine<T> {
    /// Fire `event` on `subject`.
    ///
    /// Resolves the current state, looks up the transition, runs the guard
    /// chain, then runs the before-hook, writes the destination state and
    /// runs the after-hook. A before-hook failure leaves the subject
    /// untouched. An after-hook failure is returned as
    /// [`FsmError::AfterHook`] with the new state already in place; it is not
    /// rolled back.
    pub fn fire(&self, subject: &mut T, event: &str) -> Result<()> {
        let source = self.current_state(subject)?;
        let destination = self.lookup(event, &source)?;
        self.require_guards(subject, event, &source, destination)?;

        let _serial = match self.lock_scope {
            LockScope::Machine => Some(self.lock.lock().unwrap_or_else(PoisonError::into_inner)),
            LockScope::Subject => None,
        };

        if let Some(hook) = self.callbacks.before(event) {
            let ctx = EventContext::new(event, &*subject, &source, destination);
            hook.call(&ctx).map_err(FsmError::BeforeHook)?;
        }

        subject.write_state(&self.attribute, destination.clone())?;
        debug!(event = %event, from = %source, to = %destination, "transition fired");

        if let Some(hook) = self.callbacks.after(event) {
            let ctx = EventContext::new(event, &*subject, &source, destination);
            hook.call(&ctx).map_err(FsmError::AfterHook)?;
        }

        Ok(())
    }

    /// Fire `event` on a subject shared behind a mutex.
    ///
    /// The subject stays locked from state resolution through the after-hook,
    /// so concurrent callers never act on a guard decision made against a
    /// state that has since changed.
    pub fn fire_shared(&self, subject: &Mutex<T>, event: &str) -> Result<()> {
        let mut guard = subject.lock()?;
        self.fire(&mut guard, event)
    }

    /// Would `event` fire right now?
    ///
    /// Runs resolution and (unless `options.skip_guards`) the guard chain,
    /// without locking, mutating or calling hooks. A missing transition or a
    /// rejecting guard is `Ok(false)`; accessor failures and guard errors are
    /// returned as errors.
    pub fn may_fire(&self, subject: &T, event: &str, options: FireOptions) -> Result<bool> {
        let source = self.current_state(subject)?;
        let Some(destination) = self.transitions.get(event, &source) else {
            return Ok(false);
        };
        self.permits(subject, event, &source, destination, options)
    }

    /// Like [`fire`](Self::fire) without the side effects: reports exactly
    /// the error `fire` would fail with before reaching the hooks.
    pub fn check(&self, subject: &T, event: &str) -> Result<()> {
        let source = self.current_state(subject)?;
        let destination = self.lookup(event, &source)?;
        self.require_guards(subject, event, &source, destination)
    }

    /// Events that may fire from the subject's current state, in definition
    /// order. A state with no outgoing transitions yields an empty list.
    pub fn permitted_events(&self, subject: &T, options: FireOptions) -> Result<Vec<String>> {
        let source = self.current_state(subject)?;
        let mut permitted = Vec::new();
        for row in self.permitted_rows(subject, &source, options)? {
            permitted.push(row.key.event.clone());
        }
        Ok(permitted)
    }

    /// Destinations of [`permitted_events`](Self::permitted_events), in the
    /// same order. Duplicates are kept.
    pub fn permitted_states(&self, subject: &T, options: FireOptions) -> Result<Vec<State>> {
        let source = self.current_state(subject)?;
        let mut permitted = Vec::new();
        for row in self.permitted_rows(subject, &source, options)? {
            permitted.push(row.destination.clone());
        }
        Ok(permitted)
    }

    fn current_state(&self, subject: &T) -> Result<State> {
        Ok(subject.read_state(&self.attribute)?)
    }

    fn lookup(&self, event: &str, source: &State) -> Result<&State> {
        self.transitions.get(event, source).ok_or_else(|| {
            trace!(event = %event, from = %source, "no transition");
            FsmError::unknown_event(event)
        })
    }

    fn require_guards(
        &self,
        subject: &T,
        event: &str,
        source: &State,
        destination: &State,
    ) -> Result<()> {
        match self.evaluate(subject, event, source, destination)? {
            GuardOutcome::Accepted => Ok(()),
            GuardOutcome::Rejected { index } => {
                trace!(event = %event, from = %source, guard = index, "guard rejected transition");
                Err(FsmError::invalid_transition(event, source))
            }
        }
    }

    fn permits(
        &self,
        subject: &T,
        event: &str,
        source: &State,
        destination: &State,
        options: FireOptions,
    ) -> Result<bool> {
        if options.skip_guards {
            return Ok(true);
        }
        Ok(self
            .evaluate(subject, event, source, destination)?
            .is_accepted())
    }

    fn evaluate(
        &self,
        subject: &T,
        event: &str,
        source: &State,
        destination: &State,
    ) -> Result<GuardOutcome> {
        let Some(chain) = self.guards.get(event) else {
            return Ok(GuardOutcome::Accepted);
        };
        let ctx = EventContext::new(event, subject, source, destination);
        chain.evaluate(&ctx).map_err(FsmError::Guard)
    }

    fn permitted_rows(
        &self,
        subject: &T,
        source: &State,
        options: FireOptions,
    ) -> Result<Vec<&TransitionRow>> {
        let mut rows = Vec::new();
        for &index in self.permitted.rows_from(source) {
            let row = self.transitions.row(index);
            if self.permits(subject, &row.key.event, source, &row.destination, options)? {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

impl<T> fmt::Debug for Machine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("attribute", &self.attribute)
            .field("transitions", &self.transitions.rows())
            .field("callbacks", &self.callbacks)
            .field("lock_scope", &self.lock_scope)
            .finish_non_exhaustive()
    }
}
