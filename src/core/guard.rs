//! Guard predicates for controlling transitions.
//!
//! Guards are evaluated in declaration order before a transition is allowed.
//! Evaluation stops at the first guard that rejects or fails.

use super::state::State;
use crate::machine::BoxError;
use std::fmt;
use std::sync::Arc;

/// What a guard sees: the event being fired, the subject it is fired on, and
/// where the transition would go.
///
/// The context borrows the subject; the engine never copies or owns it.
pub struct EventContext<'a, T> {
    event: &'a str,
    subject: &'a T,
    source: &'a State,
    destination: &'a State,
}

impl<'a, T> EventContext<'a, T> {
    pub(crate) fn new(
        event: &'a str,
        subject: &'a T,
        source: &'a State,
        destination: &'a State,
    ) -> Self {
        Self {
            event,
            subject,
            source,
            destination,
        }
    }

    pub fn event(&self) -> &'a str {
        self.event
    }

    pub fn subject(&self) -> &'a T {
        self.subject
    }

    /// The subject's state when the event was fired.
    pub fn source(&self) -> &'a State {
        self.source
    }

    pub fn destination(&self) -> &'a State {
        self.destination
    }
}

impl<T> fmt::Debug for EventContext<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("event", &self.event)
            .field("source", &self.source)
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}

type Predicate<T> = dyn Fn(&EventContext<'_, T>) -> Result<bool, BoxError> + Send + Sync;

/// Predicate that decides whether an event may fire.
///
/// Guards are meant to be read-only. They get a shared reference to the
/// subject, but nothing stops a guard from reaching shared state through
/// interior mutability; keep them pure if `may_fire` should be idempotent.
///
/// # Example
///
/// ```rust
/// use statebound::{Guard, HasState, State};
///
/// struct Order {
///     status: State,
///     total: u64,
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
/// let has_total = Guard::new(|ctx: &statebound::EventContext<'_, Order>| ctx.subject().total > 0);
/// ```
pub struct Guard<T> {
    predicate: Arc<Predicate<T>>,
}

impl<T> Guard<T> {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&EventContext<'_, T>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(move |ctx: &EventContext<'_, T>| Ok::<_, BoxError>(predicate(ctx))),
        }
    }

    /// Create a guard that can fail with a domain error.
    ///
    /// An error aborts evaluation and is returned to the caller unchanged.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&EventContext<'_, T>) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard.
    pub fn check(&self, ctx: &EventContext<'_, T>) -> Result<bool, BoxError> {
        (self.predicate)(ctx)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard")
    }
}

/// Result of running a guard chain to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Accepted,
    /// The guard at `index` rejected; later guards were not evaluated.
    Rejected { index: usize },
}

impl GuardOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, GuardOutcome::Accepted)
    }
}

/// Ordered guards for one event.
pub struct GuardChain<T> {
    guards: Vec<Guard<T>>,
}

impl<T> GuardChain<T> {
    pub fn new(guards: Vec<Guard<T>>) -> Self {
        Self { guards }
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Evaluate guards in order, short-circuiting on the first rejection or
    /// error. An empty chain accepts.
    pub fn evaluate(&self, ctx: &EventContext<'_, T>) -> Result<GuardOutcome, BoxError> {
        for (index, guard) in self.guards.iter().enumerate() {
            if !guard.check(ctx)? {
                return Ok(GuardOutcome::Rejected { index });
            }
        }
        Ok(GuardOutcome::Accepted)
    }
}

impl<T> Default for GuardChain<T> {
    fn default() -> Self {
        Self { guards: Vec::new() }
    }
}

impl<T> Clone for GuardChain<T> {
    fn clone(&self) -> Self {
        Self {
            guards: self.guards.clone(),
        }
    }
}

impl<T> fmt::Debug for GuardChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardChain")
            .field("len", &self.guards.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Doc {
        pages: u32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("page count unavailable")]
    struct PagesUnavailable;

    fn ctx_for<'a>(doc: &'a Doc, from: &'a State, to: &'a State) -> EventContext<'a, Doc> {
        EventContext::new("publish", doc, from, to)
    }

    #[test]
    fn guard_sees_event_context() {
        let doc = Doc { pages: 3 };
        let (from, to) = (State::from("draft"), State::from("published"));
        let guard = Guard::new(|ctx: &EventContext<'_, Doc>| {
            ctx.event() == "publish"
                && ctx.source() == "draft"
                && ctx.destination() == "published"
                && ctx.subject().pages > 0
        });

        assert!(guard.check(&ctx_for(&doc, &from, &to)).unwrap());
    }

    #[test]
    fn empty_chain_accepts() {
        let doc = Doc { pages: 0 };
        let (from, to) = (State::from("draft"), State::from("published"));
        let chain: GuardChain<Doc> = GuardChain::default();

        assert_eq!(
            chain.evaluate(&ctx_for(&doc, &from, &to)).unwrap(),
            GuardOutcome::Accepted
        );
    }

    #[test]
    fn chain_stops_at_first_rejection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = {
            let calls = Arc::clone(&calls);
            Guard::new(move |_: &EventContext<'_, Doc>| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
        };
        let chain = GuardChain::new(vec![
            counted.clone(),
            Guard::new(|ctx: &EventContext<'_, Doc>| ctx.subject().pages > 10),
            counted,
        ]);

        let doc = Doc { pages: 3 };
        let (from, to) = (State::from("draft"), State::from("published"));
        let outcome = chain.evaluate(&ctx_for(&doc, &from, &to)).unwrap();

        assert_eq!(outcome, GuardOutcome::Rejected { index: 1 });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn chain_stops_at_first_error() {
        let reached = Arc::new(AtomicUsize::new(0));
        let after = {
            let reached = Arc::clone(&reached);
            Guard::new(move |_: &EventContext<'_, Doc>| {
                reached.fetch_add(1, Ordering::SeqCst);
                true
            })
        };
        let chain = GuardChain::new(vec![
            Guard::fallible(|_: &EventContext<'_, Doc>| Err(Box::new(PagesUnavailable) as BoxError)),
            after,
        ]);

        let doc = Doc { pages: 3 };
        let (from, to) = (State::from("draft"), State::from("published"));
        let err = chain.evaluate(&ctx_for(&doc, &from, &to)).unwrap_err();

        assert!(err.downcast_ref::<PagesUnavailable>().is_some());
        assert_eq!(reached.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn guard_is_deterministic() {
        let doc = Doc { pages: 2 };
        let (from, to) = (State::from("draft"), State::from("published"));
        let guard = Guard::new(|ctx: &EventContext<'_, Doc>| ctx.subject().pages % 2 == 0);
        let ctx = ctx_for(&doc, &from, &to);

        assert_eq!(guard.check(&ctx).unwrap(), guard.check(&ctx).unwrap());
    }
}
