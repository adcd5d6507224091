//! Core types shared by every machine.
//!
//! - [`State`]: opaque, string-like state identifier
//! - [`StateAccessor`] / [`HasState`]: how the engine reads and writes a
//!   subject's state
//! - [`Guard`] / [`GuardChain`]: ordered predicates over an [`EventContext`]

mod accessor;
mod guard;
mod state;

pub use accessor::{HasState, StateAccessor};
pub use guard::{EventContext, Guard, GuardChain, GuardOutcome};
pub use state::State;
