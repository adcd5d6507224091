//! The machine: transition table, guard chains, hooks and the permitted-event
//! index for one kind of subject.
//!
//! # Key Concepts
//!
//! - **Transition table**: `(event, source) -> destination`, last write wins
//! - **Guard chains**: ordered per event, first rejection short-circuits
//! - **Hooks**: optional before/after callbacks around the state write
//! - **Permitted index**: state -> outgoing events, in definition order
//!
//! All four are built once in [`Machine::new`] and never change afterwards.

mod callbacks;
mod engine;
mod error;
mod event;
mod options;
mod table;

pub use callbacks::{CallbackRegistry, Callbacks, Hook};
pub use engine::Machine;
pub use error::{BoxError, FsmError, InternalError, Result};
pub use event::EventDefinition;
pub use options::{FireOptions, LockScope};
pub use table::{PermittedIndex, TransitionKey, TransitionRow, TransitionTable};
