//! Statebound: an embeddable finite state machine engine
//!
//! Statebound moves a subject (an order, a document, a job) between named
//! states in response to named events. Each event declares the states it may
//! fire from, where it leads, an ordered chain of guards that must accept it,
//! and optional hooks that run immediately before and after the state is
//! written.
//!
//! # Core Concepts
//!
//! - **State**: opaque string-like label, see [`State`]
//! - **Machine**: immutable transition table, guard chains, hooks and
//!   permitted-event index for one kind of subject, see [`Machine`]
//! - **Subjects**: anything implementing [`StateAccessor`], usually via
//!   [`HasState`]
//! - **Registry**: optional subject type -> machine dispatch, see [`Registry`]
//! - **Persistence**: decoding stored states, see [`persistence`]
//!
//! # Example
//!
//! ```rust
//! use statebound::builder::{EventBuilder, MachineBuilder};
//! use statebound::{EventContext, FireOptions, FsmError, HasState, State};
//!
//! struct Order {
//!     status: State,
//!     items: usize,
//! }
//!
//! impl HasState for Order {
//!     fn state(&self) -> State {
//!         self.status.clone()
//!     }
//!
//!     fn set_state(&mut self, state: State) {
//!         self.status = state;
//!     }
//! }
//!
//! let machine = MachineBuilder::new("status")
//!     .event(
//!         EventBuilder::new()
//!             .name("pay")
//!             .from("draft")
//!             .to("paid")
//!             .when(|ctx: &EventContext<'_, Order>| ctx.subject().items > 0),
//!     )?
//!     .event(EventBuilder::new().name("cancel").from_any(["draft", "paid"]).to("cancelled"))?
//!     .build();
//!
//! let mut empty = Order { status: State::from("draft"), items: 0 };
//! assert!(matches!(
//!     machine.fire(&mut empty, "pay"),
//!     Err(FsmError::InvalidTransition { .. })
//! ));
//! assert_eq!(machine.permitted_events(&empty, FireOptions::default())?, vec!["cancel"]);
//!
//! let mut order = Order { status: State::from("draft"), items: 2 };
//! machine.fire(&mut order, "pay")?;
//! assert_eq!(order.status, "paid");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod persistence;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{EventContext, Guard, GuardChain, GuardOutcome, HasState, State, StateAccessor};
pub use machine::{
    BoxError, EventDefinition, FireOptions, FsmError, Hook, InternalError, LockScope, Machine,
};
pub use registry::Registry;
