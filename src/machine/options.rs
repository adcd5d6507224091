//! Per-call options and machine-wide locking configuration.

use serde::{Deserialize, Serialize};

/// Options for permission queries (`may_fire`, `permitted_events`,
/// `permitted_states`).
///
/// # Example
///
/// ```rust
/// use statebound::FireOptions;
///
/// let opts: FireOptions = serde_json::from_str(r#"{ "skip_guards": true }"#).unwrap();
/// assert_eq!(opts, FireOptions::skipping_guards());
/// assert!(!FireOptions::default().skip_guards);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireOptions {
    /// Report a transition as permitted as soon as one exists, without
    /// evaluating guards.
    pub skip_guards: bool,
}

impl FireOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skipping_guards() -> Self {
        Self { skip_guards: true }
    }

    pub fn skip_guards(mut self, value: bool) -> Self {
        self.skip_guards = value;
        self
    }
}

/// How `fire` serializes the hook/mutation section.
///
/// Firing always has exclusive access to its subject (`&mut T`, or the
/// subject's own mutex with `fire_shared`), so resolve, guard and mutate are
/// atomic per subject under either scope. `Machine` additionally serializes
/// the before-hook, mutation and after-hook of every subject sharing the
/// machine, for hooks that touch a resource shared between subjects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockScope {
    #[default]
    Subject,
    Machine,
}
