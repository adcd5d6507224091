//! Before/after hooks run around the state mutation.

use crate::core::EventContext;
use crate::machine::BoxError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type HookFn<T> = dyn Fn(&EventContext<'_, T>) -> Result<(), BoxError> + Send + Sync;

/// Side-effecting callback invoked immediately before or after a subject's
/// state is changed.
pub struct Hook<T> {
    callback: Arc<HookFn<T>>,
}

impl<T> Hook<T> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&EventContext<'_, T>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Hook {
            callback: Arc::new(callback),
        }
    }

    pub fn call(&self, ctx: &EventContext<'_, T>) -> Result<(), BoxError> {
        (self.callback)(ctx)
    }
}

impl<T> Clone for Hook<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook")
    }
}

/// Optional hooks for one event.
pub struct Callbacks<T> {
    pub before: Option<Hook<T>>,
    pub after: Option<Hook<T>>,
}

impl<T> Callbacks<T> {
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
        }
    }
}

impl<T> Clone for Callbacks<T> {
    fn clone(&self) -> Self {
        Self {
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<T> fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// Per-event hooks. Events without hooks have no entry.
pub struct CallbackRegistry<T> {
    by_event: HashMap<String, Callbacks<T>>,
}

impl<T> CallbackRegistry<T> {
    pub(crate) fn insert(&mut self, event: &str, callbacks: Callbacks<T>) {
        if callbacks.is_empty() {
            self.by_event.remove(event);
        } else {
            self.by_event.insert(event.to_owned(), callbacks);
        }
    }

    pub fn before(&self, event: &str) -> Option<&Hook<T>> {
        self.by_event.get(event)?.before.as_ref()
    }

    pub fn after(&self, event: &str) -> Option<&Hook<T>> {
        self.by_event.get(event)?.after.as_ref()
    }
}

impl<T> Default for CallbackRegistry<T> {
    fn default() -> Self {
        Self {
            by_event: HashMap::new(),
        }
    }
}

impl<T> fmt::Debug for CallbackRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.by_event.iter()).finish()
    }
}
