//! Listener handles and their binding to targets.
//!
//! A [`ListenerBinding`] holds the one [`Listener`] value that was added to a
//! target, so removal always hands the target that same value back.

use crate::target::EventSource;
use keasy_keys::{InputEvent, KeyEventKind};
use std::fmt;
use std::sync::Arc;

/// A zero-argument user callback.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Shared event handler with reference identity.
///
/// Clones refer to the same handler; two listeners built from identical
/// closures are still distinct.
#[derive(Clone)]
pub struct Listener(Arc<dyn Fn(&InputEvent) + Send + Sync>);

impl Listener {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&InputEvent) + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    pub fn call(&self, event: &InputEvent) {
        (self.0)(event)
    }

    /// Whether both handles refer to the same handler.
    pub fn ptr_eq(a: &Listener, b: &Listener) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&a.0), Arc::as_ptr(&b.0))
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// A (kind, listener) pair that can be added to and removed from a target.
#[derive(Debug, Clone)]
pub struct ListenerBinding {
    kind: KeyEventKind,
    listener: Listener,
}

impl ListenerBinding {
    pub fn new(kind: KeyEventKind, listener: Listener) -> Self {
        Self { kind, listener }
    }

    pub fn kind(&self) -> KeyEventKind {
        self.kind
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    /// Register the listener on `target`. Does nothing without a target.
    pub fn bind(&self, target: Option<&dyn EventSource>) {
        let Some(target) = target else {
            log::trace!("No target configured, skipping bind of '{}'", self.kind);
            return;
        };

        if let Some(api) = target.listener_api() {
            api.add_event_listener(self.kind.name(), self.listener.clone());
        } else if let Some(api) = target.legacy_api() {
            api.attach_event(&legacy_type(self.kind), self.listener.clone());
        } else {
            log::warn!(
                "Target {} accepts no listeners, '{}' not bound",
                target.describe(),
                self.kind
            );
            return;
        }
        log::debug!("Bound '{}' listener to {}", self.kind, target.describe());
    }

    /// Remove the listener from `target`. Does nothing without a target.
    pub fn unbind(&self, target: Option<&dyn EventSource>) {
        let Some(target) = target else {
            return;
        };

        if let Some(api) = target.listener_api() {
            api.remove_event_listener(self.kind.name(), &self.listener);
        } else if let Some(api) = target.legacy_api() {
            api.detach_event(&legacy_type(self.kind), &self.listener);
        } else {
            return;
        }
        log::debug!("Unbound '{}' listener from {}", self.kind, target.describe());
    }
}

fn legacy_type(kind: KeyEventKind) -> String {
    format!("on{}", kind.name())
}
