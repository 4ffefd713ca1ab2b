//! Event target capability.
//!
//! A target is anything that can hold listeners for named event types. Two
//! registration shapes are recognised: the modern `add/remove` pair and the
//! legacy `attach/detach` pair that takes `"on" + type`. A target exposes
//! whichever it supports; one exposing neither is rejected by
//! [`crate::Keasy::attach_to`].
//!
//! [`EventHub`] is a ready-made in-memory target for hosts that route their
//! own input events, and for tests.

use crate::listener::Listener;
use keasy_keys::{InputEvent, KeyEventKind, KeyInputEvent};
use parking_lot::Mutex;

/// Modern listener registration (`addEventListener` shape).
pub trait ListenerApi {
    fn add_event_listener(&self, event_type: &str, listener: Listener);
    fn remove_event_listener(&self, event_type: &str, listener: &Listener);
}

/// Legacy listener registration (`attachEvent` shape, `"on"`-prefixed types).
pub trait LegacyListenerApi {
    fn attach_event(&self, on_type: &str, listener: Listener);
    fn detach_event(&self, on_type: &str, listener: &Listener);
}

/// Something listeners can be bound to.
pub trait EventSource: Send + Sync {
    fn listener_api(&self) -> Option<&dyn ListenerApi> {
        None
    }

    fn legacy_api(&self) -> Option<&dyn LegacyListenerApi> {
        None
    }

    /// Short description used in error messages and logs.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Whether this target accepts listeners in either shape.
    fn accepts_listeners(&self) -> bool {
        self.listener_api().is_some() || self.legacy_api().is_some()
    }
}

/// Thread-safe in-memory event target.
#[derive(Debug, Default)]
pub struct EventHub {
    listeners: Mutex<Vec<(String, Listener)>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener registered for `event_type`.
    ///
    /// Listeners are collected before any is invoked, so a listener may
    /// add or remove listeners on this hub. Returns the number invoked.
    pub fn dispatch(&self, event_type: &str, event: &InputEvent) -> usize {
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .filter(|(registered, _)| registered == event_type)
            .map(|(_, listener)| listener.clone())
            .collect();

        log::trace!(
            "Dispatching '{}' to {} listener(s)",
            event_type,
            snapshot.len()
        );
        for listener in &snapshot {
            listener.call(event);
        }
        snapshot.len()
    }

    /// Deliver a keyboard event of the given kind.
    pub fn dispatch_key(&self, kind: KeyEventKind, event: KeyInputEvent) -> usize {
        self.dispatch(kind.name(), &InputEvent::Key(event))
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|(registered, _)| registered == event_type)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}

impl ListenerApi for EventHub {
    fn add_event_listener(&self, event_type: &str, listener: Listener) {
        let mut listeners = self.listeners.lock();
        // Registering the identical listener twice is a no-op
        let exists = listeners
            .iter()
            .any(|(t, l)| t == event_type && Listener::ptr_eq(l, &listener));
        if !exists {
            listeners.push((event_type.to_string(), listener));
        }
    }

    fn remove_event_listener(&self, event_type: &str, listener: &Listener) {
        let mut listeners = self.listeners.lock();
        if let Some(index) = listeners
            .iter()
            .position(|(t, l)| t == event_type && Listener::ptr_eq(l, listener))
        {
            listeners.remove(index);
        }
    }
}

impl EventSource for EventHub {
    fn listener_api(&self) -> Option<&dyn ListenerApi> {
        Some(self)
    }

    fn describe(&self) -> String {
        "EventHub".to_string()
    }
}
