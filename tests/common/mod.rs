//! Shared integration test helpers for keasy.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{CallCounter, LegacyTarget};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers is used per file.

#![allow(dead_code)]

use keasy::{EventSource, InputEvent, LegacyListenerApi, Listener};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts how many times its callback was invoked.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that bumps this counter.
    pub fn callback(&self) -> impl Fn() + Send + Sync + 'static {
        let count = Arc::clone(&self.0);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// A target that only offers the legacy `attach/detach` shape.
#[derive(Default)]
pub struct LegacyTarget {
    attached: Mutex<Vec<(String, Listener)>>,
}

impl LegacyTarget {
    pub fn fire(&self, on_type: &str, event: &InputEvent) {
        let listeners: Vec<Listener> = self
            .attached
            .lock()
            .iter()
            .filter(|(t, _)| t == on_type)
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener.call(event);
        }
    }

    pub fn attached_count(&self) -> usize {
        self.attached.lock().len()
    }
}

impl LegacyListenerApi for LegacyTarget {
    fn attach_event(&self, on_type: &str, listener: Listener) {
        self.attached.lock().push((on_type.to_string(), listener));
    }

    fn detach_event(&self, on_type: &str, listener: &Listener) {
        self.attached
            .lock()
            .retain(|(t, l)| !(t == on_type && Listener::ptr_eq(l, listener)));
    }
}

impl EventSource for LegacyTarget {
    fn legacy_api(&self) -> Option<&dyn LegacyListenerApi> {
        Some(self)
    }

    fn describe(&self) -> String {
        "LegacyTarget".to_string()
    }
}

/// A target with no listener support at all.
pub struct PlainObject;

impl EventSource for PlainObject {
    fn describe(&self) -> String {
        "PlainObject".to_string()
    }
}
