//! Fluent builder for debounced, key-combination-filtered keyboard handlers.
//!
//! ```ignore
//! use std::sync::Arc;
//! use keasy::{EventHub, SECONDS};
//!
//! let hub = Arc::new(EventHub::new());
//! let mut search = keasy::keyup();
//! search
//!     .attach_to(hub.clone())?
//!     .after(1, SECONDS)?
//!     .on_trigger(|| run_search());
//! ```
//!
//! The builder lives in [`builder`]; key kinds, parsing and matching come
//! from the `keasy-keys` crate and are re-exported here.

pub mod builder;
pub mod config;
pub mod debounce;
pub mod error;
pub mod listener;
pub mod target;
pub mod timer;
pub mod units;

pub use builder::{ActionMap, Keasy};
pub use config::{BindingConfig, BindingSet, KeasyConfig};
pub use error::KeasyError;
pub use listener::{Callback, Listener, ListenerBinding};
pub use target::{EventHub, EventSource, LegacyListenerApi, ListenerApi};
pub use timer::{ManualTimers, TimerHost, TimerId, TokioTimers};
pub use units::TimeUnit;

pub use keasy_keys::{
    InputEvent, KeyCombination, KeyEventKind, KeyInputEvent, KeyMatcher, MatchError,
};

/// Selector for key-down events.
pub const DOWN: &str = "keasy:keydown";
/// Selector for key-press events.
pub const PRESS: &str = "keasy:keypress";
/// Selector for key-up events.
pub const UP: &str = "keasy:keyup";

/// Unit for [`Keasy::after`] amounts given in milliseconds.
pub const MILLISECONDS: TimeUnit = TimeUnit::Milliseconds;
/// Unit for [`Keasy::after`] amounts given in seconds.
pub const SECONDS: TimeUnit = TimeUnit::Seconds;
/// Unit for [`Keasy::after`] amounts given in minutes.
pub const MINUTES: TimeUnit = TimeUnit::Minutes;

/// Start a builder for the named event kind (see [`Keasy::when`]).
pub fn when(event_type: &str) -> Keasy {
    let mut keasy = Keasy::new();
    keasy.when(event_type);
    keasy
}

/// Shorthand for `when(DOWN)`.
pub fn keydown() -> Keasy {
    when(DOWN)
}

/// Shorthand for `when(PRESS)`.
pub fn keypress() -> Keasy {
    when(PRESS)
}

/// Shorthand for `when(UP)`.
pub fn keyup() -> Keasy {
    when(UP)
}
