//! Keyboard event vocabulary for keasy.
//!
//! This crate holds the leaf types the binding builder works with:
//!
//! - [`KeyEventKind`]: the three key event kinds (down, press, up)
//! - [`KeyInputEvent`] / [`InputEvent`]: the event values a host dispatches
//! - [`KeyCombination`]: a parsed `"CTRL+K"` style key filter
//! - [`KeyMatcher`]: evaluates a combination against a dispatched event

pub mod event;
pub mod kind;
mod matcher;
pub mod parser;

pub use event::{InputEvent, KeyInputEvent};
pub use kind::{EVENT_NAMESPACE, KeyEventKind};
pub use matcher::{KeyMatcher, MatchError};
pub use parser::{ALT, CTRL, KeyCombination, SHIFT, parse_key_combination};
