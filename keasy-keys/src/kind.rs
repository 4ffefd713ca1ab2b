//! Key event kinds.
//!
//! A host fires three kinds of keyboard events. Each kind has a canonical
//! lowercase name (`keydown`, `keypress`, `keyup`) which is what gets
//! registered with an event target, and a namespaced selector
//! (`keasy:keydown`, ...) used by the public shorthand constants so they
//! never collide with names a consumer registers directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix applied to the public kind selectors.
pub const EVENT_NAMESPACE: &str = "keasy:";

/// One of the three keyboard event kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEventKind {
    #[default]
    #[serde(rename = "keydown")]
    Down,
    #[serde(rename = "keypress")]
    Press,
    #[serde(rename = "keyup")]
    Up,
}

impl KeyEventKind {
    /// All kinds, in declaration order.
    pub const ALL: [KeyEventKind; 3] = [KeyEventKind::Down, KeyEventKind::Press, KeyEventKind::Up];

    /// Look up a kind by its canonical name.
    ///
    /// Accepts both the raw name (`"keyup"`) and the namespaced selector
    /// (`"keasy:keyup"`). Matching is case-sensitive; anything else yields
    /// `None` and it is up to the caller to pick a default.
    pub fn from_name(name: &str) -> Option<Self> {
        let raw = name.strip_prefix(EVENT_NAMESPACE).unwrap_or(name);
        Self::ALL.into_iter().find(|kind| kind.equals(raw))
    }

    /// Canonical event name, as registered with an event target.
    pub fn name(self) -> &'static str {
        match self {
            KeyEventKind::Down => "keydown",
            KeyEventKind::Press => "keypress",
            KeyEventKind::Up => "keyup",
        }
    }

    /// Namespaced selector for this kind.
    pub fn selector(self) -> &'static str {
        match self {
            KeyEventKind::Down => "keasy:keydown",
            KeyEventKind::Press => "keasy:keypress",
            KeyEventKind::Up => "keasy:keyup",
        }
    }

    /// Compare a raw event name against the canonical name.
    pub fn equals(self, raw: &str) -> bool {
        raw == self.name()
    }
}

impl fmt::Display for KeyEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq<str> for KeyEventKind {
    fn eq(&self, other: &str) -> bool {
        self.equals(other)
    }
}

impl PartialEq<&str> for KeyEventKind {
    fn eq(&self, other: &&str) -> bool {
        self.equals(other)
    }
}
