//! Key event matching.
//!
//! Matches dispatched [`InputEvent`]s against a parsed [`KeyCombination`].

use crate::event::{InputEvent, KeyInputEvent};
use crate::parser::{KeyCombination, parse_key_combination};
use thiserror::Error;

/// Error returned when an event cannot be matched at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The event did not come from the keyboard input system.
    #[error("Expected a keyboard event, got '{0}'")]
    InvalidEventKind(String),
}

/// Matcher for comparing input events against a key combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatcher {
    combination: KeyCombination,
}

impl KeyMatcher {
    pub fn new(combination: KeyCombination) -> Self {
        Self { combination }
    }

    /// Parse a key string and build a matcher for it.
    pub fn parse(spec: &str) -> Self {
        Self::new(parse_key_combination(spec))
    }

    pub fn combination(&self) -> &KeyCombination {
        &self.combination
    }

    /// Check a dispatched event against the combination.
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidEventKind`] if `event` is not a keyboard event.
    pub fn matches(&self, event: &InputEvent) -> Result<bool, MatchError> {
        match event {
            InputEvent::Key(key_event) => Ok(self.matches_key(key_event)),
            InputEvent::Other { event_type } => {
                Err(MatchError::InvalidEventKind(event_type.clone()))
            }
        }
    }

    /// Check a keyboard event against the combination.
    ///
    /// Every required key must equal the event's key (so more than one
    /// distinct required key can never match a single event). Required
    /// modifiers must be pressed; modifiers that are not required are ignored.
    pub fn matches_key(&self, event: &KeyInputEvent) -> bool {
        let combo = &self.combination;

        let keys_match = combo.required_keys.iter().all(|key| *key == event.key);
        if !keys_match {
            return false;
        }

        modifier_satisfied(combo.require_ctrl, event.ctrl_key)
            && modifier_satisfied(combo.require_alt, event.alt_key)
            && modifier_satisfied(combo.require_shift, event.shift_key)
    }
}

fn modifier_satisfied(required: bool, pressed: bool) -> bool {
    !required || pressed
}
