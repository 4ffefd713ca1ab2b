//! Key combination parser.
//!
//! Parses key strings like "CTRL+K" or "ALT+SHIFT+Enter" into
//! [`KeyCombination`] structs. Modifier tokens are matched exactly
//! (`CTRL`, `ALT`, `SHIFT`); every other token is a required key.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Modifier token for the Control key.
pub const CTRL: &str = "CTRL";
/// Modifier token for the Alt key.
pub const ALT: &str = "ALT";
/// Modifier token for the Shift key.
pub const SHIFT: &str = "SHIFT";

/// A parsed key combination.
///
/// A modifier flag is only ever set when its token appears in the input.
/// An unset flag means "don't care", not "must be released".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    /// Non-modifier tokens, in the order given. Not de-duplicated.
    pub required_keys: Vec<String>,
    pub require_ctrl: bool,
    pub require_alt: bool,
    pub require_shift: bool,
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();

        if self.require_ctrl {
            parts.push(CTRL);
        }
        if self.require_alt {
            parts.push(ALT);
        }
        if self.require_shift {
            parts.push(SHIFT);
        }
        parts.extend(self.required_keys.iter().map(String::as_str));

        write!(f, "{}", parts.join("+"))
    }
}

impl FromStr for KeyCombination {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_key_combination(s))
    }
}

/// Parse a key combination string into a [`KeyCombination`].
///
/// Supported format: "Token+Token+...+Token"
///
/// - `CTRL`, `ALT`, `SHIFT` set the matching modifier requirement
/// - anything else is appended to `required_keys` verbatim
///
/// Every string parses. Empty tokens (`"CTRL+"`, `"A++B"`) become empty
/// required keys, which no dispatched key equals.
pub fn parse_key_combination(s: &str) -> KeyCombination {
    let mut combination = KeyCombination::default();

    for token in s.split('+') {
        match token {
            CTRL => combination.require_ctrl = true,
            ALT => combination.require_alt = true,
            SHIFT => combination.require_shift = true,
            key => combination.required_keys.push(key.to_string()),
        }
    }

    log::trace!("Parsed key combination '{}' as {:?}", s, combination);
    combination
}
