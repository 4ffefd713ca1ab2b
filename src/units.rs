//! Time units for delayed dispatch.

use crate::error::KeasyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit for the amount passed to [`crate::Keasy::after`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
}

impl TimeUnit {
    /// Look up a unit by name. Unrecognized names fall back to milliseconds.
    pub fn from_name(name: &str) -> Self {
        match name {
            "seconds" => TimeUnit::Seconds,
            "minutes" => TimeUnit::Minutes,
            "milliseconds" => TimeUnit::Milliseconds,
            other => {
                log::debug!("Unknown time unit '{}', using milliseconds", other);
                TimeUnit::Milliseconds
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
        }
    }

    fn factor(self) -> u64 {
        match self {
            TimeUnit::Milliseconds => 1,
            TimeUnit::Seconds => 1_000,
            TimeUnit::Minutes => 60_000,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert `amount` of `unit` to milliseconds.
///
/// Non-positive amounts clamp to zero.
///
/// # Errors
/// Returns [`KeasyError::InvalidAmount`] if the result overflows `u64`.
pub fn to_millis(amount: i64, unit: TimeUnit) -> Result<u64, KeasyError> {
    if amount <= 0 {
        return Ok(0);
    }
    (amount as u64)
        .checked_mul(unit.factor())
        .ok_or_else(|| KeasyError::InvalidAmount {
            amount,
            unit: unit.to_string(),
        })
}
