//! Declarative bindings loaded from YAML.
//!
//! ```yaml
//! bindings:
//!   - event: keydown
//!     keys: CTRL+S
//!     delay: 300
//!     unit: milliseconds
//!     action: save
//! ```
//!
//! Binding files are only ever read. Each entry becomes one [`Keasy`]
//! attached to a shared target. Entries that
//! fail validation are logged and skipped so one typo does not disable the
//! rest of the file.

use crate::builder::{ActionMap, Keasy};
use crate::error::KeasyError;
use crate::target::EventSource;
use crate::timer::TimerHost;
use crate::units::TimeUnit;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// One binding entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Event kind name; unrecognized or missing means keydown
    pub event: Option<String>,
    /// Key filter such as `CTRL+S`
    pub keys: Option<String>,
    pub delay: Option<i64>,
    /// `milliseconds` (default), `seconds` or `minutes`
    pub unit: Option<String>,
    /// Name looked up in the [`ActionMap`]
    pub action: String,
}

/// Top-level binding file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeasyConfig {
    pub bindings: Vec<BindingConfig>,
}

impl KeasyConfig {
    /// Load a binding file from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading bindings from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read binding config {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to parse binding config {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: KeasyConfig = serde_yaml_ng::from_str(yaml)?;
        log::debug!("Parsed {} binding entries", config.bindings.len());
        Ok(config)
    }
}

impl BindingConfig {
    /// Build and bind a [`Keasy`] for this entry.
    pub fn build(
        &self,
        target: Arc<dyn EventSource>,
        actions: &ActionMap,
        timers: Option<Arc<dyn TimerHost>>,
    ) -> Result<Keasy, KeasyError> {
        let mut keasy = match timers {
            Some(timers) => Keasy::with_timers(timers),
            None => Keasy::new(),
        };

        keasy.when(self.event.as_deref().unwrap_or_default());
        if let Some(keys) = &self.keys {
            keasy.match_keys(keys);
        }
        if let Some(delay) = self.delay {
            let unit = self
                .unit
                .as_deref()
                .map(TimeUnit::from_name)
                .unwrap_or_default();
            keasy.after(delay, unit)?;
        }
        keasy.on_action(&self.action, actions)?;
        keasy.attach_to(target)?;
        Ok(keasy)
    }
}

/// The bindings built from one [`KeasyConfig`].
#[derive(Debug, Default)]
pub struct BindingSet {
    bindings: Vec<Keasy>,
}

impl BindingSet {
    /// Build every valid entry of `config` against `target`.
    ///
    /// Invalid entries are logged and skipped.
    pub fn from_config(
        config: &KeasyConfig,
        target: Arc<dyn EventSource>,
        actions: &ActionMap,
        timers: Option<Arc<dyn TimerHost>>,
    ) -> Self {
        log::info!(
            "Building binding set from {} config entries",
            config.bindings.len()
        );

        let mut bindings = Vec::with_capacity(config.bindings.len());
        for entry in &config.bindings {
            match entry.build(Arc::clone(&target), actions, timers.clone()) {
                Ok(keasy) => {
                    log::info!(
                        "Registered binding: {:?} -> {} (parsed as: {:?})",
                        entry.keys,
                        entry.action,
                        keasy
                    );
                    bindings.push(keasy);
                }
                Err(e) => {
                    log::warn!(
                        "Invalid binding {:?} for action '{}': {}",
                        entry.keys,
                        entry.action,
                        e
                    );
                }
            }
        }

        log::info!("Binding set initialized with {} bindings", bindings.len());
        Self { bindings }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keasy> {
        self.bindings.iter()
    }

    /// Remove every binding from its target.
    pub fn detach_all(&mut self) {
        for keasy in &mut self.bindings {
            keasy.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_entry() {
        let config = KeasyConfig::from_yaml_str(
            "bindings:\n  - event: keyup\n    keys: CTRL+S\n    delay: 2\n    unit: seconds\n    action: save\n",
        )
        .unwrap();

        assert_eq!(config.bindings.len(), 1);
        let entry = &config.bindings[0];
        assert_eq!(entry.event.as_deref(), Some("keyup"));
        assert_eq!(entry.keys.as_deref(), Some("CTRL+S"));
        assert_eq!(entry.delay, Some(2));
        assert_eq!(entry.unit.as_deref(), Some("seconds"));
        assert_eq!(entry.action, "save");
    }

    #[test]
    fn test_missing_fields_default() {
        let config = KeasyConfig::from_yaml_str("bindings:\n  - action: open\n").unwrap();
        let entry = &config.bindings[0];
        assert!(entry.event.is_none());
        assert!(entry.keys.is_none());
        assert!(entry.delay.is_none());

        let empty = KeasyConfig::from_yaml_str("{}").unwrap();
        assert!(empty.bindings.is_empty());
    }

    #[test]
    fn test_fractional_delay_rejected() {
        assert!(KeasyConfig::from_yaml_str("bindings:\n  - delay: 1.5\n    action: x\n").is_err());
    }
}
