//! crates/logging/src/provider.rs
//! Source of configured verbosity levels.
//!
//! A [`ConfigProvider`] answers integer lookups for parameter names such as
//! `top.cpu.log_level`. Values can be set outright, or preset: a preset is
//! an initial value for a parameter that has not been created yet, and
//! reading one locks it against further changes.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::{DashMap, DashSet};
use thiserror::Error;

use crate::level::VerbosityLevel;

/// Suffix appended to every candidate key.
pub const LOG_LEVEL_PARAM: &str = "log_level";

/// Failure of the configuration provider.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ProviderError {
    /// The provider has not been set up.
    #[error("configuration provider is not initialized")]
    Uninitialized,
    /// The provider exists but cannot answer.
    #[error("configuration provider unavailable: {0}")]
    Unavailable(String),
}

/// External store of configured levels.
pub trait ConfigProvider: Send + Sync {
    /// Current value of parameter `name`, if the parameter exists.
    fn get_value(&self, name: &str) -> Result<Option<i64>, ProviderError>;

    /// Preset value of parameter `name`, if one was supplied.
    fn get_preset_value(&self, name: &str) -> Result<Option<i64>, ProviderError>;

    /// Prevents later changes to the preset of `name`.
    fn lock_preset_value(&self, name: &str);
}

/// Parameter name holding the level for candidate `key`.
///
/// ```
/// use logging::parameter_name;
///
/// assert_eq!(parameter_name("top.cpu"), "top.cpu.log_level");
/// assert_eq!(parameter_name(""), "log_level");
/// ```
#[must_use]
pub fn parameter_name(key: &str) -> String {
    if key.is_empty() {
        LOG_LEVEL_PARAM.to_owned()
    } else {
        format!("{key}.{LOG_LEVEL_PARAM}")
    }
}

/// Looks up the level configured for candidate `key`.
///
/// The parameter value wins over a preset; a preset that is used gets locked.
pub fn lookup_level(
    provider: &dyn ConfigProvider,
    key: &str,
) -> Result<Option<VerbosityLevel>, ProviderError> {
    let name = parameter_name(key);
    if let Some(value) = provider.get_value(&name)? {
        return Ok(Some(VerbosityLevel::from_config_value(value)));
    }
    if let Some(value) = provider.get_preset_value(&name)? {
        provider.lock_preset_value(&name);
        return Ok(Some(VerbosityLevel::from_config_value(value)));
    }
    Ok(None)
}

/// In-memory provider backed by concurrent maps.
///
/// Useful for programmatic configuration and for observing how often the
/// resolver consults its provider.
///
/// # Examples
///
/// ```
/// use logging::{ConfigProvider, MapProvider};
///
/// let provider = MapProvider::new().with_value("top.cpu.log_level", 5);
/// assert_eq!(provider.get_value("top.cpu.log_level"), Ok(Some(5)));
/// assert_eq!(provider.queries(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MapProvider {
    values: DashMap<String, i64>,
    presets: DashMap<String, i64>,
    locked: DashSet<String>,
    queries: AtomicUsize,
}

impl MapProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter value.
    #[must_use]
    pub fn with_value(self, name: impl Into<String>, value: i64) -> Self {
        self.set_value(name, value);
        self
    }

    /// Adds a preset value.
    #[must_use]
    pub fn with_preset(self, name: impl Into<String>, value: i64) -> Self {
        self.set_preset(name, value);
        self
    }

    /// Sets a parameter value.
    pub fn set_value(&self, name: impl Into<String>, value: i64) {
        self.values.insert(name.into(), value);
    }

    /// Removes a parameter value.
    pub fn remove_value(&self, name: &str) {
        self.values.remove(name);
    }

    /// Sets a preset value unless it is locked; returns whether it was stored.
    pub fn set_preset(&self, name: impl Into<String>, value: i64) -> bool {
        let name = name.into();
        if self.locked.contains(&name) {
            return false;
        }
        self.presets.insert(name, value);
        true
    }

    /// Reports whether the preset of `name` has been locked.
    #[must_use]
    pub fn is_locked(&self, name: &str) -> bool {
        self.locked.contains(name)
    }

    /// Number of value and preset lookups served so far.
    #[must_use]
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    /// Resets the lookup counter.
    pub fn reset_queries(&self) {
        self.queries.store(0, Ordering::Relaxed);
    }
}

impl ConfigProvider for MapProvider {
    fn get_value(&self, name: &str) -> Result<Option<i64>, ProviderError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.values.get(name).map(|entry| *entry))
    }

    fn get_preset_value(&self, name: &str) -> Result<Option<i64>, ProviderError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.presets.get(name).map(|entry| *entry))
    }

    fn lock_preset_value(&self, name: &str) {
        self.locked.insert(name.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    impl ConfigProvider for Offline {
        fn get_value(&self, _name: &str) -> Result<Option<i64>, ProviderError> {
            Err(ProviderError::Unavailable("broker offline".to_owned()))
        }

        fn get_preset_value(&self, _name: &str) -> Result<Option<i64>, ProviderError> {
            Err(ProviderError::Uninitialized)
        }

        fn lock_preset_value(&self, _name: &str) {}
    }

    #[test]
    fn value_takes_precedence_over_preset() {
        let provider = MapProvider::new()
            .with_value("top.log_level", 2)
            .with_preset("top.log_level", 6);
        assert_eq!(lookup_level(&provider, "top"), Ok(Some(VerbosityLevel::Error)));
        assert!(!provider.is_locked("top.log_level"));
    }

    #[test]
    fn used_preset_is_locked() {
        let provider = MapProvider::new().with_preset("top.cpu.log_level", 5);
        assert_eq!(
            lookup_level(&provider, "top.cpu"),
            Ok(Some(VerbosityLevel::Debug))
        );
        assert!(provider.is_locked("top.cpu.log_level"));
        assert!(!provider.set_preset("top.cpu.log_level", 1));
    }

    #[test]
    fn values_are_clamped() {
        let provider = MapProvider::new().with_value("log_level", 12);
        assert_eq!(lookup_level(&provider, ""), Ok(Some(VerbosityLevel::TraceAll)));
    }

    #[test]
    fn missing_key_is_none() {
        let provider = MapProvider::new();
        assert_eq!(lookup_level(&provider, "nowhere"), Ok(None));
        assert_eq!(provider.queries(), 2);
        provider.reset_queries();
        assert_eq!(provider.queries(), 0);
    }

    #[test]
    fn provider_errors_propagate() {
        assert_eq!(
            lookup_level(&Offline, "top"),
            Err(ProviderError::Unavailable("broker offline".to_owned()))
        );
    }

    #[test]
    fn removed_values_fall_back_to_presets() {
        let provider = MapProvider::new()
            .with_value("a.log_level", 1)
            .with_preset("a.log_level", 4);
        provider.remove_value("a.log_level");
        assert_eq!(lookup_level(&provider, "a"), Ok(Some(VerbosityLevel::Info)));
    }
}
