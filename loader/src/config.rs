//! # Loader Configuration
//!
//! Configuration is read through a [`ConfigProvider`]. The loader reads the
//! process environment ([`EnvConfig`]); tests and embedders can supply values
//! directly ([`MemoryConfig`]).
//!
//! Boolean knobs are enabled only by the exact value `1`.

use std::collections::BTreeMap;

use log::LevelFilter;
use zel_validation::ValidationConfig;

/// Recognized keys
pub mod keys {
    /// Add the in-process null driver
    pub const ENABLE_NULL_DRIVER: &str = "ZE_ENABLE_NULL_DRIVER";
    /// Install the validation layer
    pub const ENABLE_VALIDATION_LAYER: &str = "ZE_ENABLE_VALIDATION_LAYER";
    /// Null handle and pointer checks in the validation layer
    pub const ENABLE_PARAMETER_VALIDATION: &str = "ZE_ENABLE_PARAMETER_VALIDATION";
    /// Unknown and destroyed handle checks in the validation layer
    pub const ENABLE_HANDLE_LIFETIME: &str = "ZE_ENABLE_HANDLE_LIFETIME";
    /// Install the tracing layer
    pub const ENABLE_TRACING_LAYER: &str = "ZE_ENABLE_TRACING_LAYER";
    /// Route through the loader even with a single driver
    pub const ENABLE_LOADER_INTERCEPT: &str = "ZE_ENABLE_LOADER_INTERCEPT";
    /// Apply [`LOADER_LOGGING_LEVEL`]
    pub const ENABLE_LOADER_LOGGING: &str = "ZEL_ENABLE_LOADER_LOGGING";
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`
    pub const LOADER_LOGGING_LEVEL: &str = "ZEL_LOADER_LOGGING_LEVEL";
    /// Comma-separated driver libraries replacing the known ones
    pub const ALT_DRIVERS: &str = "ZE_ENABLE_ALT_DRIVERS";
    /// Comma-separated driver ordering, see [`crate::discovery`]
    pub const DRIVERS_ORDER: &str = "ZEL_DRIVERS_ORDER";
}

/// Source of configuration values
pub trait ConfigProvider: Send + Sync {
    /// Get a raw value
    fn get(&self, key: &str) -> Option<String>;

    /// Check a boolean knob
    fn get_flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("1")
    }

    /// Get a comma-separated list, skipping empty items
    fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfig;

impl ConfigProvider for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory values
#[derive(Debug, Default, Clone)]
pub struct MemoryConfig {
    values: BTreeMap<String, String>,
}

impl MemoryConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// Set a value, builder style
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    /// Remove a value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl ConfigProvider for MemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

// =============================================================================
// Loader Config
// =============================================================================

/// Resolved loader settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Add the in-process null driver
    pub null_driver: bool,
    /// Install the validation layer
    pub validation_layer: bool,
    /// Checkers of the validation layer
    pub validation: ValidationConfig,
    /// Install the tracing layer
    pub tracing_layer: bool,
    /// Route through the loader even with a single driver
    pub force_intercept: bool,
    /// Log level to apply, if loader logging is enabled
    pub logging: Option<LevelFilter>,
    /// Driver libraries replacing the known ones
    pub alt_drivers: Vec<String>,
    /// Driver ordering tokens
    pub driver_order: Vec<String>,
}

impl LoaderConfig {
    /// Read every knob from `provider`
    pub fn from_provider(provider: &dyn ConfigProvider) -> Self {
        let logging = provider.get_flag(keys::ENABLE_LOADER_LOGGING).then(|| {
            provider
                .get(keys::LOADER_LOGGING_LEVEL)
                .and_then(|level| level.trim().parse().ok())
                .unwrap_or(LevelFilter::Warn)
        });

        Self {
            null_driver: provider.get_flag(keys::ENABLE_NULL_DRIVER),
            validation_layer: provider.get_flag(keys::ENABLE_VALIDATION_LAYER),
            validation: ValidationConfig {
                parameter_validation: provider.get_flag(keys::ENABLE_PARAMETER_VALIDATION),
                handle_lifetime: provider.get_flag(keys::ENABLE_HANDLE_LIFETIME),
            },
            tracing_layer: provider.get_flag(keys::ENABLE_TRACING_LAYER),
            force_intercept: provider.get_flag(keys::ENABLE_LOADER_INTERCEPT),
            logging,
            alt_drivers: provider.get_list(keys::ALT_DRIVERS),
            driver_order: provider.get_list(keys::DRIVERS_ORDER),
        }
    }

    /// Read every knob from the process environment
    pub fn from_env() -> Self {
        Self::from_provider(&EnvConfig)
    }

    /// Apply the configured log level
    pub fn apply_logging(&self) {
        if let Some(level) = self.logging {
            log::set_max_level(level);
        }
    }
}
