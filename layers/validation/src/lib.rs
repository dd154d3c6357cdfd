//! # Zel Validation Layer
//!
//! An interception layer that checks calls before they reach a driver. The
//! layer runs a list of [`Checker`]s; the first one to reject a call answers
//! it and the driver is never invoked.
//!
//! ## Built-in Checkers
//!
//! | Checker | Enabled by | Rejects with |
//! |---------|------------|--------------|
//! | [`ParameterValidation`] | `ZE_ENABLE_PARAMETER_VALIDATION` | `ERROR_INVALID_NULL_HANDLE`, `ERROR_INVALID_NULL_POINTER` |
//! | [`HandleLifetime`] | `ZE_ENABLE_HANDLE_LIFETIME` | `ERROR_INVALID_ARGUMENT` |

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod checker;
pub mod lifetime;
pub mod parameter;

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

use arrayvec::ArrayVec;
use spin::RwLock;
use zel_core::layer::{Call, Layer, Next};
use zel_core::{LoaderError, ZeResult};

pub use checker::Checker;
pub use lifetime::HandleLifetime;
pub use parameter::ParameterValidation;

/// Maximum number of checkers
pub const MAX_CHECKERS: usize = 8;

/// Which built-in checkers to enable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Null handle and pointer checks
    pub parameter_validation: bool,
    /// Unknown and destroyed handle checks
    pub handle_lifetime: bool,
}

/// Validation counters
#[derive(Debug, Default)]
pub struct ValidationStats {
    checked: AtomicU64,
    rejected: AtomicU64,
}

impl ValidationStats {
    /// Calls inspected
    pub fn checked(&self) -> u64 {
        self.checked.load(Ordering::Relaxed)
    }

    /// Calls rejected by a checker
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

/// The validation layer
pub struct ValidationLayer {
    checkers: RwLock<ArrayVec<Arc<dyn Checker>, MAX_CHECKERS>>,
    stats: ValidationStats,
}

impl ValidationLayer {
    /// Create a layer with no checkers
    pub fn new() -> Self {
        Self {
            checkers: RwLock::new(ArrayVec::new()),
            stats: ValidationStats::default(),
        }
    }

    /// Create a layer with the built-in checkers `config` enables
    pub fn with_config(config: ValidationConfig) -> Self {
        let layer = Self::new();
        let mut checkers = layer.checkers.write();
        if config.parameter_validation {
            checkers.push(Arc::new(ParameterValidation));
        }
        if config.handle_lifetime {
            checkers.push(Arc::new(HandleLifetime));
        }
        drop(checkers);
        layer
    }

    /// Add a checker after the existing ones
    pub fn add_checker(&self, checker: Arc<dyn Checker>) -> Result<(), LoaderError> {
        self.checkers
            .write()
            .try_push(checker)
            .map_err(|_| LoaderError::LayerStackFull)
    }

    /// Names of the active checkers
    pub fn checker_names(&self) -> ArrayVec<&'static str, MAX_CHECKERS> {
        self.checkers.read().iter().map(|c| c.name()).collect()
    }

    /// Counters
    pub fn stats(&self) -> &ValidationStats {
        &self.stats
    }
}

impl Default for ValidationLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ValidationLayer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValidationLayer")
            .field("checkers", &self.checker_names())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Layer for ValidationLayer {
    fn name(&self) -> &'static str {
        "validation"
    }

    fn intercept(&self, call: &Call<'_>, next: Next<'_>) -> ZeResult {
        let checkers = self.checkers.read().clone();
        self.stats.checked.fetch_add(1, Ordering::Relaxed);

        for checker in &checkers {
            if let Some(code) = checker.prologue(call) {
                self.stats.rejected.fetch_add(1, Ordering::Relaxed);
                log::debug!("{}: rejected by {} with {}", call.entry(), checker.name(), code);
                return code;
            }
        }

        let result = next.run(call);

        for checker in &checkers {
            checker.epilogue(call, result);
        }

        result
    }
}
