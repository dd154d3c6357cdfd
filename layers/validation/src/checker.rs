//! # Checkers
//!
//! A checker inspects a call before it reaches the driver and may reject it.
//! It is also shown the result afterwards.

use zel_core::layer::Call;
use zel_core::ZeResult;

/// Validation checker
pub trait Checker: Send + Sync {
    /// Checker name used in diagnostics
    fn name(&self) -> &'static str;

    /// Inspect a call before it is forwarded
    ///
    /// Return `Some(code)` to reject the call with `code`.
    fn prologue(&self, _call: &Call<'_>) -> Option<ZeResult> {
        None
    }

    /// Observe the result of a forwarded call
    fn epilogue(&self, _call: &Call<'_>, _result: ZeResult) {}
}
