//! # Tracers
//!
//! A tracer is a pair of callbacks run around every call that passes through
//! the tracing layer. The value a prologue returns is handed back to the
//! matching epilogue, so a tracer can carry per-call state (a timestamp, a
//! span id) without storage of its own.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use alloc::sync::Arc;

use zel_core::layer::Call;
use zel_core::ZeResult;

/// Tracer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TracerId(pub u32);

impl fmt::Display for TracerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tracer#{}", self.0)
    }
}

/// Callbacks run around each call
pub trait TraceCallbacks: Send + Sync {
    /// Called before the call is forwarded
    ///
    /// The returned value is passed to [`epilogue`](Self::epilogue).
    fn prologue(&self, _call: &Call<'_>) -> usize {
        0
    }

    /// Called after the call returns
    fn epilogue(&self, _call: &Call<'_>, _result: ZeResult, _instance_data: usize) {}
}

/// A registered tracer
pub(crate) struct Tracer {
    pub(crate) id: TracerId,
    pub(crate) enabled: AtomicBool,
    pub(crate) callbacks: Arc<dyn TraceCallbacks>,
}

impl Tracer {
    pub(crate) fn new(id: TracerId, callbacks: Arc<dyn TraceCallbacks>) -> Self {
        Self {
            id,
            enabled: AtomicBool::new(false),
            callbacks,
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

// =============================================================================
// Log Tracer
// =============================================================================

/// Logs every call and its result at `trace` level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl TraceCallbacks for LogTracer {
    fn prologue(&self, call: &Call<'_>) -> usize {
        log::trace!("--> {}({:?})", call.entry(), call.args());
        0
    }

    fn epilogue(&self, call: &Call<'_>, result: ZeResult, _instance_data: usize) {
        log::trace!("<-- {} = {}", call.entry(), result);
    }
}
