//! # Zel Tracing Layer
//!
//! An interception layer that runs registered tracers around every call.
//! Tracers are created disabled and must be enabled before they observe
//! anything. Prologues run in registration order and epilogues in reverse, so
//! tracers nest like scopes.
//!
//! The layer as a whole can be switched off while installed; an inactive
//! layer passes every call straight down the chain.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod tracer;

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use arrayvec::ArrayVec;
use spin::RwLock;
use zel_core::layer::{Call, Layer, Next};
use zel_core::{LoaderError, ZeResult};

use crate::tracer::Tracer;
pub use crate::tracer::{LogTracer, TraceCallbacks, TracerId};

/// Maximum number of registered tracers
pub const MAX_TRACERS: usize = 16;

type TracerList = ArrayVec<Arc<Tracer>, MAX_TRACERS>;

/// The tracing layer
pub struct TracingLayer {
    tracers: RwLock<TracerList>,
    next_id: AtomicU32,
    active: AtomicBool,
}

impl TracingLayer {
    /// Create an active layer with no tracers
    pub fn new() -> Self {
        Self {
            tracers: RwLock::new(ArrayVec::new()),
            next_id: AtomicU32::new(1),
            active: AtomicBool::new(true),
        }
    }

    /// Register a tracer, initially disabled
    pub fn register(&self, callbacks: Arc<dyn TraceCallbacks>) -> Result<TracerId, LoaderError> {
        let mut tracers = self.tracers.write();
        if tracers.is_full() {
            return Err(LoaderError::LayerStackFull);
        }
        let id = TracerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        tracers.push(Arc::new(Tracer::new(id, callbacks)));
        log::debug!("{} registered", id);
        Ok(id)
    }

    /// Remove a tracer
    pub fn unregister(&self, id: TracerId) -> Result<(), LoaderError> {
        let mut tracers = self.tracers.write();
        let index = tracers
            .iter()
            .position(|tracer| tracer.id == id)
            .ok_or(LoaderError::UnknownHandle)?;
        tracers.remove(index);
        Ok(())
    }

    /// Enable or disable a tracer
    pub fn set_enabled(&self, id: TracerId, enabled: bool) -> Result<(), LoaderError> {
        let tracers = self.tracers.read();
        let tracer = tracers
            .iter()
            .find(|tracer| tracer.id == id)
            .ok_or(LoaderError::UnknownHandle)?;
        tracer.enabled.store(enabled, Ordering::Release);
        Ok(())
    }

    /// Switch the whole layer on or off
    pub fn set_active(&self, active: bool) {
        if self.active.swap(active, Ordering::AcqRel) != active {
            log::info!("tracing layer {}", if active { "active" } else { "inactive" });
        }
    }

    /// Check if the layer runs its tracers
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Number of registered tracers
    pub fn tracer_count(&self) -> usize {
        self.tracers.read().len()
    }
}

impl Default for TracingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for TracingLayer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TracingLayer")
            .field("active", &self.is_active())
            .field("tracers", &self.tracer_count())
            .finish()
    }
}

impl Layer for TracingLayer {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn intercept(&self, call: &Call<'_>, next: Next<'_>) -> ZeResult {
        if !self.is_active() {
            return next.run(call);
        }

        let enabled: TracerList = self
            .tracers
            .read()
            .iter()
            .filter(|tracer| tracer.is_enabled())
            .cloned()
            .collect();

        if enabled.is_empty() {
            return next.run(call);
        }

        let instance_data: ArrayVec<usize, MAX_TRACERS> = enabled
            .iter()
            .map(|tracer| tracer.callbacks.prologue(call))
            .collect();

        let result = next.run(call);

        for (tracer, data) in enabled.iter().zip(instance_data).rev() {
            tracer.callbacks.epilogue(call, result, data);
        }

        result
    }
}
