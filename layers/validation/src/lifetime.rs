//! # Handle Lifetime
//!
//! Rejects handles the loader has never seen or that have been destroyed.
//!
//! Only handles of the called entry point's own category are checked. Other
//! handle arguments (a compute event passed to a tools call) may come from a
//! surface the loader does not route and are left to the driver.

use zel_core::layer::Call;
use zel_core::param::Arg;
use zel_core::ZeResult;

use crate::checker::Checker;

/// Unknown and destroyed handle checks
#[derive(Debug, Default, Clone, Copy)]
pub struct HandleLifetime;

impl Checker for HandleLifetime {
    fn name(&self) -> &'static str {
        "handle-lifetime"
    }

    fn prologue(&self, call: &Call<'_>) -> Option<ZeResult> {
        let category = call.entry().category;
        let stale = call
            .params()
            .filter(|(spec, _)| spec.handle == Some(category))
            .find_map(|(_, arg)| match arg {
                Arg::Handle(handle) if !handle.is_null() && !call.is_live(handle) => Some(handle),
                _ => None,
            });

        stale.map(|handle| {
            log::warn!("{}: handle {} is not live", call.entry(), handle);
            ZeResult::ERROR_INVALID_ARGUMENT
        })
    }
}
