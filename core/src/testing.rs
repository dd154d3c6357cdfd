//! Shared fixtures for unit tests

use alloc::string::ToString;
use alloc::sync::Arc;
use core::ffi::c_void;
use core::ptr::NonNull;

use crate::builder::ProcAddressSource;
use crate::ddi::SysmanGroups;
use crate::table::{DispatchTable, DriverDispatch};

/// A module exporting nothing
pub(crate) struct NoSymbols;

impl ProcAddressSource for NoSymbols {
    fn proc_address(&self, _symbol: &str) -> Option<NonNull<c_void>> {
        None
    }
}

/// Driver tables with nothing routable
pub(crate) fn empty_dispatch(name: &str) -> Arc<DriverDispatch> {
    sysman_dispatch(name, DispatchTable::invalid())
}

/// Driver tables with only a sysman table
pub(crate) fn sysman_dispatch(name: &str, sysman: DispatchTable<SysmanGroups>) -> Arc<DriverDispatch> {
    Arc::new(DriverDispatch::new(
        name.to_string(),
        0,
        DispatchTable::invalid(),
        sysman,
        Arc::new(NoSymbols),
    ))
}
