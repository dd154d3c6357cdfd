//! # Dispatch Table Builder
//!
//! Populates a driver's dispatch tables by calling the `Get<Group>ProcAddrTable`
//! getters it exports.
//!
//! ## Negotiation
//!
//! For each category the builder walks the known versions from newest to
//! oldest. A driver rejects a version it does not implement with
//! `ERROR_UNSUPPORTED_VERSION` from its mandatory getter; the first version
//! accepted becomes the table's negotiated version.
//!
//! A category that cannot be negotiated is kept as an invalid table. A module
//! for which no category can be negotiated is rejected.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ffi::c_void;
use core::ptr::NonNull;

use spin::Mutex;

use crate::ddi::{ComputeGroups, SysmanGroups, ToolsGroups};
use crate::entry::Category;
use crate::error::BuildError;
use crate::result::ZeResult;
use crate::table::{DispatchTable, DriverDispatch, GroupInfo, GroupSet};
use crate::version::ApiVersion;

/// Symbol lookup into a driver module
pub trait ProcAddressSource: Send + Sync {
    /// Resolve an exported function by name
    fn proc_address(&self, symbol: &str) -> Option<NonNull<c_void>>;
}

/// Signature shared by every exported group getter
pub type GetTableFn<T> = unsafe extern "C" fn(ApiVersion, *mut T) -> ZeResult;

/// Fetch one sub-table
///
/// An optional group that is not exported, or whose getter fails, yields
/// `Ok(None)`. For a required group both are errors.
pub fn fetch_group<T: Default>(
    source: &dyn ProcAddressSource,
    category: Category,
    info: &GroupInfo,
    version: ApiVersion,
) -> Result<Option<Box<T>>, BuildError> {
    let Some(address) = source.proc_address(info.symbol) else {
        if info.required {
            return Err(BuildError::MissingGroup {
                category,
                group: info.name,
            });
        }
        log::debug!("{}: not exported", info.symbol);
        return Ok(None);
    };

    // SAFETY: group getters are exported with the `GetTableFn` signature for
    // the sub-table type the symbol names.
    let getter = unsafe { core::mem::transmute::<*mut c_void, GetTableFn<T>>(address.as_ptr()) };

    let mut table = Box::<T>::default();
    // SAFETY: `table` is a valid, exclusively owned sub-table.
    let result = unsafe { getter(version, &mut *table) };

    if result.is_success() {
        Ok(Some(table))
    } else if info.required {
        Err(BuildError::Rejected {
            category,
            group: info.name,
            code: result,
        })
    } else {
        log::debug!("{}({}) returned {}", info.symbol, version, result);
        Ok(None)
    }
}

/// Build one category's table at the highest version the driver accepts
pub fn negotiate<G: GroupSet>(source: &dyn ProcAddressSource) -> Result<DispatchTable<G>, BuildError> {
    for &version in ApiVersion::KNOWN.iter().rev() {
        match G::fetch(source, version) {
            Ok(groups) => {
                log::debug!(
                    "{} table negotiated at {} with {} of {} groups",
                    G::CATEGORY,
                    version,
                    groups.populated(),
                    G::GROUPS.len()
                );
                return Ok(DispatchTable::new(version, groups));
            },
            Err(BuildError::Rejected { code, .. }) if code == ZeResult::ERROR_UNSUPPORTED_VERSION => {
                continue;
            },
            Err(err) => return Err(err),
        }
    }

    Err(BuildError::NoCommonVersion {
        category: G::CATEGORY,
    })
}

fn table_or_invalid<G: GroupSet>(
    name: &str,
    result: Result<DispatchTable<G>, BuildError>,
) -> (DispatchTable<G>, Option<BuildError>) {
    match result {
        Ok(table) => (table, None),
        Err(err) => {
            log::warn!("{}: {}", name, err);
            (DispatchTable::invalid(), Some(err))
        },
    }
}

// =============================================================================
// Table Builder
// =============================================================================

/// Builds and owns the tables of every module, once per module name
#[derive(Default)]
pub struct TableBuilder {
    built: Mutex<BTreeMap<String, Arc<DriverDispatch>>>,
}

impl TableBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tables for `name`, or return the ones already built
    ///
    /// Tables are published only once every category has been attempted.
    pub fn build(
        &self,
        name: &str,
        source: Arc<dyn ProcAddressSource>,
    ) -> Result<Arc<DriverDispatch>, BuildError> {
        let mut built = self.built.lock();
        if let Some(existing) = built.get(name) {
            return Ok(existing.clone());
        }

        let (compute, compute_err) = table_or_invalid(name, negotiate::<ComputeGroups>(&*source));
        let (tools, tools_err) = table_or_invalid(name, negotiate::<ToolsGroups>(&*source));
        let (sysman, sysman_err) = table_or_invalid(name, negotiate::<SysmanGroups>(&*source));

        if let (Some(_), Some(_), Some(err)) = (compute_err, tools_err, sysman_err) {
            log::error!("{}: excluded, no category could be built", name);
            return Err(err);
        }

        let index = built.len();
        let dispatch = Arc::new(
            DriverDispatch::new(name.to_string(), index, tools, sysman, source).with_compute(compute),
        );
        built.insert(name.to_string(), dispatch.clone());
        log::info!("{}: tables built (driver {})", name, index);
        Ok(dispatch)
    }

    /// Check if `name` has been built
    pub fn contains(&self, name: &str) -> bool {
        self.built.lock().contains_key(name)
    }

    /// Forget one module
    pub fn remove(&self, name: &str) -> Option<Arc<DriverDispatch>> {
        self.built.lock().remove(name)
    }

    /// Forget every module, returning them in build order
    pub fn drain(&self) -> Vec<Arc<DriverDispatch>> {
        let mut all: Vec<_> = core::mem::take(&mut *self.built.lock()).into_values().collect();
        all.sort_by_key(|dispatch| dispatch.index());
        all
    }

    /// Number of modules built
    pub fn len(&self) -> usize {
        self.built.lock().len()
    }

    /// Check if nothing has been built
    pub fn is_empty(&self) -> bool {
        self.built.lock().is_empty()
    }
}

impl core::fmt::Debug for TableBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableBuilder")
            .field("modules", &self.built.lock().keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddi::sysman::{ZesDeviceDdiTable, ZesFirmwareDdiTable};
    use crate::ddi::tools::ZetDeviceDdiTable;
    use crate::testing::NoSymbols;
    use core::sync::atomic::{AtomicU32, Ordering};

    static NEWEST_ACCEPTED: AtomicU32 = AtomicU32::new(0);

    unsafe extern "C" fn get_device(version: ApiVersion, table: *mut ZesDeviceDdiTable) -> ZeResult {
        if version > ApiVersion::from_raw(NEWEST_ACCEPTED.load(Ordering::SeqCst)) {
            return ZeResult::ERROR_UNSUPPORTED_VERSION;
        }
        if table.is_null() {
            return ZeResult::ERROR_INVALID_NULL_POINTER;
        }
        ZeResult::SUCCESS
    }

    unsafe extern "C" fn get_firmware(_: ApiVersion, _: *mut ZesFirmwareDdiTable) -> ZeResult {
        ZeResult::ERROR_DEVICE_LOST
    }

    unsafe extern "C" fn get_tools_device(_: ApiVersion, _: *mut ZetDeviceDdiTable) -> ZeResult {
        ZeResult::SUCCESS
    }

    struct SysmanOnly;

    impl ProcAddressSource for SysmanOnly {
        fn proc_address(&self, symbol: &str) -> Option<NonNull<c_void>> {
            let address = match symbol {
                "zesGetDeviceProcAddrTable" => get_device as GetTableFn<ZesDeviceDdiTable> as *mut c_void,
                "zesGetFirmwareProcAddrTable" => {
                    get_firmware as GetTableFn<ZesFirmwareDdiTable> as *mut c_void
                },
                _ => return None,
            };
            NonNull::new(address)
        }
    }

    struct ToolsOnly;

    impl ProcAddressSource for ToolsOnly {
        fn proc_address(&self, symbol: &str) -> Option<NonNull<c_void>> {
            match symbol {
                "zetGetDeviceProcAddrTable" => NonNull::new(
                    get_tools_device as GetTableFn<ZetDeviceDdiTable> as *mut c_void,
                ),
                _ => None,
            }
        }
    }

    #[test]
    fn test_negotiates_highest_accepted_version() {
        NEWEST_ACCEPTED.store(ApiVersion::V1_5.as_raw(), Ordering::SeqCst);
        let table = negotiate::<SysmanGroups>(&SysmanOnly).expect("negotiated");
        assert!(table.is_valid());
        assert_eq!(table.version(), ApiVersion::V1_5);
        assert!(table.groups().device.is_some());
        // A failing optional getter leaves its sub-table null
        assert!(table.groups().firmware.is_none());
        assert_eq!(table.groups().populated(), 1);
    }

    #[test]
    fn test_missing_required_group() {
        let err = negotiate::<ToolsGroups>(&SysmanOnly).unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingGroup {
                category: Category::Tools,
                group: "Device"
            }
        );
    }

    #[test]
    fn test_module_with_one_category() {
        let builder = TableBuilder::new();
        let dispatch = builder.build("tools-only", Arc::new(ToolsOnly)).expect("built");
        assert!(dispatch.tools().is_valid());
        assert_eq!(dispatch.tools().version(), ApiVersion::CURRENT);
        assert!(!dispatch.sysman().is_valid());
        assert!(!dispatch.compute().is_valid());
    }

    #[test]
    fn test_module_without_categories_is_excluded() {
        let builder = TableBuilder::new();
        assert!(builder.build("empty", Arc::new(NoSymbols)).is_err());
        assert!(!builder.contains("empty"));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = TableBuilder::new();
        let first = builder.build("tools", Arc::new(ToolsOnly)).expect("built");
        let second = builder.build("tools", Arc::new(ToolsOnly)).expect("built");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builder.len(), 1);

        let drained = builder.drain();
        assert_eq!(drained.len(), 1);
        assert!(builder.is_empty());
    }
}
