//! # C Entry Points
//!
//! The exported surface of the loader library:
//!
//! - one `#[no_mangle]` function per routed entry point, forwarding through
//!   the installed loader
//! - `zeInit`, `zeDriverGet`, `zesInit` and `zesDriverGet`, implemented by
//!   the loader itself
//! - a `<prefix>Get<Group>ProcAddrTable` getter per group, so that layers and
//!   applications can fetch the loader's own tables
//! - the `zel` loader services: handle registration, component versions,
//!   the tracing layer switch and the teardown check
//!
//! Routed exports return `ZE_RESULT_ERROR_UNINITIALIZED` while no loader is
//! installed. `zeInit`, `zesInit` and the table getters install one from the
//! environment on first use.

#![allow(non_snake_case)]

use std::ffi::c_char;

use zel_core::prelude::*;

use crate::context::ComponentVersion;
use crate::global;

macro_rules! loader_export {
    (global, $($rest:tt)*) => {};
    (route, $Api:ident, $method:ident, $api:ident; $($p:ident : $pty:ty),*) => {
        #[doc = concat!("`", stringify!($api), "`")]
        ///
        /// # Safety
        ///
        /// Arguments must satisfy the entry point's C contract.
        #[no_mangle]
        pub unsafe extern "C" fn $api($($p: $pty),*) -> ZeResult {
            let Some(loader) = global::installed() else {
                return ZeResult::ERROR_UNINITIALIZED;
            };
            // SAFETY: arguments are forwarded unchanged.
            unsafe { $Api::new(loader.dispatcher()).$method($($p),*) }
        }
    };
}

macro_rules! loader_exports {
    (
        @category $Category:ident, $prefix:ident, $Prefix:ident, $Api:ident, $Groups:ident;
        $(
            group $Group:ident => $field:ident as $scope:ident ($req:ident) {
                $(
                    $(#[$ratt:ident])?
                    $kind:ident $op:ident : $api:ident ($maj:literal, $min:literal)
                        ( $( $(#[$patt:ident])* $p:ident : $pty:ty ),* );
                )*
            }
        )*
    ) => {
        paste::paste! {
            $(
                $(
                    loader_export! { $kind, $Api, [<$scope _ $op>], $api; $($p : $pty),* }
                )*

                #[doc = concat!("Fill the `", stringify!($Group), "` table with the loader's entry points")]
                ///
                /// With a single driver, no layers and interception not forced,
                /// the driver's own sub-table is returned instead.
                ///
                /// # Safety
                ///
                /// `table` must be null or point to writable storage for the table.
                #[no_mangle]
                pub unsafe extern "C" fn [<$prefix Get $Group ProcAddrTable>](
                    version: ApiVersion,
                    table: *mut [<$Prefix $Group DdiTable>],
                ) -> ZeResult {
                    let Some(loader) = global::ensure_installed() else {
                        return ZeResult::ERROR_UNINITIALIZED;
                    };
                    if table.is_null() {
                        return ZeResult::ERROR_INVALID_NULL_POINTER;
                    }
                    if version.major() != ApiVersion::CURRENT.major() || version > ApiVersion::CURRENT {
                        return ZeResult::ERROR_UNSUPPORTED_VERSION;
                    }

                    let filled = match loader.passthrough() {
                        Some(dispatch) => <$Groups as CategoryTables>::select(&dispatch)
                            .groups()
                            .$field
                            .as_deref()
                            .copied()
                            .unwrap_or_default(),
                        None => {
                            let mut exports = [<$Prefix $Group DdiTable>]::default();
                            $(
                                if zel_core::version::supports(version, ApiVersion::new($maj, $min)) {
                                    exports.[<pfn_ $op>] = Some($api);
                                }
                            )*
                            exports
                        },
                    };

                    // SAFETY: checked non-null; the caller provides the storage.
                    unsafe { table.write(filled) };
                    ZeResult::SUCCESS
                }
            )*
        }
    };
}

zel_core::ze_ddi_table!(loader_exports);
zel_core::zes_ddi_table!(loader_exports);
zel_core::zet_ddi_table!(loader_exports);

// =============================================================================
// Loader-level Entry Points
// =============================================================================

/// `zeInit`
///
/// # Safety
///
/// Always safe; `unsafe` for symmetry with the other exports.
#[no_mangle]
pub unsafe extern "C" fn zeInit(flags: ZeInitFlags) -> ZeResult {
    match global::ensure_installed() {
        Some(loader) => loader.init_compute(flags),
        None => ZeResult::ERROR_UNINITIALIZED,
    }
}

/// `zeDriverGet`
///
/// # Safety
///
/// `p_count` must be null or writable; a non-null `ph_drivers` must have room
/// for `*p_count` handles.
#[no_mangle]
pub unsafe extern "C" fn zeDriverGet(p_count: *mut u32, ph_drivers: *mut ZeDriverHandle) -> ZeResult {
    let Some(loader) = global::installed() else {
        return ZeResult::ERROR_UNINITIALIZED;
    };
    // SAFETY: the caller upholds the pointer contract.
    unsafe { loader.compute_driver_get(p_count, ph_drivers) }
}

/// `zesInit`
///
/// # Safety
///
/// Always safe; `unsafe` for symmetry with the other exports.
#[no_mangle]
pub unsafe extern "C" fn zesInit(flags: ZesInitFlags) -> ZeResult {
    match global::ensure_installed() {
        Some(loader) => loader.init(flags),
        None => ZeResult::ERROR_UNINITIALIZED,
    }
}

/// `zesDriverGet`
///
/// # Safety
///
/// `p_count` must be null or writable; a non-null `ph_drivers` must have room
/// for `*p_count` handles.
#[no_mangle]
pub unsafe extern "C" fn zesDriverGet(p_count: *mut u32, ph_drivers: *mut ZesDriverHandle) -> ZeResult {
    let Some(loader) = global::installed() else {
        return ZeResult::ERROR_UNINITIALIZED;
    };
    // SAFETY: the caller upholds the pointer contract.
    unsafe { loader.driver_get(p_count, ph_drivers) }
}

/// `zelLoaderRegisterHandle`
///
/// Routes `object` to the driver that owns `owner`.
///
/// # Safety
///
/// Always safe; `unsafe` for symmetry with the other exports.
#[no_mangle]
pub unsafe extern "C" fn zelLoaderRegisterHandle(owner: RawHandle, object: RawHandle) -> ZeResult {
    let Some(loader) = global::installed() else {
        return ZeResult::ERROR_UNINITIALIZED;
    };
    match loader.register_handle(owner, object) {
        Ok(()) => ZeResult::SUCCESS,
        Err(err) => err.into(),
    }
}

// =============================================================================
// Loader Services
// =============================================================================

/// Length of [`ZelComponentVersion::component_name`]
pub const COMPONENT_NAME_LEN: usize = 64;

/// `zel_version_t`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZelVersion {
    /// Major version
    pub major: i32,
    /// Minor version
    pub minor: i32,
    /// Patch version
    pub patch: i32,
}

/// `zel_component_version_t`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ZelComponentVersion {
    /// NUL-terminated component name
    pub component_name: [c_char; COMPONENT_NAME_LEN],
    /// Newest API version the component implements
    pub spec_version: ApiVersion,
    /// Library version
    pub component_lib_version: ZelVersion,
}

impl ZelComponentVersion {
    /// An entry with an empty name
    pub const fn empty() -> Self {
        Self {
            component_name: [0; COMPONENT_NAME_LEN],
            spec_version: ApiVersion::V1_0,
            component_lib_version: ZelVersion { major: 0, minor: 0, patch: 0 },
        }
    }

    /// Component name up to the first NUL
    pub fn name(&self) -> String {
        self.component_name
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8 as char)
            .collect()
    }
}

impl Default for ZelComponentVersion {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&ComponentVersion> for ZelComponentVersion {
    fn from(version: &ComponentVersion) -> Self {
        let mut entry = Self::empty();
        // Keep the last byte for the terminator.
        for (slot, byte) in entry.component_name[..COMPONENT_NAME_LEN - 1]
            .iter_mut()
            .zip(version.name.bytes())
        {
            *slot = byte as c_char;
        }
        let (major, minor, patch) = version.library_version;
        entry.spec_version = version.spec_version;
        entry.component_lib_version = ZelVersion { major, minor, patch };
        entry
    }
}

/// `zelLoaderGetVersions`
///
/// With a null `versions` only the number of components is written.
///
/// # Safety
///
/// `num_elems` must be null or writable; a non-null `versions` must have room
/// for `*num_elems` entries.
#[no_mangle]
pub unsafe extern "C" fn zelLoaderGetVersions(num_elems: *mut usize, versions: *mut ZelComponentVersion) -> ZeResult {
    let Some(loader) = global::installed() else {
        return ZeResult::ERROR_UNINITIALIZED;
    };
    if num_elems.is_null() {
        return ZeResult::ERROR_INVALID_NULL_POINTER;
    }

    let components = loader.versions();
    if !versions.is_null() {
        // SAFETY: checked non-null; the caller guarantees validity.
        if unsafe { num_elems.read() } < components.len() {
            return ZeResult::ERROR_INVALID_SIZE;
        }
        for (i, component) in components.iter().enumerate() {
            // SAFETY: `i < *num_elems`, within the caller's array.
            unsafe { versions.add(i).write(component.into()) };
        }
    }

    // SAFETY: checked non-null above.
    unsafe { num_elems.write(components.len()) };
    ZeResult::SUCCESS
}

/// `zelEnableTracingLayer`
///
/// # Safety
///
/// Always safe; `unsafe` for symmetry with the other exports.
#[no_mangle]
pub unsafe extern "C" fn zelEnableTracingLayer() -> ZeResult {
    let Some(loader) = global::installed() else {
        return ZeResult::ERROR_UNINITIALIZED;
    };
    match loader.enable_tracing_layer() {
        Ok(()) => ZeResult::SUCCESS,
        Err(err) => err.into(),
    }
}

/// `zelDisableTracingLayer`
///
/// # Safety
///
/// Always safe; `unsafe` for symmetry with the other exports.
#[no_mangle]
pub unsafe extern "C" fn zelDisableTracingLayer() -> ZeResult {
    let Some(loader) = global::installed() else {
        return ZeResult::ERROR_UNINITIALIZED;
    };
    loader.disable_tracing_layer();
    ZeResult::SUCCESS
}

/// `zelGetTracingLayerState`
///
/// # Safety
///
/// `enabled` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn zelGetTracingLayerState(enabled: *mut bool) -> ZeResult {
    if enabled.is_null() {
        return ZeResult::ERROR_INVALID_NULL_POINTER;
    }
    let state = global::installed().is_some_and(|loader| loader.tracing_layer_state());
    // SAFETY: checked non-null; the caller guarantees validity.
    unsafe { enabled.write(state) };
    ZeResult::SUCCESS
}

/// `zelCheckIsLoaderInTearDown`
#[no_mangle]
pub extern "C" fn zelCheckIsLoaderInTearDown() -> bool {
    global::in_teardown()
}
