//! # Management Errors
//!
//! Errors reported by the Rust management API (building tables, registering
//! drivers and layers). Entry points never see these directly; they are
//! folded into a [`ZeResult`] at the C boundary.

use core::fmt;

use crate::entry::Category;
use crate::result::ZeResult;

// =============================================================================
// BUILD ERRORS
// =============================================================================

/// Dispatch table construction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// The driver does not export a mandatory group getter
    MissingGroup {
        /// Category being built
        category: Category,
        /// Group name
        group: &'static str,
    },
    /// A mandatory group getter returned an error
    Rejected {
        /// Category being built
        category: Category,
        /// Group name
        group: &'static str,
        /// Code returned by the driver
        code: ZeResult,
    },
    /// No known version was accepted by the driver
    NoCommonVersion {
        /// Category being built
        category: Category,
    },
}

impl BuildError {
    /// Category whose build failed
    pub const fn category(&self) -> Category {
        match self {
            BuildError::MissingGroup { category, .. }
            | BuildError::Rejected { category, .. }
            | BuildError::NoCommonVersion { category } => *category,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingGroup { category, group } => {
                write!(f, "{} table: mandatory group {} not exported", category, group)
            },
            BuildError::Rejected { category, group, code } => {
                write!(f, "{} table: group {} rejected with {}", category, group, code)
            },
            BuildError::NoCommonVersion { category } => {
                write!(f, "{} table: no supported API version", category)
            },
        }
    }
}

impl From<BuildError> for ZeResult {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Rejected { code, .. } => code,
            BuildError::NoCommonVersion { .. } => ZeResult::ERROR_UNSUPPORTED_VERSION,
            BuildError::MissingGroup { .. } => ZeResult::ERROR_UNINITIALIZED,
        }
    }
}

// =============================================================================
// LOADER ERRORS
// =============================================================================

/// Loader management error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderError {
    /// No driver is available
    NoDrivers,
    /// A driver with this name is already loaded
    DuplicateDriver,
    /// No driver with this name is loaded
    DriverNotFound,
    /// A driver's tables could not be built
    Build(BuildError),
    /// The layer stack is full
    LayerStackFull,
    /// A loader is already installed
    AlreadyInstalled,
    /// No loader is installed
    NotInstalled,
    /// A table is still referenced by an in-flight call
    TableInUse,
    /// The handle is null, unknown or destroyed
    UnknownHandle,
    /// A driver library could not be opened
    LibraryLoad,
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::NoDrivers => write!(f, "no driver available"),
            LoaderError::DuplicateDriver => write!(f, "driver already loaded"),
            LoaderError::DriverNotFound => write!(f, "driver not found"),
            LoaderError::Build(err) => write!(f, "table build failed: {}", err),
            LoaderError::LayerStackFull => write!(f, "layer stack full"),
            LoaderError::AlreadyInstalled => write!(f, "loader already installed"),
            LoaderError::NotInstalled => write!(f, "loader not installed"),
            LoaderError::TableInUse => write!(f, "dispatch table still in use"),
            LoaderError::UnknownHandle => write!(f, "unknown handle"),
            LoaderError::LibraryLoad => write!(f, "driver library could not be loaded"),
        }
    }
}

impl From<BuildError> for LoaderError {
    fn from(err: BuildError) -> Self {
        LoaderError::Build(err)
    }
}

impl From<LoaderError> for ZeResult {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::Build(build) => build.into(),
            LoaderError::LayerStackFull => ZeResult::ERROR_OUT_OF_HOST_MEMORY,
            LoaderError::TableInUse => ZeResult::ERROR_HANDLE_OBJECT_IN_USE,
            LoaderError::UnknownHandle => ZeResult::ERROR_INVALID_ARGUMENT,
            LoaderError::LibraryLoad => ZeResult::ERROR_DEPENDENCY_UNAVAILABLE,
            LoaderError::NoDrivers
            | LoaderError::DuplicateDriver
            | LoaderError::DriverNotFound
            | LoaderError::AlreadyInstalled
            | LoaderError::NotInstalled => ZeResult::ERROR_UNINITIALIZED,
        }
    }
}
