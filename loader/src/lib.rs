//! # Zel Loader
//!
//! The loader library applications link against. It discovers driver
//! modules, builds their dispatch tables, installs the configured layers and
//! exports the C entry points that route every call to the driver owning its
//! handle.
//!
//! ## Modules
//!
//! - [`config`]: environment-driven settings
//! - [`discovery`]: driver library names per platform and their ordering
//! - [`module`]: driver libraries opened with `libloading`
//! - [`context`]: the [`Loader`] itself
//! - [`global`]: the process-wide loader behind the C exports
//! - [`exports`]: the C entry points
//!
//! ## Rust Usage
//!
//! ```ignore
//! use zel_loader::{Loader, LoaderConfig};
//!
//! let loader = Loader::new(LoaderConfig::from_env())?;
//! loader.init(ZesInitFlags::empty());
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod discovery;
pub mod exports;
pub mod global;
pub mod module;

pub use config::{ConfigProvider, EnvConfig, LoaderConfig, MemoryConfig};
pub use context::{ComponentVersion, Loader, TeardownReport, NULL_DRIVER_NAME};
pub use global::{ensure_installed, in_teardown, install, installed, uninstall};
pub use module::DynamicDriver;

pub use zel_core;
pub use zel_null_driver;
pub use zel_tracing;
pub use zel_validation;
