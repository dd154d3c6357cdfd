//! # Zel Dispatch Core
//!
//! The dispatch mechanism of the Zel loader: the part that sits between an
//! application calling a C entry point and the driver that implements it.
//!
//! ## Components
//!
//! - **Handles & Registry**: opaque handles resolved to the tables of the
//!   driver that created them
//! - **Dispatch Tables**: per (driver, category) sets of nullable sub-tables
//! - **Version Gate**: per-entry-point minimum versions
//! - **Dispatcher**: the uniform forward contract, behind a layer chain
//! - **Table Builder**: version negotiation against a driver's exports
//! - **DDI Tables**: the declarative entry-point surface of each category
//!   (the compute lifecycle slice, tools and sysman)
//!
//! ## Error Channel
//!
//! Entry points only ever return a [`ZeResult`]. The loader itself produces
//! `ERROR_UNINITIALIZED` and `ERROR_UNSUPPORTED_VERSION`; every other code
//! comes from a driver or a layer and is returned verbatim.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod builder;
pub mod ddi;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod handle;
pub mod layer;
pub mod param;
pub mod registry;
pub mod result;
pub mod table;
pub mod types;
pub mod version;

#[cfg(test)]
mod testing;

pub use builder::{ProcAddressSource, TableBuilder};
pub use dispatch::Dispatcher;
pub use entry::{Category, EntryPoint};
pub use error::{BuildError, LoaderError};
pub use handle::{Handle, RawHandle};
pub use registry::HandleRegistry;
pub use result::ZeResult;
pub use table::{DispatchTable, DriverDispatch};
pub use version::ApiVersion;

/// Loader version
pub const LOADER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for crates building on the dispatch core
pub mod prelude {
    pub use crate::builder::{GetTableFn, ProcAddressSource, TableBuilder};
    pub use crate::ddi::compute::*;
    pub use crate::ddi::sysman::*;
    pub use crate::ddi::tools::*;
    pub use crate::dispatch::Dispatcher;
    pub use crate::entry::{Category, EntryPoint};
    pub use crate::error::{BuildError, LoaderError};
    pub use crate::handle::*;
    pub use crate::layer::{Call, Layer, Next};
    pub use crate::param::{Arg, DdiParam, ParamSpec};
    pub use crate::result::ZeResult;
    pub use crate::table::{CategoryTables, DispatchTable, DriverDispatch, GroupInfo, GroupSet};
    pub use crate::types::*;
    pub use crate::version::ApiVersion;
}
