//! # Dispatch Tables
//!
//! One [`DispatchTable`] exists per (driver module, category). It carries a
//! validity flag, the negotiated version and one independently nullable
//! sub-table per feature group. Tables are built once, published behind an
//! `Arc`, and only mutated again by [`DriverDispatch::teardown`], which needs
//! exclusive ownership.

use alloc::string::String;
use alloc::sync::Arc;

use crate::builder::ProcAddressSource;
use crate::ddi::{ComputeGroups, SysmanGroups, ToolsGroups};
use crate::entry::Category;
use crate::error::BuildError;
use crate::version::ApiVersion;

/// Static description of one feature group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupInfo {
    /// Group name, e.g. `Device`
    pub name: &'static str,
    /// Exported getter, e.g. `zesGetDeviceProcAddrTable`
    pub symbol: &'static str,
    /// The category cannot be built without this group
    pub required: bool,
}

/// The full set of sub-tables for one category
pub trait GroupSet: Default + Send + Sync + 'static {
    /// Category described by this set
    const CATEGORY: Category;

    /// Every group, in getter order
    const GROUPS: &'static [GroupInfo];

    /// Ask `source` for every group at `version`
    fn fetch(source: &dyn ProcAddressSource, version: ApiVersion) -> Result<Self, BuildError>;

    /// Number of non-null sub-tables
    fn populated(&self) -> usize;

    /// Release every non-null sub-table, returning how many were released
    fn release(&mut self) -> usize;
}

/// A group set that can be located inside a [`DriverDispatch`]
pub trait CategoryTables: GroupSet {
    /// Select this category's table
    fn select(dispatch: &DriverDispatch) -> &DispatchTable<Self>;
}

// =============================================================================
// Dispatch Table
// =============================================================================

/// Per-category dispatch table
#[derive(Debug)]
pub struct DispatchTable<G> {
    valid: bool,
    version: ApiVersion,
    groups: G,
}

impl<G: GroupSet> DispatchTable<G> {
    /// Create a valid table
    pub fn new(version: ApiVersion, groups: G) -> Self {
        Self {
            valid: true,
            version,
            groups,
        }
    }

    /// Create a table that routes nothing
    pub fn invalid() -> Self {
        Self {
            valid: false,
            version: ApiVersion::V1_0,
            groups: G::default(),
        }
    }

    /// Check the validity flag
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Negotiated version
    #[inline]
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Sub-tables
    #[inline]
    pub fn groups(&self) -> &G {
        &self.groups
    }

    /// Clear the validity flag and release every sub-table
    ///
    /// Calling this again is a no-op.
    pub fn teardown(&mut self) -> usize {
        self.valid = false;
        self.groups.release()
    }
}

// =============================================================================
// Driver Dispatch
// =============================================================================

/// All dispatch tables of one driver module
pub struct DriverDispatch {
    name: String,
    index: usize,
    compute: DispatchTable<ComputeGroups>,
    tools: DispatchTable<ToolsGroups>,
    sysman: DispatchTable<SysmanGroups>,
    // Declared last: the tables point into the module this keeps loaded.
    source: Arc<dyn ProcAddressSource>,
}

impl DriverDispatch {
    /// Assemble a driver's tables
    ///
    /// The compute table starts invalid; see [`with_compute`](Self::with_compute).
    pub fn new(
        name: String,
        index: usize,
        tools: DispatchTable<ToolsGroups>,
        sysman: DispatchTable<SysmanGroups>,
        source: Arc<dyn ProcAddressSource>,
    ) -> Self {
        Self {
            name,
            index,
            compute: DispatchTable::invalid(),
            tools,
            sysman,
            source,
        }
    }

    /// Attach the compute table
    pub fn with_compute(mut self, compute: DispatchTable<ComputeGroups>) -> Self {
        self.compute = compute;
        self
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in load order
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compute table
    pub fn compute(&self) -> &DispatchTable<ComputeGroups> {
        &self.compute
    }

    /// Tools table
    pub fn tools(&self) -> &DispatchTable<ToolsGroups> {
        &self.tools
    }

    /// Sysman table
    pub fn sysman(&self) -> &DispatchTable<SysmanGroups> {
        &self.sysman
    }

    /// The module the tables were fetched from
    pub fn source(&self) -> &Arc<dyn ProcAddressSource> {
        &self.source
    }

    /// Check if any category is routable
    pub fn is_valid(&self) -> bool {
        self.compute.is_valid() || self.tools.is_valid() || self.sysman.is_valid()
    }

    /// Tear down every table, returning the number of sub-tables released
    pub fn teardown(&mut self) -> usize {
        let released = self.compute.teardown() + self.tools.teardown() + self.sysman.teardown();
        log::debug!("{}: released {} sub-tables", self.name, released);
        released
    }
}

impl core::fmt::Debug for DriverDispatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DriverDispatch")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("compute", &(self.compute.is_valid(), self.compute.version()))
            .field("tools", &(self.tools.is_valid(), self.tools.version()))
            .field("sysman", &(self.sysman.is_valid(), self.sysman.version()))
            .finish()
    }
}

impl CategoryTables for ComputeGroups {
    #[inline]
    fn select(dispatch: &DriverDispatch) -> &DispatchTable<Self> {
        &dispatch.compute
    }
}

impl CategoryTables for ToolsGroups {
    #[inline]
    fn select(dispatch: &DriverDispatch) -> &DispatchTable<Self> {
        &dispatch.tools
    }
}

impl CategoryTables for SysmanGroups {
    #[inline]
    fn select(dispatch: &DriverDispatch) -> &DispatchTable<Self> {
        &dispatch.sysman
    }
}
