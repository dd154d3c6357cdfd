//! # Parameter Types
//!
//! Types that appear in entry-point signatures. The loader only moves these
//! values between the caller and a driver, so descriptor and property
//! structures are modelled as opaque pointees; only types passed by value
//! carry a real layout.

#![allow(missing_docs)]

use core::fmt;

pub use core::ffi::{c_char, c_void};

use crate::param::{Arg, DdiParam, Pointee};

/// Boolean as used across the C ABI
pub type ZeBool = u8;

// =============================================================================
// Enumerations
// =============================================================================

// Enumerations are carried as their underlying `u32`. New enumerators added by
// a newer driver must pass through unchanged.

pub type ZesControlState = u32;
pub type ZesFabricPortQualityIssue = u32;
pub type ZesFanSpeedUnits = u32;
pub type ZesOcMode = u32;
pub type ZesOverclockControl = u32;
pub type ZesOverclockDomain = u32;
pub type ZesOverclockMode = u32;
pub type ZesPendingAction = u32;
pub type ZesRasErrorCategoryExp = u32;
pub type ZesSchedMode = u32;
pub type ZesStandbyPromoMode = u32;
pub type ZesVfArrayType = u32;
pub type ZesVfType = u32;
pub type ZetMetricGroupCalculationType = u32;
pub type ZetModuleDebugInfoFormat = u32;

// =============================================================================
// Flag Sets
// =============================================================================

macro_rules! flag_params {
    ($($name:ident),*) => {
        $(
            impl DdiParam for $name {
                #[inline]
                fn to_arg(self) -> Arg {
                    Arg::Unsigned(self.bits() as u64)
                }
            }

            impl Pointee for $name {}
        )*
    };
}

bitflags::bitflags! {
    /// Events a device can be registered for
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ZesEventTypeFlags: u32 {
        /// Device is about to be detached
        const DEVICE_DETACH = 1 << 0;
        /// Device was attached
        const DEVICE_ATTACH = 1 << 1;
        /// Device entered a deep sleep state
        const DEVICE_SLEEP_STATE_ENTER = 1 << 2;
        /// Device left a deep sleep state
        const DEVICE_SLEEP_STATE_EXIT = 1 << 3;
        /// Frequency is being throttled
        const FREQ_THROTTLED = 1 << 4;
        /// Energy consumption threshold crossed
        const ENERGY_THRESHOLD_CROSSED = 1 << 5;
        /// Critical temperature reached
        const TEMP_CRITICAL = 1 << 6;
        /// First temperature threshold crossed
        const TEMP_THRESHOLD1 = 1 << 7;
        /// Second temperature threshold crossed
        const TEMP_THRESHOLD2 = 1 << 8;
        /// Memory health changed
        const MEM_HEALTH = 1 << 9;
        /// Fabric port health changed
        const FABRIC_PORT_HEALTH = 1 << 10;
        /// PCI link health changed
        const PCI_LINK_HEALTH = 1 << 11;
        /// Correctable RAS errors exceeded the threshold
        const RAS_CORRECTABLE_ERRORS = 1 << 12;
        /// Uncorrectable RAS errors exceeded the threshold
        const RAS_UNCORRECTABLE_ERRORS = 1 << 13;
        /// Device requires a reset
        const DEVICE_RESET_REQUIRED = 1 << 14;
        /// Device entered survivability mode
        const SURVIVABILITY_MODE_DETECTED = 1 << 15;
    }
}

bitflags::bitflags! {
    /// Compute initialization flags
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ZeInitFlags: u32 {
        /// Only initialize GPU drivers
        const GPU_ONLY = 1 << 0;
        /// Only initialize VPU drivers
        const VPU_ONLY = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Sysman initialization flags
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ZesInitFlags: u32 {
        /// Reserved
        const PLACEHOLDER = 1 << 0;
    }
}

bitflags::bitflags! {
    /// Virtual function utilization categories
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ZesVfInfoUtilExpFlags: u32 {
        /// Host memory utilization
        const MEM_CPU = 1 << 0;
        /// Device memory utilization
        const MEM_GPU = 1 << 1;
        /// Engine utilization
        const ENGINE = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Metric group sampling types
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ZetMetricGroupSamplingTypeFlags: u32 {
        /// Event based sampling
        const EVENT_BASED = 1 << 0;
        /// Time based sampling
        const TIME_BASED = 1 << 1;
        /// Tracer based sampling
        const EXP_TRACER_BASED = 1 << 2;
    }
}

flag_params!(
    ZeInitFlags,
    ZesEventTypeFlags,
    ZesInitFlags,
    ZesVfInfoUtilExpFlags,
    ZetMetricGroupSamplingTypeFlags
);

// =============================================================================
// Structures Passed by Value
// =============================================================================

/// Universal unique id
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZesUuid {
    /// Opaque data
    pub id: [u8; 16],
}

/// Device thread identifier
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZeDeviceThread {
    /// Slice number
    pub slice: u32,
    /// Sub-slice number within the slice
    pub subslice: u32,
    /// Execution unit number within the sub-slice
    pub eu: u32,
    /// Thread number within the execution unit
    pub thread: u32,
}

impl DdiParam for ZesUuid {
    fn to_arg(self) -> Arg {
        Arg::Aggregate
    }
}

impl DdiParam for ZeDeviceThread {
    fn to_arg(self) -> Arg {
        Arg::Aggregate
    }
}

impl Pointee for ZesUuid {}
impl Pointee for ZeDeviceThread {}

static_assertions::assert_eq_size!(ZesUuid, [u8; 16]);
static_assertions::assert_eq_size!(ZeDeviceThread, [u32; 4]);

// =============================================================================
// Opaque Structures
// =============================================================================

macro_rules! opaque_structs {
    ($($name:ident),* $(,)?) => {
        $(
            /// Structure owned by the driver, only ever passed by pointer
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }

            impl Pointee for $name {}

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )*
    };
}

opaque_structs!(
    ZeCommandListDesc,
    ZeCommandQueueDesc,
    ZeContextDesc,
    ZeEventDesc,
    ZeEventPoolDesc,
    ZeKernelDesc,
    ZeModuleDesc,
    ZesControlProperty,
    ZesDeviceEccDesc,
    ZesDeviceEccProperties,
    ZesDeviceProperties,
    ZesDeviceState,
    ZesDiagProperties,
    ZesDiagResult,
    ZesDiagTest,
    ZesDriverExtensionProperties,
    ZesEnergyThreshold,
    ZesEngineProperties,
    ZesEngineStats,
    ZesFabricLinkType,
    ZesFabricPortConfig,
    ZesFabricPortErrorCounters,
    ZesFabricPortProperties,
    ZesFabricPortState,
    ZesFabricPortThroughput,
    ZesFanConfig,
    ZesFanProperties,
    ZesFanSpeed,
    ZesFanSpeedTable,
    ZesFirmwareProperties,
    ZesFreqProperties,
    ZesFreqRange,
    ZesFreqState,
    ZesFreqThrottleTime,
    ZesLedColor,
    ZesLedProperties,
    ZesLedState,
    ZesMemBandwidth,
    ZesMemProperties,
    ZesMemState,
    ZesOcCapabilities,
    ZesOverclockProperties,
    ZesPciBarProperties,
    ZesPciProperties,
    ZesPciState,
    ZesPciStats,
    ZesPerfProperties,
    ZesPowerBurstLimit,
    ZesPowerEnergyCounter,
    ZesPowerLimitExtDesc,
    ZesPowerPeakLimit,
    ZesPowerProperties,
    ZesPowerSustainedLimit,
    ZesProcessState,
    ZesPsuProperties,
    ZesPsuState,
    ZesRasConfig,
    ZesRasProperties,
    ZesRasState,
    ZesRasStateExp,
    ZesResetProperties,
    ZesSchedProperties,
    ZesSchedTimeoutProperties,
    ZesSchedTimesliceProperties,
    ZesStandbyProperties,
    ZesSubdeviceExpProperties,
    ZesTempConfig,
    ZesTempProperties,
    ZesVfExp2Capabilities,
    ZesVfExpCapabilities,
    ZesVfExpProperties,
    ZesVfProperty,
    ZesVfUtilEngineExp,
    ZesVfUtilEngineExp2,
    ZesVfUtilMemExp,
    ZesVfUtilMemExp2,
    ZetCoreCallbacks,
    ZetDebugConfig,
    ZetDebugEvent,
    ZetDebugMemorySpaceDesc,
    ZetDebugRegsetProperties,
    ZetDeviceDebugProperties,
    ZetMetricCalculateExpDesc,
    ZetMetricEntryExp,
    ZetMetricGroupProperties,
    ZetMetricProgrammableExpProperties,
    ZetMetricProgrammableParamInfoExp,
    ZetMetricProgrammableParamValueExp,
    ZetMetricProgrammableParamValueInfoExp,
    ZetMetricProperties,
    ZetMetricQueryPoolDesc,
    ZetMetricStreamerDesc,
    ZetMetricTracerExpDesc,
    ZetProfileProperties,
    ZetTracerExpDesc,
    ZetTypedValue,
);
