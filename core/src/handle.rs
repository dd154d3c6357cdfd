//! # Handles
//!
//! Handles are opaque pointer-sized values created by drivers. The loader
//! never dereferences them; it resolves them through the
//! [`HandleRegistry`](crate::registry::HandleRegistry) to the dispatch tables
//! of the driver that created them.
//!
//! Each handle type is tagged with the category whose entry points hand it
//! out. The tools types for compute objects (`ZetDeviceHandle`,
//! `ZetContextHandle`, ...) carry the same raw values as their compute
//! counterparts, so a device adopted from `zeDeviceGet` routes tools calls
//! as well.

use core::fmt;

use crate::entry::Category;
use crate::param::{Arg, DdiParam};

/// Untyped handle value
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RawHandle(usize);

impl RawHandle {
    /// The null handle
    pub const NULL: Self = Self(0);

    /// Create from a raw value
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(self) -> usize {
        self.0
    }

    /// Check for the null handle
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHandle({:#x})", self.0)
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Typed handle
pub trait Handle: Copy + Eq {
    /// Type name used in diagnostics
    const NAME: &'static str;

    /// Category whose entry points create handles of this type
    const CATEGORY: Category;

    /// Wrap an untyped handle
    fn from_raw(raw: RawHandle) -> Self;

    /// Get the untyped handle
    fn raw(self) -> RawHandle;

    /// Check for the null handle
    fn is_null(self) -> bool {
        self.raw().is_null()
    }
}

macro_rules! define_handles {
    ($( $(#[$doc:meta])* $name:ident => $Category:ident; )*) => {
        $(
            $(#[$doc])*
            #[repr(transparent)]
            #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name(RawHandle);

            impl $name {
                /// The null handle
                pub const NULL: Self = Self(RawHandle::NULL);
            }

            impl Handle for $name {
                const NAME: &'static str = stringify!($name);
                const CATEGORY: Category = Category::$Category;

                #[inline]
                fn from_raw(raw: RawHandle) -> Self {
                    Self(raw)
                }

                #[inline]
                fn raw(self) -> RawHandle {
                    self.0
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}({:#x})", stringify!($name), self.0.value())
                }
            }

            impl DdiParam for $name {
                const HANDLE: Option<Category> = Some(Category::$Category);

                #[inline]
                fn to_arg(self) -> Arg {
                    Arg::Handle(self.0)
                }
            }

            impl DdiParam for *mut $name {
                #[inline]
                fn to_arg(self) -> Arg {
                    Arg::HandleOut(self as usize)
                }
            }

            impl DdiParam for *const $name {
                #[inline]
                fn to_arg(self) -> Arg {
                    Arg::HandleOut(self as usize)
                }
            }
        )*
    };
}

define_handles! {
    /// Compute driver handle (`ze_driver_handle_t`)
    ZeDriverHandle => Compute;
    /// Compute device handle
    ZeDeviceHandle => Compute;
    /// Compute context handle
    ZeContextHandle => Compute;
    /// Compute command list handle
    ZeCommandListHandle => Compute;
    /// Compute module handle
    ZeModuleHandle => Compute;
    /// Module build log handle
    ZeModuleBuildLogHandle => Compute;
    /// Compute kernel handle
    ZeKernelHandle => Compute;
    /// Event pool handle
    ZeEventPoolHandle => Compute;
    /// Compute event handle (`ze_event_handle_t`)
    ZeEventHandle => Compute;

    /// Sysman driver handle
    ZesDriverHandle => Sysman;
    /// Sysman device handle
    ZesDeviceHandle => Sysman;
    /// Diagnostics test suite handle
    ZesDiagHandle => Sysman;
    /// Engine group handle
    ZesEngineHandle => Sysman;
    /// Fabric port handle
    ZesFabricPortHandle => Sysman;
    /// Fan handle
    ZesFanHandle => Sysman;
    /// Firmware handle
    ZesFirmwareHandle => Sysman;
    /// Frequency domain handle
    ZesFreqHandle => Sysman;
    /// LED handle
    ZesLedHandle => Sysman;
    /// Memory module handle
    ZesMemHandle => Sysman;
    /// Overclock domain handle
    ZesOverclockHandle => Sysman;
    /// Performance factor domain handle
    ZesPerfHandle => Sysman;
    /// Power supply handle
    ZesPsuHandle => Sysman;
    /// Power domain handle
    ZesPwrHandle => Sysman;
    /// RAS error set handle
    ZesRasHandle => Sysman;
    /// Scheduler handle
    ZesSchedHandle => Sysman;
    /// Standby domain handle
    ZesStandbyHandle => Sysman;
    /// Temperature sensor handle
    ZesTempHandle => Sysman;
    /// Virtual function handle
    ZesVfHandle => Sysman;

    /// Compute device as seen by tools entry points
    ZetDeviceHandle => Tools;
    /// Compute context as seen by tools entry points
    ZetContextHandle => Tools;
    /// Compute command list as seen by tools entry points
    ZetCommandListHandle => Tools;
    /// Compute module as seen by tools entry points
    ZetModuleHandle => Tools;
    /// Compute kernel as seen by tools entry points
    ZetKernelHandle => Tools;
    /// Debug session handle
    ZetDebugSessionHandle => Tools;
    /// Metric group handle
    ZetMetricGroupHandle => Tools;
    /// Metric handle
    ZetMetricHandle => Tools;
    /// Metric streamer handle
    ZetMetricStreamerHandle => Tools;
    /// Metric query pool handle
    ZetMetricQueryPoolHandle => Tools;
    /// Metric query handle
    ZetMetricQueryHandle => Tools;
    /// Tracer handle
    ZetTracerExpHandle => Tools;
    /// Programmable metric handle
    ZetMetricProgrammableExpHandle => Tools;
    /// Metric tracer handle
    ZetMetricTracerExpHandle => Tools;
    /// Metric decoder handle
    ZetMetricDecoderExpHandle => Tools;
}

static_assertions::assert_eq_size!(RawHandle, *mut core::ffi::c_void);
static_assertions::assert_eq_size!(ZesDeviceHandle, RawHandle);
