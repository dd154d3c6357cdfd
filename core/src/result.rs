//! # Result Codes
//!
//! The closed result enumeration shared by every entry point. Drivers own the
//! full code space; the loader itself only ever manufactures
//! [`ZeResult::ERROR_UNINITIALIZED`] and [`ZeResult::ERROR_UNSUPPORTED_VERSION`].
//!
//! The type is a transparent `u32` rather than a Rust enum so that codes a
//! newer driver returns cross the loader verbatim.

use core::fmt;

/// API result code
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ZeResult(u32);

macro_rules! result_codes {
    ($( $(#[$doc:meta])* $name:ident = $value:literal; )*) => {
        impl ZeResult {
            $(
                $(#[$doc])*
                pub const $name: Self = Self($value);
            )*

            /// Get the `ZE_RESULT_*` name for this code
            pub const fn name(self) -> Option<&'static str> {
                match self.0 {
                    $( $value => Some(concat!("ZE_RESULT_", stringify!($name))), )*
                    _ => None,
                }
            }
        }
    };
}

result_codes! {
    /// Success
    SUCCESS = 0x0000_0000;
    /// Synchronization primitive not signaled
    NOT_READY = 0x0000_0001;
    /// Device hung, reset, was removed, or driver update occurred
    ERROR_DEVICE_LOST = 0x7000_0001;
    /// Insufficient host memory to satisfy call
    ERROR_OUT_OF_HOST_MEMORY = 0x7000_0002;
    /// Insufficient device memory to satisfy call
    ERROR_OUT_OF_DEVICE_MEMORY = 0x7000_0003;
    /// Error occurred when building module
    ERROR_MODULE_BUILD_FAILURE = 0x7000_0004;
    /// Error occurred when linking modules
    ERROR_MODULE_LINK_FAILURE = 0x7000_0005;
    /// Device requires a reset
    ERROR_DEVICE_REQUIRES_RESET = 0x7000_0006;
    /// Device currently in low power state
    ERROR_DEVICE_IN_LOW_POWER_STATE = 0x7000_0007;
    /// Access denied due to permission level
    ERROR_INSUFFICIENT_PERMISSIONS = 0x7001_0000;
    /// Resource already in use and simultaneous access not allowed
    ERROR_NOT_AVAILABLE = 0x7001_0001;
    /// External required dependency is unavailable or missing
    ERROR_DEPENDENCY_UNAVAILABLE = 0x7002_0000;
    /// Data may have been dropped
    WARNING_DROPPED_DATA = 0x7002_0001;
    /// Driver is not initialized or the targeted table entry is absent
    ERROR_UNINITIALIZED = 0x7800_0001;
    /// Generic error code for unsupported versions
    ERROR_UNSUPPORTED_VERSION = 0x7800_0002;
    /// Generic error code for unsupported features
    ERROR_UNSUPPORTED_FEATURE = 0x7800_0003;
    /// Generic error code for invalid arguments
    ERROR_INVALID_ARGUMENT = 0x7800_0004;
    /// Handle argument is not valid
    ERROR_INVALID_NULL_HANDLE = 0x7800_0005;
    /// Object pointed to by handle still in-use by device
    ERROR_HANDLE_OBJECT_IN_USE = 0x7800_0006;
    /// Pointer argument may not be nullptr
    ERROR_INVALID_NULL_POINTER = 0x7800_0007;
    /// Size argument is invalid
    ERROR_INVALID_SIZE = 0x7800_0008;
    /// Size argument is not supported by the device
    ERROR_UNSUPPORTED_SIZE = 0x7800_0009;
    /// Alignment argument is not supported by the device
    ERROR_UNSUPPORTED_ALIGNMENT = 0x7800_000a;
    /// Synchronization object in invalid state
    ERROR_INVALID_SYNCHRONIZATION_OBJECT = 0x7800_000b;
    /// Enumerator argument is not valid
    ERROR_INVALID_ENUMERATION = 0x7800_000c;
    /// Enumerator argument is not supported by the device
    ERROR_UNSUPPORTED_ENUMERATION = 0x7800_000d;
    /// Image format is not supported by the device
    ERROR_UNSUPPORTED_IMAGE_FORMAT = 0x7800_000e;
    /// Native binary is not supported by the device
    ERROR_INVALID_NATIVE_BINARY = 0x7800_000f;
    /// Global variable is not found in the module
    ERROR_INVALID_GLOBAL_NAME = 0x7800_0010;
    /// Kernel name is not found in the module
    ERROR_INVALID_KERNEL_NAME = 0x7800_0011;
    /// Function name is not found in the module
    ERROR_INVALID_FUNCTION_NAME = 0x7800_0012;
    /// Group size dimension is not valid for the kernel or device
    ERROR_INVALID_GROUP_SIZE_DIMENSION = 0x7800_0013;
    /// Global width dimension is not valid for the kernel or device
    ERROR_INVALID_GLOBAL_WIDTH_DIMENSION = 0x7800_0014;
    /// Kernel argument index is not valid for kernel
    ERROR_INVALID_KERNEL_ARGUMENT_INDEX = 0x7800_0015;
    /// Kernel argument size does not match kernel
    ERROR_INVALID_KERNEL_ARGUMENT_SIZE = 0x7800_0016;
    /// Value of kernel attribute is not valid for the kernel or device
    ERROR_INVALID_KERNEL_ATTRIBUTE_VALUE = 0x7800_0017;
    /// Module with imports needs to be linked before kernels can be created
    ERROR_INVALID_MODULE_UNLINKED = 0x7800_0018;
    /// Command list type does not match command queue type
    ERROR_INVALID_COMMAND_LIST_TYPE = 0x7800_0019;
    /// Copy operations do not support overlapping regions of memory
    ERROR_OVERLAPPING_REGIONS = 0x7800_001a;
    /// Requested action may be performed only after a driver reload
    WARNING_ACTION_REQUIRED = 0x7800_001b;
    /// Kernel handle is invalid for the operation
    ERROR_INVALID_KERNEL_HANDLE = 0x7800_001c;
    /// Unknown or internal error
    ERROR_UNKNOWN = 0x7fff_fffe;
}

impl ZeResult {
    /// Check if the code signals success
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Check if the code is an error (warnings are not errors)
    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 >= 0x7000_0000
            && self.0 != Self::WARNING_DROPPED_DATA.0
            && self.0 != Self::WARNING_ACTION_REQUIRED.0
    }

    /// Get the raw value
    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Create from a raw value
    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Convert to a `Result`, keeping the code as the error
    #[inline]
    pub const fn into_result(self) -> Result<(), ZeResult> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for ZeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for ZeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "ZE_RESULT_{:#010x}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_success_and_error_classification() {
        assert!(ZeResult::SUCCESS.is_success());
        assert!(!ZeResult::SUCCESS.is_error());
        assert!(!ZeResult::NOT_READY.is_error());
        assert!(ZeResult::ERROR_UNINITIALIZED.is_error());
        assert!(ZeResult::ERROR_DEVICE_LOST.is_error());
        assert!(!ZeResult::WARNING_DROPPED_DATA.is_error());
        assert!(!ZeResult::WARNING_ACTION_REQUIRED.is_error());
    }

    #[test]
    fn test_loader_codes_have_stable_values() {
        assert_eq!(ZeResult::ERROR_UNINITIALIZED.as_raw(), 0x7800_0001);
        assert_eq!(ZeResult::ERROR_UNSUPPORTED_VERSION.as_raw(), 0x7800_0002);
        assert_eq!(ZeResult::ERROR_INVALID_NULL_POINTER.as_raw(), 0x7800_0007);
    }

    #[test]
    fn test_unknown_code_passes_through() {
        let vendor = ZeResult::from_raw(0x7123_4567);
        assert_eq!(vendor.as_raw(), 0x7123_4567);
        assert_eq!(vendor.name(), None);
        assert_eq!(format!("{}", vendor), "ZE_RESULT_0x71234567");
    }

    #[test]
    fn test_display_uses_api_names() {
        assert_eq!(
            format!("{}", ZeResult::ERROR_UNSUPPORTED_VERSION),
            "ZE_RESULT_ERROR_UNSUPPORTED_VERSION"
        );
        assert_eq!(format!("{:?}", ZeResult::SUCCESS), "ZE_RESULT_SUCCESS");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ZeResult::SUCCESS.into_result(), Ok(()));
        assert_eq!(
            ZeResult::ERROR_DEVICE_LOST.into_result(),
            Err(ZeResult::ERROR_DEVICE_LOST)
        );
    }
}
