//! # Parameter Validation
//!
//! Rejects null handles and null pointers that the entry point does not mark
//! as optional. Handles are checked before pointers, matching the order
//! drivers report these errors in.

use zel_core::layer::Call;
use zel_core::param::Arg;
use zel_core::ZeResult;

use crate::checker::Checker;

/// Null handle and null pointer checks
#[derive(Debug, Default, Clone, Copy)]
pub struct ParameterValidation;

impl Checker for ParameterValidation {
    fn name(&self) -> &'static str {
        "parameter"
    }

    fn prologue(&self, call: &Call<'_>) -> Option<ZeResult> {
        let required = || call.params().filter(|(spec, _)| !spec.optional);

        if required().any(|(_, arg)| matches!(arg, Arg::Handle(h) if h.is_null())) {
            return Some(ZeResult::ERROR_INVALID_NULL_HANDLE);
        }

        let null_pointer = required().any(|(_, arg)| match arg {
            Arg::HandleOut(address) | Arg::Pointer(address) => address == 0,
            _ => false,
        });
        if null_pointer {
            return Some(ZeResult::ERROR_INVALID_NULL_POINTER);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zel_core::prelude::*;
    use zel_core::HandleRegistry;
    use core::ptr;

    fn check(entry: &'static EntryPoint, args: &[Arg]) -> Option<ZeResult> {
        let registry = HandleRegistry::new();
        ParameterValidation.prologue(&Call::new(entry, args, &registry))
    }

    #[test]
    fn test_null_handle() {
        let props: *mut ZesDeviceProperties = ptr::null_mut();
        let args = [ZesDeviceHandle::NULL.to_arg(), props.to_arg()];
        assert_eq!(
            check(&ENTRY_zesDeviceGetProperties, &args),
            Some(ZeResult::ERROR_INVALID_NULL_HANDLE)
        );
    }

    #[test]
    fn test_null_pointer() {
        let device = ZesDeviceHandle::from_raw(RawHandle::new(0x10));
        let props: *mut ZesDeviceProperties = ptr::null_mut();
        let args = [device.to_arg(), props.to_arg()];
        assert_eq!(
            check(&ENTRY_zesDeviceGetProperties, &args),
            Some(ZeResult::ERROR_INVALID_NULL_POINTER)
        );
    }

    #[test]
    fn test_optional_array_may_be_null() {
        let device = ZesDeviceHandle::from_raw(RawHandle::new(0x10));
        let mut count = 0u32;
        let fans: *mut ZesFanHandle = ptr::null_mut();
        let args = [device.to_arg(), (&mut count as *mut u32).to_arg(), fans.to_arg()];
        assert_eq!(check(&ENTRY_zesDeviceEnumFans, &args), None);
    }

    #[test]
    fn test_scalars_are_never_null() {
        let device = ZesDeviceHandle::from_raw(RawHandle::new(0x10));
        let args = [device.to_arg(), 0u8.to_arg()];
        assert_eq!(check(&ENTRY_zesDeviceReset, &args), None);
    }
}
