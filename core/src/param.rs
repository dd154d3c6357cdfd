//! # Entry-point Parameters
//!
//! Forwarders never interpret their arguments; layers do. Each argument is
//! captured as an [`Arg`] so a layer can inspect handles and pointers without
//! knowing the concrete signature of the entry point it wraps.

use core::ffi::c_void;

use crate::entry::Category;
use crate::handle::RawHandle;

/// Argument value as seen by layers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg {
    /// Handle passed by value
    Handle(RawHandle),
    /// Pointer to storage for one or more handles
    HandleOut(usize),
    /// Any other pointer
    Pointer(usize),
    /// Unsigned scalar, enumeration or flag set
    Unsigned(u64),
    /// Signed scalar
    Signed(i64),
    /// Floating point scalar
    Float(f64),
    /// Structure passed by value
    Aggregate,
}

impl Arg {
    /// Check for a null handle or pointer
    pub const fn is_null(&self) -> bool {
        match self {
            Arg::Handle(handle) => handle.is_null(),
            Arg::HandleOut(addr) | Arg::Pointer(addr) => *addr == 0,
            _ => false,
        }
    }

    /// Get the handle value, if this is a handle argument
    pub const fn as_handle(&self) -> Option<RawHandle> {
        match self {
            Arg::Handle(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Get the address, if this is a pointer argument
    pub const fn as_address(&self) -> Option<usize> {
        match self {
            Arg::HandleOut(addr) | Arg::Pointer(addr) => Some(*addr),
            _ => None,
        }
    }
}

/// Static description of one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name
    pub name: &'static str,
    /// Null is an accepted value
    pub optional: bool,
    /// Element count for the output array that follows it
    pub count: bool,
    /// Handle array read by the driver rather than written
    pub input: bool,
    /// Category whose surface creates the handle passed by value
    pub handle: Option<Category>,
}

/// Types that can appear in an entry-point signature
pub trait DdiParam: Copy {
    /// Category of the handle type, `None` for everything else
    const HANDLE: Option<Category> = None;

    /// Capture the value for inspection by layers
    fn to_arg(self) -> Arg;
}

/// Types that may sit behind a generic pointer parameter
///
/// Handle types are deliberately excluded: pointers to handles are output
/// slots and capture as [`Arg::HandleOut`].
pub trait Pointee {}

impl<T: Pointee> DdiParam for *mut T {
    #[inline]
    fn to_arg(self) -> Arg {
        Arg::Pointer(self as usize)
    }
}

impl<T: Pointee> DdiParam for *const T {
    #[inline]
    fn to_arg(self) -> Arg {
        Arg::Pointer(self as usize)
    }
}

impl<T: Pointee> Pointee for *mut T {}
impl<T: Pointee> Pointee for *const T {}

impl Pointee for c_void {}
impl Pointee for u8 {}
impl Pointee for i8 {}
impl Pointee for u32 {}
impl Pointee for i32 {}
impl Pointee for u64 {}
impl Pointee for usize {}
impl Pointee for f64 {}

macro_rules! scalar_params {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl DdiParam for $ty {
                #[inline]
                fn to_arg(self) -> Arg {
                    Arg::$variant(self as $wide)
                }
            }
        )*
    };
}

scalar_params!(Unsigned as u64: u8, u32, u64, usize);
scalar_params!(Signed as i64: i32);
scalar_params!(Float as f64: f64);
