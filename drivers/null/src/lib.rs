//! # Zel Null Driver
//!
//! An in-process driver that implements every compute, sysman and tools
//! entry point without touching hardware. It lets the loader, its layers and applications
//! be exercised on machines with no device present.
//!
//! ## Behavior
//!
//! - Every entry point returns `ZE_RESULT_SUCCESS`.
//! - Enumerations report exactly one object; creation functions write a new
//!   handle. Handles are allocated from a counter starting at
//!   [`HANDLE_BASE`].
//! - Group getters reject a null table with `ERROR_INVALID_NULL_POINTER` and
//!   a version newer than the driver's with `ERROR_UNSUPPORTED_VERSION`.
//!   Slots newer than the requested version stay null.
//!
//! ## Profiles
//!
//! A [`NullProfile`] fixes the driver's version, which groups it exports and
//! how each sub-table is patched before it is handed out. [`Standard`]
//! exports everything at [`ApiVersion::CURRENT`].

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod stubs;

use core::any::Any;
use core::ffi::c_void;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use zel_core::builder::GetTableFn;
use zel_core::param::Arg;
use zel_core::table::GroupInfo;
use zel_core::{ApiVersion, Category, EntryPoint, ProcAddressSource, RawHandle, ZeResult};

/// First value handed out as a handle
pub const HANDLE_BASE: usize = 0x8080_0000;

static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(HANDLE_BASE);

/// Allocate a fresh handle value
pub fn next_handle() -> RawHandle {
    RawHandle::new(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed) + 1)
}

// =============================================================================
// Profiles
// =============================================================================

/// Static configuration of a null driver
pub trait NullProfile: Send + Sync + 'static {
    /// Module name reported to the loader
    const NAME: &'static str = "null";

    /// Newest version the driver implements
    const VERSION: ApiVersion = ApiVersion::CURRENT;

    /// Whether the getter for `group` is exported
    fn provides(_category: Category, _group: &'static str) -> bool {
        true
    }

    /// Adjust a sub-table before it is returned
    ///
    /// `table` is one of the `Zes*DdiTable`/`Zet*DdiTable` types; downcast to
    /// replace or clear individual slots.
    fn patch(_table: &mut dyn Any) {}
}

/// Everything exported at the current version
#[derive(Debug, Default, Clone, Copy)]
pub struct Standard;

impl NullProfile for Standard {}

/// A sub-table the null driver can fill
pub trait StubTable: Default + Copy + 'static {
    /// Owning category
    const CATEGORY: Category;

    /// Group descriptor
    const INFO: GroupInfo;

    /// A table with a stub in every slot introduced at or before `version`
    fn stubs(version: ApiVersion) -> Self;
}

unsafe extern "C" fn get_table<P: NullProfile, T: StubTable>(version: ApiVersion, table: *mut T) -> ZeResult {
    if table.is_null() {
        return ZeResult::ERROR_INVALID_NULL_POINTER;
    }
    if version.major() != P::VERSION.major() || version > P::VERSION {
        return ZeResult::ERROR_UNSUPPORTED_VERSION;
    }

    let mut stubs = T::stubs(version);
    P::patch(&mut stubs);

    // SAFETY: `table` is non-null and the caller passes storage for a `T`.
    unsafe { table.write(stubs) };
    ZeResult::SUCCESS
}

fn getter_for<P: NullProfile, T: StubTable>() -> Option<NonNull<c_void>> {
    if !P::provides(T::CATEGORY, T::INFO.name) {
        return None;
    }
    let getter: GetTableFn<T> = get_table::<P, T>;
    NonNull::new(getter as *mut c_void)
}

// =============================================================================
// Stub Behavior
// =============================================================================

/// Shared body of every stub
///
/// Fills each output handle array the entry point declares. An array sized
/// by a count parameter reports a single object: a null array only sets the
/// count, a non-null one receives one handle.
///
/// # Safety
///
/// `args` must be the arguments of a call to `entry` whose pointers satisfy
/// the entry point's C contract.
pub(crate) unsafe fn respond(entry: &EntryPoint, args: &[Arg]) -> ZeResult {
    for (index, (arg, spec)) in args.iter().zip(entry.params).enumerate() {
        let Arg::HandleOut(out) = *arg else {
            continue;
        };
        if spec.input {
            continue;
        }

        match entry.count_for(index).and_then(|c| args.get(c)) {
            Some(Arg::Pointer(count)) if *count != 0 => {
                let count = *count as *mut u32;
                // SAFETY: count parameters are caller-owned `uint32_t*`.
                let requested = unsafe { count.read_unaligned() };
                if out != 0 && requested > 0 {
                    // SAFETY: the caller provided room for `requested` handles.
                    unsafe { (out as *mut RawHandle).write_unaligned(next_handle()) };
                }
                // SAFETY: as above.
                unsafe { count.write_unaligned(1) };
            },
            Some(_) => {},
            None if out != 0 => {
                // SAFETY: a lone output handle points at one writable slot.
                unsafe { (out as *mut RawHandle).write_unaligned(next_handle()) };
            },
            None => {},
        }
    }

    log::trace!("null: {}", entry.name);
    ZeResult::SUCCESS
}

// =============================================================================
// Null Driver
// =============================================================================

/// A null driver module
pub struct NullDriver<P: NullProfile = Standard> {
    profile: PhantomData<fn() -> P>,
}

impl<P: NullProfile> NullDriver<P> {
    /// Create the driver
    pub const fn new() -> Self {
        Self { profile: PhantomData }
    }

    /// Module name
    pub fn name(&self) -> &'static str {
        P::NAME
    }

    /// Newest version the driver implements
    pub fn version(&self) -> ApiVersion {
        P::VERSION
    }
}

impl<P: NullProfile> Default for NullDriver<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: NullProfile> fmt::Debug for NullDriver<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullDriver")
            .field("name", &P::NAME)
            .field("version", &P::VERSION)
            .finish()
    }
}

impl<P: NullProfile> ProcAddressSource for NullDriver<P> {
    fn proc_address(&self, symbol: &str) -> Option<NonNull<c_void>> {
        // `ze` is a prefix of the other two; test it last.
        if symbol.starts_with(Category::Sysman.prefix()) {
            stubs::sysman::getter::<P>(symbol)
        } else if symbol.starts_with(Category::Tools.prefix()) {
            stubs::tools::getter::<P>(symbol)
        } else if symbol.starts_with(Category::Compute.prefix()) {
            stubs::compute::getter::<P>(symbol)
        } else {
            None
        }
    }
}
