//! # Dynamic Driver Modules
//!
//! A driver library opened with `libloading`. The library stays open for as
//! long as any dispatch table built from it is alive.

use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

use libloading::Library;
use zel_core::{LoaderError, ProcAddressSource};

/// A driver loaded from a shared library
pub struct DynamicDriver {
    name: String,
    library: Library,
}

impl DynamicDriver {
    /// Open `name` with the platform's library search rules
    pub fn load(name: &str) -> Result<Self, LoaderError> {
        // SAFETY: driver libraries have no initialisers with preconditions
        // beyond being loaded once per process.
        let library = unsafe { Library::new(name) }.map_err(|err| {
            log::debug!("{}: {}", name, err);
            LoaderError::LibraryLoad
        })?;

        log::info!("{}: loaded", name);
        Ok(Self {
            name: name.to_string(),
            library,
        })
    }

    /// Library name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ProcAddressSource for DynamicDriver {
    fn proc_address(&self, symbol: &str) -> Option<NonNull<c_void>> {
        // SAFETY: the address is only reinterpreted by the table builder,
        // which knows the getter's signature.
        let address = unsafe { self.library.get::<*mut c_void>(symbol.as_bytes()) }.ok()?;
        NonNull::new(*address)
    }
}

impl fmt::Debug for DynamicDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicDriver").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_library() {
        let err = DynamicDriver::load("libzel_does_not_exist.so.0").map(|_| ());
        assert_eq!(err, Err(LoaderError::LibraryLoad));
    }
}
