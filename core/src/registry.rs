//! # Handle Registry
//!
//! Maps every handle the loader has seen to the tables of the driver that
//! created it. A record is created once when the handle is adopted and never
//! changes afterwards except for its validity flag.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use hashbrown::HashMap;
use spin::RwLock;

use crate::handle::RawHandle;
use crate::table::DriverDispatch;

/// Registry record for one handle
#[derive(Debug)]
pub struct HandleRecord {
    dispatch: Arc<DriverDispatch>,
    valid: AtomicBool,
}

impl HandleRecord {
    fn new(dispatch: Arc<DriverDispatch>) -> Self {
        Self {
            dispatch,
            valid: AtomicBool::new(true),
        }
    }

    /// Tables of the owning driver
    #[inline]
    pub fn dispatch(&self) -> &Arc<DriverDispatch> {
        &self.dispatch
    }

    /// Check the validity flag
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    fn invalidate(&self) -> bool {
        self.valid.swap(false, Ordering::AcqRel)
    }
}

/// Process-wide handle registry
#[derive(Debug, Default)]
pub struct HandleRegistry {
    records: RwLock<HashMap<RawHandle, Arc<HandleRecord>>>,
}

impl HandleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` to `dispatch`
    ///
    /// A live record is left untouched; an invalidated one is replaced. Returns
    /// whether a new record was created.
    pub fn adopt(&self, handle: RawHandle, dispatch: &Arc<DriverDispatch>) -> bool {
        if handle.is_null() {
            return false;
        }

        if self.is_live(handle) {
            return false;
        }

        let mut records = self.records.write();
        match records.get(&handle) {
            Some(record) if record.is_valid() => false,
            _ => {
                records.insert(handle, Arc::new(HandleRecord::new(dispatch.clone())));
                true
            },
        }
    }

    /// Look up the record for `handle`, valid or not
    pub fn resolve(&self, handle: RawHandle) -> Option<Arc<HandleRecord>> {
        if handle.is_null() {
            return None;
        }
        self.records.read().get(&handle).cloned()
    }

    /// Check that `handle` is known and not destroyed
    pub fn is_live(&self, handle: RawHandle) -> bool {
        self.records
            .read()
            .get(&handle)
            .is_some_and(|record| record.is_valid())
    }

    /// Mark `handle` as destroyed
    ///
    /// Returns whether a live record was invalidated.
    pub fn release(&self, handle: RawHandle) -> bool {
        self.records
            .read()
            .get(&handle)
            .is_some_and(|record| record.invalidate())
    }

    /// Drop every record owned by `dispatch`
    pub fn purge(&self, dispatch: &Arc<DriverDispatch>) -> usize {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|_, record| !Arc::ptr_eq(&record.dispatch, dispatch));
        before - records.len()
    }

    /// Drop the records of `dispatch` if nothing else refers to it
    ///
    /// `others` is the number of references the caller accounts for outside the
    /// registry. Returns `None`, leaving every record in place, when a record
    /// is borrowed or the tables are shared beyond those references.
    pub fn purge_exclusive(&self, dispatch: &Arc<DriverDispatch>, others: usize) -> Option<usize> {
        let mut records = self.records.write();
        let mut owned = 0;
        for record in records.values() {
            if Arc::ptr_eq(&record.dispatch, dispatch) {
                if Arc::strong_count(record) > 1 {
                    return None;
                }
                owned += 1;
            }
        }
        if Arc::strong_count(dispatch) != others + owned {
            return None;
        }
        records.retain(|_, record| !Arc::ptr_eq(&record.dispatch, dispatch));
        Some(owned)
    }

    /// Drop every record
    pub fn clear(&self) -> usize {
        let mut records = self.records.write();
        let count = records.len();
        records.clear();
        count
    }

    /// Number of records, valid or not
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check for an empty registry
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
