//! # Process-wide Loader
//!
//! The C exports have no context argument; they forward through the loader
//! installed here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use spin::RwLock;
use zel_core::LoaderError;

use crate::config::LoaderConfig;
use crate::context::{Loader, TeardownReport};

static LOADER: RwLock<Option<Arc<Loader>>> = RwLock::new(None);

/// Set once the installed loader is being torn down
static TORN_DOWN: AtomicBool = AtomicBool::new(false);

/// Install `loader` as the process-wide loader
pub fn install(loader: Loader) -> Result<Arc<Loader>, LoaderError> {
    let mut slot = LOADER.write();
    if slot.is_some() {
        return Err(LoaderError::AlreadyInstalled);
    }
    let loader = Arc::new(loader);
    *slot = Some(loader.clone());
    TORN_DOWN.store(false, Ordering::Release);
    log::info!("loader installed with {} drivers", loader.driver_count());
    Ok(loader)
}

/// Install `loader` unless another one got there first
///
/// Returns whichever loader ends up installed.
pub(crate) fn install_or_existing(loader: Loader) -> Arc<Loader> {
    let mut slot = LOADER.write();
    if let Some(existing) = slot.as_ref() {
        log::debug!("loader already installed, dropping the new one");
        return existing.clone();
    }
    let loader = Arc::new(loader);
    *slot = Some(loader.clone());
    TORN_DOWN.store(false, Ordering::Release);
    log::info!("loader installed from environment");
    loader
}

/// The installed loader, if any
pub fn installed() -> Option<Arc<Loader>> {
    LOADER.read().clone()
}

/// Remove the installed loader and tear it down
pub fn uninstall() -> Result<TeardownReport, LoaderError> {
    let mut slot = LOADER.write();
    if slot.is_none() {
        return Err(LoaderError::NotInstalled);
    }
    TORN_DOWN.store(true, Ordering::Release);
    let loader = slot.take().ok_or(LoaderError::NotInstalled)?;
    drop(slot);
    Ok(loader.teardown())
}

/// `zelCheckIsLoaderInTearDown`
pub fn in_teardown() -> bool {
    match installed() {
        Some(loader) => loader.is_in_teardown(),
        None => TORN_DOWN.load(Ordering::Acquire),
    }
}

/// The installed loader, installing one from the environment if needed
///
/// The loader is built without holding the slot; if another thread installs
/// one meanwhile, that one wins and the new one is dropped.
pub fn ensure_installed() -> Option<Arc<Loader>> {
    if let Some(loader) = installed() {
        return Some(loader);
    }

    let config = LoaderConfig::from_env();
    config.apply_logging();
    match Loader::new(config) {
        Ok(loader) => Some(install_or_existing(loader)),
        Err(err) => {
            log::error!("loader unavailable: {}", err);
            installed()
        },
    }
}
