//! C exports through the process-wide loader
//!
//! Every test installs its own loader, so they are serialized.

use std::ptr;
use std::sync::{Arc, Mutex, MutexGuard};

use zel_loader::exports;
use zel_loader::zel_core::prelude::*;
use zel_loader::zel_null_driver::{NullDriver, Standard};
use zel_loader::exports::ZelComponentVersion;
use zel_loader::{in_teardown, install, installed, uninstall, Loader, LoaderConfig};

static GLOBAL: Mutex<()> = Mutex::new(());

fn exclusive() -> MutexGuard<'static, ()> {
    let guard = GLOBAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _ = uninstall();
    guard
}

fn install_null(config: LoaderConfig) -> Arc<Loader> {
    let loader = Loader::with_drivers(
        config,
        [("null", Arc::new(NullDriver::<Standard>::new()) as Arc<dyn ProcAddressSource>)],
    )
    .expect("null driver");
    install(loader).expect("install")
}

#[test]
fn test_exports_without_loader() {
    let _guard = exclusive();
    assert!(installed().is_none());

    let mut count = 0u32;
    // SAFETY: rejected before any pointer is used.
    unsafe {
        assert_eq!(exports::zesDeviceReset(ZesDeviceHandle::NULL, 0), ZeResult::ERROR_UNINITIALIZED);
        assert_eq!(exports::zesDriverGet(&mut count, ptr::null_mut()), ZeResult::ERROR_UNINITIALIZED);
        assert_eq!(exports::zeDriverGet(&mut count, ptr::null_mut()), ZeResult::ERROR_UNINITIALIZED);
        assert_eq!(exports::zelEnableTracingLayer(), ZeResult::ERROR_UNINITIALIZED);
        let mut elems = 0usize;
        assert_eq!(exports::zelLoaderGetVersions(&mut elems, ptr::null_mut()), ZeResult::ERROR_UNINITIALIZED);
    }
    assert_eq!(uninstall(), Err(LoaderError::NotInstalled));
}

#[test]
fn test_exports_route_through_loader() {
    let _guard = exclusive();
    let loader = install_null(LoaderConfig::default());
    assert_eq!(install_null_again(), Err(LoaderError::AlreadyInstalled));

    // SAFETY: every pointer below refers to a live local.
    unsafe {
        assert_eq!(exports::zesInit(ZesInitFlags::empty()), ZeResult::SUCCESS);

        let mut count = 0u32;
        assert_eq!(exports::zesDriverGet(&mut count, ptr::null_mut()), ZeResult::SUCCESS);
        assert_eq!(count, 1);

        let mut driver = ZesDriverHandle::NULL;
        assert_eq!(exports::zesDriverGet(&mut count, &mut driver), ZeResult::SUCCESS);

        let mut device = ZesDeviceHandle::NULL;
        assert_eq!(exports::zesDeviceGet(driver, &mut count, &mut device), ZeResult::SUCCESS);
        assert!(loader.dispatcher().registry().is_live(device.raw()));

        assert_eq!(exports::zesDeviceReset(device, 0), ZeResult::SUCCESS);

        let foreign = RawHandle::new(0x5151);
        assert_eq!(exports::zelLoaderRegisterHandle(device.raw(), foreign), ZeResult::SUCCESS);
        assert_eq!(
            exports::zelLoaderRegisterHandle(RawHandle::new(0x1), foreign),
            ZeResult::ERROR_INVALID_ARGUMENT
        );
    }

    drop(loader);
    let report = uninstall().expect("installed");
    assert_eq!(report.drivers, 1);
    assert_eq!(report.in_use, 0);
}

fn install_null_again() -> Result<(), LoaderError> {
    let loader = Loader::with_drivers(
        LoaderConfig::default(),
        [("null", Arc::new(NullDriver::<Standard>::new()) as Arc<dyn ProcAddressSource>)],
    )?;
    install(loader).map(|_| ())
}

#[test]
fn test_table_getter_passthrough() {
    let _guard = exclusive();
    let loader = install_null(LoaderConfig::default());
    let own = loader
        .driver("null")
        .expect("driver")
        .sysman()
        .groups()
        .device
        .as_deref()
        .copied()
        .expect("device table");

    let mut table = ZesDeviceDdiTable::default();
    // SAFETY: `table` is writable.
    let result = unsafe { exports::zesGetDeviceProcAddrTable(ApiVersion::CURRENT, &mut table) };
    assert_eq!(result, ZeResult::SUCCESS);
    assert_eq!(table.pfn_reset.map(|f| f as usize), own.pfn_reset.map(|f| f as usize));

    drop(loader);
    uninstall().expect("installed");
}

#[test]
fn test_table_getter_intercept() {
    let _guard = exclusive();
    let loader = install_null(LoaderConfig {
        force_intercept: true,
        ..LoaderConfig::default()
    });

    let mut table = ZesDeviceDdiTable::default();
    // SAFETY: `table` is writable; null is part of the contract.
    unsafe {
        assert_eq!(
            exports::zesGetDeviceProcAddrTable(ApiVersion::CURRENT, ptr::null_mut()),
            ZeResult::ERROR_INVALID_NULL_POINTER
        );
        assert_eq!(
            exports::zesGetDeviceProcAddrTable(ApiVersion::new(2, 0), &mut table),
            ZeResult::ERROR_UNSUPPORTED_VERSION
        );
        assert_eq!(
            exports::zesGetDeviceProcAddrTable(ApiVersion::V1_0, &mut table),
            ZeResult::SUCCESS
        );
    }

    let reset: unsafe extern "C" fn(ZesDeviceHandle, ZeBool) -> ZeResult = exports::zesDeviceReset;
    assert_eq!(table.pfn_reset.map(|f| f as usize), Some(reset as usize));
    assert!(table.pfn_ecc_available.is_none());

    let mut tools = ZetMetricDdiTable::default();
    // SAFETY: `tools` is writable.
    let result = unsafe { exports::zetGetMetricProcAddrTable(ApiVersion::CURRENT, &mut tools) };
    assert_eq!(result, ZeResult::SUCCESS);
    assert!(tools.pfn_get.is_some());

    drop(loader);
    uninstall().expect("installed");
}

#[test]
fn test_compute_exports_feed_tools() {
    let _guard = exclusive();
    let mut config = LoaderConfig {
        validation_layer: true,
        ..LoaderConfig::default()
    };
    config.validation.handle_lifetime = true;
    let loader = install_null(config);

    // SAFETY: every pointer below refers to a live local.
    unsafe {
        assert_eq!(exports::zeInit(ZeInitFlags::GPU_ONLY), ZeResult::SUCCESS);

        let mut count = 1u32;
        let mut driver = ZeDriverHandle::NULL;
        assert_eq!(exports::zeDriverGet(&mut count, &mut driver), ZeResult::SUCCESS);

        let mut device = ZeDeviceHandle::NULL;
        assert_eq!(exports::zeDeviceGet(driver, &mut count, &mut device), ZeResult::SUCCESS);

        let mut context = ZeContextHandle::NULL;
        assert_eq!(exports::zeContextCreate(driver, ptr::null(), &mut context), ZeResult::SUCCESS);
        assert!(loader.dispatcher().registry().is_live(context.raw()));

        let tools_device = ZetDeviceHandle::from_raw(device.raw());
        assert_eq!(exports::zetDeviceGetDebugProperties(tools_device, ptr::null_mut()), ZeResult::SUCCESS);
    }

    drop(loader);
    uninstall().expect("installed");
}

#[test]
fn test_loader_versions() {
    let _guard = exclusive();
    let loader = install_null(LoaderConfig {
        validation_layer: true,
        ..LoaderConfig::default()
    });

    // SAFETY: every pointer below refers to a live local.
    unsafe {
        assert_eq!(
            exports::zelLoaderGetVersions(ptr::null_mut(), ptr::null_mut()),
            ZeResult::ERROR_INVALID_NULL_POINTER
        );

        let mut elems = 0usize;
        assert_eq!(exports::zelLoaderGetVersions(&mut elems, ptr::null_mut()), ZeResult::SUCCESS);
        assert_eq!(elems, 2);

        let mut versions = [ZelComponentVersion::empty(); 2];
        let mut short = 1usize;
        assert_eq!(
            exports::zelLoaderGetVersions(&mut short, versions.as_mut_ptr()),
            ZeResult::ERROR_INVALID_SIZE
        );
        assert_eq!(short, 1);

        assert_eq!(exports::zelLoaderGetVersions(&mut elems, versions.as_mut_ptr()), ZeResult::SUCCESS);
    }
    assert_eq!(versions_names(&loader), ["loader", "validation layer"]);

    drop(loader);
    uninstall().expect("installed");
}

fn versions_names(loader: &Loader) -> Vec<String> {
    let mut elems = loader.versions().len();
    let mut versions = vec![ZelComponentVersion::empty(); elems];
    // SAFETY: `versions` has room for `elems` entries.
    let result = unsafe { exports::zelLoaderGetVersions(&mut elems, versions.as_mut_ptr()) };
    assert_eq!(result, ZeResult::SUCCESS);
    assert!(versions.iter().all(|v| v.spec_version == ApiVersion::CURRENT));
    versions.iter().map(ZelComponentVersion::name).collect()
}

#[test]
fn test_tracing_layer_switch() {
    let _guard = exclusive();
    let loader = install_null(LoaderConfig::default());
    let mut enabled = true;

    // SAFETY: `enabled` is writable; null is part of the contract.
    unsafe {
        assert_eq!(exports::zelGetTracingLayerState(ptr::null_mut()), ZeResult::ERROR_INVALID_NULL_POINTER);
        assert_eq!(exports::zelGetTracingLayerState(&mut enabled), ZeResult::SUCCESS);
        assert!(!enabled);

        assert_eq!(exports::zelEnableTracingLayer(), ZeResult::SUCCESS);
        assert_eq!(exports::zelEnableTracingLayer(), ZeResult::SUCCESS);
        assert_eq!(exports::zelGetTracingLayerState(&mut enabled), ZeResult::SUCCESS);
        assert!(enabled);
        assert_eq!(loader.dispatcher().layer_count(), 1);

        assert_eq!(exports::zelDisableTracingLayer(), ZeResult::SUCCESS);
        assert_eq!(exports::zelGetTracingLayerState(&mut enabled), ZeResult::SUCCESS);
        assert!(!enabled);
    }

    drop(loader);
    uninstall().expect("installed");
}

#[test]
fn test_teardown_check() {
    let _guard = exclusive();
    let loader = install_null(LoaderConfig::default());
    assert!(!exports::zelCheckIsLoaderInTearDown());

    drop(loader);
    uninstall().expect("installed");
    assert!(exports::zelCheckIsLoaderInTearDown());
    assert!(in_teardown());
}
