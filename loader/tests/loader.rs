//! Loader context against the in-process null driver

use std::any::Any;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use zel_loader::zel_core::layer::Call;
use zel_loader::zel_core::prelude::*;
use zel_loader::zel_null_driver::{NullDriver, NullProfile, Standard, HANDLE_BASE};
use zel_loader::zel_tracing::TraceCallbacks;
use zel_loader::{Loader, LoaderConfig, TeardownReport};

fn null_source() -> Arc<dyn ProcAddressSource> {
    Arc::new(NullDriver::<Standard>::new())
}

fn null_loader(config: LoaderConfig) -> Loader {
    Loader::with_drivers(config, [("null", null_source())]).expect("null driver")
}

fn first_driver(loader: &Loader) -> ZesDriverHandle {
    let mut count = 1u32;
    let mut drivers = [ZesDriverHandle::NULL];
    // SAFETY: `drivers` has room for `count` handles.
    let result = unsafe { loader.driver_get(&mut count, drivers.as_mut_ptr()) };
    assert_eq!(result, ZeResult::SUCCESS);
    drivers[0]
}

fn first_device(loader: &Loader, driver: ZesDriverHandle) -> ZesDeviceHandle {
    let mut count = 1u32;
    let mut devices = [ZesDeviceHandle::NULL];
    // SAFETY: `devices` has room for `count` handles.
    let result = unsafe { loader.sysman().device_get(driver, &mut count, devices.as_mut_ptr()) };
    assert_eq!(result, ZeResult::SUCCESS);
    devices[0]
}

#[test]
fn test_init_then_enumerate() {
    let loader = null_loader(LoaderConfig::default());
    assert_eq!(loader.init(ZesInitFlags::empty()), ZeResult::SUCCESS);
    assert_eq!(loader.init_status("null", Category::Sysman), Ok(ZeResult::SUCCESS));

    let mut count = 0u32;
    // SAFETY: count query with a null array.
    let result = unsafe { loader.driver_get(&mut count, ptr::null_mut()) };
    assert_eq!(result, ZeResult::SUCCESS);
    assert_eq!(count, 1);

    let driver = first_driver(&loader);
    assert!(driver.raw().value() > HANDLE_BASE);
    assert!(loader.dispatcher().registry().is_live(driver.raw()));

    let mut devices = 0u32;
    // SAFETY: count query with a null array.
    let result = unsafe { loader.sysman().device_get(driver, &mut devices, ptr::null_mut()) };
    assert_eq!(result, ZeResult::SUCCESS);
    assert_eq!(devices, 1);

    let device = first_device(&loader, driver);
    assert!(loader.dispatcher().registry().is_live(device.raw()));

    let mut fans = 1u32;
    let mut fan = ZesFanHandle::NULL;
    // SAFETY: `fan` is one writable slot.
    let result = unsafe { loader.sysman().device_enum_fans(device, &mut fans, &mut fan) };
    assert_eq!(result, ZeResult::SUCCESS);

    let mut speed = 0i32;
    // SAFETY: `speed` is writable.
    let result = unsafe { loader.sysman().fan_get_state(fan, 0, &mut speed) };
    assert_eq!(result, ZeResult::SUCCESS);
}

#[test]
fn test_drivers_aggregate() {
    let loader = Loader::with_drivers(
        LoaderConfig::default(),
        [("first", null_source()), ("second", null_source())],
    )
    .expect("drivers");
    assert_eq!(loader.init(ZesInitFlags::empty()), ZeResult::SUCCESS);

    let mut count = 0u32;
    // SAFETY: count query with a null array.
    assert_eq!(unsafe { loader.driver_get(&mut count, ptr::null_mut()) }, ZeResult::SUCCESS);
    assert_eq!(count, 2);

    let mut drivers = [ZesDriverHandle::NULL; 2];
    // SAFETY: `drivers` has room for `count` handles.
    assert_eq!(unsafe { loader.driver_get(&mut count, drivers.as_mut_ptr()) }, ZeResult::SUCCESS);

    let owners: Vec<String> = drivers
        .iter()
        .map(|d| {
            let record = loader.dispatcher().registry().resolve(d.raw()).expect("registered");
            record.dispatch().name().to_string()
        })
        .collect();
    assert_eq!(owners, ["first", "second"]);

    let mut one = 1u32;
    let mut single = [ZesDriverHandle::NULL; 2];
    // SAFETY: `single` has room for more than `one` handle.
    assert_eq!(unsafe { loader.driver_get(&mut one, single.as_mut_ptr()) }, ZeResult::SUCCESS);
    assert_eq!(one, 1);
    assert!(single[1].is_null());
}

#[test]
fn test_count_query_stops_at_requested() {
    let loader = Loader::with_drivers(
        LoaderConfig::default(),
        [("first", null_source()), ("second", null_source())],
    )
    .expect("drivers");
    loader.init(ZesInitFlags::empty());

    let mut count = 1u32;
    // SAFETY: count query with a null array.
    assert_eq!(unsafe { loader.driver_get(&mut count, ptr::null_mut()) }, ZeResult::SUCCESS);
    assert_eq!(count, 1);
}

unsafe extern "C" fn driver_get_dropped(_count: *mut u32, _drivers: *mut ZesDriverHandle) -> ZeResult {
    ZeResult::WARNING_DROPPED_DATA
}

struct DropsDrivers;

impl NullProfile for DropsDrivers {
    fn patch(table: &mut dyn Any) {
        if let Some(driver) = table.downcast_mut::<ZesDriverDdiTable>() {
            driver.pfn_get = Some(driver_get_dropped);
        }
    }
}

#[test]
fn test_driver_get_stops_at_warning() {
    let loader = Loader::with_drivers(
        LoaderConfig::default(),
        [
            ("warns", Arc::new(NullDriver::<DropsDrivers>::new()) as Arc<dyn ProcAddressSource>),
            ("null", null_source()),
        ],
    )
    .expect("drivers");
    assert_eq!(loader.init(ZesInitFlags::empty()), ZeResult::SUCCESS);

    let mut count = 7u32;
    let mut drivers = [ZesDriverHandle::NULL; 7];
    // SAFETY: `drivers` has room for `count` handles.
    let result = unsafe { loader.driver_get(&mut count, drivers.as_mut_ptr()) };
    assert_eq!(result, ZeResult::WARNING_DROPPED_DATA);
    assert_eq!(count, 7);
    assert!(drivers.iter().all(|d| d.is_null()));
}

struct NoGlobal;

impl NullProfile for NoGlobal {
    fn provides(_category: Category, group: &'static str) -> bool {
        group != "Global"
    }
}

#[test]
fn test_driver_without_init_is_skipped() {
    let loader = Loader::with_drivers(
        LoaderConfig::default(),
        [("no-init", Arc::new(NullDriver::<NoGlobal>::new()) as Arc<dyn ProcAddressSource>)],
    )
    .expect("driver");

    assert_eq!(loader.init(ZesInitFlags::empty()), ZeResult::ERROR_UNINITIALIZED);
    assert_eq!(loader.init_status("no-init", Category::Sysman), Ok(ZeResult::ERROR_UNINITIALIZED));

    let mut count = 0u32;
    // SAFETY: count query with a null array.
    let result = unsafe { loader.driver_get(&mut count, ptr::null_mut()) };
    assert_eq!(result, ZeResult::ERROR_UNINITIALIZED);
}

struct Version15;

impl NullProfile for Version15 {
    const VERSION: ApiVersion = ApiVersion::V1_5;
}

#[test]
fn test_driver_version_gates_calls() {
    let loader = Loader::with_drivers(
        LoaderConfig::default(),
        [("v1.5", Arc::new(NullDriver::<Version15>::new()) as Arc<dyn ProcAddressSource>)],
    )
    .expect("driver");
    assert_eq!(loader.driver("v1.5").expect("driver").sysman().version(), ApiVersion::V1_5);
    assert_eq!(loader.init(ZesInitFlags::empty()), ZeResult::SUCCESS);

    let device = first_device(&loader, first_driver(&loader));
    let mut available: ZeBool = 0;
    // SAFETY: `available` is writable.
    let result = unsafe { loader.sysman().device_ecc_available(device, &mut available) };
    assert_eq!(result, ZeResult::SUCCESS);

    let mut firmware = 1u32;
    let mut handle = ZesFirmwareHandle::NULL;
    // SAFETY: `handle` is one writable slot.
    let result = unsafe { loader.sysman().device_enum_firmwares(device, &mut firmware, &mut handle) };
    assert_eq!(result, ZeResult::SUCCESS);

    let mut size = 0usize;
    // SAFETY: `size` is writable and a null log buffer is allowed.
    let result = unsafe { loader.sysman().firmware_get_console_logs(handle, &mut size, ptr::null_mut()) };
    assert_eq!(result, ZeResult::ERROR_UNSUPPORTED_VERSION);
}

unsafe extern "C" fn firmware_flash_refused(
    _firmware: ZesFirmwareHandle,
    _image: *mut std::ffi::c_void,
    _size: u32,
) -> ZeResult {
    ZeResult::ERROR_NOT_AVAILABLE
}

struct RefusesFlash;

impl NullProfile for RefusesFlash {
    fn patch(table: &mut dyn Any) {
        if let Some(firmware) = table.downcast_mut::<ZesFirmwareDdiTable>() {
            firmware.pfn_flash = Some(firmware_flash_refused);
        }
    }
}

#[test]
fn test_overridden_entry_answers() {
    let loader = Loader::with_drivers(
        LoaderConfig::default(),
        [("refuses", Arc::new(NullDriver::<RefusesFlash>::new()) as Arc<dyn ProcAddressSource>)],
    )
    .expect("driver");
    loader.init(ZesInitFlags::empty());
    let device = first_device(&loader, first_driver(&loader));

    let mut count = 1u32;
    let mut firmware = ZesFirmwareHandle::NULL;
    // SAFETY: `firmware` is one writable slot.
    unsafe { loader.sysman().device_enum_firmwares(device, &mut count, &mut firmware) };

    // SAFETY: the override ignores the image.
    let result = unsafe { loader.sysman().firmware_flash(firmware, ptr::null_mut(), 0) };
    assert_eq!(result, ZeResult::ERROR_NOT_AVAILABLE);
}

// =============================================================================
// Layers
// =============================================================================

#[test]
fn test_validation_layer() {
    let mut config = LoaderConfig {
        validation_layer: true,
        ..LoaderConfig::default()
    };
    config.validation.parameter_validation = true;
    config.validation.handle_lifetime = true;
    let loader = null_loader(config);
    loader.init(ZesInitFlags::empty());
    let device = first_device(&loader, first_driver(&loader));
    let api = loader.sysman();

    let mut available: ZeBool = 0;
    // SAFETY: rejected before reaching the driver.
    let result = unsafe { api.device_ecc_available(ZesDeviceHandle::NULL, &mut available) };
    assert_eq!(result, ZeResult::ERROR_INVALID_NULL_HANDLE);

    // SAFETY: rejected before reaching the driver.
    let result = unsafe { api.device_ecc_available(device, ptr::null_mut()) };
    assert_eq!(result, ZeResult::ERROR_INVALID_NULL_POINTER);

    let stranger = ZesDeviceHandle::from_raw(RawHandle::new(0x42));
    // SAFETY: rejected before reaching the driver.
    let result = unsafe { api.device_ecc_available(stranger, &mut available) };
    assert_eq!(result, ZeResult::ERROR_INVALID_ARGUMENT);

    // SAFETY: `available` is writable.
    let result = unsafe { api.device_ecc_available(device, &mut available) };
    assert_eq!(result, ZeResult::SUCCESS);

    let stats = loader.validation().expect("validation").stats();
    assert_eq!(stats.rejected(), 3);
}

#[derive(Default)]
struct Counting {
    prologues: AtomicUsize,
    epilogues: AtomicUsize,
}

impl TraceCallbacks for Counting {
    fn prologue(&self, _call: &Call<'_>) -> usize {
        self.prologues.fetch_add(1, Ordering::SeqCst);
        0
    }

    fn epilogue(&self, _call: &Call<'_>, _result: ZeResult, _instance_data: usize) {
        self.epilogues.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_tracing_layer() {
    let loader = null_loader(LoaderConfig {
        tracing_layer: true,
        ..LoaderConfig::default()
    });
    loader.init(ZesInitFlags::empty());

    let counting = Arc::new(Counting::default());
    let tracing = loader.tracing().expect("tracing");
    let id = tracing.register(counting.clone()).expect("tracer");

    let driver = first_driver(&loader);
    first_device(&loader, driver);
    assert_eq!(counting.prologues.load(Ordering::SeqCst), 0);

    tracing.set_enabled(id, true).expect("tracer");
    first_device(&loader, driver);
    assert_eq!(counting.prologues.load(Ordering::SeqCst), 1);
    assert_eq!(counting.epilogues.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Handles and teardown
// =============================================================================

#[test]
fn test_foreign_handle_registration() {
    let loader = null_loader(LoaderConfig::default());
    loader.init(ZesInitFlags::empty());
    let device = first_device(&loader, first_driver(&loader));

    let tools_device = RawHandle::new(0x1234);
    assert_eq!(loader.register_handle(device.raw(), tools_device), Ok(()));

    // SAFETY: the null driver ignores the pointer.
    let result = unsafe {
        loader
            .tools()
            .device_get_debug_properties(ZetDeviceHandle::from_raw(tools_device), ptr::null_mut())
    };
    assert_eq!(result, ZeResult::SUCCESS);

    assert_eq!(
        loader.register_handle(RawHandle::new(0x99), RawHandle::new(0x98)),
        Err(LoaderError::UnknownHandle)
    );
}

#[test]
fn test_tools_calls_on_compute_handles() {
    let mut config = LoaderConfig {
        validation_layer: true,
        ..LoaderConfig::default()
    };
    config.validation.handle_lifetime = true;
    let loader = null_loader(config);
    assert_eq!(loader.init_compute(ZeInitFlags::empty()), ZeResult::SUCCESS);
    let compute = loader.compute();

    // SAFETY: every pointer below refers to a live local; the null driver
    // never reads the descriptors.
    unsafe {
        let mut count = 1u32;
        let mut driver = ZeDriverHandle::NULL;
        assert_eq!(loader.compute_driver_get(&mut count, &mut driver), ZeResult::SUCCESS);

        let mut device = ZeDeviceHandle::NULL;
        assert_eq!(compute.device_get(driver, &mut count, &mut device), ZeResult::SUCCESS);

        let mut context = ZeContextHandle::NULL;
        assert_eq!(compute.context_create(driver, ptr::null(), &mut context), ZeResult::SUCCESS);

        let mut pool = ZeEventPoolHandle::NULL;
        let result = compute.event_pool_create(context, ptr::null(), 0, ptr::null_mut(), &mut pool);
        assert_eq!(result, ZeResult::SUCCESS);

        let mut event = ZeEventHandle::NULL;
        assert_eq!(compute.event_create(pool, ptr::null(), &mut event), ZeResult::SUCCESS);

        let registry = loader.dispatcher().registry();
        assert!([device.raw(), context.raw(), pool.raw(), event.raw()]
            .iter()
            .all(|&raw| registry.is_live(raw)));

        let tools = loader.tools();
        let tools_device = ZetDeviceHandle::from_raw(device.raw());
        let tools_context = ZetContextHandle::from_raw(context.raw());
        assert_eq!(tools.device_get_debug_properties(tools_device, ptr::null_mut()), ZeResult::SUCCESS);

        let mut groups = [ZetMetricGroupHandle::NULL];
        let mut tracer = ZetMetricTracerExpHandle::NULL;
        let result = tools.metric_tracer_create_exp(
            tools_context,
            tools_device,
            1,
            groups.as_mut_ptr(),
            ptr::null_mut(),
            event,
            &mut tracer,
        );
        assert_eq!(result, ZeResult::SUCCESS);
        assert!(registry.is_live(tracer.raw()));

        assert_eq!(compute.event_destroy(event), ZeResult::SUCCESS);
        let result = tools.metric_tracer_create_exp(
            tools_context,
            ZetDeviceHandle::from_raw(RawHandle::new(0x4242)),
            1,
            groups.as_mut_ptr(),
            ptr::null_mut(),
            event,
            &mut tracer,
        );
        assert_eq!(result, ZeResult::ERROR_INVALID_ARGUMENT);
    }
    assert_eq!(loader.validation().expect("validation").stats().rejected(), 1);
}

#[test]
fn test_teardown_releases_everything() {
    let loader = null_loader(LoaderConfig::default());
    loader.init(ZesInitFlags::empty());
    let device = first_device(&loader, first_driver(&loader));

    let report = loader.teardown();
    assert_eq!(
        report,
        TeardownReport {
            drivers: 1,
            handles: 2,
            sub_tables: ComputeGroups::GROUPS.len() + SysmanGroups::GROUPS.len() + ToolsGroups::GROUPS.len(),
            in_use: 0,
        }
    );

    let mut available: ZeBool = 0;
    // SAFETY: rejected before reaching any driver.
    let result = unsafe { loader.sysman().device_ecc_available(device, &mut available) };
    assert_eq!(result, ZeResult::ERROR_UNINITIALIZED);
    assert_eq!(loader.teardown(), TeardownReport::default());
}

#[test]
fn test_teardown_with_table_in_use() {
    let loader = null_loader(LoaderConfig::default());
    let held = loader.driver("null").expect("driver");

    let report = loader.teardown();
    assert_eq!(report.drivers, 1);
    assert_eq!(report.in_use, 1);
    assert_eq!(report.sub_tables, 0);
    assert!(held.sysman().is_valid());
}
