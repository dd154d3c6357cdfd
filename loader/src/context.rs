//! # Loader Context
//!
//! The [`Loader`] owns everything with process lifetime: the driver modules,
//! their dispatch tables, the handle registry and the layer stack.
//!
//! ## Lifecycle
//!
//! ```text
//! Loader::new / with_drivers ─► init ─► driver_get ─► calls ... ─► teardown
//!        │                        │          │
//!        │ build tables           │          └─ register driver handles
//!        │ install layers         └─ Global.pfnInit per driver
//! ```
//!
//! Sysman and compute initialise separately: `zesInit` gates `zesDriverGet`
//! and `zeInit` gates `zeDriverGet`. Tools calls ride on compute handles.

use std::fmt;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use spin::RwLock;
use zel_core::prelude::*;
use zel_null_driver::NullDriver;
use zel_tracing::{LogTracer, TracingLayer};
use zel_validation::ValidationLayer;

use crate::config::LoaderConfig;
use crate::discovery;
use crate::module::DynamicDriver;

/// Name the in-process null driver is registered under
pub const NULL_DRIVER_NAME: &str = "null";

/// A driver module known to the loader
struct LoadedDriver {
    dispatch: Arc<DriverDispatch>,
    sysman_status: ZeResult,
    compute_status: ZeResult,
}

impl LoadedDriver {
    fn new(dispatch: Arc<DriverDispatch>) -> Self {
        Self {
            dispatch,
            sysman_status: ZeResult::SUCCESS,
            compute_status: ZeResult::SUCCESS,
        }
    }

    fn status(&self, category: Category) -> ZeResult {
        match category {
            Category::Sysman => self.sysman_status,
            Category::Compute | Category::Tools => self.compute_status,
        }
    }

    fn set_status(&mut self, category: Category, status: ZeResult) {
        match category {
            Category::Sysman => self.sysman_status = status,
            Category::Compute | Category::Tools => self.compute_status = status,
        }
    }
}

/// `pfnGet` of a driver group
type DriverGetFn<H> = unsafe extern "C" fn(*mut u32, *mut H) -> ZeResult;

/// Version of one loader component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentVersion {
    /// Component name
    pub name: &'static str,
    /// Newest API version the component implements
    pub spec_version: ApiVersion,
    /// Library version as major, minor, patch
    pub library_version: (i32, i32, i32),
}

/// Outcome of [`Loader::teardown`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Driver modules unloaded
    pub drivers: usize,
    /// Handle records dropped
    pub handles: usize,
    /// Sub-tables released
    pub sub_tables: usize,
    /// Tables still referenced elsewhere, released when the last user drops
    pub in_use: usize,
}

/// The loader
pub struct Loader {
    config: LoaderConfig,
    builder: TableBuilder,
    dispatcher: Dispatcher,
    drivers: RwLock<Vec<LoadedDriver>>,
    validation: Option<Arc<ValidationLayer>>,
    tracing: Arc<TracingLayer>,
    in_teardown: AtomicBool,
}

impl Loader {
    /// Create a loader with the configured layers and no drivers
    ///
    /// The tracing layer always exists so it can be switched on later; it is
    /// only part of the chain when configured or enabled.
    pub fn empty(config: LoaderConfig) -> Result<Self, LoaderError> {
        let dispatcher = Dispatcher::new();

        let tracing = Arc::new(TracingLayer::new());
        let tracer = tracing.register(Arc::new(LogTracer))?;
        tracing.set_enabled(tracer, true)?;
        tracing.set_active(config.tracing_layer);

        // Outermost first: tracing observes what validation rejects.
        if config.tracing_layer {
            dispatcher.push_layer(tracing.clone())?;
        }

        let validation = if config.validation_layer {
            let layer = Arc::new(ValidationLayer::with_config(config.validation));
            dispatcher.push_layer(layer.clone())?;
            Some(layer)
        } else {
            None
        };

        Ok(Self {
            config,
            builder: TableBuilder::new(),
            dispatcher,
            drivers: RwLock::new(Vec::new()),
            validation,
            tracing,
            in_teardown: AtomicBool::new(false),
        })
    }

    /// Create a loader and load every discovered driver
    ///
    /// Libraries that fail to open or build are logged and skipped.
    pub fn new(config: LoaderConfig) -> Result<Self, LoaderError> {
        let loader = Self::empty(config)?;

        for name in discovery::driver_names(&loader.config) {
            let module = match DynamicDriver::load(&name) {
                Ok(module) => module,
                Err(err) => {
                    log::debug!("{}: skipped ({})", name, err);
                    continue;
                },
            };
            if let Err(err) = loader.add_driver(&name, Arc::new(module)) {
                log::warn!("{}: skipped ({})", name, err);
            }
        }

        if loader.config.null_driver {
            loader.add_driver(NULL_DRIVER_NAME, Arc::new(NullDriver::<zel_null_driver::Standard>::new()))?;
        }

        if loader.driver_count() == 0 {
            log::warn!("no driver available");
            return Err(LoaderError::NoDrivers);
        }
        Ok(loader)
    }

    /// Create a loader over explicit in-process driver modules
    pub fn with_drivers<I>(config: LoaderConfig, drivers: I) -> Result<Self, LoaderError>
    where
        I: IntoIterator<Item = (&'static str, Arc<dyn ProcAddressSource>)>,
    {
        let loader = Self::empty(config)?;
        for (name, source) in drivers {
            loader.add_driver(name, source)?;
        }
        Ok(loader)
    }

    /// Build the tables of one more driver module
    pub fn add_driver(
        &self,
        name: &str,
        source: Arc<dyn ProcAddressSource>,
    ) -> Result<Arc<DriverDispatch>, LoaderError> {
        if self.builder.contains(name) {
            return Err(LoaderError::DuplicateDriver);
        }

        let dispatch = self.builder.build(name, source)?;
        self.drivers.write().push(LoadedDriver::new(dispatch.clone()));
        Ok(dispatch)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Settings the loader was created with
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// The dispatcher every export forwards through
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Typed compute entry points
    pub fn compute(&self) -> ComputeApi<'_> {
        ComputeApi::new(&self.dispatcher)
    }

    /// Typed sysman entry points
    pub fn sysman(&self) -> SysmanApi<'_> {
        SysmanApi::new(&self.dispatcher)
    }

    /// Typed tools entry points
    pub fn tools(&self) -> ToolsApi<'_> {
        ToolsApi::new(&self.dispatcher)
    }

    /// The validation layer, if installed
    pub fn validation(&self) -> Option<&Arc<ValidationLayer>> {
        self.validation.as_ref()
    }

    /// The tracing layer, if installed
    pub fn tracing(&self) -> Option<&Arc<TracingLayer>> {
        self.tracing_installed().then_some(&self.tracing)
    }

    fn tracing_installed(&self) -> bool {
        let layer: Arc<dyn Layer> = self.tracing.clone();
        self.dispatcher.contains_layer(&layer)
    }

    /// Number of loaded driver modules
    pub fn driver_count(&self) -> usize {
        self.drivers.read().len()
    }

    /// Tables of every driver, in load order
    pub fn drivers(&self) -> Vec<Arc<DriverDispatch>> {
        self.drivers.read().iter().map(|d| d.dispatch.clone()).collect()
    }

    /// Tables of the driver loaded as `name`
    pub fn driver(&self, name: &str) -> Result<Arc<DriverDispatch>, LoaderError> {
        self.drivers
            .read()
            .iter()
            .find(|d| d.dispatch.name() == name)
            .map(|d| d.dispatch.clone())
            .ok_or(LoaderError::DriverNotFound)
    }

    /// Last init status of `name` for `category`
    ///
    /// Tools shares the compute status.
    pub fn init_status(&self, name: &str, category: Category) -> Result<ZeResult, LoaderError> {
        self.drivers
            .read()
            .iter()
            .find(|d| d.dispatch.name() == name)
            .map(|d| d.status(category))
            .ok_or(LoaderError::DriverNotFound)
    }

    /// The single driver applications may call directly, if any
    ///
    /// Only when one driver is loaded, no layer is installed and interception
    /// is not forced.
    pub fn passthrough(&self) -> Option<Arc<DriverDispatch>> {
        if self.config.force_intercept || self.dispatcher.layer_count() != 0 {
            return None;
        }
        let drivers = self.drivers.read();
        match drivers.as_slice() {
            [only] => Some(only.dispatch.clone()),
            _ => None,
        }
    }

    // =========================================================================
    // Loader-level Entry Points
    // =========================================================================

    /// `zesInit`
    ///
    /// Initialises every driver whose last sysman status is success. Succeeds
    /// if at least one driver did.
    pub fn init(&self, flags: ZesInitFlags) -> ZeResult {
        self.init_category(Category::Sysman, |dispatch| {
            let pfn_init = dispatch.sysman().groups().global.as_deref().and_then(|g| g.pfn_init);
            match pfn_init {
                // SAFETY: `zesInit` takes its flags by value.
                Some(pfn_init) if dispatch.sysman().is_valid() => unsafe { pfn_init(flags) },
                _ => ZeResult::ERROR_UNINITIALIZED,
            }
        })
    }

    /// `zeInit`
    ///
    /// Same as [`init`](Self::init) for the compute category.
    pub fn init_compute(&self, flags: ZeInitFlags) -> ZeResult {
        self.init_category(Category::Compute, |dispatch| {
            let pfn_init = dispatch.compute().groups().global.as_deref().and_then(|g| g.pfn_init);
            match pfn_init {
                // SAFETY: `zeInit` takes its flags by value.
                Some(pfn_init) if dispatch.compute().is_valid() => unsafe { pfn_init(flags) },
                _ => ZeResult::ERROR_UNINITIALIZED,
            }
        })
    }

    fn init_category(&self, category: Category, init: impl Fn(&DriverDispatch) -> ZeResult) -> ZeResult {
        let pending: Vec<(usize, Arc<DriverDispatch>)> = self
            .drivers
            .read()
            .iter()
            .enumerate()
            .filter(|(_, d)| d.status(category).is_success())
            .map(|(index, d)| (index, d.dispatch.clone()))
            .collect();

        let statuses: Vec<(usize, ZeResult)> = pending
            .iter()
            .map(|(index, dispatch)| {
                let status = init(dispatch);
                if status.is_error() {
                    log::warn!("{}: {} init returned {}", dispatch.name(), category.name(), status);
                }
                (*index, status)
            })
            .collect();

        let mut drivers = self.drivers.write();
        for (index, status) in statuses {
            if let Some(driver) = drivers.get_mut(index) {
                driver.set_status(category, status);
            }
        }

        if drivers.iter().any(|d| d.status(category).is_success()) {
            ZeResult::SUCCESS
        } else {
            ZeResult::ERROR_UNINITIALIZED
        }
    }

    /// `zesDriverGet`
    ///
    /// Aggregates the driver handles of every initialised driver. With a
    /// null array or a zero count only the total is written.
    ///
    /// # Safety
    ///
    /// `p_count` must be null or writable; a non-null `ph_drivers` must have
    /// room for `*p_count` handles.
    pub unsafe fn driver_get(&self, p_count: *mut u32, ph_drivers: *mut ZesDriverHandle) -> ZeResult {
        // SAFETY: forwarded from the caller.
        unsafe {
            self.aggregate_drivers(Category::Sysman, p_count, ph_drivers, |dispatch| {
                dispatch.sysman().groups().driver.as_deref().and_then(|t| t.pfn_get)
            })
        }
    }

    /// `zeDriverGet`
    ///
    /// # Safety
    ///
    /// Same contract as [`driver_get`](Self::driver_get).
    pub unsafe fn compute_driver_get(&self, p_count: *mut u32, ph_drivers: *mut ZeDriverHandle) -> ZeResult {
        // SAFETY: forwarded from the caller.
        unsafe {
            self.aggregate_drivers(Category::Compute, p_count, ph_drivers, |dispatch| {
                dispatch.compute().groups().driver.as_deref().and_then(|t| t.pfn_get)
            })
        }
    }

    /// Concatenate the driver handles of every driver ready for `category`
    ///
    /// Stops once `*p_count` handles are accounted for, and at the first
    /// driver answering anything but success; that result is returned and
    /// the count is left untouched.
    unsafe fn aggregate_drivers<H: Handle>(
        &self,
        category: Category,
        p_count: *mut u32,
        ph_drivers: *mut H,
        get: impl Fn(&DriverDispatch) -> Option<DriverGetFn<H>>,
    ) -> ZeResult {
        if p_count.is_null() {
            return ZeResult::ERROR_INVALID_NULL_POINTER;
        }
        // SAFETY: checked non-null above; the caller guarantees validity.
        let requested = unsafe { p_count.read() };

        let ready: Vec<Arc<DriverDispatch>> = self
            .drivers
            .read()
            .iter()
            .filter(|d| d.status(category).is_success())
            .map(|d| d.dispatch.clone())
            .collect();
        if ready.is_empty() {
            return ZeResult::ERROR_UNINITIALIZED;
        }

        let fill = !ph_drivers.is_null() && requested != 0;
        let mut total = 0u32;
        let mut result = ZeResult::SUCCESS;

        for dispatch in &ready {
            if requested > 0 && total == requested {
                break;
            }
            let Some(pfn_get) = get(dispatch) else {
                continue;
            };

            let mut library_count = 0u32;
            // SAFETY: count query with a null array.
            result = unsafe { pfn_get(&mut library_count, ptr::null_mut()) };
            if !result.is_success() {
                break;
            }

            if fill {
                library_count = library_count.min(requested - total);
                // SAFETY: `total < requested`, within the caller's array.
                let slots = unsafe { ph_drivers.add(total as usize) };
                // SAFETY: `slots` has room for `library_count` handles.
                result = unsafe { pfn_get(&mut library_count, slots) };
                if !result.is_success() {
                    break;
                }
                for i in 0..library_count as usize {
                    // SAFETY: the driver filled `library_count` entries.
                    let handle = unsafe { slots.add(i).read() };
                    self.dispatcher.registry().adopt(handle.raw(), dispatch);
                }
            }

            total += library_count;
        }

        if result.is_success() {
            // SAFETY: checked non-null above.
            unsafe { p_count.write(total) };
        }
        result
    }

    /// `zelLoaderRegisterHandle`
    pub fn register_handle(&self, owner: RawHandle, object: RawHandle) -> Result<(), LoaderError> {
        self.dispatcher.register_handle(owner, object)
    }

    /// `zelEnableTracingLayer`
    ///
    /// Installs the tracing layer outermost if it is not in the chain yet.
    /// Applications calling a passthrough driver table directly are not
    /// traced.
    pub fn enable_tracing_layer(&self) -> Result<(), LoaderError> {
        self.dispatcher.insert_layer(0, self.tracing.clone())?;
        self.tracing.set_active(true);
        Ok(())
    }

    /// `zelDisableTracingLayer`
    pub fn disable_tracing_layer(&self) {
        self.tracing.set_active(false);
    }

    /// `zelGetTracingLayerState`
    pub fn tracing_layer_state(&self) -> bool {
        self.tracing.is_active() && self.tracing_installed()
    }

    /// `zelLoaderGetVersions`
    ///
    /// The loader first, then each installed layer.
    pub fn versions(&self) -> Vec<ComponentVersion> {
        let version = |name| ComponentVersion {
            name,
            spec_version: ApiVersion::CURRENT,
            library_version: library_version(),
        };

        let mut versions = vec![version("loader")];
        if self.validation.is_some() {
            versions.push(version("validation layer"));
        }
        if self.tracing_installed() {
            versions.push(version("tracing layer"));
        }
        versions
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Unload one driver, dropping its handles
    ///
    /// Nothing changes when the driver's tables or one of its handle records
    /// are referenced outside the loader.
    pub fn unload_driver(&self, name: &str) -> Result<usize, LoaderError> {
        let mut drivers = self.drivers.write();
        let index = drivers
            .iter()
            .position(|d| d.dispatch.name() == name)
            .ok_or(LoaderError::DriverNotFound)?;

        // The driver list and the builder each hold one reference.
        let others = 1 + usize::from(self.builder.contains(name));
        let Some(handles) = self.dispatcher.registry().purge_exclusive(&drivers[index].dispatch, others) else {
            log::warn!("{}: tables still in use", name);
            return Err(LoaderError::TableInUse);
        };

        let LoadedDriver { dispatch, .. } = drivers.remove(index);
        drop(self.builder.remove(name));
        drop(drivers);

        let released = release(dispatch)?;
        log::info!("{}: unloaded ({} handles, {} sub-tables)", name, handles, released);
        Ok(released)
    }

    /// Check if [`teardown`](Self::teardown) has started
    pub fn is_in_teardown(&self) -> bool {
        self.in_teardown.load(Ordering::Acquire)
    }

    /// Drop every handle, release every table and unload every module
    ///
    /// A table still referenced by an in-flight call is counted in
    /// [`TeardownReport::in_use`]; its memory is freed when that call ends.
    pub fn teardown(&self) -> TeardownReport {
        self.in_teardown.store(true, Ordering::Release);
        let mut report = TeardownReport {
            handles: self.dispatcher.registry().clear(),
            ..TeardownReport::default()
        };
        self.dispatcher.clear_layers();

        drop(self.builder.drain());
        let drivers = std::mem::take(&mut *self.drivers.write());

        for LoadedDriver { dispatch, .. } in drivers {
            report.drivers += 1;
            match release(dispatch) {
                Ok(released) => report.sub_tables += released,
                Err(_) => report.in_use += 1,
            }
        }

        log::info!(
            "loader torn down: {} drivers, {} handles, {} sub-tables",
            report.drivers,
            report.handles,
            report.sub_tables
        );
        report
    }
}

fn library_version() -> (i32, i32, i32) {
    (
        env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
        env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
        env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
    )
}

/// Release a driver's tables if this is the last reference
fn release(mut dispatch: Arc<DriverDispatch>) -> Result<usize, LoaderError> {
    match Arc::get_mut(&mut dispatch) {
        Some(tables) => Ok(tables.teardown()),
        None => {
            log::warn!("{}: tables still in use", dispatch.name());
            Err(LoaderError::TableInUse)
        },
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("drivers", &self.drivers().iter().map(|d| d.name().to_string()).collect::<Vec<_>>())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
