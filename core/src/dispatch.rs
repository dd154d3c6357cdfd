//! # Dispatcher
//!
//! The forward contract shared by every routed entry point:
//!
//! 1. Resolve the table from the handle argument; an unknown handle or an
//!    invalid table fails with `ERROR_UNINITIALIZED`.
//! 2. Gate on the entry point's version; a lower negotiated version fails
//!    with `ERROR_UNSUPPORTED_VERSION`.
//! 3. Locate the owning sub-table; null fails with `ERROR_UNINITIALIZED`.
//! 4. Locate the function pointer; null fails with `ERROR_UNINITIALIZED`.
//! 5. Call it with the received arguments and return its result verbatim.
//!
//! After a successful call the dispatcher records handles the driver wrote to
//! output arrays and invalidates handles the entry point destroys.

use alloc::sync::Arc;

use arrayvec::ArrayVec;
use spin::RwLock;

use crate::entry::EntryPoint;
use crate::error::LoaderError;
use crate::handle::RawHandle;
use crate::layer::{Call, Layer, Next, MAX_LAYERS};
use crate::param::Arg;
use crate::registry::HandleRegistry;
use crate::result::ZeResult;
use crate::table::{CategoryTables, DriverDispatch};
use crate::version;

type LayerStack = ArrayVec<Arc<dyn Layer>, MAX_LAYERS>;

/// Routes calls through the layer chain to the owning driver
#[derive(Default)]
pub struct Dispatcher {
    registry: HandleRegistry,
    layers: RwLock<LayerStack>,
}

impl Dispatcher {
    /// Create a dispatcher with no layers and no handles
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle registry
    #[inline]
    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    // =========================================================================
    // Layers
    // =========================================================================

    /// Add an innermost layer
    pub fn push_layer(&self, layer: Arc<dyn Layer>) -> Result<(), LoaderError> {
        let name = layer.name();
        self.layers
            .write()
            .try_push(layer)
            .map_err(|_| LoaderError::LayerStackFull)?;
        log::info!("layer {} installed", name);
        Ok(())
    }

    /// Insert `layer` at `index`, clamped to the stack depth
    ///
    /// Returns `Ok(false)` when the same layer is already installed.
    pub fn insert_layer(&self, index: usize, layer: Arc<dyn Layer>) -> Result<bool, LoaderError> {
        let mut layers = self.layers.write();
        if layers.iter().any(|installed| Arc::ptr_eq(installed, &layer)) {
            return Ok(false);
        }
        let name = layer.name();
        let index = index.min(layers.len());
        layers
            .try_insert(index, layer)
            .map_err(|_| LoaderError::LayerStackFull)?;
        log::info!("layer {} installed at {}", name, index);
        Ok(true)
    }

    /// Check if `layer` is installed
    pub fn contains_layer(&self, layer: &Arc<dyn Layer>) -> bool {
        self.layers.read().iter().any(|installed| Arc::ptr_eq(installed, layer))
    }

    /// Remove every layer
    pub fn clear_layers(&self) -> usize {
        let mut layers = self.layers.write();
        let count = layers.len();
        layers.clear();
        count
    }

    /// Number of installed layers
    pub fn layer_count(&self) -> usize {
        self.layers.read().len()
    }

    /// Names of the installed layers, outermost first
    pub fn layer_names(&self) -> ArrayVec<&'static str, MAX_LAYERS> {
        self.layers.read().iter().map(|layer| layer.name()).collect()
    }

    // =========================================================================
    // Handles
    // =========================================================================

    /// Bind a handle created outside the routed surface to `owner`'s driver
    pub fn register_handle(&self, owner: RawHandle, object: RawHandle) -> Result<(), LoaderError> {
        if object.is_null() {
            return Err(LoaderError::UnknownHandle);
        }
        let record = self
            .registry
            .resolve(owner)
            .filter(|record| record.is_valid())
            .ok_or(LoaderError::UnknownHandle)?;
        self.registry.adopt(object, record.dispatch());
        Ok(())
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// Route one call through the layers and the forward contract
    ///
    /// `group` selects the sub-table, `function` the pointer inside it, and
    /// `call` performs the driver call with the caller's arguments.
    pub fn invoke<G, S, F>(
        &self,
        entry: &'static EntryPoint,
        handle: RawHandle,
        args: &[Arg],
        group: impl Fn(&G) -> Option<&S>,
        function: impl Fn(&S) -> Option<F>,
        call: impl Fn(F) -> ZeResult,
    ) -> ZeResult
    where
        G: CategoryTables,
        F: Copy,
    {
        let layers = self.layers.read();
        if layers.is_empty() {
            drop(layers);
            return self.forward(entry, handle, args, group, function, call);
        }

        let snapshot = layers.clone();
        drop(layers);

        let terminal = || self.forward(entry, handle, args, &group, &function, &call);
        let request = Call::new(entry, args, &self.registry);
        Next::new(&snapshot, &terminal).run(&request)
    }

    /// Apply the forward contract without consulting layers
    pub fn forward<G, S, F>(
        &self,
        entry: &'static EntryPoint,
        handle: RawHandle,
        args: &[Arg],
        group: impl Fn(&G) -> Option<&S>,
        function: impl Fn(&S) -> Option<F>,
        call: impl Fn(F) -> ZeResult,
    ) -> ZeResult
    where
        G: CategoryTables,
        F: Copy,
    {
        let record = match self.registry.resolve(handle) {
            Some(record) if record.is_valid() => record,
            _ => {
                log::trace!("{}: unknown handle {}", entry, handle);
                return ZeResult::ERROR_UNINITIALIZED;
            },
        };

        let table = G::select(record.dispatch());
        if !table.is_valid() {
            log::trace!("{}: {} table not valid", entry, entry.category);
            return ZeResult::ERROR_UNINITIALIZED;
        }

        if !version::supports(table.version(), entry.version) {
            log::trace!("{}: requires {}, table at {}", entry, entry.version, table.version());
            return ZeResult::ERROR_UNSUPPORTED_VERSION;
        }

        let Some(sub_table) = group(table.groups()) else {
            log::trace!("{}: group {} absent", entry, entry.group);
            return ZeResult::ERROR_UNINITIALIZED;
        };

        let Some(pfn) = function(sub_table) else {
            log::trace!("{}: not implemented", entry);
            return ZeResult::ERROR_UNINITIALIZED;
        };

        let result = call(pfn);

        if result.is_success() {
            if entry.releases {
                self.registry.release(handle);
            }
            self.adopt_outputs(entry, args, record.dispatch());
        }

        result
    }

    /// Register every handle a driver wrote to an output array
    fn adopt_outputs(&self, entry: &EntryPoint, args: &[Arg], owner: &Arc<DriverDispatch>) {
        for (index, (arg, spec)) in args.iter().zip(entry.params).enumerate() {
            let Arg::HandleOut(address) = *arg else {
                continue;
            };
            if address == 0 || spec.input {
                continue;
            }

            let count = match entry.count_for(index).and_then(|c| args.get(c)) {
                Some(Arg::Pointer(count_address)) if *count_address != 0 => {
                    // SAFETY: count parameters are `uint32_t*` the caller owns.
                    unsafe { core::ptr::read_unaligned(*count_address as *const u32) as usize }
                },
                Some(_) => 0,
                None => 1,
            };

            for slot in 0..count {
                // SAFETY: after success the driver has filled `count` entries
                // of the caller's array.
                let raw = unsafe { core::ptr::read_unaligned((address as *const RawHandle).add(slot)) };
                self.registry.adopt(raw, owner);
            }
        }
    }
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handles", &self.registry.len())
            .field("layers", &self.layer_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddi::sysman::{ZesDeviceDdiTable, ENTRY_zesDeviceEnumFans, ENTRY_zesDeviceGetProperties};
    use crate::ddi::SysmanGroups;
    use crate::handle::{Handle, ZesDeviceHandle, ZesFanHandle};
    use crate::param::DdiParam;
    use crate::table::DispatchTable;
    use crate::testing::sysman_dispatch;
    use crate::types::ZesDeviceProperties;
    use crate::version::ApiVersion;
    use alloc::boxed::Box;
    use core::ptr;

    type GetPropertiesFn = unsafe extern "C" fn(ZesDeviceHandle, *mut ZesDeviceProperties) -> ZeResult;
    type EnumFansFn = unsafe extern "C" fn(ZesDeviceHandle, *mut u32, *mut ZesFanHandle) -> ZeResult;

    unsafe extern "C" fn get_properties(_: ZesDeviceHandle, _: *mut ZesDeviceProperties) -> ZeResult {
        ZeResult::SUCCESS
    }

    unsafe extern "C" fn enum_fans(_: ZesDeviceHandle, count: *mut u32, fans: *mut ZesFanHandle) -> ZeResult {
        // SAFETY: the caller passes valid storage.
        unsafe {
            if fans.is_null() {
                *count = 2;
            } else {
                for i in 0..(*count).min(2) as usize {
                    *fans.add(i) = ZesFanHandle::from_raw(RawHandle::new(0xf00 + i));
                }
            }
        }
        ZeResult::SUCCESS
    }

    fn device_table() -> DispatchTable<SysmanGroups> {
        let device = ZesDeviceDdiTable {
            pfn_get_properties: Some(get_properties),
            pfn_enum_fans: Some(enum_fans),
            ..ZesDeviceDdiTable::default()
        };
        DispatchTable::new(
            ApiVersion::V1_0,
            SysmanGroups {
                device: Some(Box::new(device)),
                ..SysmanGroups::default()
            },
        )
    }

    fn get_properties_via(dispatcher: &Dispatcher, device: ZesDeviceHandle) -> ZeResult {
        let props: *mut ZesDeviceProperties = ptr::null_mut();
        let args = [device.to_arg(), props.to_arg()];
        dispatcher.invoke::<SysmanGroups, ZesDeviceDdiTable, GetPropertiesFn>(
            &ENTRY_zesDeviceGetProperties,
            device.raw(),
            &args,
            |groups| groups.device.as_deref(),
            |table| table.pfn_get_properties,
            // SAFETY: test stub ignores its arguments.
            |pfn| unsafe { pfn(device, props) },
        )
    }

    #[test]
    fn test_unknown_handle_is_uninitialized() {
        let dispatcher = Dispatcher::new();
        let device = ZesDeviceHandle::from_raw(RawHandle::new(0x1234));
        assert_eq!(get_properties_via(&dispatcher, device), ZeResult::ERROR_UNINITIALIZED);
        assert_eq!(get_properties_via(&dispatcher, ZesDeviceHandle::NULL), ZeResult::ERROR_UNINITIALIZED);
    }

    #[test]
    fn test_forward_reaches_driver() {
        let dispatcher = Dispatcher::new();
        let driver = sysman_dispatch("stub", device_table());
        let device = ZesDeviceHandle::from_raw(RawHandle::new(0x1000));
        dispatcher.registry().adopt(device.raw(), &driver);

        assert_eq!(get_properties_via(&dispatcher, device), ZeResult::SUCCESS);
    }

    #[test]
    fn test_outputs_are_adopted() {
        let dispatcher = Dispatcher::new();
        let driver = sysman_dispatch("stub", device_table());
        let device = ZesDeviceHandle::from_raw(RawHandle::new(0x1000));
        dispatcher.registry().adopt(device.raw(), &driver);

        let mut count = 2u32;
        let mut fans = [ZesFanHandle::NULL; 2];
        let (p_count, ph_fans) = (&mut count as *mut u32, fans.as_mut_ptr());
        let args = [device.to_arg(), p_count.to_arg(), ph_fans.to_arg()];
        let result = dispatcher.invoke::<SysmanGroups, ZesDeviceDdiTable, EnumFansFn>(
            &ENTRY_zesDeviceEnumFans,
            device.raw(),
            &args,
            |groups| groups.device.as_deref(),
            |table| table.pfn_enum_fans,
            // SAFETY: pointers reference live locals.
            |pfn| unsafe { pfn(device, p_count, ph_fans) },
        );

        assert_eq!(result, ZeResult::SUCCESS);
        assert!(dispatcher.registry().is_live(RawHandle::new(0xf00)));
        assert!(dispatcher.registry().is_live(RawHandle::new(0xf01)));
        assert_eq!(dispatcher.registry().len(), 3);
    }

    #[test]
    fn test_register_foreign_handle() {
        let dispatcher = Dispatcher::new();
        let driver = sysman_dispatch("stub", device_table());
        let owner = RawHandle::new(0x1000);
        dispatcher.registry().adopt(owner, &driver);

        assert!(dispatcher.register_handle(owner, RawHandle::new(0x2000)).is_ok());
        assert!(dispatcher.registry().is_live(RawHandle::new(0x2000)));
        assert_eq!(
            dispatcher.register_handle(RawHandle::new(0x9999), RawHandle::new(0x3000)),
            Err(LoaderError::UnknownHandle)
        );
    }

    #[test]
    fn test_layer_stack_is_bounded() {
        struct Pass;
        impl Layer for Pass {
            fn name(&self) -> &'static str {
                "pass"
            }
        }

        let dispatcher = Dispatcher::new();
        for _ in 0..MAX_LAYERS {
            assert!(dispatcher.push_layer(Arc::new(Pass)).is_ok());
        }
        assert_eq!(dispatcher.push_layer(Arc::new(Pass)), Err(LoaderError::LayerStackFull));
        assert_eq!(dispatcher.clear_layers(), MAX_LAYERS);
    }

    #[test]
    fn test_insert_layer_once() {
        struct Named(&'static str);
        impl Layer for Named {
            fn name(&self) -> &'static str {
                self.0
            }
        }

        let dispatcher = Dispatcher::new();
        dispatcher.push_layer(Arc::new(Named("validation"))).expect("push");
        let tracing: Arc<dyn Layer> = Arc::new(Named("tracing"));
        assert!(!dispatcher.contains_layer(&tracing));

        assert_eq!(dispatcher.insert_layer(0, tracing.clone()), Ok(true));
        assert_eq!(dispatcher.insert_layer(0, tracing.clone()), Ok(false));
        assert!(dispatcher.contains_layer(&tracing));
        assert_eq!(dispatcher.layer_names().as_slice(), ["tracing", "validation"]);

        let last: Arc<dyn Layer> = Arc::new(Named("last"));
        assert_eq!(dispatcher.insert_layer(usize::MAX, last), Ok(true));
        assert_eq!(dispatcher.layer_names().as_slice(), ["tracing", "validation", "last"]);
    }
}
