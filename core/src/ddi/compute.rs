//! # Compute Entry Points
//!
//! The lifecycle slice of the compute (`ze`) category: initialization, driver
//! and device enumeration, and the create/destroy pairs of the objects the
//! tools category operates on. Routing these through the loader is what makes
//! contexts, command lists, modules, kernels and events known to the handle
//! registry.

use crate::handle::*;
use crate::types::*;

#[macro_export]
macro_rules! ze_ddi_table {
    ($cb:ident) => {
        $cb! {
            @category Compute, ze, Ze, ComputeApi, ComputeGroups;
            group Global => global as global (optional) {
                global init: zeInit (1, 0) (flags: ZeInitFlags);
            }
            group Driver => driver as driver (optional) {
                global get: zeDriverGet (1, 0) (
                    #[count] p_count: *mut u32,
                    #[optional] ph_drivers: *mut ZeDriverHandle
                );
            }
            group Device => device as device (required) {
                route get: zeDeviceGet (1, 0) (
                    h_driver: ZeDriverHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_devices: *mut ZeDeviceHandle
                );
                route get_sub_devices: zeDeviceGetSubDevices (1, 0) (
                    h_device: ZeDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_sub_devices: *mut ZeDeviceHandle
                );
            }
            group Context => context as context (optional) {
                route create: zeContextCreate (1, 0) (
                    h_driver: ZeDriverHandle,
                    desc: *const ZeContextDesc,
                    ph_context: *mut ZeContextHandle
                );
                #[releases]
                route destroy: zeContextDestroy (1, 0) (h_context: ZeContextHandle);
            }
            group CommandList => command_list as command_list (optional) {
                route create: zeCommandListCreate (1, 0) (
                    h_context: ZeContextHandle,
                    h_device: ZeDeviceHandle,
                    desc: *const ZeCommandListDesc,
                    ph_command_list: *mut ZeCommandListHandle
                );
                route create_immediate: zeCommandListCreateImmediate (1, 0) (
                    h_context: ZeContextHandle,
                    h_device: ZeDeviceHandle,
                    altdesc: *const ZeCommandQueueDesc,
                    ph_command_list: *mut ZeCommandListHandle
                );
                #[releases]
                route destroy: zeCommandListDestroy (1, 0) (h_command_list: ZeCommandListHandle);
            }
            group Module => module as module (optional) {
                route create: zeModuleCreate (1, 0) (
                    h_context: ZeContextHandle,
                    h_device: ZeDeviceHandle,
                    desc: *const ZeModuleDesc,
                    ph_module: *mut ZeModuleHandle,
                    #[optional] ph_build_log: *mut ZeModuleBuildLogHandle
                );
                #[releases]
                route destroy: zeModuleDestroy (1, 0) (h_module: ZeModuleHandle);
            }
            group ModuleBuildLog => module_build_log as module_build_log (optional) {
                #[releases]
                route destroy: zeModuleBuildLogDestroy (1, 0) (h_module_build_log: ZeModuleBuildLogHandle);
            }
            group Kernel => kernel as kernel (optional) {
                route create: zeKernelCreate (1, 0) (
                    h_module: ZeModuleHandle,
                    desc: *const ZeKernelDesc,
                    ph_kernel: *mut ZeKernelHandle
                );
                #[releases]
                route destroy: zeKernelDestroy (1, 0) (h_kernel: ZeKernelHandle);
            }
            group EventPool => event_pool as event_pool (optional) {
                route create: zeEventPoolCreate (1, 0) (
                    h_context: ZeContextHandle,
                    desc: *const ZeEventPoolDesc,
                    num_devices: u32,
                    #[optional] #[input] ph_devices: *mut ZeDeviceHandle,
                    ph_event_pool: *mut ZeEventPoolHandle
                );
                #[releases]
                route destroy: zeEventPoolDestroy (1, 0) (h_event_pool: ZeEventPoolHandle);
            }
            group Event => event as event (optional) {
                route create: zeEventCreate (1, 0) (
                    h_event_pool: ZeEventPoolHandle,
                    desc: *const ZeEventDesc,
                    ph_event: *mut ZeEventHandle
                );
                #[releases]
                route destroy: zeEventDestroy (1, 0) (h_event: ZeEventHandle);
            }
        }
    };
}

ze_ddi_table!(ddi_category);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Category;
    use crate::table::GroupSet;

    #[test]
    fn test_group_layout() {
        assert_eq!(ComputeGroups::GROUPS.len(), 10);
        assert_eq!(ComputeGroups::GROUPS[0].symbol, "zeGetGlobalProcAddrTable");
        let required: alloc::vec::Vec<_> = ComputeGroups::GROUPS
            .iter()
            .filter(|g| g.required)
            .map(|g| g.name)
            .collect();
        assert_eq!(required, ["Device"]);
    }

    #[test]
    fn test_entry_points() {
        assert_eq!(COMPUTE_ENTRY_POINTS.len(), 18);
        assert!(COMPUTE_ENTRY_POINTS.iter().all(|e| e.category == Category::Compute));
        assert!(ENTRY_zeContextDestroy.releases);
        assert!(!ENTRY_zeContextCreate.releases);
    }

    #[test]
    fn test_build_log_is_an_optional_output() {
        let create = &ENTRY_zeModuleCreate;
        assert!(create.param("ph_build_log").is_some_and(|p| p.optional && !p.input));
        assert!(create.param("ph_module").is_some_and(|p| !p.optional));
        assert!(ENTRY_zeEventPoolCreate.param("ph_devices").is_some_and(|p| p.input));
    }

    #[test]
    fn test_handles_are_tagged_compute() {
        let create = &ENTRY_zeCommandListCreate;
        assert_eq!(create.params[0].handle, Some(Category::Compute));
        assert_eq!(create.params[1].handle, Some(Category::Compute));
        assert_eq!(create.params[2].handle, None);
    }
}
