//! # Sysman Entry Points
//!
//! System management (`zes`) entry points, one row per function pointer in
//! table order. Entries newer than a group's original layout sit at the end
//! of the group in version order, which keeps older drivers' tables
//! layout-compatible.

use crate::handle::*;
use crate::types::*;

#[macro_export]
macro_rules! zes_ddi_table {
    ($cb:ident) => {
        $cb! {
            @category Sysman, zes, Zes, SysmanApi, SysmanGroups;
            group Global => global as global (optional) {
                global init: zesInit (1, 0) (flags: ZesInitFlags);
            }
            group Device => device as device (required) {
                route get_properties: zesDeviceGetProperties (1, 0) (
                    h_device: ZesDeviceHandle,
                    p_properties: *mut ZesDeviceProperties
                );
                route get_state: zesDeviceGetState (1, 0) (
                    h_device: ZesDeviceHandle,
                    p_state: *mut ZesDeviceState
                );
                route reset: zesDeviceReset (1, 0) (h_device: ZesDeviceHandle, force: ZeBool);
                route processes_get_state: zesDeviceProcessesGetState (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_processes: *mut ZesProcessState
                );
                route pci_get_properties: zesDevicePciGetProperties (1, 0) (
                    h_device: ZesDeviceHandle,
                    p_properties: *mut ZesPciProperties
                );
                route pci_get_state: zesDevicePciGetState (1, 0) (
                    h_device: ZesDeviceHandle,
                    p_state: *mut ZesPciState
                );
                route pci_get_bars: zesDevicePciGetBars (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_properties: *mut ZesPciBarProperties
                );
                route pci_get_stats: zesDevicePciGetStats (1, 0) (
                    h_device: ZesDeviceHandle,
                    p_stats: *mut ZesPciStats
                );
                route enum_diagnostic_test_suites: zesDeviceEnumDiagnosticTestSuites (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_diagnostics: *mut ZesDiagHandle
                );
                route enum_engine_groups: zesDeviceEnumEngineGroups (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_engine: *mut ZesEngineHandle
                );
                route event_register: zesDeviceEventRegister (1, 0) (
                    h_device: ZesDeviceHandle,
                    events: ZesEventTypeFlags
                );
                route enum_fabric_ports: zesDeviceEnumFabricPorts (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_port: *mut ZesFabricPortHandle
                );
                route enum_fans: zesDeviceEnumFans (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_fan: *mut ZesFanHandle
                );
                route enum_firmwares: zesDeviceEnumFirmwares (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_firmware: *mut ZesFirmwareHandle
                );
                route enum_frequency_domains: zesDeviceEnumFrequencyDomains (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_frequency: *mut ZesFreqHandle
                );
                route enum_leds: zesDeviceEnumLeds (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_led: *mut ZesLedHandle
                );
                route enum_memory_modules: zesDeviceEnumMemoryModules (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_memory: *mut ZesMemHandle
                );
                route enum_performance_factor_domains: zesDeviceEnumPerformanceFactorDomains (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_perf: *mut ZesPerfHandle
                );
                route enum_power_domains: zesDeviceEnumPowerDomains (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_power: *mut ZesPwrHandle
                );
                route get_card_power_domain: zesDeviceGetCardPowerDomain (1, 0) (
                    h_device: ZesDeviceHandle,
                    ph_power: *mut ZesPwrHandle
                );
                route enum_psus: zesDeviceEnumPsus (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_psu: *mut ZesPsuHandle
                );
                route enum_ras_error_sets: zesDeviceEnumRasErrorSets (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_ras: *mut ZesRasHandle
                );
                route enum_schedulers: zesDeviceEnumSchedulers (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_scheduler: *mut ZesSchedHandle
                );
                route enum_standby_domains: zesDeviceEnumStandbyDomains (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_standby: *mut ZesStandbyHandle
                );
                route enum_temperature_sensors: zesDeviceEnumTemperatureSensors (1, 0) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_temperature: *mut ZesTempHandle
                );
                route ecc_available: zesDeviceEccAvailable (1, 4) (
                    h_device: ZesDeviceHandle,
                    p_available: *mut ZeBool
                );
                route ecc_configurable: zesDeviceEccConfigurable (1, 4) (
                    h_device: ZesDeviceHandle,
                    p_configurable: *mut ZeBool
                );
                route get_ecc_state: zesDeviceGetEccState (1, 4) (
                    h_device: ZesDeviceHandle,
                    p_state: *mut ZesDeviceEccProperties
                );
                route set_ecc_state: zesDeviceSetEccState (1, 4) (
                    h_device: ZesDeviceHandle,
                    new_state: *const ZesDeviceEccDesc,
                    p_state: *mut ZesDeviceEccProperties
                );
                route get: zesDeviceGet (1, 0) (
                    h_driver: ZesDriverHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_devices: *mut ZesDeviceHandle
                );
                route set_overclock_waiver: zesDeviceSetOverclockWaiver (1, 5) (h_device: ZesDeviceHandle);
                route get_overclock_domains: zesDeviceGetOverclockDomains (1, 5) (
                    h_device: ZesDeviceHandle,
                    p_overclock_domains: *mut u32
                );
                route get_overclock_controls: zesDeviceGetOverclockControls (1, 5) (
                    h_device: ZesDeviceHandle,
                    domain_type: ZesOverclockDomain,
                    p_available_controls: *mut u32
                );
                route reset_overclock_settings: zesDeviceResetOverclockSettings (1, 5) (
                    h_device: ZesDeviceHandle,
                    on_shipped_state: ZeBool
                );
                route read_overclock_state: zesDeviceReadOverclockState (1, 5) (
                    h_device: ZesDeviceHandle,
                    p_overclock_mode: *mut ZesOverclockMode,
                    p_waiver_setting: *mut ZeBool,
                    p_overclock_state: *mut ZeBool,
                    p_pending_action: *mut ZesPendingAction,
                    p_pending_reset: *mut ZeBool
                );
                route enum_overclock_domains: zesDeviceEnumOverclockDomains (1, 5) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_domain_handle: *mut ZesOverclockHandle
                );
                route reset_ext: zesDeviceResetExt (1, 7) (
                    h_device: ZesDeviceHandle,
                    p_properties: *mut ZesResetProperties
                );
            }
            group Driver => driver as driver (optional) {
                route event_listen: zesDriverEventListen (1, 0) (
                    h_driver: ZeDriverHandle,
                    timeout: u32,
                    count: u32,
                    #[input] ph_devices: *mut ZesDeviceHandle,
                    p_num_device_events: *mut u32,
                    p_events: *mut ZesEventTypeFlags
                );
                route event_listen_ex: zesDriverEventListenEx (1, 1) (
                    h_driver: ZeDriverHandle,
                    timeout: u64,
                    count: u32,
                    #[input] ph_devices: *mut ZesDeviceHandle,
                    p_num_device_events: *mut u32,
                    p_events: *mut ZesEventTypeFlags
                );
                global get: zesDriverGet (1, 0) (
                    #[count] p_count: *mut u32,
                    #[optional] ph_drivers: *mut ZesDriverHandle
                );
                route get_extension_properties: zesDriverGetExtensionProperties (1, 8) (
                    h_driver: ZesDriverHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_extension_properties: *mut ZesDriverExtensionProperties
                );
                route get_extension_function_address: zesDriverGetExtensionFunctionAddress (1, 8) (
                    h_driver: ZesDriverHandle,
                    name: *const c_char,
                    pp_function_address: *mut *mut c_void
                );
            }
            group Diagnostics => diagnostics as diagnostics (optional) {
                route get_properties: zesDiagnosticsGetProperties (1, 0) (
                    h_diagnostics: ZesDiagHandle,
                    p_properties: *mut ZesDiagProperties
                );
                route get_tests: zesDiagnosticsGetTests (1, 0) (
                    h_diagnostics: ZesDiagHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_tests: *mut ZesDiagTest
                );
                route run_tests: zesDiagnosticsRunTests (1, 0) (
                    h_diagnostics: ZesDiagHandle,
                    start_index: u32,
                    end_index: u32,
                    p_result: *mut ZesDiagResult
                );
            }
            group Engine => engine as engine (optional) {
                route get_properties: zesEngineGetProperties (1, 0) (
                    h_engine: ZesEngineHandle,
                    p_properties: *mut ZesEngineProperties
                );
                route get_activity: zesEngineGetActivity (1, 7) (
                    h_engine: ZesEngineHandle,
                    p_stats: *mut ZesEngineStats
                );
                route get_activity_ext: zesEngineGetActivityExt (1, 7) (
                    h_engine: ZesEngineHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_stats: *mut ZesEngineStats
                );
            }
            group FabricPort => fabric_port as fabric_port (optional) {
                route get_properties: zesFabricPortGetProperties (1, 0) (
                    h_port: ZesFabricPortHandle,
                    p_properties: *mut ZesFabricPortProperties
                );
                route get_link_type: zesFabricPortGetLinkType (1, 0) (
                    h_port: ZesFabricPortHandle,
                    p_link_type: *mut ZesFabricLinkType
                );
                route get_config: zesFabricPortGetConfig (1, 0) (
                    h_port: ZesFabricPortHandle,
                    p_config: *mut ZesFabricPortConfig
                );
                route set_config: zesFabricPortSetConfig (1, 0) (
                    h_port: ZesFabricPortHandle,
                    p_config: *const ZesFabricPortConfig
                );
                route get_state: zesFabricPortGetState (1, 0) (
                    h_port: ZesFabricPortHandle,
                    p_state: *mut ZesFabricPortState
                );
                route get_throughput: zesFabricPortGetThroughput (1, 0) (
                    h_port: ZesFabricPortHandle,
                    p_throughput: *mut ZesFabricPortThroughput
                );
                route get_fabric_error_counters: zesFabricPortGetFabricErrorCounters (1, 7) (
                    h_port: ZesFabricPortHandle,
                    p_errors: *mut ZesFabricPortErrorCounters
                );
                route get_multi_port_throughput: zesFabricPortGetMultiPortThroughput (1, 7) (
                    h_device: ZesDeviceHandle,
                    num_ports: u32,
                    #[input] ph_port: *mut ZesFabricPortHandle,
                    p_throughput: *mut *mut ZesFabricPortThroughput
                );
            }
            group Fan => fan as fan (optional) {
                route get_properties: zesFanGetProperties (1, 0) (
                    h_fan: ZesFanHandle,
                    p_properties: *mut ZesFanProperties
                );
                route get_config: zesFanGetConfig (1, 0) (h_fan: ZesFanHandle, p_config: *mut ZesFanConfig);
                route set_default_mode: zesFanSetDefaultMode (1, 0) (h_fan: ZesFanHandle);
                route set_fixed_speed_mode: zesFanSetFixedSpeedMode (1, 0) (
                    h_fan: ZesFanHandle,
                    speed: *const ZesFanSpeed
                );
                route set_speed_table_mode: zesFanSetSpeedTableMode (1, 0) (
                    h_fan: ZesFanHandle,
                    speed_table: *const ZesFanSpeedTable
                );
                route get_state: zesFanGetState (1, 0) (
                    h_fan: ZesFanHandle,
                    units: ZesFanSpeedUnits,
                    p_speed: *mut i32
                );
            }
            group Firmware => firmware as firmware (optional) {
                route get_properties: zesFirmwareGetProperties (1, 0) (
                    h_firmware: ZesFirmwareHandle,
                    p_properties: *mut ZesFirmwareProperties
                );
                route flash: zesFirmwareFlash (1, 0) (
                    h_firmware: ZesFirmwareHandle,
                    p_image: *mut c_void,
                    size: u32
                );
                route get_flash_progress: zesFirmwareGetFlashProgress (1, 8) (
                    h_firmware: ZesFirmwareHandle,
                    p_completion_percent: *mut u32
                );
                route get_console_logs: zesFirmwareGetConsoleLogs (1, 9) (
                    h_firmware: ZesFirmwareHandle,
                    p_size: *mut usize,
                    #[optional] p_firmware_log: *mut c_char
                );
            }
            group Frequency => frequency as frequency (optional) {
                route get_properties: zesFrequencyGetProperties (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_properties: *mut ZesFreqProperties
                );
                route get_available_clocks: zesFrequencyGetAvailableClocks (1, 0) (
                    h_frequency: ZesFreqHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_frequency: *mut f64
                );
                route get_range: zesFrequencyGetRange (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_limits: *mut ZesFreqRange
                );
                route set_range: zesFrequencySetRange (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_limits: *const ZesFreqRange
                );
                route get_state: zesFrequencyGetState (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_state: *mut ZesFreqState
                );
                route get_throttle_time: zesFrequencyGetThrottleTime (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_throttle_time: *mut ZesFreqThrottleTime
                );
                route oc_get_capabilities: zesFrequencyOcGetCapabilities (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_oc_capabilities: *mut ZesOcCapabilities
                );
                route oc_get_frequency_target: zesFrequencyOcGetFrequencyTarget (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_current_oc_frequency: *mut f64
                );
                route oc_set_frequency_target: zesFrequencyOcSetFrequencyTarget (1, 0) (
                    h_frequency: ZesFreqHandle,
                    current_oc_frequency: f64
                );
                route oc_get_voltage_target: zesFrequencyOcGetVoltageTarget (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_current_voltage_target: *mut f64,
                    p_current_voltage_offset: *mut f64
                );
                route oc_set_voltage_target: zesFrequencyOcSetVoltageTarget (1, 0) (
                    h_frequency: ZesFreqHandle,
                    current_voltage_target: f64,
                    current_voltage_offset: f64
                );
                route oc_set_mode: zesFrequencyOcSetMode (1, 0) (
                    h_frequency: ZesFreqHandle,
                    current_oc_mode: ZesOcMode
                );
                route oc_get_mode: zesFrequencyOcGetMode (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_current_oc_mode: *mut ZesOcMode
                );
                route oc_get_icc_max: zesFrequencyOcGetIccMax (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_oc_icc_max: *mut f64
                );
                route oc_set_icc_max: zesFrequencyOcSetIccMax (1, 0) (
                    h_frequency: ZesFreqHandle,
                    oc_icc_max: f64
                );
                route oc_get_tj_max: zesFrequencyOcGetTjMax (1, 0) (
                    h_frequency: ZesFreqHandle,
                    p_oc_tj_max: *mut f64
                );
                route oc_set_tj_max: zesFrequencyOcSetTjMax (1, 0) (
                    h_frequency: ZesFreqHandle,
                    oc_tj_max: f64
                );
            }
            group Led => led as led (optional) {
                route get_properties: zesLedGetProperties (1, 0) (
                    h_led: ZesLedHandle,
                    p_properties: *mut ZesLedProperties
                );
                route get_state: zesLedGetState (1, 0) (h_led: ZesLedHandle, p_state: *mut ZesLedState);
                route set_state: zesLedSetState (1, 0) (h_led: ZesLedHandle, enable: ZeBool);
                route set_color: zesLedSetColor (1, 0) (h_led: ZesLedHandle, p_color: *const ZesLedColor);
            }
            group Memory => memory as memory (optional) {
                route get_properties: zesMemoryGetProperties (1, 0) (
                    h_memory: ZesMemHandle,
                    p_properties: *mut ZesMemProperties
                );
                route get_state: zesMemoryGetState (1, 0) (h_memory: ZesMemHandle, p_state: *mut ZesMemState);
                route get_bandwidth: zesMemoryGetBandwidth (1, 0) (
                    h_memory: ZesMemHandle,
                    p_bandwidth: *mut ZesMemBandwidth
                );
            }
            group Overclock => overclock as overclock (optional) {
                route get_domain_properties: zesOverclockGetDomainProperties (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    p_domain_properties: *mut ZesOverclockProperties
                );
                route get_domain_vf_properties: zesOverclockGetDomainVFProperties (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    p_vf_properties: *mut ZesVfProperty
                );
                route get_domain_control_properties: zesOverclockGetDomainControlProperties (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    domain_control: ZesOverclockControl,
                    p_control_properties: *mut ZesControlProperty
                );
                route get_control_current_value: zesOverclockGetControlCurrentValue (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    domain_control: ZesOverclockControl,
                    p_value: *mut f64
                );
                route get_control_pending_value: zesOverclockGetControlPendingValue (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    domain_control: ZesOverclockControl,
                    p_value: *mut f64
                );
                route set_control_user_value: zesOverclockSetControlUserValue (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    domain_control: ZesOverclockControl,
                    p_value: f64,
                    p_pending_action: *mut ZesPendingAction
                );
                route get_control_state: zesOverclockGetControlState (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    domain_control: ZesOverclockControl,
                    p_control_state: *mut ZesControlState,
                    p_pending_action: *mut ZesPendingAction
                );
                route get_vf_point_values: zesOverclockGetVFPointValues (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    vf_type: ZesVfType,
                    vf_array_type: ZesVfArrayType,
                    point_index: u32,
                    point_value: *mut u32
                );
                route set_vf_point_values: zesOverclockSetVFPointValues (1, 5) (
                    h_domain_handle: ZesOverclockHandle,
                    vf_type: ZesVfType,
                    point_index: u32,
                    point_value: u32
                );
            }
            group PerformanceFactor => performance_factor as performance_factor (optional) {
                route get_properties: zesPerformanceFactorGetProperties (1, 0) (
                    h_perf: ZesPerfHandle,
                    p_properties: *mut ZesPerfProperties
                );
                route get_config: zesPerformanceFactorGetConfig (1, 0) (
                    h_perf: ZesPerfHandle,
                    p_factor: *mut f64
                );
                route set_config: zesPerformanceFactorSetConfig (1, 0) (h_perf: ZesPerfHandle, factor: f64);
            }
            group Power => power as power (optional) {
                route get_properties: zesPowerGetProperties (1, 0) (
                    h_power: ZesPwrHandle,
                    p_properties: *mut ZesPowerProperties
                );
                route get_energy_counter: zesPowerGetEnergyCounter (1, 0) (
                    h_power: ZesPwrHandle,
                    p_energy: *mut ZesPowerEnergyCounter
                );
                route get_limits: zesPowerGetLimits (1, 0) (
                    h_power: ZesPwrHandle,
                    #[optional] p_sustained: *mut ZesPowerSustainedLimit,
                    #[optional] p_burst: *mut ZesPowerBurstLimit,
                    #[optional] p_peak: *mut ZesPowerPeakLimit
                );
                route set_limits: zesPowerSetLimits (1, 0) (
                    h_power: ZesPwrHandle,
                    #[optional] p_sustained: *const ZesPowerSustainedLimit,
                    #[optional] p_burst: *const ZesPowerBurstLimit,
                    #[optional] p_peak: *const ZesPowerPeakLimit
                );
                route get_energy_threshold: zesPowerGetEnergyThreshold (1, 0) (
                    h_power: ZesPwrHandle,
                    p_threshold: *mut ZesEnergyThreshold
                );
                route set_energy_threshold: zesPowerSetEnergyThreshold (1, 0) (
                    h_power: ZesPwrHandle,
                    threshold: f64
                );
                route get_limits_ext: zesPowerGetLimitsExt (1, 0) (
                    h_power: ZesPwrHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_sustained: *mut ZesPowerLimitExtDesc
                );
                route set_limits_ext: zesPowerSetLimitsExt (1, 0) (
                    h_power: ZesPwrHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_sustained: *mut ZesPowerLimitExtDesc
                );
            }
            group Psu => psu as psu (optional) {
                route get_properties: zesPsuGetProperties (1, 0) (
                    h_psu: ZesPsuHandle,
                    p_properties: *mut ZesPsuProperties
                );
                route get_state: zesPsuGetState (1, 0) (h_psu: ZesPsuHandle, p_state: *mut ZesPsuState);
            }
            group Ras => ras as ras (optional) {
                route get_properties: zesRasGetProperties (1, 0) (
                    h_ras: ZesRasHandle,
                    p_properties: *mut ZesRasProperties
                );
                route get_config: zesRasGetConfig (1, 0) (h_ras: ZesRasHandle, p_config: *mut ZesRasConfig);
                route set_config: zesRasSetConfig (1, 0) (h_ras: ZesRasHandle, p_config: *const ZesRasConfig);
                route get_state: zesRasGetState (1, 0) (
                    h_ras: ZesRasHandle,
                    clear: ZeBool,
                    p_state: *mut ZesRasState
                );
            }
            group RasExp => ras_exp as ras (optional) {
                route get_state_exp: zesRasGetStateExp (1, 0) (
                    h_ras: ZesRasHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_state: *mut ZesRasStateExp
                );
                route clear_state_exp: zesRasClearStateExp (1, 0) (
                    h_ras: ZesRasHandle,
                    category: ZesRasErrorCategoryExp
                );
            }
            group Scheduler => scheduler as scheduler (optional) {
                route get_properties: zesSchedulerGetProperties (1, 0) (
                    h_scheduler: ZesSchedHandle,
                    p_properties: *mut ZesSchedProperties
                );
                route get_current_mode: zesSchedulerGetCurrentMode (1, 0) (
                    h_scheduler: ZesSchedHandle,
                    p_mode: *mut ZesSchedMode
                );
                route get_timeout_mode_properties: zesSchedulerGetTimeoutModeProperties (1, 0) (
                    h_scheduler: ZesSchedHandle,
                    get_defaults: ZeBool,
                    p_config: *mut ZesSchedTimeoutProperties
                );
                route get_timeslice_mode_properties: zesSchedulerGetTimesliceModeProperties (1, 0) (
                    h_scheduler: ZesSchedHandle,
                    get_defaults: ZeBool,
                    p_config: *mut ZesSchedTimesliceProperties
                );
                route set_timeout_mode: zesSchedulerSetTimeoutMode (1, 0) (
                    h_scheduler: ZesSchedHandle,
                    p_properties: *mut ZesSchedTimeoutProperties,
                    p_need_reload: *mut ZeBool
                );
                route set_timeslice_mode: zesSchedulerSetTimesliceMode (1, 0) (
                    h_scheduler: ZesSchedHandle,
                    p_properties: *mut ZesSchedTimesliceProperties,
                    p_need_reload: *mut ZeBool
                );
                route set_exclusive_mode: zesSchedulerSetExclusiveMode (1, 0) (
                    h_scheduler: ZesSchedHandle,
                    p_need_reload: *mut ZeBool
                );
                route set_compute_unit_debug_mode: zesSchedulerSetComputeUnitDebugMode (1, 0) (
                    h_scheduler: ZesSchedHandle,
                    p_need_reload: *mut ZeBool
                );
            }
            group Standby => standby as standby (optional) {
                route get_properties: zesStandbyGetProperties (1, 0) (
                    h_standby: ZesStandbyHandle,
                    p_properties: *mut ZesStandbyProperties
                );
                route get_mode: zesStandbyGetMode (1, 0) (
                    h_standby: ZesStandbyHandle,
                    p_mode: *mut ZesStandbyPromoMode
                );
                route set_mode: zesStandbySetMode (1, 0) (
                    h_standby: ZesStandbyHandle,
                    mode: ZesStandbyPromoMode
                );
            }
            group Temperature => temperature as temperature (optional) {
                route get_properties: zesTemperatureGetProperties (1, 0) (
                    h_temperature: ZesTempHandle,
                    p_properties: *mut ZesTempProperties
                );
                route get_config: zesTemperatureGetConfig (1, 0) (
                    h_temperature: ZesTempHandle,
                    p_config: *mut ZesTempConfig
                );
                route set_config: zesTemperatureSetConfig (1, 0) (
                    h_temperature: ZesTempHandle,
                    p_config: *const ZesTempConfig
                );
                route get_state: zesTemperatureGetState (1, 0) (
                    h_temperature: ZesTempHandle,
                    p_temperature: *mut f64
                );
            }
            group FirmwareExp => firmware_exp as firmware (optional) {
                route get_security_version_exp: zesFirmwareGetSecurityVersionExp (1, 9) (
                    h_firmware: ZesFirmwareHandle,
                    p_version: *mut c_char
                );
                route set_security_version_exp: zesFirmwareSetSecurityVersionExp (1, 9) (
                    h_firmware: ZesFirmwareHandle
                );
            }
            group DeviceExp => device_exp as device (optional) {
                route get_sub_device_properties_exp: zesDeviceGetSubDevicePropertiesExp (1, 9) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_subdevice_props: *mut ZesSubdeviceExpProperties
                );
                route enum_active_vf_exp: zesDeviceEnumActiveVFExp (1, 9) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_vf_handle: *mut ZesVfHandle
                );
                route enum_enabled_vf_exp: zesDeviceEnumEnabledVFExp (1, 10) (
                    h_device: ZesDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_vf_handle: *mut ZesVfHandle
                );
            }
            group DriverExp => driver_exp as driver (optional) {
                route get_device_by_uuid_exp: zesDriverGetDeviceByUuidExp (1, 9) (
                    h_driver: ZesDriverHandle,
                    uuid: ZesUuid,
                    ph_device: *mut ZesDeviceHandle,
                    on_subdevice: *mut ZeBool,
                    subdevice_id: *mut u32
                );
            }
            group VFManagementExp => vf_management_exp as vf_management (optional) {
                route get_vf_properties_exp: zesVFManagementGetVFPropertiesExp (1, 9) (
                    h_vf_handle: ZesVfHandle,
                    p_properties: *mut ZesVfExpProperties
                );
                route get_vf_memory_utilization_exp: zesVFManagementGetVFMemoryUtilizationExp (1, 9) (
                    h_vf_handle: ZesVfHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_mem_util: *mut ZesVfUtilMemExp
                );
                route get_vf_engine_utilization_exp: zesVFManagementGetVFEngineUtilizationExp (1, 9) (
                    h_vf_handle: ZesVfHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_engine_util: *mut ZesVfUtilEngineExp
                );
                route set_vf_telemetry_mode_exp: zesVFManagementSetVFTelemetryModeExp (1, 9) (
                    h_vf_handle: ZesVfHandle,
                    flags: ZesVfInfoUtilExpFlags,
                    enable: ZeBool
                );
                route set_vf_telemetry_sampling_interval_exp: zesVFManagementSetVFTelemetrySamplingIntervalExp (1, 9) (
                    h_vf_handle: ZesVfHandle,
                    flag: ZesVfInfoUtilExpFlags,
                    sampling_interval: u64
                );
                route get_vf_capabilities_exp: zesVFManagementGetVFCapabilitiesExp (1, 10) (
                    h_vf_handle: ZesVfHandle,
                    p_capability: *mut ZesVfExpCapabilities
                );
                route get_vf_memory_utilization_exp2: zesVFManagementGetVFMemoryUtilizationExp2 (1, 10) (
                    h_vf_handle: ZesVfHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_mem_util: *mut ZesVfUtilMemExp2
                );
                route get_vf_engine_utilization_exp2: zesVFManagementGetVFEngineUtilizationExp2 (1, 10) (
                    h_vf_handle: ZesVfHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_engine_util: *mut ZesVfUtilEngineExp2
                );
                route get_vf_capabilities_exp2: zesVFManagementGetVFCapabilitiesExp2 (1, 12) (
                    h_vf_handle: ZesVfHandle,
                    p_capability: *mut ZesVfExp2Capabilities
                );
            }
        }
    };
}

zes_ddi_table!(ddi_category);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::GroupSet;
    use crate::version::ApiVersion;

    #[test]
    fn test_group_layout() {
        assert_eq!(SysmanGroups::GROUPS.len(), 24);
        assert_eq!(SysmanGroups::GROUPS[0].symbol, "zesGetGlobalProcAddrTable");
        assert_eq!(
            ZesVFManagementExpDdiTable::GROUP.symbol,
            "zesGetVFManagementExpProcAddrTable"
        );
        let required: alloc::vec::Vec<_> = SysmanGroups::GROUPS
            .iter()
            .filter(|g| g.required)
            .map(|g| g.name)
            .collect();
        assert_eq!(required, ["Device"]);
    }

    #[test]
    fn test_entry_points() {
        assert_eq!(SYSMAN_ENTRY_POINTS.len(), 149);
        assert_eq!(ENTRY_zesDeviceEccAvailable.version, ApiVersion::V1_4);
        assert_eq!(ENTRY_zesFirmwareGetConsoleLogs.version, ApiVersion::V1_9);
        assert_eq!(ENTRY_zesFirmwareGetConsoleLogs.group, "Firmware");
        assert!(SYSMAN_ENTRY_POINTS.iter().all(|e| e.name.starts_with("zes")));
    }

    #[test]
    fn test_param_annotations() {
        let get = &ENTRY_zesDeviceGet;
        assert_eq!(get.params.len(), 3);
        assert!(get.params[1].count);
        assert!(get.params[2].optional);
        assert_eq!(get.count_for(2), Some(1));

        let listen = &ENTRY_zesDriverEventListen;
        assert!(listen.param("ph_devices").is_some_and(|p| p.input));
    }

    #[test]
    fn test_entry_versions_never_precede_v1() {
        assert!(SYSMAN_ENTRY_POINTS.iter().all(|e| e.version >= ApiVersion::V1_0));
        assert!(SYSMAN_ENTRY_POINTS.iter().all(|e| e.version <= ApiVersion::CURRENT));
    }

    #[test]
    fn test_sub_table_is_pointer_array() {
        assert_eq!(
            core::mem::size_of::<ZesFirmwareDdiTable>(),
            4 * core::mem::size_of::<usize>()
        );
    }
}
