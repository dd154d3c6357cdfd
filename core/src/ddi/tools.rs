//! # Tools Entry Points
//!
//! Tools (`zet`) entry points: metrics, debug, tracing and instrumentation.

use crate::handle::*;
use crate::types::*;

#[macro_export]
macro_rules! zet_ddi_table {
    ($cb:ident) => {
        $cb! {
            @category Tools, zet, Zet, ToolsApi, ToolsGroups;
            group Device => device as device (required) {
                route get_debug_properties: zetDeviceGetDebugProperties (1, 0) (
                    h_device: ZetDeviceHandle,
                    p_debug_properties: *mut ZetDeviceDebugProperties
                );
            }
            group Context => context as context (optional) {
                route activate_metric_groups: zetContextActivateMetricGroups (1, 0) (
                    h_context: ZetContextHandle,
                    h_device: ZetDeviceHandle,
                    count: u32,
                    #[optional] #[input] ph_metric_groups: *mut ZetMetricGroupHandle
                );
            }
            group CommandList => command_list as command_list (optional) {
                route append_metric_streamer_marker: zetCommandListAppendMetricStreamerMarker (1, 0) (
                    h_command_list: ZetCommandListHandle,
                    h_metric_streamer: ZetMetricStreamerHandle,
                    value: u32
                );
                route append_metric_query_begin: zetCommandListAppendMetricQueryBegin (1, 0) (
                    h_command_list: ZetCommandListHandle,
                    h_metric_query: ZetMetricQueryHandle
                );
                route append_metric_query_end: zetCommandListAppendMetricQueryEnd (1, 0) (
                    h_command_list: ZetCommandListHandle,
                    h_metric_query: ZetMetricQueryHandle,
                    #[optional] h_signal_event: ZeEventHandle,
                    num_wait_events: u32,
                    #[optional] #[input] ph_wait_events: *mut ZeEventHandle
                );
                route append_metric_memory_barrier: zetCommandListAppendMetricMemoryBarrier (1, 0) (
                    h_command_list: ZetCommandListHandle
                );
            }
            group Kernel => kernel as kernel (optional) {
                route get_profile_info: zetKernelGetProfileInfo (1, 0) (
                    h_kernel: ZetKernelHandle,
                    p_profile_properties: *mut ZetProfileProperties
                );
            }
            group Module => module as module (optional) {
                route get_debug_info: zetModuleGetDebugInfo (1, 0) (
                    h_module: ZetModuleHandle,
                    format: ZetModuleDebugInfoFormat,
                    p_size: *mut usize,
                    #[optional] p_debug_info: *mut u8
                );
            }
            group Debug => debug as debug (optional) {
                route attach: zetDebugAttach (1, 0) (
                    h_device: ZetDeviceHandle,
                    config: *const ZetDebugConfig,
                    ph_debug: *mut ZetDebugSessionHandle
                );
                #[releases]
                route detach: zetDebugDetach (1, 0) (h_debug: ZetDebugSessionHandle);
                route read_event: zetDebugReadEvent (1, 0) (
                    h_debug: ZetDebugSessionHandle,
                    timeout: u64,
                    event: *mut ZetDebugEvent
                );
                route acknowledge_event: zetDebugAcknowledgeEvent (1, 0) (
                    h_debug: ZetDebugSessionHandle,
                    event: *const ZetDebugEvent
                );
                route interrupt: zetDebugInterrupt (1, 0) (
                    h_debug: ZetDebugSessionHandle,
                    thread: ZeDeviceThread
                );
                route resume: zetDebugResume (1, 0) (h_debug: ZetDebugSessionHandle, thread: ZeDeviceThread);
                route read_memory: zetDebugReadMemory (1, 0) (
                    h_debug: ZetDebugSessionHandle,
                    thread: ZeDeviceThread,
                    desc: *const ZetDebugMemorySpaceDesc,
                    size: usize,
                    buffer: *mut c_void
                );
                route write_memory: zetDebugWriteMemory (1, 0) (
                    h_debug: ZetDebugSessionHandle,
                    thread: ZeDeviceThread,
                    desc: *const ZetDebugMemorySpaceDesc,
                    size: usize,
                    buffer: *const c_void
                );
                route get_register_set_properties: zetDebugGetRegisterSetProperties (1, 0) (
                    h_device: ZetDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] p_register_set_properties: *mut ZetDebugRegsetProperties
                );
                route read_registers: zetDebugReadRegisters (1, 0) (
                    h_debug: ZetDebugSessionHandle,
                    thread: ZeDeviceThread,
                    ty: u32,
                    start: u32,
                    count: u32,
                    #[optional] p_register_values: *mut c_void
                );
                route write_registers: zetDebugWriteRegisters (1, 0) (
                    h_debug: ZetDebugSessionHandle,
                    thread: ZeDeviceThread,
                    ty: u32,
                    start: u32,
                    count: u32,
                    #[optional] p_register_values: *mut c_void
                );
                route get_thread_register_set_properties: zetDebugGetThreadRegisterSetProperties (1, 5) (
                    h_debug: ZetDebugSessionHandle,
                    thread: ZeDeviceThread,
                    #[count] p_count: *mut u32,
                    #[optional] p_register_set_properties: *mut ZetDebugRegsetProperties
                );
            }
            group Metric => metric as metric (optional) {
                route get: zetMetricGet (1, 0) (
                    h_metric_group: ZetMetricGroupHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_metrics: *mut ZetMetricHandle
                );
                route get_properties: zetMetricGetProperties (1, 0) (
                    h_metric: ZetMetricHandle,
                    p_properties: *mut ZetMetricProperties
                );
            }
            group MetricGroup => metric_group as metric_group (optional) {
                route get: zetMetricGroupGet (1, 0) (
                    h_device: ZetDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_metric_groups: *mut ZetMetricGroupHandle
                );
                route get_properties: zetMetricGroupGetProperties (1, 0) (
                    h_metric_group: ZetMetricGroupHandle,
                    p_properties: *mut ZetMetricGroupProperties
                );
                route calculate_metric_values: zetMetricGroupCalculateMetricValues (1, 0) (
                    h_metric_group: ZetMetricGroupHandle,
                    ty: ZetMetricGroupCalculationType,
                    raw_data_size: usize,
                    p_raw_data: *const u8,
                    p_metric_value_count: *mut u32,
                    #[optional] p_metric_values: *mut ZetTypedValue
                );
            }
            group MetricGroupExp => metric_group_exp as metric_group (optional) {
                route calculate_multiple_metric_values_exp: zetMetricGroupCalculateMultipleMetricValuesExp (1, 2) (
                    h_metric_group: ZetMetricGroupHandle,
                    ty: ZetMetricGroupCalculationType,
                    raw_data_size: usize,
                    p_raw_data: *const u8,
                    p_set_count: *mut u32,
                    p_total_metric_value_count: *mut u32,
                    #[optional] p_metric_counts: *mut u32,
                    #[optional] p_metric_values: *mut ZetTypedValue
                );
                route get_global_timestamps_exp: zetMetricGroupGetGlobalTimestampsExp (1, 5) (
                    h_metric_group: ZetMetricGroupHandle,
                    synchronized_with_host: ZeBool,
                    global_timestamp: *mut u64,
                    metric_timestamp: *mut u64
                );
                route get_export_data_exp: zetMetricGroupGetExportDataExp (1, 6) (
                    h_metric_group: ZetMetricGroupHandle,
                    p_raw_data: *const u8,
                    raw_data_size: usize,
                    p_export_data_size: *mut usize,
                    #[optional] p_export_data: *mut u8
                );
                route calculate_metric_export_data_exp: zetMetricGroupCalculateMetricExportDataExp (1, 6) (
                    h_driver: ZeDriverHandle,
                    ty: ZetMetricGroupCalculationType,
                    export_data_size: usize,
                    p_export_data: *const u8,
                    p_calculate_descriptor: *mut ZetMetricCalculateExpDesc,
                    p_set_count: *mut u32,
                    p_total_metric_value_count: *mut u32,
                    #[optional] p_metric_counts: *mut u32,
                    #[optional] p_metric_values: *mut ZetTypedValue
                );
                route create_exp: zetMetricGroupCreateExp (1, 9) (
                    h_device: ZetDeviceHandle,
                    p_name: *const c_char,
                    p_description: *const c_char,
                    sampling_type: ZetMetricGroupSamplingTypeFlags,
                    ph_metric_group: *mut ZetMetricGroupHandle
                );
                route add_metric_exp: zetMetricGroupAddMetricExp (1, 9) (
                    h_metric_group: ZetMetricGroupHandle,
                    h_metric: ZetMetricHandle,
                    #[optional] p_error_string_size: *mut usize,
                    #[optional] p_error_string: *mut c_char
                );
                route remove_metric_exp: zetMetricGroupRemoveMetricExp (1, 9) (
                    h_metric_group: ZetMetricGroupHandle,
                    h_metric: ZetMetricHandle
                );
                route close_exp: zetMetricGroupCloseExp (1, 9) (h_metric_group: ZetMetricGroupHandle);
                #[releases]
                route destroy_exp: zetMetricGroupDestroyExp (1, 9) (h_metric_group: ZetMetricGroupHandle);
            }
            group MetricQuery => metric_query as metric_query (optional) {
                route create: zetMetricQueryCreate (1, 0) (
                    h_metric_query_pool: ZetMetricQueryPoolHandle,
                    index: u32,
                    ph_metric_query: *mut ZetMetricQueryHandle
                );
                #[releases]
                route destroy: zetMetricQueryDestroy (1, 0) (h_metric_query: ZetMetricQueryHandle);
                route reset: zetMetricQueryReset (1, 0) (h_metric_query: ZetMetricQueryHandle);
                route get_data: zetMetricQueryGetData (1, 0) (
                    h_metric_query: ZetMetricQueryHandle,
                    p_raw_data_size: *mut usize,
                    #[optional] p_raw_data: *mut u8
                );
            }
            group MetricQueryPool => metric_query_pool as metric_query_pool (optional) {
                route create: zetMetricQueryPoolCreate (1, 0) (
                    h_context: ZetContextHandle,
                    h_device: ZetDeviceHandle,
                    h_metric_group: ZetMetricGroupHandle,
                    desc: *const ZetMetricQueryPoolDesc,
                    ph_metric_query_pool: *mut ZetMetricQueryPoolHandle
                );
                #[releases]
                route destroy: zetMetricQueryPoolDestroy (1, 0) (
                    h_metric_query_pool: ZetMetricQueryPoolHandle
                );
            }
            group MetricStreamer => metric_streamer as metric_streamer (optional) {
                route open: zetMetricStreamerOpen (1, 0) (
                    h_context: ZetContextHandle,
                    h_device: ZetDeviceHandle,
                    h_metric_group: ZetMetricGroupHandle,
                    desc: *mut ZetMetricStreamerDesc,
                    #[optional] h_notification_event: ZeEventHandle,
                    ph_metric_streamer: *mut ZetMetricStreamerHandle
                );
                #[releases]
                route close: zetMetricStreamerClose (1, 0) (h_metric_streamer: ZetMetricStreamerHandle);
                route read_data: zetMetricStreamerReadData (1, 0) (
                    h_metric_streamer: ZetMetricStreamerHandle,
                    max_report_count: u32,
                    p_raw_data_size: *mut usize,
                    #[optional] p_raw_data: *mut u8
                );
            }
            group TracerExp => tracer_exp as tracer_exp (optional) {
                route create: zetTracerExpCreate (1, 0) (
                    h_context: ZetContextHandle,
                    desc: *const ZetTracerExpDesc,
                    ph_tracer: *mut ZetTracerExpHandle
                );
                #[releases]
                route destroy: zetTracerExpDestroy (1, 0) (h_tracer: ZetTracerExpHandle);
                route set_prologues: zetTracerExpSetPrologues (1, 0) (
                    h_tracer: ZetTracerExpHandle,
                    p_core_cbs: *mut ZetCoreCallbacks
                );
                route set_epilogues: zetTracerExpSetEpilogues (1, 0) (
                    h_tracer: ZetTracerExpHandle,
                    p_core_cbs: *mut ZetCoreCallbacks
                );
                route set_enabled: zetTracerExpSetEnabled (1, 0) (
                    h_tracer: ZetTracerExpHandle,
                    enable: ZeBool
                );
            }
            group MetricProgrammableExp => metric_programmable_exp as metric_programmable (optional) {
                route get_exp: zetMetricProgrammableGetExp (1, 9) (
                    h_device: ZetDeviceHandle,
                    #[count] p_count: *mut u32,
                    #[optional] ph_metric_programmables: *mut ZetMetricProgrammableExpHandle
                );
                route get_properties_exp: zetMetricProgrammableGetPropertiesExp (1, 9) (
                    h_metric_programmable: ZetMetricProgrammableExpHandle,
                    p_properties: *mut ZetMetricProgrammableExpProperties
                );
                route get_param_info_exp: zetMetricProgrammableGetParamInfoExp (1, 9) (
                    h_metric_programmable: ZetMetricProgrammableExpHandle,
                    p_parameter_count: *mut u32,
                    p_parameter_info: *mut ZetMetricProgrammableParamInfoExp
                );
                route get_param_value_info_exp: zetMetricProgrammableGetParamValueInfoExp (1, 9) (
                    h_metric_programmable: ZetMetricProgrammableExpHandle,
                    parameter_ordinal: u32,
                    p_value_info_count: *mut u32,
                    p_value_info: *mut ZetMetricProgrammableParamValueInfoExp
                );
            }
            group MetricExp => metric_exp as metric (optional) {
                route create_from_programmable_exp: zetMetricCreateFromProgrammableExp (1, 9) (
                    h_metric_programmable: ZetMetricProgrammableExpHandle,
                    p_parameter_values: *mut ZetMetricProgrammableParamValueExp,
                    parameter_count: u32,
                    p_name: *const c_char,
                    p_description: *const c_char,
                    #[count] p_metric_handle_count: *mut u32,
                    #[optional] ph_metric_handles: *mut ZetMetricHandle
                );
                #[releases]
                route destroy_exp: zetMetricDestroyExp (1, 9) (h_metric: ZetMetricHandle);
                route create_from_programmable_exp2: zetMetricCreateFromProgrammableExp2 (1, 11) (
                    h_metric_programmable: ZetMetricProgrammableExpHandle,
                    parameter_count: u32,
                    p_parameter_values: *mut ZetMetricProgrammableParamValueExp,
                    p_name: *const c_char,
                    p_description: *const c_char,
                    #[count] p_metric_handle_count: *mut u32,
                    #[optional] ph_metric_handles: *mut ZetMetricHandle
                );
            }
            group DeviceExp => device_exp as device (optional) {
                route get_concurrent_metric_groups_exp: zetDeviceGetConcurrentMetricGroupsExp (1, 10) (
                    h_device: ZetDeviceHandle,
                    metric_group_count: u32,
                    #[input] ph_metric_groups: *mut ZetMetricGroupHandle,
                    #[optional] p_metric_groups_count_per_concurrent_group: *mut u32,
                    p_concurrent_group_count: *mut u32
                );
                route create_metric_groups_from_metrics_exp: zetDeviceCreateMetricGroupsFromMetricsExp (1, 10) (
                    h_device: ZetDeviceHandle,
                    metric_count: u32,
                    #[input] ph_metrics: *mut ZetMetricHandle,
                    p_metric_group_name_prefix: *const c_char,
                    p_description: *const c_char,
                    #[count] p_metric_group_count: *mut u32,
                    #[optional] ph_metric_group: *mut ZetMetricGroupHandle
                );
                route enable_metrics_exp: zetDeviceEnableMetricsExp (1, 13) (h_device: ZetDeviceHandle);
                route disable_metrics_exp: zetDeviceDisableMetricsExp (1, 13) (h_device: ZetDeviceHandle);
            }
            group MetricTracerExp => metric_tracer_exp as metric_tracer (optional) {
                route create_exp: zetMetricTracerCreateExp (1, 10) (
                    h_context: ZetContextHandle,
                    h_device: ZetDeviceHandle,
                    metric_group_count: u32,
                    #[input] ph_metric_groups: *mut ZetMetricGroupHandle,
                    desc: *mut ZetMetricTracerExpDesc,
                    #[optional] h_notification_event: ZeEventHandle,
                    ph_metric_tracer: *mut ZetMetricTracerExpHandle
                );
                #[releases]
                route destroy_exp: zetMetricTracerDestroyExp (1, 10) (
                    h_metric_tracer: ZetMetricTracerExpHandle
                );
                route enable_exp: zetMetricTracerEnableExp (1, 10) (
                    h_metric_tracer: ZetMetricTracerExpHandle,
                    synchronous: ZeBool
                );
                route disable_exp: zetMetricTracerDisableExp (1, 10) (
                    h_metric_tracer: ZetMetricTracerExpHandle,
                    synchronous: ZeBool
                );
                route read_data_exp: zetMetricTracerReadDataExp (1, 10) (
                    h_metric_tracer: ZetMetricTracerExpHandle,
                    p_raw_data_size: *mut usize,
                    #[optional] p_raw_data: *mut u8
                );
                route decode_exp: zetMetricTracerDecodeExp (1, 10) (
                    ph_metric_decoder: ZetMetricDecoderExpHandle,
                    p_raw_data_size: *mut usize,
                    #[optional] p_raw_data: *mut u8,
                    metrics_count: u32,
                    #[input] ph_metrics: *mut ZetMetricHandle,
                    p_set_count: *mut u32,
                    #[optional] p_metric_entries_count_per_set: *mut u32,
                    p_metric_entries_count: *mut u32,
                    #[optional] p_metric_entries: *mut ZetMetricEntryExp
                );
            }
            group MetricDecoderExp => metric_decoder_exp as metric_decoder (optional) {
                route create_exp: zetMetricDecoderCreateExp (1, 10) (
                    h_metric_tracer: ZetMetricTracerExpHandle,
                    ph_metric_decoder: *mut ZetMetricDecoderExpHandle
                );
                #[releases]
                route destroy_exp: zetMetricDecoderDestroyExp (1, 10) (
                    ph_metric_decoder: ZetMetricDecoderExpHandle
                );
                route get_decodable_metrics_exp: zetMetricDecoderGetDecodableMetricsExp (1, 10) (
                    h_metric_decoder: ZetMetricDecoderExpHandle,
                    #[count] p_count: *mut u32,
                    ph_metrics: *mut ZetMetricHandle
                );
            }
            group CommandListExp => command_list_exp as command_list (optional) {
                route append_marker_exp: zetCommandListAppendMarkerExp (1, 13) (
                    h_command_list: ZetCommandListHandle,
                    h_metric_group: ZetMetricGroupHandle,
                    value: u32
                );
            }
        }
    };
}

zet_ddi_table!(ddi_category);
