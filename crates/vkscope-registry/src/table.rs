//! Per-instance and per-device forwarding tables.
//!
//! Each table is filled exactly once, at registration, by querying the
//! resolver for every entry point the layer forwards. Fields stay `None` when
//! the driver does not expose the entry point; the registry's accessors turn
//! that into an error at lookup time.

use ash::vk;

use crate::resolver::EntryPointResolver;

macro_rules! load_pfn {
    ($resolver:expr, $pfn:ty, $name:literal) => {
        // Retype the resolved address to the concrete prototype. All
        // `extern "system"` function pointers share one layout.
        unsafe { std::mem::transmute::<vk::PFN_vkVoidFunction, Option<$pfn>>($resolver.resolve($name)) }
    };
}

/// Forwarding pointers for instance-scope calls.
pub(crate) struct InstanceDispatch {
    pub(crate) destroy_instance: Option<vk::PFN_vkDestroyInstance>,
    pub(crate) get_instance_proc_addr: Option<vk::PFN_vkGetInstanceProcAddr>,
    pub(crate) enumerate_device_extension_properties:
        Option<vk::PFN_vkEnumerateDeviceExtensionProperties>,
    pub(crate) get_physical_device_properties: Option<vk::PFN_vkGetPhysicalDeviceProperties>,
}

impl InstanceDispatch {
    pub(crate) fn resolve(resolver: &impl EntryPointResolver) -> Self {
        Self {
            destroy_instance: load_pfn!(resolver, vk::PFN_vkDestroyInstance, c"vkDestroyInstance"),
            get_instance_proc_addr: load_pfn!(
                resolver,
                vk::PFN_vkGetInstanceProcAddr,
                c"vkGetInstanceProcAddr"
            ),
            enumerate_device_extension_properties: load_pfn!(
                resolver,
                vk::PFN_vkEnumerateDeviceExtensionProperties,
                c"vkEnumerateDeviceExtensionProperties"
            ),
            get_physical_device_properties: load_pfn!(
                resolver,
                vk::PFN_vkGetPhysicalDeviceProperties,
                c"vkGetPhysicalDeviceProperties"
            ),
        }
    }
}

/// Forwarding pointers for device-scope calls.
pub(crate) struct DeviceDispatch {
    pub(crate) destroy_device: Option<vk::PFN_vkDestroyDevice>,
    pub(crate) get_device_proc_addr: Option<vk::PFN_vkGetDeviceProcAddr>,

    pub(crate) reset_command_pool: Option<vk::PFN_vkResetCommandPool>,
    pub(crate) allocate_command_buffers: Option<vk::PFN_vkAllocateCommandBuffers>,
    pub(crate) free_command_buffers: Option<vk::PFN_vkFreeCommandBuffers>,
    pub(crate) begin_command_buffer: Option<vk::PFN_vkBeginCommandBuffer>,
    pub(crate) end_command_buffer: Option<vk::PFN_vkEndCommandBuffer>,
    pub(crate) reset_command_buffer: Option<vk::PFN_vkResetCommandBuffer>,

    pub(crate) queue_submit: Option<vk::PFN_vkQueueSubmit>,
    pub(crate) queue_present_khr: Option<vk::PFN_vkQueuePresentKHR>,
    pub(crate) get_device_queue: Option<vk::PFN_vkGetDeviceQueue>,
    pub(crate) get_device_queue2: Option<vk::PFN_vkGetDeviceQueue2>,

    pub(crate) create_query_pool: Option<vk::PFN_vkCreateQueryPool>,
    // vkResetQueryPoolEXT shares the vkResetQueryPool prototype (promoted
    // to core in 1.2).
    pub(crate) reset_query_pool_ext: Option<vk::PFN_vkResetQueryPool>,
    pub(crate) cmd_write_timestamp: Option<vk::PFN_vkCmdWriteTimestamp>,
    pub(crate) get_query_pool_results: Option<vk::PFN_vkGetQueryPoolResults>,

    pub(crate) cmd_begin_debug_utils_label_ext: Option<vk::PFN_vkCmdBeginDebugUtilsLabelEXT>,
    pub(crate) cmd_end_debug_utils_label_ext: Option<vk::PFN_vkCmdEndDebugUtilsLabelEXT>,
    pub(crate) cmd_debug_marker_begin_ext: Option<vk::PFN_vkCmdDebugMarkerBeginEXT>,
    pub(crate) cmd_debug_marker_end_ext: Option<vk::PFN_vkCmdDebugMarkerEndEXT>,
}

impl DeviceDispatch {
    pub(crate) fn resolve(resolver: &impl EntryPointResolver) -> Self {
        Self {
            destroy_device: load_pfn!(resolver, vk::PFN_vkDestroyDevice, c"vkDestroyDevice"),
            get_device_proc_addr: load_pfn!(
                resolver,
                vk::PFN_vkGetDeviceProcAddr,
                c"vkGetDeviceProcAddr"
            ),
            reset_command_pool: load_pfn!(
                resolver,
                vk::PFN_vkResetCommandPool,
                c"vkResetCommandPool"
            ),
            allocate_command_buffers: load_pfn!(
                resolver,
                vk::PFN_vkAllocateCommandBuffers,
                c"vkAllocateCommandBuffers"
            ),
            free_command_buffers: load_pfn!(
                resolver,
                vk::PFN_vkFreeCommandBuffers,
                c"vkFreeCommandBuffers"
            ),
            begin_command_buffer: load_pfn!(
                resolver,
                vk::PFN_vkBeginCommandBuffer,
                c"vkBeginCommandBuffer"
            ),
            end_command_buffer: load_pfn!(
                resolver,
                vk::PFN_vkEndCommandBuffer,
                c"vkEndCommandBuffer"
            ),
            reset_command_buffer: load_pfn!(
                resolver,
                vk::PFN_vkResetCommandBuffer,
                c"vkResetCommandBuffer"
            ),
            queue_submit: load_pfn!(resolver, vk::PFN_vkQueueSubmit, c"vkQueueSubmit"),
            queue_present_khr: load_pfn!(resolver, vk::PFN_vkQueuePresentKHR, c"vkQueuePresentKHR"),
            get_device_queue: load_pfn!(resolver, vk::PFN_vkGetDeviceQueue, c"vkGetDeviceQueue"),
            get_device_queue2: load_pfn!(resolver, vk::PFN_vkGetDeviceQueue2, c"vkGetDeviceQueue2"),
            create_query_pool: load_pfn!(resolver, vk::PFN_vkCreateQueryPool, c"vkCreateQueryPool"),
            reset_query_pool_ext: load_pfn!(
                resolver,
                vk::PFN_vkResetQueryPool,
                c"vkResetQueryPoolEXT"
            ),
            cmd_write_timestamp: load_pfn!(
                resolver,
                vk::PFN_vkCmdWriteTimestamp,
                c"vkCmdWriteTimestamp"
            ),
            get_query_pool_results: load_pfn!(
                resolver,
                vk::PFN_vkGetQueryPoolResults,
                c"vkGetQueryPoolResults"
            ),
            cmd_begin_debug_utils_label_ext: load_pfn!(
                resolver,
                vk::PFN_vkCmdBeginDebugUtilsLabelEXT,
                c"vkCmdBeginDebugUtilsLabelEXT"
            ),
            cmd_end_debug_utils_label_ext: load_pfn!(
                resolver,
                vk::PFN_vkCmdEndDebugUtilsLabelEXT,
                c"vkCmdEndDebugUtilsLabelEXT"
            ),
            cmd_debug_marker_begin_ext: load_pfn!(
                resolver,
                vk::PFN_vkCmdDebugMarkerBeginEXT,
                c"vkCmdDebugMarkerBeginEXT"
            ),
            cmd_debug_marker_end_ext: load_pfn!(
                resolver,
                vk::PFN_vkCmdDebugMarkerEndEXT,
                c"vkCmdDebugMarkerEndEXT"
            ),
        }
    }

    /// Both debug-utils label entry points resolved.
    pub(crate) fn supports_debug_utils(&self) -> bool {
        self.cmd_begin_debug_utils_label_ext.is_some()
            && self.cmd_end_debug_utils_label_ext.is_some()
    }

    /// Both debug-marker entry points resolved.
    pub(crate) fn supports_debug_marker(&self) -> bool {
        self.cmd_debug_marker_begin_ext.is_some() && self.cmd_debug_marker_end_ext.is_some()
    }
}
