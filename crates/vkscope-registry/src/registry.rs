//! The process-wide dispatch registry.

use std::collections::HashMap;

use ash::vk;
use parking_lot::RwLock;

use crate::error::DispatchError;
use crate::key::{DispatchKey, Dispatchable};
use crate::resolver::EntryPointResolver;
use crate::table::{DeviceDispatch, InstanceDispatch};

/// Thread-safe table of forwarding pointers for live instances and devices.
///
/// The layer constructs one registry at load time and drops it at unload.
/// Registration/removal take the write lock and are bounded by the number of
/// live instances/devices; every lookup takes the read lock, so intercepted
/// calls on unrelated threads never serialize against each other.
#[derive(Default)]
pub struct DispatchRegistry {
    tables: RwLock<Tables>,
}

/// The four logical tables, guarded together: the capability maps are always
/// updated in the same critical section as the device map.
#[derive(Default)]
struct Tables {
    instance: HashMap<DispatchKey, InstanceDispatch>,
    device: HashMap<DispatchKey, DeviceDispatch>,
    device_supports_debug_utils: HashMap<DispatchKey, bool>,
    device_supports_debug_marker: HashMap<DispatchKey, bool>,
}

macro_rules! instance_accessor {
    ($(#[$meta:meta])* $accessor:ident, $pfn:ty, $name:literal) => {
        $(#[$meta])*
        pub fn $accessor(&self, handle: impl Dispatchable) -> Result<$pfn, DispatchError> {
            let key = handle.dispatch_key();
            let tables = self.tables.read();
            tables
                .instance
                .get(&key)
                .ok_or(DispatchError::InstanceNotRegistered(key))?
                .$accessor
                .ok_or(DispatchError::UnresolvedEntryPoint { key, name: $name })
        }
    };
}

macro_rules! device_accessor {
    ($(#[$meta:meta])* $accessor:ident, $pfn:ty, $name:literal) => {
        $(#[$meta])*
        pub fn $accessor(&self, handle: impl Dispatchable) -> Result<$pfn, DispatchError> {
            let key = handle.dispatch_key();
            let tables = self.tables.read();
            tables
                .device
                .get(&key)
                .ok_or(DispatchError::DeviceNotRegistered(key))?
                .$accessor
                .ok_or(DispatchError::UnresolvedEntryPoint { key, name: $name })
        }
    };
}

impl DispatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and store the forwarding table for a freshly created instance.
    ///
    /// The table is visible to lookups from any thread once this returns.
    /// A second registration for the same key is a protocol violation and
    /// leaves the existing table untouched.
    pub fn register_instance(
        &self,
        instance: vk::Instance,
        resolver: impl EntryPointResolver,
    ) -> Result<(), DispatchError> {
        // Resolve outside the lock; the resolver calls into the driver.
        let table = InstanceDispatch::resolve(&resolver);
        let key = instance.dispatch_key();

        let mut tables = self.tables.write();
        if tables.instance.contains_key(&key) {
            return Err(DispatchError::InstanceAlreadyRegistered(key));
        }
        tables.instance.insert(key, table);
        tracing::debug!("registered instance dispatch table for {:?}", key);
        Ok(())
    }

    /// Drop the forwarding table of a destroyed instance.
    pub fn unregister_instance(&self, instance: vk::Instance) -> Result<(), DispatchError> {
        let key = instance.dispatch_key();
        let mut tables = self.tables.write();
        if tables.instance.remove(&key).is_none() {
            return Err(DispatchError::InstanceNotRegistered(key));
        }
        tracing::debug!("removed instance dispatch table for {:?}", key);
        Ok(())
    }

    /// Resolve and store the forwarding table for a freshly created device,
    /// along with its annotation capability flags.
    ///
    /// The flags are computed here, once, from whichever entry points the
    /// driver resolved at device creation; they are never recomputed.
    pub fn register_device(
        &self,
        device: vk::Device,
        resolver: impl EntryPointResolver,
    ) -> Result<(), DispatchError> {
        let table = DeviceDispatch::resolve(&resolver);
        let debug_utils = table.supports_debug_utils();
        let debug_marker = table.supports_debug_marker();
        let key = device.dispatch_key();

        let mut tables = self.tables.write();
        if tables.device.contains_key(&key) {
            return Err(DispatchError::DeviceAlreadyRegistered(key));
        }
        tables.device.insert(key, table);
        tables.device_supports_debug_utils.insert(key, debug_utils);
        tables.device_supports_debug_marker.insert(key, debug_marker);
        tracing::debug!(
            "registered device dispatch table for {:?} (debug_utils: {}, debug_marker: {})",
            key,
            debug_utils,
            debug_marker
        );
        Ok(())
    }

    /// Drop the forwarding table and capability flags of a destroyed device.
    pub fn unregister_device(&self, device: vk::Device) -> Result<(), DispatchError> {
        let key = device.dispatch_key();
        let mut tables = self.tables.write();
        if tables.device.remove(&key).is_none() {
            return Err(DispatchError::DeviceNotRegistered(key));
        }
        tables.device_supports_debug_utils.remove(&key);
        tables.device_supports_debug_marker.remove(&key);
        tracing::debug!("removed device dispatch table for {:?}", key);
        Ok(())
    }

    instance_accessor!(destroy_instance, vk::PFN_vkDestroyInstance, "vkDestroyInstance");
    instance_accessor!(
        get_instance_proc_addr,
        vk::PFN_vkGetInstanceProcAddr,
        "vkGetInstanceProcAddr"
    );
    instance_accessor!(
        enumerate_device_extension_properties,
        vk::PFN_vkEnumerateDeviceExtensionProperties,
        "vkEnumerateDeviceExtensionProperties"
    );
    instance_accessor!(
        get_physical_device_properties,
        vk::PFN_vkGetPhysicalDeviceProperties,
        "vkGetPhysicalDeviceProperties"
    );

    device_accessor!(destroy_device, vk::PFN_vkDestroyDevice, "vkDestroyDevice");
    device_accessor!(
        get_device_proc_addr,
        vk::PFN_vkGetDeviceProcAddr,
        "vkGetDeviceProcAddr"
    );
    device_accessor!(reset_command_pool, vk::PFN_vkResetCommandPool, "vkResetCommandPool");
    device_accessor!(
        allocate_command_buffers,
        vk::PFN_vkAllocateCommandBuffers,
        "vkAllocateCommandBuffers"
    );
    device_accessor!(
        free_command_buffers,
        vk::PFN_vkFreeCommandBuffers,
        "vkFreeCommandBuffers"
    );
    device_accessor!(
        begin_command_buffer,
        vk::PFN_vkBeginCommandBuffer,
        "vkBeginCommandBuffer"
    );
    device_accessor!(end_command_buffer, vk::PFN_vkEndCommandBuffer, "vkEndCommandBuffer");
    device_accessor!(
        reset_command_buffer,
        vk::PFN_vkResetCommandBuffer,
        "vkResetCommandBuffer"
    );
    device_accessor!(queue_submit, vk::PFN_vkQueueSubmit, "vkQueueSubmit");
    device_accessor!(queue_present_khr, vk::PFN_vkQueuePresentKHR, "vkQueuePresentKHR");
    device_accessor!(get_device_queue, vk::PFN_vkGetDeviceQueue, "vkGetDeviceQueue");
    device_accessor!(get_device_queue2, vk::PFN_vkGetDeviceQueue2, "vkGetDeviceQueue2");
    device_accessor!(create_query_pool, vk::PFN_vkCreateQueryPool, "vkCreateQueryPool");
    device_accessor!(
        reset_query_pool_ext,
        vk::PFN_vkResetQueryPool,
        "vkResetQueryPoolEXT"
    );
    device_accessor!(
        cmd_write_timestamp,
        vk::PFN_vkCmdWriteTimestamp,
        "vkCmdWriteTimestamp"
    );
    device_accessor!(
        get_query_pool_results,
        vk::PFN_vkGetQueryPoolResults,
        "vkGetQueryPoolResults"
    );
    device_accessor!(
        cmd_begin_debug_utils_label_ext,
        vk::PFN_vkCmdBeginDebugUtilsLabelEXT,
        "vkCmdBeginDebugUtilsLabelEXT"
    );
    device_accessor!(
        cmd_end_debug_utils_label_ext,
        vk::PFN_vkCmdEndDebugUtilsLabelEXT,
        "vkCmdEndDebugUtilsLabelEXT"
    );
    device_accessor!(
        cmd_debug_marker_begin_ext,
        vk::PFN_vkCmdDebugMarkerBeginEXT,
        "vkCmdDebugMarkerBeginEXT"
    );
    device_accessor!(
        cmd_debug_marker_end_ext,
        vk::PFN_vkCmdDebugMarkerEndEXT,
        "vkCmdDebugMarkerEndEXT"
    );

    /// Whether the device resolved both debug-utils label entry points.
    pub fn is_debug_utils_extension_supported(
        &self,
        handle: impl Dispatchable,
    ) -> Result<bool, DispatchError> {
        let key = handle.dispatch_key();
        let tables = self.tables.read();
        tables
            .device_supports_debug_utils
            .get(&key)
            .copied()
            .ok_or(DispatchError::DeviceNotRegistered(key))
    }

    /// Whether the device resolved both debug-marker entry points.
    pub fn is_debug_marker_extension_supported(
        &self,
        handle: impl Dispatchable,
    ) -> Result<bool, DispatchError> {
        let key = handle.dispatch_key();
        let tables = self.tables.read();
        tables
            .device_supports_debug_marker
            .get(&key)
            .copied()
            .ok_or(DispatchError::DeviceNotRegistered(key))
    }

    /// Number of live instance tables, for teardown diagnostics.
    pub fn instance_count(&self) -> usize {
        self.tables.read().instance.len()
    }

    /// Number of live device tables, for teardown diagnostics.
    pub fn device_count(&self) -> usize {
        self.tables.read().device.len()
    }
}
