use std::ffi::CStr;

use ash::vk;

/// Resolves an entry-point name to a callable address for the object being
/// registered, or null when the next element of the dispatch chain does not
/// provide it.
///
/// The layer supplies one per registration, typically a closure binding the
/// downstream `vkGetInstanceProcAddr`/`vkGetDeviceProcAddr` to the handle
/// that is being registered.
pub trait EntryPointResolver {
    fn resolve(&self, name: &CStr) -> vk::PFN_vkVoidFunction;
}

impl<F> EntryPointResolver for F
where
    F: Fn(&CStr) -> vk::PFN_vkVoidFunction,
{
    fn resolve(&self, name: &CStr) -> vk::PFN_vkVoidFunction {
        self(name)
    }
}
