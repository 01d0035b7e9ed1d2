//! Object identity for dispatchable Vulkan handles.
//!
//! The loader writes a pointer to its own dispatch table into the first
//! pointer-sized word of every dispatchable handle. That pointer is shared
//! between a parent instance/device and all dispatchable sub-objects created
//! from it (queues, command buffers), which makes it a cheap process-unique
//! answer to "which instance/device does this handle belong to".

use ash::vk;
use ash::vk::Handle;

/// Identity of a live instance or device, as derived from a handle.
///
/// A key is stable for the lifetime of the object it was derived from. After
/// the object is destroyed and its table unregistered, the same key value may
/// legitimately reappear for an unrelated object.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchKey(usize);

impl DispatchKey {
    /// Build a key from a raw loader-key value.
    ///
    /// For handle representations that do not follow the loader ABI (e.g.
    /// opaque integer handles on other backends) and for diagnostics.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for DispatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DispatchKey({:#x})", self.0)
    }
}

/// Extraction of a [`DispatchKey`] from a handle.
///
/// Implementations must yield the same key for every handle belonging to the
/// same underlying instance/device, and must be cheap: this runs on every
/// intercepted call.
pub trait Dispatchable {
    fn dispatch_key(&self) -> DispatchKey;
}

macro_rules! loader_keyed_handle {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Dispatchable for $ty {
                fn dispatch_key(&self) -> DispatchKey {
                    // The handle must be live. The loader guarantees that for
                    // handles passed into layer hooks.
                    let slot = self.as_raw() as usize as *const usize;
                    DispatchKey(unsafe { *slot })
                }
            }
        )*
    };
}

loader_keyed_handle!(
    vk::Instance,
    vk::PhysicalDevice,
    vk::Device,
    vk::Queue,
    vk::CommandBuffer,
);
