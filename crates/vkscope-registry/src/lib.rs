//! Thread-safe dispatch registry for the vkscope Vulkan interception layer.
//!
//! The layer sits between an application and the real driver. For every live
//! `VkInstance` and `VkDevice` it must remember which downstream function
//! pointers to forward to, and which optional annotation extensions that
//! device actually resolved. This crate owns exactly that state: the layer's
//! hooks register a dispatch table when they observe object creation, remove
//! it on destruction, and look up forwarding pointers on every intercepted
//! call in between, from whatever thread the application happens to use.
//!
//! Lookups are hot (once per submitted batch of work at minimum) while
//! registration is rare, so all tables sit behind a single read/write lock.
//! Any inconsistency (double registration, lookup of an unregistered object,
//! forwarding through a null pointer) is a protocol violation by the
//! surrounding layer and surfaces as a [`DispatchError`]; production hook
//! code escalates those with [`fatal::required`].

pub mod error;
pub mod fatal;
pub mod key;
pub mod registry;
pub mod resolver;
mod table;

pub use error::DispatchError;
pub use key::{DispatchKey, Dispatchable};
pub use registry::DispatchRegistry;
pub use resolver::EntryPointResolver;
