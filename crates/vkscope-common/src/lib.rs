//! Shared support for the vkscope interception layer.

pub mod logging;
