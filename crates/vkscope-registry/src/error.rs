use crate::key::DispatchKey;

/// A dispatch-chain protocol violation.
///
/// Every variant means the surrounding layer mismanaged object lifetimes or
/// forwarded to an entry point the driver never exposed. None of these are
/// recoverable at runtime; production hook code escalates them through
/// [`crate::fatal::required`], while tests observe them as values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("instance dispatch table already registered for {0:?}")]
    InstanceAlreadyRegistered(DispatchKey),

    #[error("no instance dispatch table registered for {0:?}")]
    InstanceNotRegistered(DispatchKey),

    #[error("device dispatch table already registered for {0:?}")]
    DeviceAlreadyRegistered(DispatchKey),

    #[error("no device dispatch table registered for {0:?}")]
    DeviceNotRegistered(DispatchKey),

    #[error("entry point {name} unresolved for {key:?}")]
    UnresolvedEntryPoint {
        key: DispatchKey,
        name: &'static str,
    },
}
