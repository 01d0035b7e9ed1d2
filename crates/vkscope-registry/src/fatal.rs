//! Termination policy for protocol violations.
//!
//! The checks themselves live in the registry and surface as
//! [`DispatchError`] values; this module is the separate layer that decides
//! what a violation does to the process.

use crate::error::DispatchError;

/// Unwrap a registry result, or report the violation and abort the process.
///
/// Continuing past a violation would forward an intercepted call through a
/// missing pointer and corrupt the application's graphics state, so there is
/// no recovery path here. Hook code wraps every lookup it forwards through;
/// tests consume the `Result` directly instead.
pub fn required<T>(result: Result<T, DispatchError>) -> T {
    match result {
        Ok(value) => value,
        Err(violation) => {
            tracing::error!("dispatch registry protocol violation: {}", violation);
            std::process::abort();
        }
    }
}
