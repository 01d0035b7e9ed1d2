use tracing_subscriber::{fmt, EnvFilter};

/// Initialize structured logging with environment filter.
/// Set VKSCOPE_LOG=debug (or trace, info, warn, error) for verbosity control.
///
/// Safe to call more than once; later calls keep the first subscriber. The
/// layer is loaded into arbitrary host processes, so a second initialization
/// attempt must not take the process down.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("VKSCOPE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init();
}
