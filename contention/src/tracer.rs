use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Human readable log output on stderr.
///
/// `RUST_LOG` sets the level, `info` when unset. Thread names are included so the lines of
/// `worker-0` and `worker-1` can be told apart.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_names(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
    debug!("Tracing initialized");
}
