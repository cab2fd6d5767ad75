//! Log output for the command line tools.

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Sends log events to stderr so that stdout is free for the chart itself.
///
/// Events at `default_level` and above are shown, unless overridden with the
/// `RUST_LOG` environment variable, e.g. `RUST_LOG=cashflow_charts=debug`.
pub fn init(default_level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}
