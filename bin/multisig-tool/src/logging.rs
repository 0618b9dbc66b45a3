//! Logging setup.

use std::io;

use tracing::Level;
use tracing_subscriber::{
    fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// Installs a stderr subscriber filtered by `RUST_LOG`, `info` by default.
pub(crate) fn init(config: &LoggingConfig) {
    let filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let stderr_sub = if config.json_format {
        layer()
            .json()
            .with_writer(io::stderr)
            .with_filter(filt)
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(io::stderr)
            .with_filter(filt)
            .boxed()
    };

    tracing_subscriber::registry().with(stderr_sub).init();
}
