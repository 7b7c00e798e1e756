//! Logging setup for applications embedding the engine.
//!
//! The pure similarity and grouping functions never log; only the analysis
//! pipeline emits tracing events. Hosts that already install their own
//! subscriber should skip this and let those events flow into it.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize a stderr tracing subscriber.
///
/// Log level is controlled via the `FACEALBUM_LOG` environment variable:
/// - `FACEALBUM_LOG=debug` for verbose output
/// - `FACEALBUM_LOG=info` for standard output (default)
/// - `FACEALBUM_LOG=warn` for warnings and errors only
pub fn init() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_env("FACEALBUM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
