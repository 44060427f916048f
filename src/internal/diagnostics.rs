// src/internal/diagnostics.rs

use tracing_subscriber::{
    fmt::{self},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Install the tracing subscriber for the logger's own diagnostics.
///
/// Output goes to stderr so it never interleaves with console log lines on
/// stdout. `RUST_LOG` takes precedence over `level`.
pub fn init_diagnostics(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_level(true)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(true),
        )
        .try_init()?;

    Ok(())
}
