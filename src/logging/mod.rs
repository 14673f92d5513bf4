//! Diagnostic channel.
//!
//! All diagnostics (fetch failures, config problems, request tracing) go
//! through `tracing` and are written to stderr so they never mix with the
//! rendered cards and charts on stdout. Nothing logged here is shown to the
//! user as part of the UI.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Environment variable read by [`with_bootstrap`] before config is loaded.
const LOG_ENV: &str = "BIOSPACE_LOG";

/// Install the global subscriber.
///
/// `level` is a `tracing` filter directive such as `warn` or
/// `biospace_explorer=debug`. An unparseable directive falls back to `warn`.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(level: &str) {
    let _ = tracing::subscriber::set_global_default(subscriber(level, std::io::stderr));
}

/// Run `f` under a temporary stderr subscriber.
///
/// Config loading happens before the configured level is known, so its
/// warnings go through this one, filtered by `BIOSPACE_LOG` or `warn`.
pub fn with_bootstrap<T>(f: impl FnOnce() -> T) -> T {
    let level = std::env::var(LOG_ENV).unwrap_or_else(|_| "warn".to_string());
    tracing::subscriber::with_default(subscriber(&level, std::io::stderr), f)
}

fn subscriber<W>(level: &str, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .finish()
}
