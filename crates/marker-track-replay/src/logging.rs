/*!
Logging (and optional profiling) setup for the replay binary.

- Without the `profiling` feature: a `tracing-subscriber` fmt layer filtered by
  `RUST_LOG`, with a sensible default when the variable is unset.
- With the `profiling` feature: the same fmt layer plus, when `--trace-file` is
  given, a `tracing-chrome` layer. Scopes recorded through the `profiling` crate
  end up in that trace.
*/

use crate::Settings;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Keeps the trace file open; flushes it when dropped at the end of `main`
pub struct LoggingGuard {
    #[cfg(feature = "profiling")]
    _chrome: Option<tracing_chrome::FlushGuard>,
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new("info,marker_track_lib=debug,marker_track_replay=debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Install the global subscriber. Must run before anything logs.
#[cfg(not(feature = "profiling"))]
pub fn setup_logging(_settings: &Settings) -> LoggingGuard {
    // Logs go to stderr so `--json` output on stdout stays machine readable
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(default_filter());
    tracing_subscriber::registry().with(fmt_layer).init();
    LoggingGuard {}
}

/// Install the global subscriber. Must run before anything logs.
#[cfg(feature = "profiling")]
pub fn setup_logging(settings: &Settings) -> LoggingGuard {
    use tracing_chrome::ChromeLayerBuilder;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(default_filter());

    let (chrome_layer, guard) = match &settings.trace_file {
        Some(path) => {
            let (layer, guard) = ChromeLayerBuilder::new()
                .file(path.clone())
                .include_args(true)
                .build();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(chrome_layer)
        .with(fmt_layer)
        .init();

    if let Some(path) = &settings.trace_file {
        tracing::info!("Recording Chrome trace to {}", path.display());
    }

    LoggingGuard { _chrome: guard }
}

/// Log the program name and version
pub fn log_version_info() {
    tracing::info!(
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
}
