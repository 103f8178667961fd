//! Log output for the proxy process.
//!
//! Two fmt layers share one `EnvFilter`:
//! - the application layer renders everything except this library;
//! - the library layer renders `gloo_ai_service` events with RFC3339 UTC
//!   timestamps and source locations, plus a close event (with `time.busy`)
//!   for each `gloo_token`, `gloo_message` and `gloo_completion` span, which
//!   gives the latency of every upstream call.

use std::io::{self, IsTerminal};

use tracing::{Level, Metadata};
use tracing_subscriber::{
    EnvFilter, Layer, filter,
    fmt::{self, format::FmtSpan, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
};

/// Target prefix of every event and span emitted by this library.
pub const TARGET_PREFIX: &str = "gloo_ai_service";

fn from_this_library(meta: &Metadata<'_>) -> bool {
    meta.target().starts_with(TARGET_PREFIX)
}

/// `2025-09-12T10:20:30Z`
#[derive(Clone, Copy, Debug, Default)]
struct UtcSeconds;

impl FormatTime for UtcSeconds {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&now)
    }
}

/// Layer for Gloo calls only. Other targets are left to the caller's layers.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .compact()
        .with_timer(UtcSeconds)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter::filter_fn(from_this_library))
}

/// `RUST_LOG` when set and non-empty, else `default`, with this library
/// pinned to `library_level`.
pub fn env_filter(default: &str, library_level: Level) -> EnvFilter {
    let base = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    EnvFilter::new(filter_directives(&base, library_level))
}

fn filter_directives(base: &str, library_level: Level) -> String {
    format!(
        "{base},{TARGET_PREFIX}={}",
        library_level.as_str().to_ascii_lowercase()
    )
}

/// Installs the global subscriber: shared filter, application layer and
/// the Gloo layer.
///
/// # Errors
/// Fails if a global subscriber is already set.
pub fn init(default: &str, library_level: Level) -> Result<(), TryInitError> {
    let app_layer = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| !from_this_library(meta)));

    tracing_subscriber::registry()
        .with(env_filter(default, library_level))
        .with(app_layer)
        .with(layer())
        .try_init()
}
