//! Run logging: one pipe-separated `key=value` line per event.
//!
//! ```text
//! 2026-03-01 12:00:00 | INFO | scout::research | event=start | query="rust agents" | k=3
//! ```
//!
//! Lines go to stderr and to a daily-rotated file under the configured log
//! directory. The filter comes from `RUST_LOG` when set, otherwise from
//! [`LogConfig::filter`].

use crate::config::LogConfig;
use crate::error::{Result, ScoutError};
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Maximum characters of an error message written to a log field.
pub const MAX_LOGGED_ERROR_CHARS: usize = 120;
/// Maximum characters of a page or result title written to a log field.
pub const MAX_LOGGED_TITLE_CHARS: usize = 80;

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole process.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.dir)?;
    let appender = tracing_appender::rolling::daily(&config.dir, &config.file_prefix);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(PipeFormat)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(PipeFormat)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| ScoutError::Config(format!("cannot install log subscriber: {e}")))?;

    Ok(guard)
}

/// Truncate `text` to at most `max_chars` characters for a log field.
pub fn truncate_for_log(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Event formatter producing `{ts} | {LEVEL} | {target} | key=value ...`.
///
/// The event message is rendered as `event=<message>`; string fields are
/// quoted and escaped, everything else uses its `Debug` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeFormat;

impl<S, N> FormatEvent<S, N> for PipeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} | {} | {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            meta.level(),
            meta.target()
        )?;

        let mut visitor = PipeVisitor::default();
        event.record(&mut visitor);
        writer.write_str(&visitor.line)?;
        writeln!(writer)
    }
}

#[derive(Default)]
struct PipeVisitor {
    line: String,
}

impl PipeVisitor {
    fn push(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        let key = match field.name() {
            "message" => "event",
            name => name,
        };
        // Writing into a String cannot fail.
        let _ = write!(self.line, " | {key}={value}");
    }
}

impl Visit for PipeVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.push(field, format_args!("{value}"));
        } else {
            self.push(field, format_args!("{value:?}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format_args!("{value:?}"));
    }
}
