//! Log stream setup.
//!
//! Every event is one `<timestamp> - <level> - <message>` line, written
//! simultaneously to the console and to an append-only log file in the
//! working directory.

use std::path::Path;

use tracing::{Event, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Name of the log file created in the working directory.
pub const LOG_FILE_NAME: &str = "downsort.log";

/// Renders `2026-08-30 14:30:52 - INFO - Moved: photo.png -> Images/`.
#[derive(Clone)]
struct PlainLine;

impl<S, N> FormatEvent<S, N> for PlainLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(writer, "{} - {} - ", timestamp, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the global subscriber: one console layer, one file layer.
///
/// When the log file cannot be opened the console layer still runs, with a
/// one-line warning on stderr.
pub fn init(log_dir: &Path) {
    let file_layer = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
    {
        Ok(appender) => Some(
            fmt::layer()
                .event_format(PlainLine)
                .with_ansi(false)
                .with_writer(appender),
        ),
        Err(e) => {
            eprintln!("Warning: could not open log file: {}", e);
            None
        }
    };

    let console_layer = fmt::layer()
        .event_format(PlainLine)
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(console_layer)
        .with(file_layer)
        .init();
}
