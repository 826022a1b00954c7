//! Tracing setup for the `tax-rates` binary.
//!
//! Events go to stderr so that tables and calculation results on stdout can
//! be piped. A log file can be attached later with [`enable_file_logging`],
//! and the filter can be swapped at runtime with [`set_log_level`].

use std::{
    fs::File,
    io::{self, IsTerminal, LineWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info";

type SharedFile = Arc<Mutex<Option<LineWriter<File>>>>;

/// Handles kept after [`init_logging`] so the filter and file can change.
struct Handles {
    filter: reload::Handle<EnvFilter, Registry>,
    file: SharedFile,
}

static HANDLES: OnceLock<Handles> = OnceLock::new();

fn handles() -> Result<&'static Handles> {
    HANDLES
        .get()
        .ok_or_else(|| anyhow!("logging not yet initialized"))
}

/// `HH:MM:SS.mmm LEVEL target: fields`, dimmed and colored on a terminal.
struct CompactLocal;

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for CompactLocal
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
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");
        let target = meta.target().trim_start_matches("tax_rate_");

        if writer.has_ansi_escapes() {
            let color = level_color(meta.level());
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m {color}{:>5}\x1b[0m \x1b[2m{target}:\x1b[0m ",
                meta.level()
            )?;
        } else {
            write!(writer, "{time} {:>5} {target}: ", meta.level())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Writer over the optional log file; discards output while none is open.
struct FileSink(SharedFile);

struct FileSinkGuard<'a>(MutexGuard<'a, Option<LineWriter<File>>>);

impl Write for FileSinkGuard<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for FileSink {
    type Writer = FileSinkGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileSinkGuard(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// `level` wins over `RUST_LOG`, which wins over [`DEFAULT_FILTER`].
/// An unparsable `level` is ignored.
fn make_filter(level: Option<&str>) -> EnvFilter {
    level
        .and_then(|l| EnvFilter::try_new(l).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logging(level: Option<&str>) {
    let file: SharedFile = Arc::new(Mutex::new(None));
    let (filter, filter_handle) = reload::Layer::new(make_filter(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CompactLocal)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(CompactLocal)
        .with_ansi(false)
        .with_writer(FileSink(Arc::clone(&file)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();
    if installed {
        let _ = HANDLES.set(Handles {
            filter: filter_handle,
            file,
        });
    }
}

/// Replaces the active filter. Takes a bare level (`debug`) or any
/// `EnvFilter` directive (`tax_rate_core=trace,info`).
pub fn set_log_level(level: &str) -> Result<()> {
    let handles = handles()?;
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    handles
        .filter
        .reload(filter)
        .context("failed to reload log filter")
}

/// Appends log output to `path`, replacing any file opened earlier.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let handles = handles()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    *handles.file.lock().unwrap_or_else(PoisonError::into_inner) = Some(LineWriter::new(file));
    Ok(())
}
