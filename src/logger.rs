use std::io::{IsTerminal, Write};
use std::time::Instant;

use anstyle::Style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

use crate::theme::{self, Palette};

/// Level used when `RUST_LOG` is unset or unparsable
const DEFAULT_FILTER: LevelFilter = LevelFilter::Warn;

struct MarchLogger {
    file: Option<Mutex<std::fs::File>>,
    filter: LevelFilter,
    palette: Palette,
    start: Instant,
}

impl Log for MarchLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = self
            .palette
            .paint(level_style(record.level()), record.level().as_str());
        eprintln!("[{level}] {} - {}", record.target(), record.args());

        if let Some(ref file) = self.file {
            let elapsed = self.start.elapsed().as_secs_f64();
            let _ = writeln!(
                file.lock(),
                "[{elapsed:.3}s] [{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Parse a `RUST_LOG` style level, falling back to warnings only.
#[must_use]
pub fn parse_filter(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_FILTER)
}

/// Style used for a level tag on stderr.
#[must_use]
pub fn level_style(level: Level) -> Style {
    match level {
        Level::Error => theme::FAILURE,
        Level::Warn => theme::WARNING,
        Level::Info => theme::ACCENT,
        Level::Debug | Level::Trace => theme::DIM,
    }
}

/// Initialize the global logger, writing to stderr and optionally to `log_file`.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger was already installed.
pub fn init(log_file: Option<std::fs::File>) -> Result<(), SetLoggerError> {
    let filter = parse_filter(std::env::var("RUST_LOG").ok().as_deref());

    let logger = MarchLogger {
        file: log_file.map(Mutex::new),
        filter,
        palette: Palette::new(std::io::stderr().is_terminal()),
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}
