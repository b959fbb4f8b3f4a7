//! Structured JSON logging to stderr.
//!
//! Each record is one JSON object per line:
//!
//! ```json
//! {"level":"warn","msg":"rejected conference filter: ...","target":"conf_query::filter::format","ts":"2025-01-16T10:30:00.000Z"}
//! ```

use log::{LevelFilter, Log, Metadata, Record};
use miniserde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// Environment variable selecting the log level.
pub const LOG_ENV: &str = "CONFQ_LOG";

#[derive(Serialize)]
struct LogLine {
    level: String,
    msg: String,
    target: String,
    ts: String,
}

#[derive(Debug)]
struct JsonLogger {
    level: LevelFilter,
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        // Logging must never fail the command
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn format_line(record: &Record<'_>) -> String {
    let line = LogLine {
        level: record.level().as_str().to_lowercase(),
        msg: record.args().to_string(),
        target: record.target().to_string(),
        ts: chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string(),
    };
    miniserde::json::to_string(&line)
}

/// Pick the level: `--verbose`, then `CONFQ_LOG`, then the config file, then `warn`.
pub fn resolve_level(verbose: bool, env: Option<&str>, config: Option<&str>) -> LevelFilter {
    if verbose {
        return LevelFilter::Debug;
    }
    env.into_iter()
        .chain(config)
        .find_map(|s| LevelFilter::from_str(s.trim()).ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install the JSON logger. Later calls are ignored.
pub fn init(level: LevelFilter) {
    if log::set_boxed_logger(Box::new(JsonLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}
