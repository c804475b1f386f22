//! Stderr logger for the CLI.
//!
//! Backend crates log through the `log` facade. The CLI installs this logger
//! so toolchain warnings (stderr of a successful `dot` run) reach the user.

use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes log records to stderr with a colored level tag.
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}: {}", level_tag(record.level()), record.args());
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> colored::ColoredString {
    match level {
        Level::Error => "error".red(),
        Level::Warn => "warning".yellow(),
        Level::Info => "info".green(),
        Level::Debug => "debug".cyan(),
        Level::Trace => "trace".dimmed(),
    }
}

/// Level filter for the given verbosity flags. `--verbose` wins over `--quiet`.
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    }
}

/// Installs the stderr logger. Later calls are ignored.
pub fn init(level: LevelFilter) {
    if log::set_boxed_logger(Box::new(StderrLogger::new(level))).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(false, false), LevelFilter::Warn);
        assert_eq!(level_for(false, true), LevelFilter::Error);
        assert_eq!(level_for(true, true), LevelFilter::Debug);
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = StderrLogger::new(LevelFilter::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }
}
