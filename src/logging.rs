//! Console and log file output
//!
//! Mutation lines (`Moved ...`, `Renaming: ...`, `Updated image refs in ...`)
//! are logged at `info` and built with [`mutation_line`]. The console copy may
//! carry terminal colours, the log file copy never does.

use anyhow::Result;
use chrono::SecondsFormat;
use colored::Colorize;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of every mutation line in a dry run
pub const DRY_RUN_PREFIX: &str = "[dry run] ";

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1B\[[0-9;]*m").expect("Failed to compile regex pattern for strip_colors")
});

/// Verbosity level for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only, selected by `--quiet`
    Error,
    Warning,
    /// Mutation lines and the run summary (default)
    Info,
    /// Pass boundaries and simulated moves
    Debug,
    /// Every visited node
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Level for the number of `-v` flags given
    pub fn from_occurrences(occurrences: u8) -> Self {
        match occurrences {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

fn stdout_is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Prefix a console line gets for its level
fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "error: ",
        Level::Warn => "warning: ",
        _ => "",
    }
}

/// Removes terminal colour sequences from a log line
pub fn strip_colors(line: &str) -> String {
    ANSI_ESCAPE.replace_all(line, "").into_owned()
}

/// Builds one mutation line, `[dry run] ` first when nothing is touched
///
/// `subject` is shown bold on a terminal.
pub fn mutation_line(dry_run: bool, action: &str, subject: &str) -> String {
    let prefix = if dry_run { DRY_RUN_PREFIX } else { "" };
    if stdout_is_terminal() {
        format!("{prefix}{action}{}", subject.bold())
    } else {
        format!("{prefix}{action}{subject}")
    }
}

/// Initialise the logger with the specified verbosity level
///
/// Lines always go to stdout, warnings and errors with a label. When
/// `log_file` is not empty they are also appended to that file with a
/// timestamp, level and target.
pub fn init_logger(verbosity: LogLevel, log_file: &str) -> Result<()> {
    let base_logger = Dispatch::new().level(verbosity.to_level_filter());

    let colors_line = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);
    let use_colors = stdout_is_terminal();

    let output_logger = Dispatch::new()
        .format(move |out, message, record| {
            let label = level_label(record.level());
            if use_colors {
                out.finish(format_args!(
                    "\x1B[{}m{label}{message}\x1B[0m",
                    colors_line.get_color(&record.level()).to_fg_str(),
                ))
            } else {
                out.finish(format_args!("{label}{message}"))
            }
        })
        .chain(std::io::stdout());

    if log_file.is_empty() {
        base_logger.chain(output_logger).apply()?;
    } else {
        let file_logger = Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                    record.level(),
                    record.target(),
                    strip_colors(&message.to_string())
                ))
            })
            .chain(fern::log_file(log_file)?);
        base_logger
            .chain(file_logger)
            .chain(output_logger)
            .apply()?;
    }

    log::debug!("Logging at {verbosity:?}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flags_raise_the_level() {
        assert_eq!(LogLevel::from_occurrences(0), LogLevel::Info);
        assert_eq!(LogLevel::from_occurrences(1), LogLevel::Debug);
        assert_eq!(LogLevel::from_occurrences(3), LogLevel::Trace);
        assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_mutation_line_marks_dry_runs() {
        let line = strip_colors(&mutation_line(true, "Moved about.html -> ", "about/index.html"));
        assert_eq!(line, "[dry run] Moved about.html -> about/index.html");

        let line = strip_colors(&mutation_line(false, "Renaming: ", "a.webp"));
        assert_eq!(line, "Renaming: a.webp");
    }

    #[test]
    fn test_strip_colors() {
        assert_eq!(
            strip_colors("Moved a.html -> \x1B[1ma/index.html\x1B[0m"),
            "Moved a.html -> a/index.html"
        );
        assert_eq!(strip_colors("plain"), "plain");
    }

    #[test]
    fn test_only_warnings_and_errors_are_labelled() {
        assert_eq!(level_label(Level::Error), "error: ");
        assert_eq!(level_label(Level::Warn), "warning: ");
        assert_eq!(level_label(Level::Info), "");
    }
}
