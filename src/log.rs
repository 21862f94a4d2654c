//! Program logging.
//!
//! Progress messages are printed to stdout and warnings and errors to stderr. For a run, the same
//! messages are also saved in two files in the output folder: one for everything at info level or
//! above and one for warnings and errors only. HiGHS writes its own output to the console directly.
use anyhow::{Context, Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Level, LevelFilter, Record};
use std::env;
use std::fmt::Arguments;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::OnceLock;

/// Set once the global logger has been installed
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The log level used if neither the environment nor the settings file give one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The environment variable used to override the log level
pub const LOG_LEVEL_ENV_VAR: &str = "YAPOS_LOG_LEVEL";

/// Log file for messages about the ordinary progress of a run
const INFO_LOG_FILE_NAME: &str = "yapos_info.log";

/// Log file for warnings and errors
const ERROR_LOG_FILE_NAME: &str = "yapos_error.log";

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Convert a log level name (case insensitive) to a [`LevelFilter`]
pub fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    let level = match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    };

    Ok(level)
}

/// Choose the log level, preferring `YAPOS_LOG_LEVEL` over the value from settings
fn resolve_log_level(log_level_from_settings: &str) -> Result<LevelFilter> {
    match env::var(LOG_LEVEL_ENV_VAR) {
        Ok(log_level) => parse_log_level(&log_level)
            .with_context(|| format!("Invalid value for {LOG_LEVEL_ENV_VAR}")),
        Err(_) => parse_log_level(log_level_from_settings),
    }
}

/// Warnings and errors are routed separately from other messages
fn is_problem(level: Level) -> bool {
    level <= Level::Warn
}

/// A formatter producing lines like `[12:00:00 INFO yapos::simulation] message`.
///
/// The level is coloured if `colours` is given.
fn formatter(
    colours: Option<ColoredLevelConfig>,
) -> impl Fn(FormatCallback, &Arguments, &Record) + Sync + Send + 'static {
    move |out, message, record| {
        let timestamp = Local::now().format("%H:%M:%S");
        let target = record.target();
        match colours {
            Some(colours) => out.finish(format_args!(
                "[{timestamp} {} {target}] {message}",
                colours.color(record.level())
            )),
            None => out.finish(format_args!(
                "[{timestamp} {} {target}] {message}",
                record.level()
            )),
        }
    }
}

/// Colours for the level names, if the stream is a terminal
fn colours_for(is_terminal: bool) -> Option<ColoredLevelConfig> {
    is_terminal.then(|| {
        ColoredLevelConfig::new()
            .error(Color::Red)
            .warn(Color::Yellow)
            .info(Color::Green)
            .debug(Color::Blue)
            .trace(Color::Magenta)
    })
}

/// Console output: problems to stderr, everything else to stdout
fn console_dispatch(level: LevelFilter) -> Dispatch {
    let stdout = Dispatch::new()
        .filter(|metadata| !is_problem(metadata.level()))
        .format(formatter(colours_for(io::stdout().is_terminal())))
        .chain(io::stdout());
    let stderr = Dispatch::new()
        .filter(|metadata| is_problem(metadata.level()))
        .format(formatter(colours_for(io::stderr().is_terminal())))
        .chain(io::stderr());

    Dispatch::new().level(level).chain(stdout).chain(stderr)
}

/// Log files in `log_dir`.
///
/// The info file records progress messages even if the console level is quieter.
fn file_dispatch(log_dir: &Path, level: LevelFilter) -> Result<Dispatch> {
    let create = |file_name: &str| {
        let file_path = log_dir.join(file_name);
        File::create(&file_path)
            .with_context(|| format!("Could not create log file {}", file_path.display()))
    };

    let info = Dispatch::new()
        .filter(|metadata| !is_problem(metadata.level()))
        .level(level.max(LevelFilter::Info))
        .chain(create(INFO_LOG_FILE_NAME)?);
    let errors = Dispatch::new()
        .level(LevelFilter::Warn)
        .chain(create(ERROR_LOG_FILE_NAME)?);

    Ok(Dispatch::new().format(formatter(None)).chain(info).chain(errors))
}

/// Install the program logger.
///
/// Only the first call has any effect.
///
/// # Arguments
///
/// * `log_level_from_settings`: Level to use if `YAPOS_LOG_LEVEL` is not set
/// * `log_dir`: Folder for log files, if they should be written
pub fn init(log_level_from_settings: &str, log_dir: Option<&Path>) -> Result<()> {
    if is_logger_initialised() {
        return Ok(());
    }

    let level = resolve_log_level(log_level_from_settings)?;
    let mut dispatch = Dispatch::new().chain(console_dispatch(level));
    if let Some(log_dir) = log_dir {
        dispatch = dispatch.chain(file_dispatch(log_dir, level)?);
    }
    dispatch.apply()?;

    LOGGER_INIT.get_or_init(|| ());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    #[case("off", LevelFilter::Off)]
    #[case("error", LevelFilter::Error)]
    #[case("WARN", LevelFilter::Warn)]
    #[case("Info", LevelFilter::Info)]
    #[case("debug", LevelFilter::Debug)]
    #[case("trace", LevelFilter::Trace)]
    fn test_parse_log_level(#[case] input: &str, #[case] expected: LevelFilter) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_log_level_unknown() {
        assert!(parse_log_level("verbose").is_err());
    }

    #[rstest]
    #[case(Level::Error, true)]
    #[case(Level::Warn, true)]
    #[case(Level::Info, false)]
    #[case(Level::Trace, false)]
    fn test_is_problem(#[case] level: Level, #[case] expected: bool) {
        assert_eq!(is_problem(level), expected);
    }

    #[test]
    fn test_file_dispatch_creates_log_files() {
        let dir = tempdir().unwrap();
        file_dispatch(dir.path(), LevelFilter::Warn).unwrap();
        assert!(dir.path().join(INFO_LOG_FILE_NAME).is_file());
        assert!(dir.path().join(ERROR_LOG_FILE_NAME).is_file());
    }

    #[test]
    fn test_file_dispatch_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(file_dispatch(&dir.path().join("missing"), LevelFilter::Info).is_err());
    }
}
