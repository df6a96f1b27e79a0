//! Logging options and the tracing sink they configure.
//!
//! `--log-file` and `--log-level` are plain options bound through the core,
//! so they parse, reset and render like any other option. The sink is only
//! set up after a successful parse.

use crate::schema::Opt;
use crate::value::{Enum, Str};
use std::fs::File;
use std::io;
use std::str::FromStr;
use std::sync::Mutex;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Errors that can occur while installing the log sink.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("error opening log file {path:?}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Log verbosity, selected with `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Disable logging entirely.
    None,
}

impl LogLevel {
    /// The key mapping used by the `--log-level` enum binding.
    pub fn mapping() -> [(&'static str, LogLevel); 5] {
        [
            ("debug", LogLevel::Debug),
            ("info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            ("error", LogLevel::Error),
            ("none", LogLevel::None),
        ]
    }

    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::None => LevelFilter::OFF,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::mapping()
            .into_iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, level)| level)
            .ok_or_else(|| format!("bad log level {s:?}"))
    }
}

/// Where and how much to log.
///
/// `file` is a path, `err`/`stderr`, `out`/`stdout`, or empty for no
/// logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub file: String,
    pub level: LogLevel,
}

impl LogSettings {
    /// The `--log-file` and `--log-level` options, bound to these settings.
    pub fn options(&mut self) -> [Opt<'_>; 2] {
        let Self { file, level } = self;
        [
            Opt::new("log-file", Str::new(file)).description("Set the logging output file"),
            Opt::new("log-level", Enum::new(level, LogLevel::mapping()))
                .description("Set the logging level"),
        ]
    }
}

/// Install a JSON tracing subscriber for `settings`.
///
/// Returns `Ok(false)` when the settings ask for no logging.
pub fn init(settings: &LogSettings) -> Result<bool, LogError> {
    let Some(writer) = make_writer(settings)? else {
        return Ok(false);
    };
    tracing_subscriber::fmt()
        .json()
        .with_max_level(settings.level.filter())
        .with_writer(writer)
        .try_init()
        .map_err(|err| LogError::Install(err.to_string()))?;
    Ok(true)
}

fn make_writer(settings: &LogSettings) -> Result<Option<BoxMakeWriter>, LogError> {
    if settings.level == LogLevel::None {
        return Ok(None);
    }
    let writer = match settings.file.as_str() {
        "" => return Ok(None),
        "err" | "stderr" => BoxMakeWriter::new(io::stderr),
        "out" | "stdout" => BoxMakeWriter::new(io::stdout),
        path => {
            let file = File::create(path).map_err(|source| LogError::Open {
                path: path.to_string(),
                source,
            })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };
    Ok(Some(writer))
}
