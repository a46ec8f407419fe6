use log::info;
use mixchord_traits::{ChordError, ChordResult};
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

/// Where terminal log lines go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalOutput {
    /// Errors to stderr, everything else to stdout.
    #[default]
    Mixed,
    Stdout,
    /// Keeps stdout free for program output.
    Stderr,
}

impl From<TerminalOutput> for TerminalMode {
    fn from(value: TerminalOutput) -> Self {
        match value {
            TerminalOutput::Mixed => TerminalMode::Mixed,
            TerminalOutput::Stdout => TerminalMode::Stdout,
            TerminalOutput::Stderr => TerminalMode::Stderr,
        }
    }
}

/// Logging section of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace.
    pub level: String,
    /// Print to the terminal.
    pub text_log: bool,
    pub terminal: TerminalOutput,
    /// Also write every line to this file, truncated at startup.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            text_log: true,
            terminal: TerminalOutput::default(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> ChordResult<LevelFilter> {
        LevelFilter::from_str(self.level.trim())
            .map_err(|_| ChordError::Logger(format!("unknown log level '{}'", self.level)))
    }
}

/// What [`basic_mixchord_setup`] ended up installing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixChordContext {
    pub level: LevelFilter,
    /// `None` when nothing is printed to the terminal.
    pub terminal: Option<TerminalOutput>,
    pub log_file: Option<PathBuf>,
}

/// This is a basic setup for a mixchord application to get you started.
/// Duplicate and customize as needed when your needs grow.
///
/// It installs the global logger once per process: a terminal logger when
/// `text_log` is set and a file logger when `file` is given. With neither,
/// log lines are simply dropped.
pub fn basic_mixchord_setup(logging: &LoggingConfig) -> ChordResult<MixChordContext> {
    let level = logging.level_filter()?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if logging.text_log {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            logging.terminal.into(),
            ColorChoice::Auto,
        ));
    }
    if let Some(path) = &logging.file {
        let file = File::create(path).map_err(|e| ChordError::io(path, e))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    if !loggers.is_empty() {
        CombinedLogger::init(loggers).map_err(|e| ChordError::Logger(e.to_string()))?;
        info!("Logging at level {level}");
    }
    Ok(MixChordContext {
        level,
        terminal: logging.text_log.then_some(logging.terminal),
        log_file: logging.file.clone(),
    })
}
