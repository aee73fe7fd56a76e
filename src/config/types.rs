//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{paths, MAX_READ_BYTES_DEFAULT, SLUG_MAX_WORDS_DEFAULT};
use crate::suggest::SuggestMethod;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the renamer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which suggester to use for the batch
    pub method: SuggestMethod,
    /// External command for the model suggester (file path appended)
    pub model_command: Option<String>,
    /// How much of each file the slug suggester reads
    pub max_read_bytes: usize,
    /// How many words the content slug keeps
    pub slug_max_words: usize,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, print actions but do not modify the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: SuggestMethod::Slugify,
            model_command: None,
            max_read_bytes: MAX_READ_BYTES_DEFAULT,
            slug_max_words: SLUG_MAX_WORDS_DEFAULT,
            log_level: LogLevel::Normal,
            // paths::default_log_path() returns Result<PathBuf>; store Some(path) on success.
            log_file: paths::default_log_path().ok(),
            dry_run: false,
        }
    }
}
