//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - CLI flags override config values (which are loaded from XML if present).

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::suggest::SuggestMethod;

/// CLI wrapper for the ai_rename library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Suggest unique, content-derived filenames and optionally rename the files"
)]
pub struct Args {
    /// Files to process, in the order given.
    #[arg(value_name = "FILES", value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Suggestion method. One of: slugify, model.
    #[arg(short = 'm', long, help = "Suggestion method: slugify, model")]
    pub method: Option<String>,

    /// Rename files using the resolved suggestions instead of only printing them.
    #[arg(long, help = "Rename files using the resolved suggestions")]
    pub rename: bool,

    /// Override the model command (normally configured via XML).
    #[arg(
        long,
        value_name = "CMD",
        help = "Command run per file for --method model; the file path is appended"
    )]
    pub model_command: Option<String>,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(long, help = "Show what would be renamed, but do not modify files")]
    pub dry_run: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where ai_rename will look for the config file (or AI_RENAME_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by ai_rename and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Accepted for compatibility with the old GUI launcher; this binary is CLI-only.
    #[arg(long, hide = true)]
    pub cli: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(m) = self.method.as_deref().and_then(SuggestMethod::parse) {
            cfg.method = m;
        }
        if let Some(cmd) = &self.model_command {
            cfg.model_command = Some(cmd.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
