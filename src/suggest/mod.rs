//! Candidate-name suggestion.
//!
//! Two variants behind one trait: a content slug (always available) and an
//! external model command (used when configured). Both return a bare stem
//! without extension; the batch orchestrator re-attaches the source file's
//! extension and runs the result through the uniqueness resolver.

mod model;
mod slug;

pub use model::ModelSuggester;
pub use slug::{SlugSuggester, FALLBACK_STEM};

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

use crate::config::Config;
use crate::errors::RenamerError;

/// Produces a candidate filename stem for one file.
pub trait Suggester {
    fn suggest(&self, file: &Path) -> Result<String, RenamerError>;
}

/// Suggestion method exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestMethod {
    /// Slug built from the file's own content.
    #[default]
    Slugify,
    /// External model command emitting {"suggested_filename": ...} JSON.
    Model,
}

impl SuggestMethod {
    /// Parse common string names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "slugify" | "slug" | "content" => Some(SuggestMethod::Slugify),
            "model" | "llm" => Some(SuggestMethod::Model),
            _ => None,
        }
    }
}

impl fmt::Display for SuggestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SuggestMethod::Slugify => "slugify",
            SuggestMethod::Model => "model",
        };
        f.write_str(s)
    }
}

impl FromStr for SuggestMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid suggestion method: '{s}'"))
    }
}

/// Pick the suggester for a batch. The model variant needs a configured
/// command; without one we warn and fall back to the content slug so the
/// batch still runs.
pub fn suggester_for(cfg: &Config) -> Box<dyn Suggester> {
    match cfg.method {
        SuggestMethod::Model => match cfg.model_command.as_deref() {
            Some(cmd) if !cmd.trim().is_empty() => {
                Box::new(ModelSuggester::new(cmd, cfg.max_read_bytes))
            }
            _ => {
                warn!("model method requested but no model_command configured; using content slug");
                Box::new(SlugSuggester::from_config(cfg))
            }
        },
        SuggestMethod::Slugify => Box::new(SlugSuggester::from_config(cfg)),
    }
}
