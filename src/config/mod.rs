//! Config module.
//! Provides configuration types, default paths, XML loading, and the
//! first-run template. Re-exports keep the public API flat for callers.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, ensure_default_config_exists, load_config_from_xml_path};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "AI_RENAME_CONFIG";

/// Defaults shared across submodules.
pub const MAX_READ_BYTES_DEFAULT: usize = 2048;
pub const SLUG_MAX_WORDS_DEFAULT: usize = 6;
