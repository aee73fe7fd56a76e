//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a template on first run (unless AI_RENAME_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; flag precedence over the
//!   loaded values is applied by the CLI layer.
//! - Unknown XML fields are a hard parse error (serde deny_unknown_fields)
//!   so typos surface instead of silently falling back to defaults.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{CONFIG_ENV, MAX_READ_BYTES_DEFAULT, SLUG_MAX_WORDS_DEFAULT};
use crate::suggest::SuggestMethod;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    method: Option<String>,
    model_command: Option<String>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    max_read_bytes: Option<usize>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    slug_max_words: Option<usize>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Custom deserializer that trims surrounding whitespace for optional usize
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<usize>().ok()))
}

fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(s) = parsed.method.as_deref()
        && let Ok(m) = s.trim().parse::<SuggestMethod>()
    {
        cfg.method = m;
    }
    if let Some(s) = parsed.model_command.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.model_command = Some(trimmed.to_string());
        }
    }
    if let Some(n) = parsed.max_read_bytes
        && n > 0
    {
        cfg.max_read_bytes = n;
    }
    if let Some(n) = parsed.slug_max_words
        && n > 0
    {
        cfg.slug_max_words = n;
    }
    if let Some(s) = parsed.log_level.as_deref()
        && let Ok(level) = s.trim().parse::<LogLevel>()
    {
        cfg.log_level = level;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    cfg
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the effective Config: AI_RENAME_CONFIG if set (must parse), else the
/// platform default path if a file exists there, else built-in defaults.
pub fn load_config() -> Result<Config> {
    let path = default_config_path()?;
    if path.exists() {
        return load_config_from_xml_path(&path);
    }
    if env::var_os(CONFIG_ENV).is_some() {
        // An explicit path that is missing is a user mistake, not a first run.
        anyhow::bail!("{CONFIG_ENV} points at '{}' but no file exists there", path.display());
    }
    Ok(Config::default())
}

/// Create default template config file and parent directory (best-effort
/// conservative permissions on Unix: dir 0700, file 0600).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        anyhow::bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/ai_rename.log".into());

    let content = format!(
        "<!--\n  ai_rename configuration (XML)\n\n  Fields:\n    method          -> slugify | model\n    model_command   -> command run per file for method=model; the file path is\n                       appended as the last argument and stdout is scanned for\n                       {{\"suggested_filename\": \"...\"}}\n    max_read_bytes  -> how much of each file the slug suggester reads\n    slug_max_words  -> how many words the content slug keeps\n    log_level       -> quiet | normal | info | debug\n    log_file        -> path to log file (optional; stdout/stderr still used)\n\n  Notes:\n    - CLI flags override XML values.\n-->\n<config>\n  <method>slugify</method>\n  <model_command></model_command>\n  <max_read_bytes>{}</max_read_bytes>\n  <slug_max_words>{}</slug_max_words>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        MAX_READ_BYTES_DEFAULT, SLUG_MAX_WORDS_DEFAULT, suggested_log
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create default config if AI_RENAME_CONFIG not set; return the created path
/// so the CLI can inform the user.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        return None;
    }

    let cfg_path = default_config_path().ok()?;
    if cfg_path.exists() {
        return None;
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Some(cfg_path),
        Err(e) => {
            eprintln!(
                "Failed to create template config at {}: {}",
                cfg_path.display(),
                e
            );
            None
        }
    }
}
