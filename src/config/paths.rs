//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors
//! before the program writes anywhere.

use anyhow::{Context, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Config file path: AI_RENAME_CONFIG if set, else the OS config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(p));
    }
    if let Some(mut base) = config_dir() {
        base.push("ai_rename");
        base.push("config.xml");
        return Ok(base);
    }
    let home = env::var("HOME").context("neither a config dir nor HOME is available")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("ai_rename")
        .join("config.xml"))
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Result<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push("ai_rename");
        base.push("ai_rename.log");
        return Ok(base);
    }
    let home = env::var("HOME").context("neither a data dir nor HOME is available")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("ai_rename")
        .join("ai_rename.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
