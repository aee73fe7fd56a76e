//! Batch orchestration: suggest, resolve, rename.
//!
//! Files are processed strictly in caller order because each resolution
//! depends on the names chosen for earlier files: one ClaimedNames set per
//! target directory, seeded from the directory listing and grown as plans
//! are finalized. Per-file failures are collected, never aborting the rest
//! of the batch.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::RenamerError;
use crate::resolver::{resolve_unique, ClaimedNames};
use crate::shutdown;
use crate::suggest::{Suggester, FALLBACK_STEM};

/// One planned rename: where the file is now and where it should end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub source: PathBuf,
    /// Final unique name, extension included.
    pub new_name: String,
    pub new_path: PathBuf,
}

impl RenamePlan {
    /// True when the suggestion matched the file's current name.
    pub fn is_noop(&self) -> bool {
        self.new_path == self.source
    }
}

/// Result of planning a whole batch: the renames to perform plus the files
/// that could not be planned at all.
#[derive(Debug, Default)]
pub struct BatchPlan {
    pub plans: Vec<RenamePlan>,
    pub failures: Vec<(PathBuf, RenamerError)>,
}

/// Result of applying one plan.
#[derive(Debug)]
pub struct RenameOutcome {
    pub plan: RenamePlan,
    pub result: Result<(), RenamerError>,
}

fn attach_ext(stem: &str, ext: Option<&str>) -> String {
    match ext {
        Some(e) => format!("{stem}.{e}"),
        None => stem.to_string(),
    }
}

/// Suggest a stem for `source`, degrading to FALLBACK_STEM when the
/// suggester fails so a candidate always exists.
fn initial_stem(suggester: &dyn Suggester, source: &Path) -> String {
    match suggester.suggest(source) {
        Ok(stem) if !stem.is_empty() => stem,
        Ok(_) => FALLBACK_STEM.to_string(),
        Err(e) => {
            warn!(code = e.code(), file = %source.display(), error = %e, "suggestion failed; using fallback stem");
            FALLBACK_STEM.to_string()
        }
    }
}

/// Plan new names for `files` in the given order.
///
/// Each file keeps its extension; the suggested stem goes through the
/// uniqueness resolver against the running claimed set of its directory.
/// A suggestion equal to the file's current name is accepted as a no-op
/// (the file already has the name it would be given).
pub fn plan_batch(files: &[PathBuf], suggester: &dyn Suggester) -> BatchPlan {
    let mut out = BatchPlan::default();
    // One claimed set per directory, seeded lazily on first use.
    let mut claims: HashMap<PathBuf, ClaimedNames> = HashMap::new();

    for source in files {
        if shutdown::is_requested() {
            out.failures
                .push((source.clone(), RenamerError::Interrupted));
            continue;
        }

        let meta = match fs::symlink_metadata(source) {
            Ok(m) => m,
            Err(_) => {
                out.failures
                    .push((source.clone(), RenamerError::SourceNotFound(source.clone())));
                continue;
            }
        };
        if !meta.is_file() {
            out.failures
                .push((source.clone(), RenamerError::NotAFile(source.clone())));
            continue;
        }

        let dir = source
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let claimed = claims.entry(dir.clone()).or_insert_with(|| {
            let mut set = ClaimedNames::host_default();
            if let Err(e) = set.seed_from_dir(&dir) {
                warn!(dir = %dir.display(), error = %e, "could not list directory; uniqueness limited to this batch");
            }
            set
        });

        let ext = source.extension().and_then(|e| e.to_str());
        let current_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let candidate = attach_ext(&initial_stem(suggester, source), ext);

        let final_name = if candidate == current_name {
            // Suggestion matches what the file is already called.
            candidate
        } else {
            resolve_unique(&candidate, claimed, || {
                suggester
                    .suggest(source)
                    .ok()
                    .filter(|stem| !stem.is_empty())
                    .map(|stem| attach_ext(&stem, ext))
            })
        };

        claimed.insert(&final_name);
        let new_path = dir.join(&final_name);
        debug!(source = %source.display(), new_name = %final_name, "planned rename");
        out.plans.push(RenamePlan {
            source: source.clone(),
            new_name: final_name,
            new_path,
        });
    }

    out
}

/// Perform the planned renames, in order. Failures are recorded per file and
/// the batch keeps going; only a user interrupt stops early (remaining plans
/// are marked Interrupted).
pub fn apply_renames(cfg: &Config, plans: Vec<RenamePlan>) -> Vec<RenameOutcome> {
    let mut outcomes = Vec::with_capacity(plans.len());
    let mut interrupted = false;

    for plan in plans {
        if interrupted || shutdown::is_requested() {
            interrupted = true;
            outcomes.push(RenameOutcome {
                plan,
                result: Err(RenamerError::Interrupted),
            });
            continue;
        }

        let result = apply_one(cfg, &plan);
        if let Err(e) = &result {
            warn!(code = e.code(), source = %plan.source.display(), error = %e, "rename failed");
        }
        outcomes.push(RenameOutcome { plan, result });
    }

    outcomes
}

fn apply_one(cfg: &Config, plan: &RenamePlan) -> Result<(), RenamerError> {
    if plan.is_noop() {
        info!(path = %plan.source.display(), "name unchanged; nothing to do");
        return Ok(());
    }
    if cfg.dry_run {
        info!(src = %plan.source.display(), dest = %plan.new_path.display(), "dry-run: would rename");
        return Ok(());
    }

    if !plan.source.exists() {
        return Err(RenamerError::SourceNotFound(plan.source.clone()));
    }
    // std::fs::rename clobbers an existing destination on Unix; the plan's
    // uniqueness guarantee only covered planning time, so re-check here.
    if plan.new_path.exists() {
        return Err(RenamerError::DestinationExists(plan.new_path.clone()));
    }

    fs::rename(&plan.source, &plan.new_path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RenamerError::SourceNotFound(plan.source.clone()),
        std::io::ErrorKind::PermissionDenied => RenamerError::PermissionDenied {
            path: plan.source.clone(),
            context: e.to_string(),
        },
        std::io::ErrorKind::AlreadyExists => RenamerError::DestinationExists(plan.new_path.clone()),
        _ => RenamerError::PermissionDenied {
            path: plan.source.clone(),
            context: e.to_string(),
        },
    })?;

    info!(src = %plan.source.display(), dest = %plan.new_path.display(), "renamed");
    Ok(())
}
