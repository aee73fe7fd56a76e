//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! plans the batch and prints or applies the resolved renames.

use anyhow::{bail, Result};
use tracing::{debug, error, info};

use ai_rename::config::xml::load_config;
use ai_rename::config::{default_config_path, ensure_default_config_exists, CONFIG_ENV};
use ai_rename::output as out;
use ai_rename::{apply_renames, plan_batch, shutdown, suggester_for};

use ai_rename::cli::Args;

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
            out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
            return Ok(());
        }
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("Default ai_rename config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info("No config file exists there yet. Run without --print-config to create a template.");
                }
            }
            Err(e) => {
                out::print_error(&format!("Could not determine a default config path: {e}"));
            }
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init)
    if let Some(path) = ensure_default_config_exists() {
        out::print_success(&format!(
            "A template ai_rename config was written to: {}",
            path.display()
        ));
        out::print_info(
            "Edit the file to pick a `method` (and a `model_command` for method=model), then re-run this command.",
        );
        if args.files.is_empty() {
            return Ok(());
        }
    }

    // Build config from XML, then let CLI flags win.
    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    ctrlc::set_handler(|| {
        shutdown::request();
        out::print_warn("Received interrupt; finishing the current file then stopping...");
    })
    .expect("failed to install signal handler");

    if args.files.is_empty() {
        bail!("No files given. Pass one or more paths to get suggestions for.");
    }

    debug!("Starting ai_rename: {:?}", args);

    let suggester = suggester_for(&cfg);
    let batch = plan_batch(&args.files, suggester.as_ref());

    for plan in &batch.plans {
        out::print_suggestion(&plan.source, &plan.new_name);
    }
    for (path, err) in &batch.failures {
        error!(code = err.code(), path = %path.display(), "could not plan a rename");
        out::print_error(&format!("{}: {}", path.display(), err));
    }

    let mut failed = batch.failures.len();

    if args.rename {
        let outcomes = apply_renames(&cfg, batch.plans);
        let mut renamed = 0usize;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(()) => {
                    if !outcome.plan.is_noop() && !cfg.dry_run {
                        renamed += 1;
                    }
                }
                Err(e) => {
                    failed += 1;
                    out::print_error(&format!(
                        "Failed to rename {}: {}",
                        outcome.plan.source.display(),
                        e
                    ));
                }
            }
        }
        info!(renamed, failed, total = outcomes.len(), "batch finished");
        if !cfg.dry_run {
            out::print_success(&format!("Renamed {renamed} of {} file(s).", outcomes.len()));
        }
    }

    if failed > 0 {
        bail!("{failed} file(s) could not be processed");
    }
    Ok(())
}
