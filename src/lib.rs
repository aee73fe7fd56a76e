//! Core library for `ai_rename`.
//!
//! Contains the naming logic: config loading, candidate suggestion and the
//! uniqueness resolver that turns a suggested name into one guaranteed not to
//! collide with existing files or with names already picked earlier in the
//! same batch. Keep the library small and ergonomic: a Config type with
//! sensible defaults, a Suggester trait with two implementations, and pure
//! functions for resolution.

pub mod batch;
pub mod cli;
pub mod config;
pub mod errors;
pub mod output;
pub mod resolver;
pub mod shutdown;
pub mod suggest;

pub use batch::{apply_renames, plan_batch, RenameOutcome, RenamePlan};
pub use config::{default_config_path, Config, LogLevel};
pub use errors::RenamerError;
pub use resolver::{resolve_unique, ClaimedNames, MAX_REGEN_ATTEMPTS};
pub use suggest::{suggester_for, SuggestMethod, Suggester};
