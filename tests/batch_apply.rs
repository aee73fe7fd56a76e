use ai_rename::batch::{apply_renames, RenamePlan};
use ai_rename::config::Config;
use ai_rename::errors::RenamerError;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn plan(source: &Path, new_name: &str) -> RenamePlan {
    RenamePlan {
        source: source.to_path_buf(),
        new_name: new_name.to_string(),
        new_path: source.with_file_name(new_name),
    }
}

#[test]
fn renames_and_preserves_content() {
    let td = tempdir().unwrap();
    let src = td.path().join("old.txt");
    fs::write(&src, "hello").unwrap();

    let outcomes = apply_renames(&Config::default(), vec![plan(&src, "new.txt")]);
    assert!(outcomes[0].result.is_ok());
    assert!(!src.exists());
    let content = fs::read_to_string(td.path().join("new.txt")).unwrap();
    assert_eq!(content, "hello");
}

#[test]
fn one_failure_does_not_block_the_rest() {
    let td = tempdir().unwrap();
    let missing = td.path().join("gone.txt");
    let good = td.path().join("good.txt");
    fs::write(&good, "x").unwrap();

    let outcomes = apply_renames(
        &Config::default(),
        vec![plan(&missing, "whatever.txt"), plan(&good, "kept.txt")],
    );
    assert!(matches!(
        outcomes[0].result,
        Err(RenamerError::SourceNotFound(_))
    ));
    assert!(outcomes[1].result.is_ok());
    assert!(td.path().join("kept.txt").exists());
}

#[test]
fn existing_destination_is_never_clobbered() {
    let td = tempdir().unwrap();
    let src = td.path().join("src.txt");
    let dest = td.path().join("taken.txt");
    fs::write(&src, "source").unwrap();
    fs::write(&dest, "precious").unwrap();

    let outcomes = apply_renames(&Config::default(), vec![plan(&src, "taken.txt")]);
    assert!(matches!(
        outcomes[0].result,
        Err(RenamerError::DestinationExists(_))
    ));
    assert!(src.exists());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "precious");
}

#[test]
fn noop_plan_leaves_the_file_alone() {
    let td = tempdir().unwrap();
    let src = td.path().join("same.txt");
    fs::write(&src, "x").unwrap();

    let outcomes = apply_renames(&Config::default(), vec![plan(&src, "same.txt")]);
    assert!(outcomes[0].result.is_ok());
    assert!(src.exists());
}

#[test]
fn dry_run_touches_nothing() {
    let td = tempdir().unwrap();
    let src = td.path().join("keepme.txt");
    fs::write(&src, "x").unwrap();

    let mut cfg = Config::default();
    cfg.dry_run = true;
    let outcomes = apply_renames(&cfg, vec![plan(&src, "would-be.txt")]);
    assert!(outcomes[0].result.is_ok());
    assert!(src.exists());
    assert!(!td.path().join("would-be.txt").exists());
}
