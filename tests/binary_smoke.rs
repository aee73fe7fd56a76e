use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn help_mentions_the_method_flag() {
    let output = Command::cargo_bin("ai_rename")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--method"));
    assert!(stdout.contains("--rename"));
}

#[test]
fn print_config_shows_explicit_env_path() {
    let td = TempDir::new().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config></config>").unwrap();

    let output = Command::cargo_bin("ai_rename")
        .unwrap()
        .env("AI_RENAME_CONFIG", &cfg)
        .arg("--print-config")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&cfg.display().to_string()));
}

#[test]
fn no_files_is_an_error() {
    let td = TempDir::new().unwrap();
    let cfg = td.path().join("config.xml");
    let log = td.path().join("test.log");
    fs::write(
        &cfg,
        format!(
            "<config>\n  <log_level>quiet</log_level>\n  <log_file>{}</log_file>\n</config>\n",
            log.display()
        ),
    )
    .unwrap();

    let output = Command::cargo_bin("ai_rename")
        .unwrap()
        .env("AI_RENAME_CONFIG", &cfg)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No files given"));
}

#[test]
fn explicit_missing_config_path_is_an_error() {
    let td = TempDir::new().unwrap();
    let output = Command::cargo_bin("ai_rename")
        .unwrap()
        .env("AI_RENAME_CONFIG", td.path().join("nope.xml"))
        .arg("some-file.txt")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no file exists"));
}
