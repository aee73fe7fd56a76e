use ai_rename::config::xml::load_config_from_xml_path;
use ai_rename::config::{create_template_config, LogLevel};
use ai_rename::suggest::SuggestMethod;
use assert_cmd::Command;
use assert_fs::prelude::*;

#[test]
fn template_is_created_and_parses_back() {
    let td = assert_fs::TempDir::new().unwrap();
    let path = td.path().join("ai_rename").join("config.xml");

    create_template_config(&path).unwrap();
    assert!(path.exists());

    // The template must round-trip through the loader with default semantics.
    let cfg = load_config_from_xml_path(&path).unwrap();
    assert_eq!(cfg.method, SuggestMethod::Slugify);
    assert_eq!(cfg.model_command, None);
    assert_eq!(cfg.log_level, LogLevel::Normal);
}

#[cfg(unix)]
#[test]
fn template_gets_conservative_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let td = assert_fs::TempDir::new().unwrap();
    let path = td.path().join("ai_rename").join("config.xml");
    create_template_config(&path).unwrap();

    let dir_mode = std::fs::metadata(path.parent().unwrap())
        .unwrap()
        .permissions()
        .mode();
    let file_mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);
    assert_eq!(file_mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn symlinked_ancestor_is_refused() {
    let td = assert_fs::TempDir::new().unwrap();
    let real = td.child("real");
    real.create_dir_all().unwrap();
    let link = td.path().join("link");
    std::os::unix::fs::symlink(real.path(), &link).unwrap();

    let err = create_template_config(&link.join("config.xml")).unwrap_err();
    assert!(format!("{err}").contains("symlink"));
    assert!(!real.path().join("config.xml").exists());
}

#[test]
fn first_run_without_env_writes_the_template() {
    // No AI_RENAME_CONFIG: the binary creates a template under the config dir
    // and tells the user about it.
    let td = assert_fs::TempDir::new().unwrap();
    let xdg_config = td.path().join("xdg-config");

    let output = Command::cargo_bin("ai_rename")
        .unwrap()
        .env_remove("AI_RENAME_CONFIG")
        .env("HOME", td.path())
        .env("XDG_CONFIG_HOME", &xdg_config)
        .env("XDG_DATA_HOME", td.path().join("xdg-data"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("template"));
    assert!(xdg_config.join("ai_rename").join("config.xml").exists());
}
