//! Smoke tests for the blogctl binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the developer's own config and .env
fn blogctl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("blogctl").unwrap();
    cmd.current_dir(dir.path())
        .env("BLOGCTL_CONFIG", dir.path().join("config.toml"))
        .env_remove("BLOGCTL_DATABASE")
        .env_remove("BLOGCTL_USERNAME")
        .env_remove("BLOGCTL_PASSWORD")
        .env_remove("BLOGCTL_SECRET_KEY");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    blogctl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    let dir = tempfile::tempdir().unwrap();
    blogctl(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_init_db_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("data").join("blog.db");

    blogctl(&dir)
        .args(["init-db", "--database"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized database"));

    assert!(db.exists());
}

#[test]
fn test_init_db_reset_on_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("blog.db");

    blogctl(&dir).args(["init-db", "--database"]).arg(&db).assert().success();
    blogctl(&dir)
        .args(["init-db", "--reset", "--database"])
        .arg(&db)
        .assert()
        .success();
}

#[test]
fn test_config_show_redacts_secrets() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "username = \"editor\"\npassword = \"hunter2\"\n",
    )
    .unwrap();

    blogctl(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_show_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "database = [").unwrap();

    blogctl(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_config_path_honours_env() {
    let dir = tempfile::tempdir().unwrap();
    blogctl(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
