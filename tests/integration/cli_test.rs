//! Tests for the `todos` binary

use assert_cmd::cargo;
use predicates::prelude::*;

/// Helper function to create a todos command with a clean environment
fn todos() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("todos"));
    cmd.env_remove("PORT")
        .env_remove("STORE_URL")
        .env_remove("ALLOWED_ORIGINS")
        .env_remove("TODOS_WORKERS");
    cmd
}

#[test]
fn test_version() {
    todos()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!("todos v", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_version_json() {
    todos()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_no_command_prints_hint() {
    todos().assert().success().stdout(predicate::str::contains("todos serve"));
}

#[test]
fn test_config_reads_env() {
    todos()
        .args(["--json", "config"])
        .env("PORT", "6123")
        .env("STORE_URL", "memory://")
        .env("ALLOWED_ORIGINS", "http://localhost:3000")
        .assert()
        .success()
        .stdout(predicate::str::contains("6123"))
        .stdout(predicate::str::contains("memory://"))
        .stdout(predicate::str::contains("http://localhost:3000"));
}

#[test]
fn test_config_reads_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("todos.toml");
    std::fs::write(&path, "[server]\nport = 6001\nworkers = 3\n").unwrap();

    todos()
        .args(["--json", "config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("6001"))
        .stdout(predicate::str::contains("\"workers\": 3"));
}

#[test]
fn test_config_rejects_bad_port() {
    todos()
        .arg("config")
        .env("PORT", "not-a-port")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PORT"));
}

#[test]
fn test_serve_unsupported_store_is_fatal() {
    todos()
        .args(["serve", "--store", "mongodb://localhost:27017/todos", "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open store"));
}

#[test]
fn test_serve_zero_workers_is_rejected() {
    todos()
        .args(["serve", "--store", "memory://", "--workers", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("workers"));
}
