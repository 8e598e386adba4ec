//! Smoke tests for command wiring and the unit registry

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `gastos` with HOME pointed at a scratch dir so no user config leaks in.
fn gastos(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gastos").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("GASTOS_CONFIG")
        .env_remove("GASTOS_DB_PATH")
        .env_remove("GASTOS_BIND")
        .env_remove("RUST_LOG");
    cmd
}

fn add_unit(home: &TempDir, db: &str, codigo: &str) -> assert_cmd::assert::Assert {
    gastos(home)
        .args(["depto", "--db-path", db, "add", "--codigo", codigo])
        .args(["--piso", "1", "--numero", "101", "--estado-actual", "habitado"])
        .args(["--habitaciones", "2", "--banos", "1", "--ocupado"])
        .assert()
}

// === Help ===

#[test]
fn test_top_level_help() {
    let home = TempDir::new().unwrap();
    gastos(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("depto"));
}

#[test]
fn test_serve_help() {
    let home = TempDir::new().unwrap();
    gastos(&home)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    gastos(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gastos"));
}

// === Units ===

#[test]
fn test_depto_add_then_list() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("edificio.db");
    let db = db.to_str().unwrap();

    add_unit(&home, db, "A1")
        .success()
        .stdout(predicate::str::contains("Registered unit A1"));

    gastos(&home)
        .args(["depto", "--db-path", db, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A1"))
        .stdout(predicate::str::contains("(ocupado)"));
}

#[test]
fn test_depto_list_json_on_empty_db() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("vacio.db");

    gastos(&home)
        .args(["depto", "--json", "--db-path", db.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));

    assert!(db.exists());
}

#[test]
fn test_depto_duplicate_code_fails() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("edificio.db");
    let db = db.to_str().unwrap();

    add_unit(&home, db, "B2").success();
    add_unit(&home, db, "B2")
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_depto_invalid_code_fails() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("edificio.db");

    add_unit(&home, db.to_str().unwrap(), "A 1")
        .failure()
        .stderr(predicate::str::contains("Invalid unit code"));
}

#[test]
fn test_depto_show_unknown_fails() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("edificio.db");

    gastos(&home)
        .args(["depto", "--db-path", db.to_str().unwrap(), "show", "Z9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// === Config ===

#[test]
fn test_config_path_honors_env() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("gastos.toml");
    std::fs::write(&path, "[server]\nbind = \"127.0.0.1:6000\"\n").unwrap();

    gastos(&home)
        .env("GASTOS_CONFIG", &path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gastos.toml"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();

    gastos(&home)
        .env("GASTOS_CONFIG", home.path().join("no-existe.toml"))
        .args(["config", "show"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_force_replaces_broken_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("roto.toml");
    std::fs::write(&path, "[server\nbind = ").unwrap();

    gastos(&home)
        .env("GASTOS_CONFIG", &path)
        .args(["config", "init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[server]"));

    gastos(&home)
        .env("GASTOS_CONFIG", &path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edificio_universidad.db"));
}

#[test]
fn test_broken_config_blocks_depto() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("roto.toml");
    std::fs::write(&path, "[server\nbind = ").unwrap();
    let db = home.path().join("edificio.db");

    gastos(&home)
        .env("GASTOS_CONFIG", &path)
        .args(["depto", "--db-path", db.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
