//! Config load validation tests for bookstore-config.
// crates/bookstore-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

#![allow(
    clippy::use_debug,
    reason = "Test failure messages include debug renderings of config values."
)]

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use bookstore_config::BookstoreConfig;
use bookstore_config::ConfigError;
use bookstore_config::resolve_config_path;
use bookstore_store_sqlite::SqliteStoreMode;
use bookstore_store_sqlite::SqliteSyncMode;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<BookstoreConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(content: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(BookstoreConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(BookstoreConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(BookstoreConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(BookstoreConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(BookstoreConfig::load(Some(&path)), "config io error")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let file = write_config("[database]\npath = \"x.db\"\ncolor = \"red\"\n")?;
    assert_invalid(BookstoreConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn load_reads_full_config() -> TestResult {
    let file = write_config(
        r#"
[database]
path = "data/catalog.db"
busy_timeout_ms = 250
journal_mode = "delete"
sync_mode = "normal"

[fixture]
path = "seed/data.json"

[logging]
level = "debug"
"#,
    )?;
    let config = BookstoreConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.database.path != PathBuf::from("data/catalog.db")
        || config.database.busy_timeout_ms != 250
        || config.database.journal_mode != SqliteStoreMode::Delete
        || config.database.sync_mode != SqliteSyncMode::Normal
    {
        return Err(format!("unexpected database config: {:?}", config.database));
    }
    if config.fixture.path != PathBuf::from("seed/data.json") {
        return Err(format!("unexpected fixture path: {:?}", config.fixture.path));
    }
    if config.logging.level != "debug" {
        return Err(format!("unexpected log level: {}", config.logging.level));
    }
    Ok(())
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let file = write_config("")?;
    let config = BookstoreConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config != BookstoreConfig::default() {
        return Err(format!("expected defaults, got {config:?}"));
    }
    Ok(())
}

#[test]
fn explicit_path_wins_over_environment() -> TestResult {
    let explicit = Path::new("explicit.toml");
    let resolved = resolve_config_path(Some(explicit), Some(OsStr::new("from-env.toml")));
    if resolved.as_deref() != Some(explicit) {
        return Err(format!("unexpected resolution: {resolved:?}"));
    }
    let resolved = resolve_config_path(None, Some(OsStr::new("from-env.toml")));
    if resolved != Some(PathBuf::from("from-env.toml")) {
        return Err(format!("unexpected resolution: {resolved:?}"));
    }
    Ok(())
}
