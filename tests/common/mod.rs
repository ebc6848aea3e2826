//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn valid_config_fixture() -> PathBuf {
    fixture_path("valid_config.toml")
}

pub fn invalid_config_fixture() -> PathBuf {
    fixture_path("invalid_config.toml")
}

/// A stored system config missing most fields
pub fn partial_system_config() -> String {
    fs::read_to_string(fixture_path("partial_system_config.json")).unwrap()
}

/// Isolated console environment: its own config file and store directory
pub struct TestEnvironment {
    pub root: TempDir,
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let data_dir = root.path().join("data");
        let config_path = root.path().join("admin.toml");

        let config = format!(
            r#"
[storage]
data_dir = "{}"
store_file = "store.json"

[logging]
level = "warn"
"#,
            data_dir.display().to_string().replace('\\', "\\\\")
        );
        fs::write(&config_path, config).expect("Failed to write config");

        Self {
            root,
            config_path,
            data_dir,
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }

    /// Seed a raw key/value pair directly into the store file
    pub fn seed(&self, key: &str, value: &str) {
        let store = hris_admin::JsonFileStore::new(self.store_path());
        hris_admin::KeyValueStore::set(&store, key, value).unwrap();
    }

    /// Overwrite the store file with raw bytes
    pub fn write_store_file(&self, content: &str) {
        fs::create_dir_all(&self.data_dir).unwrap();
        fs::write(self.store_path(), content).unwrap();
    }

    /// `hris-admin --config <env config> ...`
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("hris-admin").unwrap();
        cmd.env_remove("HRIS_DATA_DIR")
            .env_remove("HRIS_STORE_FILE")
            .env_remove("HRIS_LOG_LEVEL")
            .env_remove("HRIS_LOG_FILE")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_exist() {
        assert!(valid_config_fixture().exists());
        assert!(invalid_config_fixture().exists());
        assert!(fixture_path("partial_system_config.json").exists());
    }
}
