//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the roombook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; roombook creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("roombook-data");

        Self { temp_dir, data_dir }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// `ROOMBOOK_*` variables from the outer environment are cleared so
    /// they cannot leak into the test.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("roombook").expect("Failed to find roombook binary");
        for var in [
            "ROOMBOOK_DATA_DIR",
            "ROOMBOOK_DEFAULT_WEEKDAYS",
            "ROOMBOOK_DEFAULT_STATUS",
            "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
            "ROOMBOOK_OUTPUT_FORMAT",
            "ROOMBOOK_LOG_MODE",
            "ROOMBOOK_REQUESTER",
            "ROOMBOOK_DISABLE_AUTOINIT",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path of the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, yaml: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), yaml).expect("Failed to write config");
    }

    /// Book a single slot on 2024-01-`day` and return the new booking id.
    pub fn book_single(&self, room: &str, day: u32, from: &str, to: &str) -> i64 {
        let output = self
            .command()
            .args(["book", "--room", room, "--requester", "alice"])
            .args(["--date", &format!("2024-01-{day:02}")])
            .args(["--from", from, "--to", to, "--format", "json"])
            .output()
            .expect("Failed to run book");
        assert!(
            output.status.success(),
            "book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("book output is JSON");
        json[0]["id"].as_i64().expect("booking id")
    }

    /// Run `list --format json` and return the parsed array.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .command()
            .args(["list", "--format", "json"])
            .output()
            .expect("Failed to run list");
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("list output is JSON")
    }
}
