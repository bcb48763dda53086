//! Test support utilities for portage integration tests.

#![allow(dead_code)]

pub mod server;

use std::path::PathBuf;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

use server::MockTransit;

/// Token the mock transit service accepts.
pub const TEST_TOKEN: &str = "test-token";

/// Test environment with an isolated temp directory.
///
/// Child processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Create a portage command with a clean environment (no service
    /// configured, colors off).
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("portage").expect("failed to find portage binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("VAULT_ADDR");
        cmd.env_remove("VAULT_TOKEN");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Create a portage command pointed at a mock transit service via the
    /// environment fallbacks.
    pub fn cmd_with(&self, server: &MockTransit) -> Command {
        let mut cmd = self.cmd();
        cmd.env("VAULT_ADDR", server.url());
        cmd.env("VAULT_TOKEN", TEST_TOKEN);
        cmd
    }

    /// Write a file into the test directory, returning its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("failed to write test file");
        path
    }

    /// Read a file from the test directory.
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("failed to read test file")
    }

    /// Whether a file exists in the test directory.
    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}
