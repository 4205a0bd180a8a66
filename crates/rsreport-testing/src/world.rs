//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Writing fixture databases, project descriptors and definitions
//! - Executing CLI commands with proper context

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use rsreport_testing::TestWorld;
///
/// let world = TestWorld::new().with_brat_sample();
/// let result = world.run(&["report", "brat.sqlite", "report.html"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the temp directory root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Resolve a path relative to the temp root.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Create a SQLite database at `name` by running `sql`.
    pub fn with_database(self, name: &str, sql: &str) -> Self {
        self.write_database(name, sql)
            .expect("Failed to create fixture database");
        self
    }

    /// Write a file (creating parent directories).
    pub fn with_file(self, name: &str, contents: impl AsRef<[u8]>) -> Self {
        self.write_file(name, contents)
            .expect("Failed to write fixture file");
        self
    }

    /// Sample database, project, layer files and report definition.
    ///
    /// Layout: `brat.sqlite`, `project.rs.xml`, `rsreport.toml`, and the
    /// files listed in [`fixtures::BRAT_LAYER_FILES`].
    pub fn with_brat_sample(self) -> Self {
        let mut world = self
            .with_database("brat.sqlite", fixtures::BRAT_SQL)
            .with_file("project.rs.xml", fixtures::BRAT_PROJECT)
            .with_file("rsreport.toml", fixtures::BRAT_DEFINITION);
        for (name, size) in fixtures::BRAT_LAYER_FILES {
            world = world.with_file(name, vec![0u8; size]);
        }
        world
    }

    pub fn write_database(&self, name: &str, sql: &str) -> Result<PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = rusqlite::Connection::open(&path)
            .with_context(|| format!("Failed to create database: {}", path.display()))?;
        conn.execute_batch(sql)?;
        Ok(path)
    }

    pub fn write_file(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_file(&self, name: &str) -> Result<String> {
        let path = self.path(name);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from `cargo_bin_cmd!("rsreport")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(self.root()).env_remove("RUST_LOG")
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built, which cargo test does automatically for the CLI crate.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("rsreport")
            .map_err(|e| anyhow::anyhow!("Failed to find rsreport binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
