//! Shared helpers for binary integration tests

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const EVENTS_CSV: &str = include_str!("../fixtures/events.csv");

/// Scratch workspace with the sample upload written into it.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("events.csv"), EVENTS_CSV).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.path().join("store.json")
    }

    /// `relibot` isolated from the caller's config and environment.
    pub fn relibot(&self) -> Command {
        let mut cmd = Command::cargo_bin("relibot").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("SUPABASE_URL")
            .env_remove("SUPABASE_KEY")
            .env_remove("RELIBOT_LOG_LEVEL")
            .env_remove("RELIBOT_OUTPUT_DIR")
            .env_remove("RELIBOT_WEBHOOK_BIND")
            .env_remove("RELIBOT_FONT_DIR");
        cmd
    }

    /// `relibot` using the file store inside this workspace.
    pub fn relibot_file_store(&self) -> Command {
        let mut cmd = self.relibot();
        cmd.arg("--store")
            .arg("file")
            .arg("--data-file")
            .arg(self.data_file());
        cmd
    }

    /// Upload the sample events into the file store.
    pub fn seed(&self) {
        self.relibot_file_store()
            .args(["upload", "events.csv", "--yes"])
            .assert()
            .success();
    }
}
