//! Test Snapshot Files
//!
//! Isolated on-disk snapshot and settings files:
//! - Written into a temporary directory that is removed on drop
//! - Raw text for malformed-input tests

use std::path::{Path, PathBuf};

use levelcast_core::{PlannerSettings, Snapshot, SnapshotError};
use tempfile::TempDir;

use crate::mocks::SnapshotFactory;

/// Snapshot file name inside the temp dir
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Settings file name inside the temp dir
pub const SETTINGS_FILE: &str = "settings.json";

/// Files for one test
///
/// # Example
///
/// ```rust,ignore
/// let files = TestSnapshotFiles::with_snapshot(&factory);
/// let snapshot = files.load_snapshot()?;
///
/// // Directory is deleted when `files` goes out of scope
/// ```
pub struct TestSnapshotFiles {
    /// Temporary directory (kept alive to prevent premature deletion)
    temp_dir: TempDir,
}

impl TestSnapshotFiles {
    /// Empty temp directory
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Temp directory holding the factory's snapshot
    pub fn with_snapshot(factory: &SnapshotFactory) -> Self {
        let files = Self::new();
        files.write_snapshot(factory);
        files
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir().join(SNAPSHOT_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir().join(SETTINGS_FILE)
    }

    pub fn write_snapshot(&self, factory: &SnapshotFactory) {
        let json = serde_json::to_string_pretty(&factory.to_json()).expect("Failed to serialize");
        self.write_raw(SNAPSHOT_FILE, &json);
    }

    pub fn write_settings(&self, settings: &PlannerSettings) {
        let json = serde_json::to_string_pretty(settings).expect("Failed to serialize");
        self.write_raw(SETTINGS_FILE, &json);
    }

    /// Write arbitrary text, returns the file path
    pub fn write_raw(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir().join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    pub fn load_snapshot(&self) -> Result<Snapshot, SnapshotError> {
        Snapshot::load(self.snapshot_path())
    }

    pub fn load_settings(&self) -> PlannerSettings {
        let json = std::fs::read_to_string(self.settings_path()).expect("Failed to read settings");
        serde_json::from_str(&json).expect("Invalid settings")
    }
}

impl Default for TestSnapshotFiles {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_removed_on_drop() {
        let dir = {
            let files = TestSnapshotFiles::with_snapshot(&SnapshotFactory::new(1));
            assert!(files.snapshot_path().exists());
            files.dir().to_path_buf()
        };
        assert!(!dir.exists());
    }
}
