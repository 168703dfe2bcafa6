//! Test fixtures for creating workspace trees
//!
//! A [`WorkspaceFixture`] owns a temporary directory holding the mirror
//! workspace and a sibling directory for file-based push destinations.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct WorkspaceFixture {
    temp_dir: TempDir,
}

impl WorkspaceFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(temp_dir.path().join("workspace")).unwrap();
        std::fs::create_dir_all(temp_dir.path().join("transfer")).unwrap();
        Self { temp_dir }
    }

    /// Root of the mirror workspace
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("workspace")
    }

    /// Directory holding file-based push destinations
    pub fn transfer(&self) -> PathBuf {
        self.temp_dir.path().join("transfer")
    }

    /// Create a (fake) bare mirror directory at `relative` inside the workspace
    pub fn mirror(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.join("refs")).unwrap();
        std::fs::write(path.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        path
    }

    /// Create a plain directory at `relative` inside the workspace
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write `content` to `relative` inside the workspace
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Path of `<mirror>.log` for a mirror at `relative`
    pub fn log_path(&self, relative: &str) -> PathBuf {
        log_path_of(&self.root().join(relative))
    }
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_path_of(mirror: &Path) -> PathBuf {
    let mut path = mirror.as_os_str().to_owned();
    path.push(".log");
    PathBuf::from(path)
}
