use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

use crate::common::error::MirrorError;
use crate::common::result::MirrorResult;

/// Config file names looked up in the workspace root, in priority order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["gitmir.yml", "gitmir.yaml"];

/// Default git executable
pub const DEFAULT_GIT_EXECUTABLE: &str = "git";

/// Contents of an optional `gitmir.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MirrorConfigFile {
    /// Maximum number of mirrors operated on at the same time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Path to the git executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,
}

/// Effective settings after layering CLI, environment, file and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSettings {
    pub root: PathBuf,
    pub jobs: Option<usize>,
    pub git_executable: String,
}

impl MirrorConfigFile {
    /// Layer explicit overrides (CLI flags or environment) on top of the file.
    pub fn resolve(
        self,
        root: impl Into<PathBuf>,
        jobs: Option<usize>,
        git: Option<String>,
    ) -> MirrorResult<MirrorSettings> {
        let jobs = jobs.or(self.jobs);
        if jobs == Some(0) {
            return Err(MirrorError::config_error(
                "jobs must be greater than zero",
                None,
            ));
        }

        Ok(MirrorSettings {
            root: root.into(),
            jobs,
            git_executable: git
                .or(self.git)
                .unwrap_or_else(|| DEFAULT_GIT_EXECUTABLE.to_string()),
        })
    }
}

/// Reads the workspace config file
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Path of the first config file present in `root`, if any.
    pub fn find_config_file(&self, root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
    }

    /// Load the config of the workspace at `root`. A missing file yields defaults.
    pub async fn load(&self, root: &Path) -> MirrorResult<MirrorConfigFile> {
        let Some(path) = self.find_config_file(root) else {
            return Ok(MirrorConfigFile::default());
        };

        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            MirrorError::config_error_with_source(
                format!("Failed to read {}", path.display()),
                Some(path.clone()),
                e,
            )
        })?;

        self.parse(&content, &path)
    }

    fn parse(&self, content: &str, path: &Path) -> MirrorResult<MirrorConfigFile> {
        if content.trim().is_empty() {
            return Ok(MirrorConfigFile::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            MirrorError::config_error_with_source(
                format!("Failed to parse {}: {}", path.display(), e),
                Some(path.to_path_buf()),
                e,
            )
        })
    }
}
