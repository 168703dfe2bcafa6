use async_trait::async_trait;
use std::path::Path;

use crate::domain::value_objects::push_target::PushTarget;
use crate::infrastructure::filesystem::operation_log::OperationLog;

/// Version-control primitives the mirror orchestration is built on
///
/// Primitives that take an [`OperationLog`] send everything they print to the
/// mirror's log file; the others talk to the console directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MirrorScm: Send + Sync {
    /// Create a complete bare mirror of `fetch_source` at `dest`
    async fn clone_mirror(&self, fetch_source: &str, dest: &Path) -> Result<(), ScmError>;

    /// Record `target_url` as the push URL of the mirror's origin remote
    async fn set_push_target(&self, mirror: &Path, target_url: &str) -> Result<(), ScmError>;

    /// Read the push URL of the mirror's origin remote
    async fn get_push_target(&self, mirror: &Path) -> Result<PushTarget, ScmError>;

    /// Fetch from origin, pruning refs deleted upstream
    async fn fetch_prune(&self, mirror: &Path, log: &OperationLog) -> Result<(), ScmError>;

    /// Forced mirror push of all refs, deletions included
    async fn push_mirror(&self, mirror: &Path, log: &OperationLog) -> Result<(), ScmError>;

    /// Initialize an empty bare repository at `dest`
    async fn init_bare(&self, dest: &Path, log: &OperationLog) -> Result<(), ScmError>;

    /// Regenerate the info files needed to serve `dest` over a dumb transport
    async fn refresh_dumb_transport_index(
        &self,
        dest: &Path,
        log: &OperationLog,
    ) -> Result<(), ScmError>;
}

/// Errors that can occur while running SCM primitives
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("SCM executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("Command execution failed: {command}, exit code: {exit_code}, stderr: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Command execution failed: {command}, exit code: {exit_code} (output in log)")]
    CommandExited { command: String, exit_code: i32 },

    #[error("Invalid URL format: {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ScmError {
    /// Create an executable not found error
    pub fn executable_not_found(executable: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            executable: executable.into(),
        }
    }

    /// Create a command failed error with captured stderr
    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a command failed error whose output went to a log file
    pub fn command_exited(command: impl Into<String>, exit_code: i32) -> Self {
        Self::CommandExited {
            command: command.into(),
            exit_code,
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
