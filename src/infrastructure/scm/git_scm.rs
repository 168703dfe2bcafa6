use super::scm_interface::{MirrorScm, ScmError};
use crate::domain::value_objects::push_target::PushTarget;
use crate::infrastructure::filesystem::operation_log::OperationLog;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Git implementation of the mirror primitives
#[derive(Debug, Clone)]
pub struct GitScm {
    git_executable: String,
}

impl Default for GitScm {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
        }
    }
}

impl GitScm {
    /// Create a new Git SCM instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Git SCM instance with custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            git_executable: executable.into(),
        }
    }

    fn git<I, S>(&self, args: I, working_dir: Option<&Path>) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.git_executable);
        cmd.args(args).stdin(Stdio::null());
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Human readable form of a command, for error messages
    fn describe(cmd: &Command) -> String {
        let std_cmd = cmd.as_std();
        std::iter::once(std_cmd.get_program())
            .chain(std_cmd.get_args())
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn spawn_error(&self, error: io::Error) -> ScmError {
        if error.kind() == io::ErrorKind::NotFound {
            ScmError::executable_not_found(&self.git_executable)
        } else {
            ScmError::from(error)
        }
    }

    fn check_status(command: String, status: ExitStatus) -> Result<(), ScmError> {
        if status.success() {
            Ok(())
        } else {
            Err(ScmError::command_exited(command, status.code().unwrap_or(-1)))
        }
    }

    /// Run with stdout and stderr attached to the console
    async fn run_inherited(&self, mut cmd: Command) -> Result<(), ScmError> {
        let command = Self::describe(&cmd);
        tracing::debug!(%command, "Running git command");

        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        Self::check_status(command, status)
    }

    /// Run with stdout and stderr written to the operation log
    async fn run_logged(&self, mut cmd: Command, log: &OperationLog) -> Result<(), ScmError> {
        let command = Self::describe(&cmd);
        tracing::debug!(%command, log = %log.path().display(), "Running git command");

        let status = cmd
            .stdout(log.stdio()?)
            .stderr(log.stdio()?)
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        Self::check_status(command, status)
    }

    /// Run and capture stdout, returning it trimmed
    async fn run_captured(&self, mut cmd: Command) -> Result<String, ScmError> {
        let command = Self::describe(&cmd);
        tracing::debug!(%command, "Running git command");

        let output = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScmError::command_failed(
                command,
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl MirrorScm for GitScm {
    async fn clone_mirror(&self, fetch_source: &str, dest: &Path) -> Result<(), ScmError> {
        let cmd = self.git(
            [OsStr::new("clone"), OsStr::new("--mirror"), OsStr::new(fetch_source), dest.as_os_str()],
            None,
        );
        self.run_inherited(cmd).await
    }

    async fn set_push_target(&self, mirror: &Path, target_url: &str) -> Result<(), ScmError> {
        let cmd = self.git(
            ["remote", "set-url", "--push", "origin", target_url],
            Some(mirror),
        );
        self.run_inherited(cmd).await
    }

    async fn get_push_target(&self, mirror: &Path) -> Result<PushTarget, ScmError> {
        let cmd = self.git(["remote", "get-url", "--push", "origin"], Some(mirror));
        let url = self.run_captured(cmd).await?;

        PushTarget::parse(&url).map_err(|e| ScmError::invalid_url(url, e.to_string()))
    }

    async fn fetch_prune(&self, mirror: &Path, log: &OperationLog) -> Result<(), ScmError> {
        let cmd = self.git(["fetch", "-p", "origin"], Some(mirror));
        self.run_logged(cmd, log).await
    }

    async fn push_mirror(&self, mirror: &Path, log: &OperationLog) -> Result<(), ScmError> {
        let cmd = self.git(["push", "--mirror"], Some(mirror));
        self.run_logged(cmd, log).await
    }

    async fn init_bare(&self, dest: &Path, log: &OperationLog) -> Result<(), ScmError> {
        let cmd = self.git(
            [OsStr::new("init"), OsStr::new("--bare"), dest.as_os_str()],
            None,
        );
        self.run_logged(cmd, log).await
    }

    async fn refresh_dumb_transport_index(
        &self,
        dest: &Path,
        log: &OperationLog,
    ) -> Result<(), ScmError> {
        let cmd = self.git(["update-server-info"], Some(dest));
        self.run_logged(cmd, log).await
    }
}
