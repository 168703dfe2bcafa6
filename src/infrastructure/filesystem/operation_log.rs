use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use chrono::Utc;

use crate::domain::entities::mirror::Mirror;
use crate::domain::value_objects::mirror_operation::MirrorOperation;

/// Timestamp layout of structured log lines (UTC)
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Opens the per-mirror append-only log files
#[derive(Debug, Clone, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }

    /// Open (or create) the log file of `mirror` for one `operation` run.
    ///
    /// The file lives next to the mirror directory as `<mirror>.log` and is
    /// never truncated.
    pub fn open(&self, mirror: &Mirror, operation: MirrorOperation) -> io::Result<OperationLog> {
        OperationLog::open(mirror.log_path(), operation.label())
    }
}

/// An open log stream for a single mirror operation
///
/// Primitive output is written to the file directly (see [`OperationLog::stdio`]);
/// structured lines go through [`OperationLog::record`].
#[derive(Debug)]
pub struct OperationLog {
    file: File,
    path: PathBuf,
    label: String,
}

impl OperationLog {
    pub fn open(path: impl Into<PathBuf>, label: impl Into<String>) -> io::Result<Self> {
        let path = path.into();

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        let file = options.open(&path)?;
        Ok(Self {
            file,
            path,
            label: label.into(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one `<LABEL>: <timestamp> <message>` line.
    pub fn record(&self, message: impl fmt::Display) {
        let line = format!(
            "{}: {} {}\n",
            self.label,
            Utc::now().format(TIMESTAMP_FORMAT),
            message
        );
        if let Err(e) = (&self.file).write_all(line.as_bytes()) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write log line");
        }
    }

    /// A handle to the log file usable as a child process' stdout or stderr.
    pub fn stdio(&self) -> io::Result<Stdio> {
        Ok(Stdio::from(self.file.try_clone()?))
    }
}
