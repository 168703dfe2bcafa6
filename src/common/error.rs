use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::scm::ScmError;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Cannot read workspace root {}: {source}", .root.display())]
    Discovery {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open log file {}: {source}", .path.display())]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error retrieving push URL for {}: {source}", .mirror.display())]
    Resolution {
        mirror: PathBuf,
        #[source]
        source: ScmError,
    },

    #[error("Error initializing bare git repository at {}: {source}", .target.display())]
    Provision {
        target: PathBuf,
        #[source]
        source: ScmError,
    },

    #[error("Error running {primitive} for {}: {source}", .path.display())]
    Primitive {
        primitive: &'static str,
        path: PathBuf,
        #[source]
        source: ScmError,
    },

    #[error("Could not generate a local destination from {url}: {message}")]
    InvalidSource { url: String, message: String },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MirrorError {
    pub fn discovery(root: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Discovery {
            root: root.into(),
            source,
        }
    }

    pub fn log_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LogUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn resolution(mirror: impl Into<PathBuf>, source: ScmError) -> Self {
        Self::Resolution {
            mirror: mirror.into(),
            source,
        }
    }

    pub fn provision(target: impl Into<PathBuf>, source: ScmError) -> Self {
        Self::Provision {
            target: target.into(),
            source,
        }
    }

    pub fn primitive(primitive: &'static str, path: impl Into<PathBuf>, source: ScmError) -> Self {
        Self::Primitive {
            primitive,
            path: path.into(),
            source,
        }
    }

    pub fn invalid_source(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSource {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            path,
            source: Some(Box::new(source)),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<tokio::task::JoinError> for MirrorError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::internal_error(format!("Background task failed: {}", error))
    }
}
