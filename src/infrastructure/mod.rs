/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - SCM primitives (git clone/fetch/push/init/update-server-info)
/// - File system operations (per-mirror logs, workspace config file)
pub mod filesystem;
pub mod scm;

// Re-export commonly used types
pub use filesystem::{ConfigStore, LogSink, OperationLog};
pub use scm::{GitScm, MirrorScm, ScmError};
