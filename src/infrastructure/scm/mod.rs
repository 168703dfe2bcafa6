/// SCM operations infrastructure
///
/// The primitives the mirror orchestration relies on, behind the
/// [`MirrorScm`] trait, and their git implementation.
pub mod git_scm;
pub mod scm_interface;

pub use git_scm::GitScm;
pub use scm_interface::{MirrorScm, ScmError};

#[cfg(test)]
pub use scm_interface::MockMirrorScm;
