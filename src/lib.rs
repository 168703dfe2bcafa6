//! # gitmir - Git Mirror Orchestrator
//!
//! `gitmir` keeps bare mirrors of git repositories in a workspace directory and moves
//! them between networks that cannot reach each other. On the connected side every
//! mirror is fetched from its source; on the transfer side every mirror is pushed to
//! the destination recorded as its push URL.
//!
//! ## Workspace layout
//!
//! Any directory whose name ends with `.git` (but is not named exactly `.git`) is a
//! mirror. Each mirror has an append-only log file next to it:
//!
//! ```text
//! workspace/
//!   github.com/pkg/errors.git/
//!   github.com/pkg/errors.git.log
//!   gitmir.yml            (optional)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! gitmir add https://github.com/pkg/errors /mnt/transfer/errors.git
//! gitmir fetch
//! gitmir push
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: Mirrors, push targets and operation outcomes
//! - [`application`]: Discovery, per-mirror operations and the concurrent orchestrator
//! - [`infrastructure`]: Git primitives, per-mirror logs and the config file
//! - [`presentation`]: CLI interface
//! - [`common`]: Shared error handling
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gitmir::application::use_cases::mirror_repositories::{
//!     MirrorRepositoriesConfig, MirrorRepositoriesUseCase,
//! };
//! use gitmir::domain::value_objects::mirror_operation::MirrorOperation;
//! use gitmir::infrastructure::scm::GitScm;
//!
//! # async fn example() -> gitmir::Result<()> {
//! let config = MirrorRepositoriesConfig::new("/srv/mirrors").with_jobs(Some(4));
//! let use_case = MirrorRepositoriesUseCase::new(config, Arc::new(GitScm::new()));
//!
//! let outcome = use_case.execute(MirrorOperation::Fetch).await?;
//! println!("{} of {} mirrors failed", outcome.failed(), outcome.attempted());
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::MirrorError;
pub use crate::common::result::MirrorResult as Result;
