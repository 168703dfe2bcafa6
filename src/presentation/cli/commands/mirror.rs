use anyhow::Result;
use colored::Colorize;
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;

use crate::application::use_cases::mirror_repositories::{
    MirrorRepositoriesConfig, MirrorRepositoriesUseCase, ProgressCallback,
};
use crate::domain::entities::mirror::Mirror;
use crate::domain::entities::outcome::{AggregateOutcome, OperationResult};
use crate::domain::value_objects::mirror_operation::MirrorOperation;
use crate::infrastructure::filesystem::config_store::MirrorSettings;
use crate::infrastructure::scm::GitScm;

/// Fetch or push every mirror in the workspace
pub struct MirrorCommand {
    pub operation: MirrorOperation,
    pub settings: MirrorSettings,
}

impl MirrorCommand {
    pub fn new(operation: MirrorOperation, settings: MirrorSettings) -> Self {
        Self {
            operation,
            settings,
        }
    }

    /// Execute the command, printing one status line per mirror as it completes
    pub async fn execute(&self) -> Result<AggregateOutcome> {
        let config = MirrorRepositoriesConfig::new(&self.settings.root).with_jobs(self.settings.jobs);
        let scm = Arc::new(GitScm::with_executable(&self.settings.git_executable));
        let progress: ProgressCallback =
            Arc::new(|mirror: &Mirror, result: &OperationResult| print_status(mirror, result));

        let outcome = MirrorRepositoriesUseCase::new(config, scm)
            .with_progress(progress)
            .execute(self.operation)
            .await?;

        if outcome.attempted() == 0 {
            print_line(format_args!(
                "{} No mirrors found in {}",
                "::".blue().bold(),
                self.settings.root.display()
            ));
        } else if !outcome.is_success() {
            print_line(
                format!("{} failed for {} repos", self.operation.title(), outcome.failed()).red(),
            );
        }

        Ok(outcome)
    }
}

fn print_status(mirror: &Mirror, result: &OperationResult) {
    if result.is_success() {
        print_line(format!("[✔] {}", mirror).green());
    } else {
        print_line(format!("[X] {}", mirror).red());
    }
}

/// Write a console line. A closed or full stdout must not abort the run.
fn print_line(line: impl Display) {
    if let Err(e) = writeln!(std::io::stdout().lock(), "{}", line) {
        tracing::debug!(error = %e, "Discarding console output");
    }
}
