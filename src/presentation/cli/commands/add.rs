use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

use crate::application::use_cases::add_mirror::{AddMirrorConfig, AddMirrorUseCase};
use crate::infrastructure::filesystem::config_store::MirrorSettings;
use crate::infrastructure::scm::GitScm;

/// Add a new mirror to the workspace
pub struct AddCommand {
    pub settings: MirrorSettings,
    /// URL the mirror is fetched from
    pub fetch_url: String,
    /// URL the mirror is pushed to
    pub push_url: String,
    /// Destination inside the workspace, derived from the fetch URL when absent
    pub local_dest: Option<String>,
}

impl AddCommand {
    pub fn new(
        settings: MirrorSettings,
        fetch_url: String,
        push_url: String,
        local_dest: Option<String>,
    ) -> Self {
        Self {
            settings,
            fetch_url,
            push_url,
            local_dest,
        }
    }

    /// Execute the add command
    pub async fn execute(&self) -> Result<()> {
        let mut config = AddMirrorConfig::new(&self.settings.root, &self.fetch_url, &self.push_url);
        if let Some(dest) = &self.local_dest {
            config = config.with_local_dest(dest);
        }

        println!(
            "{} Cloning {} ...",
            "::".blue().bold(),
            self.fetch_url
        );

        let scm = Arc::new(GitScm::with_executable(&self.settings.git_executable));
        let mirror = AddMirrorUseCase::new(config, scm).execute().await?;

        println!("{}", format!("[✔] {}", mirror).green());
        println!("  Push URL: {}", self.push_url);
        Ok(())
    }
}
