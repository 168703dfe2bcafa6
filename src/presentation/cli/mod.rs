pub mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::process::exit;
use tracing_subscriber::EnvFilter;

use crate::domain::value_objects::mirror_operation::MirrorOperation;
use crate::infrastructure::filesystem::config_store::{ConfigStore, MirrorSettings};
use commands::{AddCommand, MirrorCommand, VersionCommand};

/// gitmir - Mirror git repositories between disconnected networks
#[derive(Parser, Debug)]
#[command(name = "gitmir")]
#[command(about = "Mirror git repositories between disconnected networks")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Workspace root (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<String>,

    /// Maximum number of mirrors processed at the same time (unbounded by default)
    #[arg(short, long, global = true, env = "GITMIR_JOBS")]
    pub jobs: Option<usize>,

    /// Path to the git executable
    #[arg(long, global = true, env = "GITMIR_GIT")]
    pub git: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone a new mirror into the workspace and record where it is pushed
    Add {
        /// URL to fetch the repository from
        fetch_url: String,

        /// URL to push the mirror to
        push_url: String,

        /// Destination inside the workspace (derived from the fetch URL when omitted)
        local_dest: Option<String>,
    },

    /// Fetch every mirror in the workspace from its source
    Fetch,

    /// Push every mirror in the workspace to its destination
    Push,

    /// Print version and build information
    Version,
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    /// Install the stderr diagnostics subscriber. `RUST_LOG` takes precedence over `-v`.
    pub fn init_tracing(&self) {
        let default_filter = if self.cli.verbose {
            "gitmir=debug"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        self.init_tracing();

        if self.cli.no_color {
            colored::control::set_override(false);
        }

        // Change directory if specified
        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir)?;
        }

        match self.handle_command().await {
            Ok(true) => Ok(()),
            Ok(false) => exit(1),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    /// Returns whether the process should exit successfully
    async fn handle_command(&self) -> anyhow::Result<bool> {
        match &self.cli.command {
            Commands::Add {
                fetch_url,
                push_url,
                local_dest,
            } => {
                let settings = self.load_settings().await?;
                AddCommand::new(
                    settings,
                    fetch_url.clone(),
                    push_url.clone(),
                    local_dest.clone(),
                )
                .execute()
                .await?;
                Ok(true)
            }
            Commands::Fetch => self.handle_mirror_command(MirrorOperation::Fetch).await,
            Commands::Push => self.handle_mirror_command(MirrorOperation::Push).await,
            Commands::Version => {
                VersionCommand::new().execute();
                Ok(true)
            }
        }
    }

    async fn handle_mirror_command(&self, operation: MirrorOperation) -> anyhow::Result<bool> {
        let settings = self.load_settings().await?;
        let outcome = MirrorCommand::new(operation, settings).execute().await?;
        Ok(outcome.is_success())
    }

    /// Layer CLI flags and environment over the workspace config file
    async fn load_settings(&self) -> anyhow::Result<MirrorSettings> {
        let root = env::current_dir()?;
        let file = ConfigStore::new().load(&root).await?;
        let settings = file.resolve(root, self.cli.jobs, self.cli.git.clone())?;

        tracing::debug!(
            root = %settings.root.display(),
            jobs = ?settings.jobs,
            git = %settings.git_executable,
            "Loaded settings"
        );
        Ok(settings)
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
