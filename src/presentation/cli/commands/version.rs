/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash captured by the build script
pub const GIT_COMMIT: &str = env!("GITMIR_GIT_HASH");

/// UTC build timestamp captured by the build script
pub const BUILD_DATE: &str = env!("GITMIR_BUILD_DATE");

/// Print build information
pub struct VersionCommand;

impl VersionCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self) -> String {
        format!(
            "  Version:    {}\n  Git commit: {}\n  Built:      {}",
            VERSION, GIT_COMMIT, BUILD_DATE
        )
    }

    pub fn execute(&self) {
        println!("{}", self.render());
    }
}

impl Default for VersionCommand {
    fn default() -> Self {
        Self::new()
    }
}
