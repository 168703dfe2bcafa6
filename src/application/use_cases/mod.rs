pub mod add_mirror;
pub mod discover_mirrors;
pub mod mirror_repositories;
pub mod run_mirror_operation;

pub use add_mirror::{AddMirrorConfig, AddMirrorUseCase};
pub use discover_mirrors::DiscoverMirrorsUseCase;
pub use mirror_repositories::{MirrorRepositoriesConfig, MirrorRepositoriesUseCase, ProgressCallback};
pub use run_mirror_operation::RunMirrorOperationUseCase;
