pub mod local_dest;
pub mod mirror_operation;
pub mod push_target;

pub use local_dest::derive_local_dest;
pub use mirror_operation::MirrorOperation;
pub use push_target::{PushTarget, PushTargetError, TargetKind};
