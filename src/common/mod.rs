pub mod error;
pub mod result;

pub use error::MirrorError;
pub use result::MirrorResult;
