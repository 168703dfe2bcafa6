pub mod add;
pub mod mirror;
pub mod version;

pub use add::*;
pub use mirror::*;
pub use version::*;
