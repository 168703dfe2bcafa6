pub mod mirror;
pub mod outcome;

pub use mirror::Mirror;
pub use outcome::{AggregateOutcome, OperationResult};
