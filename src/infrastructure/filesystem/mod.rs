pub mod config_store;
pub mod operation_log;

pub use config_store::{ConfigStore, MirrorConfigFile, MirrorSettings};
pub use operation_log::{LogSink, OperationLog};
