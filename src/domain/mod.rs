/// Domain layer
///
/// Mirrors, push targets and operation outcomes. Nothing in this layer
/// touches the filesystem beyond path manipulation or spawns processes.
pub mod entities;
pub mod value_objects;
