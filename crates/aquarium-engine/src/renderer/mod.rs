pub mod instance;

pub use instance::{ArrowInstance, CreatureInstance, RenderBuffer};
