pub mod drag;
pub mod motion;
pub mod overlay;
pub mod placement;
pub mod render;
pub mod rng;
pub mod selection;
