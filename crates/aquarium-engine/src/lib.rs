pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::AquariumConfig;
pub use api::hooks::{DragPhase, Hooks};
pub use api::types::{event_kind, CreatureId, ShellEvent};
pub use components::creature::{Creature, CreatureInfo, Facing, Motion, Visual};
pub use components::descriptor::{
    BlockData, CreatureDescriptor, DescriptorError, LoadError, TransferPeer,
};
pub use components::species::{Species, UnknownSpecies};
pub use core::scheduler::{Scheduler, TaskKind};
pub use core::state::{AquariumState, LoadSummary};
pub use core::store::CreatureStore;
pub use core::time::FixedTimestep;
pub use core::viewport::{Bounds, Rect, Reservations, Viewport, WindowExtent};
pub use renderer::instance::{ArrowInstance, CreatureInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{write_frame, FrameHeader, ProtocolLayout};
pub use systems::drag::{DragController, DragState};
pub use systems::motion::Strategy;
pub use systems::overlay::{ArrowKind, Overlays, TransferArrow};
pub use systems::placement::PlacementRules;
pub use systems::rng::Rng;
pub use systems::selection::{Highlight, Selection};
