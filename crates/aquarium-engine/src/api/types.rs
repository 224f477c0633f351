use bytemuck::{Pod, Zeroable};

/// Unique identifier for a creature in the store.
/// Assigned by the engine in creation order; never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(pub u32);

/// Kinds of [`ShellEvent`] the engine emits. Values are f32 on the wire.
pub mod event_kind {
    /// A block finished loading. `a` = creatures created, `b` = descriptors skipped.
    pub const BLOCK_LOADED: f32 = 1.0;
    /// The aquarium was cleared. No payload.
    pub const CLEARED: f32 = 2.0;
    /// Selection changed. `a` = creature id, or -1 when cleared.
    pub const SELECTION_CHANGED: f32 = 3.0;
    /// A creature was clicked. `a` = creature id.
    pub const CREATURE_CLICKED: f32 = 4.0;
    /// A drag started. `a` = creature id, `b`/`c` = position.
    pub const DRAG_STARTED: f32 = 5.0;
    /// A drag ended. `a` = creature id, `b`/`c` = drop position.
    pub const DRAG_ENDED: f32 = 6.0;
    /// A focus-by-address lookup found nothing. No payload.
    pub const FOCUS_MISSED: f32 = 7.0;
}

/// An event communicated from the engine to the JS shell via shared memory.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShellEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl ShellEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    pub fn for_creature(kind: f32, id: CreatureId) -> Self {
        Self::new(kind, id.0 as f32, 0.0, 0.0)
    }
}
