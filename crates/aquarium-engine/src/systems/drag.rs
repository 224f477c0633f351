use glam::Vec2;

use crate::api::types::CreatureId;

/// Pointer travel (screen units) before a press on a creature counts as a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// A creature held by the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub id: CreatureId,
    /// Pointer position minus creature origin at pick-up.
    pub offset: Vec2,
    /// Where the pointer went down.
    pub press: Vec2,
    /// Set once the pointer strays past [`DRAG_THRESHOLD`] from `press`.
    pub moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Grab),
}

/// How a grab ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    pub id: CreatureId,
    /// The pointer never travelled past the threshold.
    pub click: bool,
}

/// Pick-up / move / drop state machine. Only one creature at a time.
///
/// Pure bookkeeping: stopping and restarting motion tasks and swapping the
/// held visual are the caller's job.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The creature currently held, if any.
    pub fn held(&self) -> Option<CreatureId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging(grab) => Some(grab.id),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.held().is_some()
    }

    /// Pick up a creature whose origin is at `origin`.
    /// Ignored (returns false) while another creature is held.
    pub fn begin(&mut self, id: CreatureId, origin: Vec2, pointer: Vec2) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging(Grab {
            id,
            offset: pointer - origin,
            press: pointer,
            moved: false,
        });
        true
    }

    /// Unclamped origin the held creature should move to, or None while Idle.
    pub fn drag_to(&mut self, pointer: Vec2) -> Option<(CreatureId, Vec2)> {
        let DragState::Dragging(grab) = &mut self.state else {
            return None;
        };
        if pointer.distance(grab.press) > DRAG_THRESHOLD {
            grab.moved = true;
        }
        Some((grab.id, pointer - grab.offset))
    }

    /// Drop the held creature, returning to Idle.
    pub fn end(&mut self) -> Option<Release> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging(grab) => Some(Release {
                id: grab.id,
                click: !grab.moved,
            }),
        }
    }

    /// Forget the grab without a release (used when the aquarium is cleared).
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
