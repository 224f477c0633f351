use glam::Vec2;

use crate::api::types::CreatureId;
use crate::components::creature::Creature;

/// At most one selected creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(CreatureId),
}

impl Selection {
    pub fn id(&self) -> Option<CreatureId> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(*id),
        }
    }

    pub fn is_selected(&self, id: CreatureId) -> bool {
        *self == Selection::Selected(id)
    }
}

/// Circular marker drawn around the selected creature.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Highlight {
    pub visible: bool,
    pub center: Vec2,
    pub diameter: f32,
}

impl Highlight {
    /// Snap onto a creature's current box.
    pub fn track(&mut self, creature: &Creature, padding: f32) {
        self.visible = true;
        self.center = creature.center();
        self.diameter = creature.width().max(creature.height()) + padding;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Top-left corner of the marker's bounding square.
    pub fn origin(&self) -> Vec2 {
        self.center - Vec2::splat(self.diameter / 2.0)
    }
}
