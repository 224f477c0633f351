use glam::Vec2;
use serde::Serialize;

use crate::api::types::CreatureId;
use crate::components::descriptor::{CreatureDescriptor, TransferPeer};
use crate::components::species::Species;
use crate::core::viewport::Bounds;

/// Which way the sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing implied by a horizontal velocity. Zero counts as right.
    pub fn from_vx(vx: f32) -> Self {
        if vx < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    /// +1.0 for right, -1.0 for left (horizontal sprite scale).
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Which sprite representation the shell should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visual {
    /// Animated swimming sprite.
    #[default]
    Swimming,
    /// Still "held" sprite shown while dragged.
    Held,
}

/// Mutable kinematic state.
/// Written only by the creature's active motion task, or by the drag
/// controller while the creature is held; never both in the same tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Origin (top-left) in screen space.
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    /// Index of the next waypoint, for waypoint-following species.
    pub waypoint: usize,
}

impl Motion {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
            waypoint: 0,
        }
    }
}

/// A live creature: static descriptor data, derived size, and motion state.
#[derive(Debug, Clone)]
pub struct Creature {
    pub id: CreatureId,
    species: Species,
    descriptor: CreatureDescriptor,
    size: Vec2,
    spawn: Vec2,
    /// Kinematic state.
    pub motion: Motion,
    /// Motion bounds for this creature's size; refreshed on resize.
    pub bounds: Bounds,
    pub visual: Visual,
    /// False once the creature has been detached from the visual layer.
    /// A motion task for a detached creature halts on its next run.
    pub attached: bool,
}

impl Creature {
    pub fn new(
        id: CreatureId,
        species: Species,
        descriptor: CreatureDescriptor,
        bounds: Bounds,
        spawn: Vec2,
    ) -> Self {
        let side = species.size_for(descriptor.ada);
        Self {
            id,
            species,
            descriptor,
            size: Vec2::splat(side),
            spawn,
            motion: Motion::at(spawn),
            bounds,
            visual: Visual::Swimming,
            attached: true,
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn descriptor(&self) -> &CreatureDescriptor {
        &self.descriptor
    }

    pub fn address(&self) -> &str {
        &self.descriptor.address
    }

    pub fn balance(&self) -> f64 {
        self.descriptor.ada
    }

    pub fn role(&self) -> Option<&str> {
        self.descriptor.role.as_deref()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.descriptor.transaction_id.as_deref()
    }

    pub fn amount_transferred(&self) -> Option<f64> {
        self.descriptor.amount_transferred
    }

    pub fn sent_to(&self) -> &[TransferPeer] {
        &self.descriptor.sent_to_info
    }

    pub fn received_from(&self) -> &[TransferPeer] {
        &self.descriptor.received_from_info
    }

    /// Width and height in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn pos(&self) -> Vec2 {
        self.motion.pos
    }

    /// Position assigned by the placement planner.
    pub fn spawn_pos(&self) -> Vec2 {
        self.spawn
    }

    /// Center of the creature's box (origin + half size).
    pub fn center(&self) -> Vec2 {
        self.motion.pos + self.size / 2.0
    }

    /// Snapshot for the info panel.
    pub fn info(&self) -> CreatureInfo {
        CreatureInfo {
            id: self.id.0,
            address: self.descriptor.address.clone(),
            species: self.species,
            band: self.species.band_label(),
            ada: self.descriptor.ada,
            role: self.descriptor.role.clone(),
            transaction_id: self.descriptor.transaction_id.clone(),
            amount_transferred: self.descriptor.amount_transferred,
            sent_to_info: self.descriptor.sent_to_info.clone(),
            received_from_info: self.descriptor.received_from_info.clone(),
            x: self.motion.pos.x,
            y: self.motion.pos.y,
            size: self.size.x,
        }
    }

    /// Whether a screen point hits the drawn sprite, which sits
    /// `render_offset_y` below the origin for some species.
    pub fn hit(&self, point: Vec2) -> bool {
        let top_left = self.motion.pos + Vec2::new(0.0, self.species.render_offset_y());
        let bottom_right = top_left + self.size;
        point.x >= top_left.x
            && point.x <= bottom_right.x
            && point.y >= top_left.y
            && point.y <= bottom_right.y
    }
}

/// What the info panel shows for a creature, serialized to JSON for the shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureInfo {
    pub id: u32,
    pub address: String,
    #[serde(rename = "type")]
    pub species: Species,
    /// Balance band of the species, e.g. "3,000 - 9,999 ADA".
    pub band: String,
    pub ada: f64,
    pub role: Option<String>,
    pub transaction_id: Option<String>,
    pub amount_transferred: Option<f64>,
    pub sent_to_info: Vec<TransferPeer>,
    pub received_from_info: Vec<TransferPeer>,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature(species: Species, ada: f64, pos: Vec2) -> Creature {
        Creature::new(
            CreatureId(1),
            species,
            CreatureDescriptor::new("addr", species, ada),
            Bounds::new(20.0, 120.0, 800.0, 600.0),
            pos,
        )
    }

    #[test]
    fn size_comes_from_species_rule() {
        let c = creature(Species::Octopus, 2_000.0, Vec2::ZERO);
        assert_eq!(c.size(), Vec2::splat(90.0));
        assert_eq!(c.center(), Vec2::splat(45.0));
    }

    #[test]
    fn starts_at_spawn_swimming_and_attached() {
        let c = creature(Species::Fish, 3_000.0, Vec2::new(20.0, 170.0));
        assert_eq!(c.pos(), Vec2::new(20.0, 170.0));
        assert_eq!(c.spawn_pos(), c.pos());
        assert_eq!(c.visual, Visual::Swimming);
        assert!(c.attached);
    }

    #[test]
    fn hit_box_follows_render_offset() {
        let whale = creature(Species::Whale, 300_000.0, Vec2::new(100.0, 100.0));
        assert!(!whale.hit(Vec2::new(150.0, 150.0)));
        assert!(whale.hit(Vec2::new(150.0, 250.0)));
        assert!(whale.hit(Vec2::new(450.0, 550.0)));

        let fish = creature(Species::Fish, 3_000.0, Vec2::new(100.0, 100.0));
        assert!(fish.hit(Vec2::new(120.0, 120.0)));
        assert!(!fish.hit(Vec2::new(141.0, 120.0)));
    }

    #[test]
    fn info_snapshot_serializes_for_the_panel() {
        let c = creature(Species::Fish, 3_500.0, Vec2::new(20.0, 170.0));
        let json = serde_json::to_value(c.info()).unwrap();
        assert_eq!(json["type"], "fish");
        assert_eq!(json["band"], "3,000 - 9,999 ADA");
        assert_eq!(json["address"], "addr");
        assert_eq!(json["x"], 20.0);
        assert!(json["role"].is_null());
    }

    #[test]
    fn facing_from_velocity() {
        assert_eq!(Facing::from_vx(3.0), Facing::Right);
        assert_eq!(Facing::from_vx(-1.5), Facing::Left);
        assert_eq!(Facing::from_vx(0.0), Facing::Right);
        assert_eq!(Facing::Left.sign(), -1.0);
    }
}
