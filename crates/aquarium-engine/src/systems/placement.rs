// systems/placement.rs
//
// Spawn positions for a freshly loaded block. Each species has a horizontal
// and vertical bias; where the bias leaves y open, random candidates are
// tried against the creatures already placed. Overlap avoidance is
// best-effort: the last candidate is accepted if none is free.
//
// Usage:
//   let ordinal = store.count_species(species);
//   let pos = plan_spawn(&rules, species, size, &bounds, ordinal, &placed, &mut rng);

use glam::Vec2;

use crate::components::species::Species;
use crate::core::viewport::Bounds;
use crate::systems::rng::Rng;

/// Tunables for the planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    /// Random y candidates tried before giving up.
    pub max_attempts: u32,
    /// Extra clearance on every side in the overlap test.
    pub padding: f32,
    /// Distance of the first staggered creature below the top edge.
    pub stagger_top: f32,
    /// Vertical step between same-species staggered creatures.
    pub stagger_step: f32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            padding: 30.0,
            stagger_top: 50.0,
            stagger_step: 80.0,
        }
    }
}

/// A creature box already in the water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Placed {
    /// Padded AABB overlap against a candidate box.
    pub fn overlaps(&self, pos: Vec2, size: Vec2, padding: f32) -> bool {
        pos.x < self.pos.x + self.size.x + padding
            && pos.x + size.x + padding > self.pos.x
            && pos.y < self.pos.y + self.size.y + padding
            && pos.y + size.y + padding > self.pos.y
    }
}

/// Where a species starts horizontally.
fn spawn_x(species: Species, bounds: &Bounds, rng: &mut Rng) -> f32 {
    match species {
        Species::Tuna => bounds.max.x,
        Species::Dolphin | Species::Octopus => bounds.center_x(),
        Species::Crab => rng.range(bounds.min.x, bounds.max.x),
        Species::Shrimp | Species::Fish | Species::Shark | Species::Whale => bounds.min.x,
    }
}

/// Staggered depth for the `ordinal`-th creature of a sweeping species.
pub fn stagger_y(rules: &PlacementRules, bounds: &Bounds, ordinal: usize) -> f32 {
    let span = bounds.height() - 2.0 * rules.stagger_top;
    let offset = if span > 0.0 {
        (ordinal as f32 * rules.stagger_step) % span
    } else {
        0.0
    };
    (bounds.min.y + rules.stagger_top + offset)
        .min(bounds.max.y)
        .max(bounds.min.y)
}

/// Plan the spawn position of one creature.
///
/// `ordinal` is the number of creatures of the same species placed before
/// this one in the current block.
pub fn plan_spawn(
    rules: &PlacementRules,
    species: Species,
    size: Vec2,
    bounds: &Bounds,
    ordinal: usize,
    placed: &[Placed],
    rng: &mut Rng,
) -> Vec2 {
    let x = spawn_x(species, bounds, rng);
    let y = match species {
        Species::Crab | Species::Octopus | Species::Dolphin => bounds.max.y,
        Species::Fish | Species::Shark => stagger_y(rules, bounds, ordinal),
        Species::Shrimp | Species::Tuna | Species::Whale => {
            free_y(rules, x, size, bounds, placed, rng)
        }
    };
    let pos = bounds.clamp(Vec2::new(x, y));
    log::debug!("placed {species} #{ordinal} at ({:.1}, {:.1})", pos.x, pos.y);
    pos
}

/// Random depth, retried until the box clears every placed creature.
fn free_y(
    rules: &PlacementRules,
    x: f32,
    size: Vec2,
    bounds: &Bounds,
    placed: &[Placed],
    rng: &mut Rng,
) -> f32 {
    let mut y = bounds.min.y;
    for _ in 0..rules.max_attempts.max(1) {
        y = rng.range(bounds.min.y, bounds.max.y);
        let candidate = Vec2::new(x, y);
        if !placed.iter().any(|p| p.overlaps(candidate, size, rules.padding)) {
            return y;
        }
    }
    y
}
