//! Species motion strategies.
//!
//! Each strategy is a pure update rule over a creature's [`Motion`] and its
//! [`Bounds`]: `start` (re)initializes velocity and auxiliary state from the
//! current position, `step` advances one period. Every `step` ends with the
//! position clamped into the bounds.

pub mod bob;
pub mod crawl;
pub mod drift;
pub mod sweep;
pub mod waypoint;

pub use bob::Bob;
pub use crawl::Crawl;
pub use drift::Drift;
pub use sweep::Sweep;
pub use waypoint::WaypointPath;

use crate::components::creature::{Facing, Motion};
use crate::components::species::Species;
use crate::core::viewport::Bounds;
use crate::systems::rng::Rng;

/// The motion rule driving one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Drift(Drift),
    Crawl(Crawl),
    Bob(Bob),
    Sweep(Sweep),
    Waypoint(WaypointPath),
}

impl Strategy {
    /// Strategy table. Exhaustive over [`Species`].
    pub fn for_species(species: Species) -> Self {
        match species {
            Species::Shrimp => Strategy::Drift(Drift::SHRIMP),
            Species::Crab => Strategy::Crawl(Crawl::CRAB),
            Species::Octopus => Strategy::Bob(Bob::OCTOPUS),
            Species::Fish => Strategy::Sweep(Sweep::FISH),
            Species::Tuna => Strategy::Sweep(Sweep::TUNA),
            Species::Dolphin => Strategy::Waypoint(WaypointPath::DOLPHIN),
            Species::Shark => Strategy::Sweep(Sweep::SHARK),
            // Whales swim the fish sweep; only their render offset differs.
            Species::Whale => Strategy::Sweep(Sweep::FISH),
        }
    }

    /// Milliseconds between steps.
    pub fn period_ms(&self) -> u32 {
        match self {
            Strategy::Drift(s) => s.period_ms,
            Strategy::Crawl(s) => s.period_ms,
            Strategy::Bob(s) => s.period_ms,
            Strategy::Sweep(s) => s.period_ms,
            Strategy::Waypoint(s) => s.period_ms,
        }
    }

    /// Reset velocity and auxiliary state, keeping the current position.
    pub fn start(&self, motion: &mut Motion, rng: &mut Rng) {
        match self {
            Strategy::Drift(s) => s.start(motion, rng),
            Strategy::Crawl(s) => s.start(motion),
            Strategy::Bob(s) => s.start(motion),
            Strategy::Sweep(s) => s.start(motion),
            Strategy::Waypoint(s) => s.start(motion),
        }
    }

    /// Advance one period.
    pub fn step(&self, motion: &mut Motion, bounds: &Bounds, rng: &mut Rng) {
        match self {
            Strategy::Drift(s) => s.step(motion, bounds, rng),
            Strategy::Crawl(s) => s.step(motion, bounds),
            Strategy::Bob(s) => s.step(motion, bounds),
            Strategy::Sweep(s) => s.step(motion, bounds),
            Strategy::Waypoint(s) => s.step(motion, bounds),
        }
    }
}

/// Bounce off the left/right walls if `candidate_x` reaches one.
/// Velocity is forced away from the wall that was hit and facing follows it.
/// Returns true on a bounce.
pub(crate) fn reflect_x(motion: &mut Motion, candidate_x: f32, bounds: &Bounds) -> bool {
    let vx = if candidate_x >= bounds.max.x {
        -motion.vel.x.abs()
    } else if candidate_x <= bounds.min.x {
        motion.vel.x.abs()
    } else {
        return false;
    };
    motion.vel.x = vx;
    if vx != 0.0 {
        motion.facing = Facing::from_vx(vx);
    }
    true
}

/// Bounce off the top/bottom walls if `candidate_y` reaches one.
pub(crate) fn reflect_y(motion: &mut Motion, candidate_y: f32, bounds: &Bounds) -> bool {
    if candidate_y >= bounds.max.y {
        motion.vel.y = -motion.vel.y.abs();
        true
    } else if candidate_y <= bounds.min.y {
        motion.vel.y = motion.vel.y.abs();
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn table_matches_species() {
        assert!(matches!(Strategy::for_species(Species::Shrimp), Strategy::Drift(_)));
        assert!(matches!(Strategy::for_species(Species::Crab), Strategy::Crawl(_)));
        assert!(matches!(Strategy::for_species(Species::Octopus), Strategy::Bob(_)));
        assert!(matches!(Strategy::for_species(Species::Dolphin), Strategy::Waypoint(_)));
        assert_eq!(
            Strategy::for_species(Species::Whale),
            Strategy::for_species(Species::Fish)
        );
    }

    #[test]
    fn periods_are_in_range() {
        let periods: Vec<u32> = Species::ALL
            .iter()
            .map(|&s| Strategy::for_species(s).period_ms())
            .collect();
        assert_eq!(periods, vec![60, 50, 60, 30, 50, 40, 50, 30]);
    }

    #[test]
    fn every_species_stays_in_bounds() {
        let bounds_set = [
            Bounds::new(20.0, 120.0, 870.0, 660.0),
            Bounds::new(20.0, 120.0, 70.0, 170.0),
            Bounds::new(20.0, 120.0, 1500.0, 125.5),
        ];
        let starts = [
            Vec2::new(20.0, 120.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(-500.0, 5000.0),
            Vec2::new(9000.0, -10.0),
        ];
        let mut rng = Rng::new(1234);
        for species in Species::ALL {
            let strategy = Strategy::for_species(species);
            for bounds in &bounds_set {
                for &start in &starts {
                    let mut motion = Motion::at(start);
                    strategy.start(&mut motion, &mut rng);
                    for tick in 0..2_000 {
                        strategy.step(&mut motion, bounds, &mut rng);
                        assert!(
                            bounds.contains(motion.pos),
                            "{species} left {bounds:?} at tick {tick}: {:?}",
                            motion.pos
                        );
                        assert!(motion.pos.is_finite());
                    }
                }
            }
        }
    }

    #[test]
    fn reflect_x_forces_direction_and_facing() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let mut m = Motion::at(Vec2::new(99.0, 50.0));
        m.vel.x = 3.0;
        assert!(reflect_x(&mut m, 102.0, &bounds));
        assert_eq!(m.vel.x, -3.0);
        assert_eq!(m.facing, Facing::Left);
        assert!(reflect_x(&mut m, 0.0, &bounds));
        assert_eq!(m.vel.x, 3.0);
        assert_eq!(m.facing, Facing::Right);
        assert!(!reflect_x(&mut m, 50.0, &bounds));
    }
}
