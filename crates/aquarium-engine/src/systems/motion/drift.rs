use glam::Vec2;

use super::{reflect_x, reflect_y};
use crate::components::creature::Motion;
use crate::core::viewport::Bounds;
use crate::systems::rng::Rng;

/// Random walk: a gentle velocity that occasionally picks a new heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Each velocity component is drawn from `(-max_speed, max_speed)`.
    pub max_speed: f32,
    /// Probability per step of drawing a new velocity.
    pub turn_chance: f32,
    pub period_ms: u32,
}

impl Drift {
    pub const SHRIMP: Drift = Drift {
        max_speed: 0.6,
        turn_chance: 0.08,
        period_ms: 60,
    };

    fn random_velocity(&self, rng: &mut Rng) -> Vec2 {
        Vec2::new(
            rng.range(-self.max_speed, self.max_speed),
            rng.range(-self.max_speed, self.max_speed),
        )
    }

    pub fn start(&self, motion: &mut Motion, rng: &mut Rng) {
        motion.vel = self.random_velocity(rng);
    }

    pub fn step(&self, motion: &mut Motion, bounds: &Bounds, rng: &mut Rng) {
        if rng.chance(self.turn_chance) {
            motion.vel = self.random_velocity(rng);
        }
        let candidate = motion.pos + motion.vel;
        reflect_x(motion, candidate.x, bounds);
        reflect_y(motion, candidate.y, bounds);
        motion.pos = bounds.clamp(candidate);
    }
}
