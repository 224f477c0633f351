use glam::Vec2;

use super::reflect_x;
use crate::components::creature::{Facing, Motion};
use crate::core::viewport::Bounds;

/// Constant-speed horizontal sweep, bouncing between the side walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Signed; negative sweeps start heading left.
    pub initial_vx: f32,
    pub period_ms: u32,
}

impl Sweep {
    pub const FISH: Sweep = Sweep {
        initial_vx: 3.0,
        period_ms: 30,
    };
    pub const SHARK: Sweep = Sweep {
        initial_vx: 2.0,
        period_ms: 50,
    };
    pub const TUNA: Sweep = Sweep {
        initial_vx: -1.5,
        period_ms: 50,
    };

    pub fn start(&self, motion: &mut Motion) {
        motion.vel = Vec2::new(self.initial_vx, 0.0);
        motion.facing = Facing::from_vx(self.initial_vx);
    }

    pub fn step(&self, motion: &mut Motion, bounds: &Bounds) {
        let candidate_x = motion.pos.x + motion.vel.x;
        reflect_x(motion, candidate_x, bounds);
        motion.pos = bounds.clamp(Vec2::new(candidate_x, motion.pos.y));
    }
}
