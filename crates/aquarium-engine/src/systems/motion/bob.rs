use glam::Vec2;

use crate::components::creature::Motion;
use crate::core::viewport::Bounds;

/// Vertical oscillation between the middle of the bounds and the floor.
/// No horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bob {
    pub speed: f32,
    pub period_ms: u32,
}

impl Bob {
    pub const OCTOPUS: Bob = Bob {
        speed: 1.0,
        period_ms: 60,
    };

    /// Starts moving up.
    pub fn start(&self, motion: &mut Motion) {
        motion.vel = Vec2::new(0.0, -self.speed);
    }

    pub fn step(&self, motion: &mut Motion, bounds: &Bounds) {
        let mid = bounds.mid_y();
        let candidate = motion.pos.y + motion.vel.y;
        // Direction is forced at each extreme, not toggled.
        if candidate <= mid {
            motion.vel.y = motion.vel.y.abs();
        } else if candidate >= bounds.max.y {
            motion.vel.y = -motion.vel.y.abs();
        }
        motion.pos.y = candidate.min(bounds.max.y).max(mid);
        motion.pos.x = motion.pos.x.min(bounds.max.x).max(bounds.min.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillates_between_middle_and_floor() {
        let bounds = Bounds::new(0.0, 100.0, 300.0, 110.0);
        let mut m = Motion::at(Vec2::new(40.0, 110.0));
        Bob::OCTOPUS.start(&mut m);
        let mut ys = Vec::new();
        for _ in 0..12 {
            Bob::OCTOPUS.step(&mut m, &bounds);
            ys.push(m.pos.y);
        }
        assert_eq!(
            ys,
            vec![109.0, 108.0, 107.0, 106.0, 105.0, 106.0, 107.0, 108.0, 109.0, 110.0, 109.0, 108.0]
        );
        assert_eq!(m.pos.x, 40.0);
    }

    #[test]
    fn dropped_above_middle_snaps_down() {
        let bounds = Bounds::new(0.0, 100.0, 300.0, 500.0);
        let mut m = Motion::at(Vec2::new(40.0, 120.0));
        Bob::OCTOPUS.start(&mut m);
        Bob::OCTOPUS.step(&mut m, &bounds);
        assert_eq!(m.pos.y, 300.0);
        assert_eq!(m.vel.y, 1.0);
    }

    #[test]
    fn keeps_x_inside_bounds() {
        let bounds = Bounds::new(20.0, 100.0, 300.0, 500.0);
        let mut m = Motion::at(Vec2::new(900.0, 400.0));
        Bob::OCTOPUS.start(&mut m);
        Bob::OCTOPUS.step(&mut m, &bounds);
        assert_eq!(m.pos.x, 300.0);
    }
}
