use glam::Vec2;

use super::reflect_x;
use crate::components::creature::Motion;
use crate::core::viewport::Bounds;

/// Side-to-side walk along the floor. Gravity pulls the creature down to
/// `bounds.max.y` whenever it is above it (e.g. after being dropped mid-water).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crawl {
    pub speed: f32,
    /// Added to the vertical velocity each step while above the floor.
    pub gravity: f32,
    pub period_ms: u32,
}

impl Crawl {
    pub const CRAB: Crawl = Crawl {
        speed: 1.0,
        gravity: 0.5,
        period_ms: 50,
    };

    pub fn start(&self, motion: &mut Motion) {
        motion.vel = Vec2::new(self.speed, 0.0);
    }

    pub fn step(&self, motion: &mut Motion, bounds: &Bounds) {
        let floor = bounds.max.y;
        if motion.pos.y < floor {
            motion.vel.y += self.gravity;
        } else {
            motion.vel.y = 0.0;
        }
        let candidate = motion.pos + motion.vel;
        reflect_x(motion, candidate.x, bounds);
        motion.pos = bounds.clamp(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::creature::Facing;

    #[test]
    fn falls_to_the_floor_and_stays() {
        let bounds = Bounds::new(0.0, 0.0, 500.0, 300.0);
        let mut m = Motion::at(Vec2::new(100.0, 50.0));
        Crawl::CRAB.start(&mut m);
        let mut steps = 0;
        while m.pos.y < 300.0 {
            Crawl::CRAB.step(&mut m, &bounds);
            steps += 1;
            assert!(steps < 100, "never landed");
        }
        // Gravity accelerates: 0.5 + 1.0 + ... reaches 250 units in ~32 steps.
        assert!(steps < 40);
        Crawl::CRAB.step(&mut m, &bounds);
        assert_eq!(m.vel.y, 0.0);
        assert_eq!(m.pos.y, 300.0);
    }

    #[test]
    fn walks_and_turns_at_walls() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 300.0);
        let mut m = Motion::at(Vec2::new(8.0, 300.0));
        Crawl::CRAB.start(&mut m);
        Crawl::CRAB.step(&mut m, &bounds);
        assert_eq!(m.pos.x, 9.0);
        Crawl::CRAB.step(&mut m, &bounds);
        assert_eq!(m.pos.x, 10.0);
        assert_eq!(m.vel.x, -1.0);
        assert_eq!(m.facing, Facing::Left);
        Crawl::CRAB.step(&mut m, &bounds);
        assert_eq!(m.pos.x, 9.0);
    }

    #[test]
    fn never_moves_vertically_on_the_floor() {
        let bounds = Bounds::new(0.0, 0.0, 500.0, 300.0);
        let mut m = Motion::at(Vec2::new(100.0, 300.0));
        Crawl::CRAB.start(&mut m);
        for _ in 0..50 {
            Crawl::CRAB.step(&mut m, &bounds);
            assert_eq!(m.pos.y, 300.0);
        }
    }
}
