use glam::Vec2;

use crate::components::creature::{Facing, Motion};
use crate::core::viewport::Bounds;

/// Diamond circuit through four waypoints derived from the bounds:
/// bottom-left, top-middle, bottom-right, top-middle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointPath {
    pub speed: f32,
    /// Distance under which the next waypoint is targeted.
    pub arrive_radius: f32,
    /// How far the waypoints sit inside the bounds.
    pub inset: f32,
    /// Horizontal distance to the target below which facing is left alone.
    pub facing_dead_zone: f32,
    pub period_ms: u32,
}

impl WaypointPath {
    pub const DOLPHIN: WaypointPath = WaypointPath {
        speed: 2.0,
        arrive_radius: 20.0,
        inset: 50.0,
        facing_dead_zone: 5.0,
        period_ms: 40,
    };

    pub fn waypoints(&self, bounds: &Bounds) -> [Vec2; 4] {
        let top_middle = Vec2::new(
            (bounds.min.x + bounds.max.x) / 2.0,
            bounds.min.y + self.inset,
        );
        [
            Vec2::new(bounds.min.x + self.inset, bounds.max.y - self.inset),
            top_middle,
            Vec2::new(bounds.max.x - self.inset, bounds.max.y - self.inset),
            top_middle,
        ]
    }

    pub fn start(&self, motion: &mut Motion) {
        motion.waypoint = 0;
        motion.vel = Vec2::ZERO;
        motion.facing = Facing::Right;
    }

    pub fn step(&self, motion: &mut Motion, bounds: &Bounds) {
        let waypoints = self.waypoints(bounds);
        let index = motion.waypoint % waypoints.len();
        let delta = waypoints[index] - motion.pos;
        let distance = delta.length();

        if distance < self.arrive_radius {
            motion.waypoint = (index + 1) % waypoints.len();
        }

        // This tick still heads for the waypoint just reached.
        motion.vel = if distance > 0.0 {
            delta / distance * self.speed
        } else {
            Vec2::ZERO
        };

        if delta.x > self.facing_dead_zone {
            motion.facing = Facing::Right;
        } else if delta.x < -self.facing_dead_zone {
            motion.facing = Facing::Left;
        }

        motion.pos = bounds.clamp(motion.pos + motion.vel);
    }
}
