//! Shared state of every moving body in the arena

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// Position in the arena's canonical agent order
///
/// Creatures come first (seeking, then avoiding), beacons after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentId {
    Creature(usize),
    Beacon(usize),
}

/// What an agent is, for drawing and interaction rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Seeking,
    Avoiding,
    Beacon,
}

/// A moving circle with a heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub pos: Vec2,
    /// Direction of travel (radians, not wrapped)
    pub heading: f32,
    /// Distance covered per unit of dt
    pub speed: f32,
    pub radius: f32,
    /// Snapshot taken right before the last advance
    pub prev_pos: Vec2,
}

impl Agent {
    pub fn new(pos: Vec2, heading: f32, speed: f32, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "agent radius must be positive");
        debug_assert!(speed >= 0.0, "agent speed must be non-negative");
        Self {
            pos,
            heading,
            speed,
            radius,
            prev_pos: pos,
        }
    }

    /// Move along the current heading for `dt`
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.prev_pos = self.pos;
        self.pos += polar_to_cartesian(dt * self.speed, self.heading);
    }

    /// Velocity vector implied by heading and speed
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        polar_to_cartesian(self.speed, self.heading)
    }

    #[inline]
    pub fn distance_to(&self, other: &Agent) -> f32 {
        self.pos.distance(other.pos)
    }

    /// Closer than the sum of radii (touching doesn't count)
    #[inline]
    pub fn overlaps(&self, other: &Agent) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_advance_moves_along_heading() {
        let mut agent = Agent::new(Vec2::new(1.0, 2.0), FRAC_PI_2, 3.0, 6.0);
        agent.advance(5.0);
        assert!((agent.pos.x - 1.0).abs() < 1e-4);
        assert!((agent.pos.y - 17.0).abs() < 1e-4);
        assert_eq!(agent.prev_pos, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_prev_pos_is_a_snapshot() {
        let mut agent = Agent::new(Vec2::ZERO, 0.0, 1.0, 1.0);
        agent.advance(1.0);
        agent.advance(1.0);
        assert_eq!(agent.prev_pos, Vec2::new(1.0, 0.0));
        assert_eq!(agent.pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_zero_speed_stays_put() {
        let mut agent = Agent::new(Vec2::new(4.0, 4.0), 1.3, 0.0, 1.0);
        agent.advance(100.0);
        assert_eq!(agent.pos, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Agent::new(Vec2::ZERO, 0.0, 0.0, 6.0);
        let touching = Agent::new(Vec2::new(12.0, 0.0), 0.0, 0.0, 6.0);
        let inside = Agent::new(Vec2::new(11.99, 0.0), 0.0, 0.0, 6.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }
}
