//! Bounce response for walls and agent-agent contact
//!
//! Everything bounces off a single contact point: walls project the agent onto
//! the wall line, other agents use their centre. Only the heading changes; the
//! agent keeps its scalar speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use crate::settings::ArenaBounds;
use crate::{heading_of, polar_to_cartesian, saturating_normalize};

/// New heading after bouncing off `obstacle`
///
/// The velocity component across the contact tangent is flipped. The tangent
/// is normalized with a length floor of 1, so an obstacle sitting on the
/// agent's centre degrades gracefully instead of dividing by zero.
pub fn reflect_heading(pos: Vec2, heading: f32, speed: f32, obstacle: Vec2) -> f32 {
    let velocity = polar_to_cartesian(speed, heading);
    let normal = obstacle - pos;
    let tangent = saturating_normalize(Vec2::new(normal.y, -normal.x));

    let tangential = tangent * velocity.dot(tangent);
    let perpendicular = velocity - tangential;
    let reflected = velocity - 2.0 * perpendicular;

    heading_of(reflected)
}

/// Arena walls, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Right,
    Left,
    Top,
    Bottom,
}

impl Wall {
    pub const CHECK_ORDER: [Wall; 4] = [Wall::Right, Wall::Left, Wall::Top, Wall::Bottom];

    /// Whether `pos` is past this wall
    #[inline]
    pub fn is_crossed(self, pos: Vec2, bounds: &ArenaBounds) -> bool {
        match self {
            Wall::Right => pos.x > bounds.max.x,
            Wall::Left => pos.x < -bounds.max.x,
            Wall::Top => pos.y > bounds.max.y,
            Wall::Bottom => pos.y < -bounds.max.y,
        }
    }

    /// Projection of `pos` onto this wall's line
    #[inline]
    pub fn contact_point(self, pos: Vec2, bounds: &ArenaBounds) -> Vec2 {
        match self {
            Wall::Right => Vec2::new(bounds.max.x, pos.y),
            Wall::Left => Vec2::new(-bounds.max.x, pos.y),
            Wall::Top => Vec2::new(pos.x, bounds.max.y),
            Wall::Bottom => Vec2::new(pos.x, -bounds.max.y),
        }
    }

    /// `pos` moved back to the resting inset on this wall's axis
    #[inline]
    pub fn rest_position(self, pos: Vec2, bounds: &ArenaBounds) -> Vec2 {
        match self {
            Wall::Right => Vec2::new(bounds.clamp.x, pos.y),
            Wall::Left => Vec2::new(-bounds.clamp.x, pos.y),
            Wall::Top => Vec2::new(pos.x, bounds.clamp.y),
            Wall::Bottom => Vec2::new(pos.x, -bounds.clamp.y),
        }
    }
}

/// Bounce an agent off the first wall it has crossed, if any.
///
/// At most one wall is handled per call; a corner overshoot gets its second
/// wall on the next step.
pub fn enforce_walls(agent: &mut Agent, bounds: &ArenaBounds) -> Option<Wall> {
    let wall = Wall::CHECK_ORDER
        .into_iter()
        .find(|wall| wall.is_crossed(agent.pos, bounds))?;

    let contact = wall.contact_point(agent.pos, bounds);
    agent.heading = reflect_heading(agent.pos, agent.heading, agent.speed, contact);
    agent.pos = wall.rest_position(agent.pos, bounds);
    Some(wall)
}

/// Bounce `agent` off `other` when they overlap; `other` is left alone
pub fn bounce_off(agent: &mut Agent, other: &Agent) -> bool {
    if !agent.overlaps(other) {
        return false;
    }
    agent.heading = reflect_heading(agent.pos, agent.heading, agent.speed, other.pos);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_angle;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn bounds() -> ArenaBounds {
        ArenaBounds::new(Vec2::new(400.0, 250.0), 6.0)
    }

    /// Angular distance on the circle
    fn angle_between(a: f32, b: f32) -> f32 {
        normalize_angle(a - b).abs()
    }

    #[test]
    fn test_head_on_reverses() {
        let heading = reflect_heading(Vec2::new(405.0, 0.0), 0.0, 10.0, Vec2::new(400.0, 0.0));
        assert!((angle_between(heading, 0.0) - PI).abs() < 1e-5);

        let heading = reflect_heading(Vec2::ZERO, FRAC_PI_2, 3.0, Vec2::new(0.0, 20.0));
        assert!((angle_between(heading, FRAC_PI_2) - PI).abs() < 1e-5);
    }

    #[test]
    fn test_glancing_bounce_keeps_tangential_part() {
        // Moving up-right into the right wall: x flips, y stays
        let heading = reflect_heading(Vec2::new(402.0, 0.0), FRAC_PI_4, 10.0, Vec2::new(400.0, 0.0));
        assert!((angle_between(heading, 3.0 * FRAC_PI_4)).abs() < 1e-5);
    }

    #[test]
    fn test_obstacle_on_centre_does_not_blow_up() {
        let heading = reflect_heading(Vec2::new(1.0, 1.0), 0.3, 5.0, Vec2::new(1.0, 1.0));
        assert!(heading.is_finite());
    }

    #[test]
    fn test_right_wall_bounce_and_clamp() {
        let mut agent = Agent::new(Vec2::new(405.0, 12.0), 0.0, 10.0, 6.0);
        assert_eq!(enforce_walls(&mut agent, &bounds()), Some(Wall::Right));
        assert_eq!(agent.pos, Vec2::new(394.0, 12.0));
        assert!((angle_between(agent.heading, 0.0) - PI).abs() < 1e-5);
    }

    #[test]
    fn test_each_wall_clamps_its_axis() {
        let cases = [
            (Vec2::new(-401.0, 5.0), Wall::Left, Vec2::new(-394.0, 5.0)),
            (Vec2::new(5.0, 251.0), Wall::Top, Vec2::new(5.0, 244.0)),
            (Vec2::new(5.0, -251.0), Wall::Bottom, Vec2::new(5.0, -244.0)),
        ];
        for (pos, wall, rest) in cases {
            let mut agent = Agent::new(pos, 1.0, 3.0, 6.0);
            assert_eq!(enforce_walls(&mut agent, &bounds()), Some(wall));
            assert_eq!(agent.pos, rest);
        }
    }

    #[test]
    fn test_inside_is_untouched() {
        let mut agent = Agent::new(Vec2::new(400.0, -250.0), 1.0, 3.0, 6.0);
        assert_eq!(enforce_walls(&mut agent, &bounds()), None);
        assert_eq!(agent.heading, 1.0);
        assert_eq!(agent.pos, Vec2::new(400.0, -250.0));
    }

    #[test]
    fn test_corner_handles_one_wall_per_call() {
        let mut agent = Agent::new(Vec2::new(410.0, 260.0), FRAC_PI_4, 10.0, 6.0);
        assert_eq!(enforce_walls(&mut agent, &bounds()), Some(Wall::Right));
        assert_eq!(agent.pos, Vec2::new(394.0, 260.0));
        assert_eq!(enforce_walls(&mut agent, &bounds()), Some(Wall::Top));
        assert_eq!(agent.pos, Vec2::new(394.0, 244.0));
    }

    #[test]
    fn test_bounce_off_needs_overlap() {
        let other = Agent::new(Vec2::new(12.0, 0.0), 0.0, 0.0, 6.0);
        let mut touching = Agent::new(Vec2::ZERO, 0.0, 5.0, 6.0);
        assert!(!bounce_off(&mut touching, &other));
        assert_eq!(touching.heading, 0.0);

        let mut overlapping = Agent::new(Vec2::new(0.5, 0.0), 0.0, 5.0, 6.0);
        assert!(bounce_off(&mut overlapping, &other));
        assert!((angle_between(overlapping.heading, 0.0) - PI).abs() < 1e-5);
        assert_eq!(other.heading, 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reflection_keeps_speed(
                heading in -10.0f32..10.0,
                speed in 0.1f32..50.0,
                angle in -PI..PI,
                dist in 1.0f32..100.0,
            ) {
                // Unit tangent whenever the obstacle is at least 1 away
                let pos = Vec2::new(3.0, -2.0);
                let obstacle = pos + polar_to_cartesian(dist, angle);
                let new_heading = reflect_heading(pos, heading, speed, obstacle);
                prop_assert!(new_heading.is_finite());

                let before = polar_to_cartesian(speed, heading);
                let after = polar_to_cartesian(speed, new_heading);
                let normal = (obstacle - pos).normalize();
                // Normal component flips, tangential component survives
                prop_assert!((before.dot(normal) + after.dot(normal)).abs() < 1e-2 * speed);
                let tangent = Vec2::new(normal.y, -normal.x);
                prop_assert!((before.dot(tangent) - after.dot(tangent)).abs() < 1e-2 * speed);
            }
        }
    }
}
