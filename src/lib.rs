//! Swarm Arena - creatures chasing and fleeing roaming lights
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, walls, collisions, steering)
//! - `renderer`: Draw-request sink and a terminal raster
//! - `settings`: Arena configuration and scenario presets
//! - `error`: Crate error type

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{ArenaConfig, BeaconConfig, CreatureConfig, Scenario};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Window the arena was laid out for
    pub const WINDOW_WIDTH: f32 = 900.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;
    /// Gap between the window edge and the arena walls (both sides combined)
    pub const ARENA_BORDER: f32 = 100.0;

    /// Radius shared by every agent
    pub const AGENT_RADIUS: f32 = 6.0;

    /// Elapsed time fed to each step by the driving loop
    pub const STEP_DT: f32 = 5.0;

    /// Spawn square half-width (integer coordinates in [-SPAWN_HALF_EXTENT, SPAWN_HALF_EXTENT])
    pub const SPAWN_HALF_EXTENT: i32 = 100;
    /// Initial heading is PI / k for k in 1..=SPAWN_HEADING_DIVISOR_MAX
    pub const SPAWN_HEADING_DIVISOR_MAX: i32 = 5;

    /// Chance per step that a wandering beacon picks a new heading
    pub const BEACON_TURN_CHANCE: f32 = 0.30;
    /// Wandering beacons pick an integer heading in 1..=BEACON_TURN_MAX radians
    pub const BEACON_TURN_MAX: i32 = 8;

    /// Distance at which the steering gain reaches 1 (gain = max(1, STEERING_GAIN_DISTANCE / d))
    pub const STEERING_GAIN_DISTANCE: f32 = 100.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can land exactly on TAU through rounding
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), heading_of(pos))
}

/// Direction of a vector in radians, `atan2(y, x)`
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Divide by length, but never by less than 1.
///
/// Short vectors come back unchanged instead of blowing up, so this is only a
/// true unit normalization for vectors of length >= 1.
#[inline]
pub fn saturating_normalize(v: Vec2) -> Vec2 {
    v / v.length().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_polar_round_trip_axes() {
        let v = polar_to_cartesian(10.0, FRAC_PI_2);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 10.0).abs() < 1e-5);
        let (r, theta) = cartesian_to_polar(Vec2::new(-3.0, 0.0));
        assert!((r - 3.0).abs() < 1e-6);
        assert!((theta - PI).abs() < 1e-6);
    }

    #[test]
    fn test_saturating_normalize_floors_length() {
        let long = saturating_normalize(Vec2::new(0.0, 5.0));
        assert!((long.length() - 1.0).abs() < 1e-6);

        let short = saturating_normalize(Vec2::new(0.3, 0.4));
        assert_eq!(short, Vec2::new(0.3, 0.4));

        assert_eq!(saturating_normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_normalize_angle_range() {
        for angle in [-10.0, -PI, 0.0, PI, 3.0 * PI, 20.0] {
            let a = normalize_angle(angle);
            assert!((-PI..PI).contains(&a), "{angle} -> {a}");
            // Same direction after wrapping
            assert!((a.cos() - angle.cos()).abs() < 1e-4);
            assert!((a.sin() - angle.sin()).abs() < 1e-4);
        }
    }
}
