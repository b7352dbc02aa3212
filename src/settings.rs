//! Arena configuration and scenario presets
//!
//! Loaded from JSON on the command line or picked from a named preset.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::Role;

/// Built-in arena layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Scenario {
    /// Ten of each creature around two wandering lights
    #[default]
    Swarm,
    /// Faster creatures crowding five lights
    Crowd,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Swarm => "swarm",
            Scenario::Crowd => "crowd",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "swarm" | "0" => Some(Scenario::Swarm),
            "crowd" | "1" => Some(Scenario::Crowd),
            _ => None,
        }
    }

    /// Full configuration for this preset
    pub fn config(&self) -> ArenaConfig {
        match self {
            Scenario::Swarm => ArenaConfig {
                seeking: CreatureConfig::new(10, Role::Seeking, 20.0, 3.0),
                avoiding: CreatureConfig::new(10, Role::Avoiding, 10.0, 3.0),
                beacons: BeaconConfig::new(2, 5.0, true),
                ..ArenaConfig::default()
            },
            Scenario::Crowd => ArenaConfig {
                seeking: CreatureConfig::new(5, Role::Seeking, 10.0, 5.0),
                avoiding: CreatureConfig::new(10, Role::Avoiding, 10.0, 5.0),
                beacons: BeaconConfig::new(5, 5.0, true),
                ..ArenaConfig::default()
            },
        }
    }
}

/// One creature population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatureConfig {
    pub count: usize,
    pub role: Role,
    /// Distance at which these creatures react to lights
    pub reaction_radius: f32,
    /// Units per unit of dt
    pub speed: f32,
}

impl CreatureConfig {
    pub fn new(count: usize, role: Role, reaction_radius: f32, speed: f32) -> Self {
        Self {
            count,
            role,
            reaction_radius,
            speed,
        }
    }
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self::new(0, Role::Seeking, 10.0, 3.0)
    }
}

/// The light population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeaconConfig {
    pub count: usize,
    pub speed: f32,
    /// Lights occasionally pick a new random heading
    pub random_heading: bool,
}

impl BeaconConfig {
    pub fn new(count: usize, speed: f32, random_heading: bool) -> Self {
        Self {
            count,
            speed,
            random_heading,
        }
    }
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self::new(0, 5.0, true)
    }
}

/// Everything needed to build an [`crate::sim::Arena`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub seeking: CreatureConfig,
    pub avoiding: CreatureConfig,
    pub beacons: BeaconConfig,

    // === Geometry ===
    pub window_width: f32,
    pub window_height: f32,
    /// Combined gap between window edges and arena walls
    pub border: f32,
    /// Radius of every agent
    pub radius: f32,

    // === Driving loop ===
    pub dt: f32,
    /// RNG seed for spawn positions and beacon turns
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seeking: CreatureConfig::default(),
            avoiding: CreatureConfig {
                role: Role::Avoiding,
                ..CreatureConfig::default()
            },
            beacons: BeaconConfig::default(),

            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            border: ARENA_BORDER,
            radius: AGENT_RADIUS,

            dt: STEP_DT,
            seed: 0,
        }
    }
}

/// Wall positions derived from the window layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Outer half-extents; crossing these triggers a bounce
    pub max: Vec2,
    /// Where a bounced agent is put back, one radius inside the wall
    pub clamp: Vec2,
}

impl ArenaBounds {
    pub fn new(max: Vec2, radius: f32) -> Self {
        Self {
            max,
            clamp: max - Vec2::splat(radius),
        }
    }

    /// Strictly inside the outer walls on both axes
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        -self.max.x < p.x && p.x < self.max.x && -self.max.y < p.y && p.y < self.max.y
    }
}

impl ArenaConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded arena config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Arena half-extents and resting inset for this layout
    pub fn bounds(&self) -> ArenaBounds {
        let max = Vec2::new(
            (self.window_width - self.border) / 2.0,
            (self.window_height - self.border) / 2.0,
        );
        ArenaBounds::new(max, self.radius)
    }

    /// Reject layouts the simulation can't run sensibly
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SimError::invalid(format!(
                "agent radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.dt.is_finite() && self.dt >= 0.0) {
            return Err(SimError::invalid(format!(
                "dt must be non-negative, got {}",
                self.dt
            )));
        }

        for (name, creatures) in [("seeking", &self.seeking), ("avoiding", &self.avoiding)] {
            check_speed(name, creatures.speed)?;
            if !(creatures.reaction_radius.is_finite() && creatures.reaction_radius > 0.0) {
                return Err(SimError::invalid(format!(
                    "{name} reaction radius must be positive, got {}",
                    creatures.reaction_radius
                )));
            }
        }
        if self.seeking.role != Role::Seeking || self.avoiding.role != Role::Avoiding {
            return Err(SimError::invalid(
                "seeking/avoiding populations have mismatched roles",
            ));
        }
        check_speed("beacon", self.beacons.speed)?;

        let bounds = self.bounds();
        if !(bounds.clamp.x > 0.0 && bounds.clamp.y > 0.0) {
            return Err(SimError::invalid(format!(
                "arena half-extents {:?} leave no room for radius {}",
                bounds.max, self.radius
            )));
        }
        Ok(())
    }
}

fn check_speed(name: &str, speed: f32) -> Result<(), SimError> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!(
            "{name} speed must be non-negative, got {speed}"
        )))
    }
}
