//! Creatures and the light-steering rule

use serde::{Deserialize, Serialize};

use super::agent::{Agent, Kind};
use super::beacon::Beacon;
use crate::consts::STEERING_GAIN_DISTANCE;
use crate::error::SimError;

/// How a creature reacts to lights; fixed for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Follows the nearest light
    Seeking,
    /// Turns against the farthest light once every light is close
    Avoiding,
}

impl Role {
    pub fn kind(&self) -> Kind {
        match self {
            Role::Seeking => Kind::Seeking,
            Role::Avoiding => Kind::Avoiding,
        }
    }
}

/// A creature entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub agent: Agent,
    role: Role,
    /// Lights closer than this get a reaction
    pub reaction_radius: f32,
}

impl Creature {
    pub fn new(agent: Agent, role: Role, reaction_radius: f32) -> Self {
        Self {
            agent,
            role,
            reaction_radius,
        }
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Re-aim from the current light positions.
    ///
    /// Seeking creatures copy the nearest light's heading once it is within
    /// `reaction_radius`; avoiding creatures take the negated heading of the
    /// farthest light once even that one is within range. Either way the
    /// heading is scaled by `max(1, 100 / d)`. Ties go to the earlier light.
    ///
    /// `beacons` must not be empty. Returns whether the heading was replaced.
    pub fn steer(&mut self, beacons: &[Beacon]) -> bool {
        debug_assert!(!beacons.is_empty(), "steer called without beacons");

        let pick = match self.role {
            Role::Seeking => self.extreme_beacon(beacons, |d, best| d < best),
            Role::Avoiding => self.extreme_beacon(beacons, |d, best| d > best),
        };
        let Some((beacon, d)) = pick else {
            return false;
        };
        // Coincident with the light: infinite gain, leave it to collisions
        if d >= self.reaction_radius || d <= 0.0 {
            return false;
        }

        let gain = (STEERING_GAIN_DISTANCE / d).max(1.0);
        self.agent.heading = match self.role {
            Role::Seeking => beacon.agent.heading * gain,
            Role::Avoiding => -1.0 * beacon.agent.heading * gain,
        };
        true
    }

    /// [`Creature::steer`] with the empty-input precondition reported as an error
    pub fn try_steer(&mut self, beacons: &[Beacon]) -> Result<bool, SimError> {
        if beacons.is_empty() {
            return Err(SimError::PreconditionViolation(
                "creature steering needs at least one beacon",
            ));
        }
        Ok(self.steer(beacons))
    }

    /// First beacon whose distance wins `better` against every earlier one
    fn extreme_beacon<'a>(
        &self,
        beacons: &'a [Beacon],
        better: impl Fn(f32, f32) -> bool,
    ) -> Option<(&'a Beacon, f32)> {
        let mut best: Option<(&Beacon, f32)> = None;
        for beacon in beacons {
            let d = self.agent.distance_to(&beacon.agent);
            match best {
                Some((_, best_d)) if !better(d, best_d) => {}
                _ => best = Some((beacon, d)),
            }
        }
        best
    }
}
