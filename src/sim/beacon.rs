//! Roaming lights

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use crate::consts::{BEACON_TURN_CHANCE, BEACON_TURN_MAX};

/// A light entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub agent: Agent,
    /// Occasionally swap the heading for a random one
    pub random_heading: bool,
}

impl Beacon {
    pub fn new(agent: Agent, random_heading: bool) -> Self {
        Self {
            agent,
            random_heading,
        }
    }

    /// Roll for a new heading; returns it when the roll succeeds.
    ///
    /// Draws nothing from `rng` when random heading is off.
    pub fn maybe_turn(&mut self, rng: &mut impl Rng) -> Option<f32> {
        if !self.random_heading {
            return None;
        }
        if rng.random::<f32>() <= BEACON_TURN_CHANCE {
            self.agent.heading = rng.random_range(1..=BEACON_TURN_MAX) as f32;
            Some(self.agent.heading)
        } else {
            None
        }
    }

    /// Turn (maybe), then move for `dt`
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) -> Option<f32> {
        let turned = self.maybe_turn(rng);
        self.agent.advance(dt);
        turned
    }
}
