//! Arena state and construction
//!
//! The arena owns every agent for the lifetime of the run. Nothing is spawned
//! or removed after construction, so agent ids stay valid forever.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::agent::{Agent, AgentId, Kind};
use super::beacon::Beacon;
use super::collision::Wall;
use super::creature::{Creature, Role};
use crate::consts::{SPAWN_HALF_EXTENT, SPAWN_HEADING_DIVISOR_MAX};
use crate::error::SimError;
use crate::renderer::{ColorClass, DrawRequest, DrawSink};
use crate::settings::{ArenaBounds, ArenaConfig};

/// Something notable that happened during the last step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Agent crossed a wall and was put back inside
    WallBounce { agent: AgentId, wall: Wall },
    /// Agent overlapped `other` and bounced off it
    Collision { agent: AgentId, other: AgentId },
    /// Wandering light picked a new heading
    BeaconTurn { beacon: usize, heading: f32 },
    /// Creature re-aimed from the lights
    HeadingSteered { creature: usize },
}

/// The whole simulation world
#[derive(Debug, Clone)]
pub struct Arena {
    /// Seeking creatures first, then avoiding
    pub(super) creatures: Vec<Creature>,
    pub(super) beacons: Vec<Beacon>,
    pub(super) bounds: ArenaBounds,
    pub(super) rng: Pcg32,
    /// Completed steps
    pub(super) time_ticks: u64,
    /// Events from the most recent step
    pub(super) events: Vec<SimEvent>,
}

impl Arena {
    /// Validate `config` and spawn every agent from its seed
    pub fn new(config: &ArenaConfig) -> Result<Self, SimError> {
        Self::with_rng(config, Pcg32::seed_from_u64(config.seed))
    }

    /// Like [`Arena::new`] but drawing from a caller-supplied RNG
    pub fn with_rng(config: &ArenaConfig, mut rng: Pcg32) -> Result<Self, SimError> {
        config.validate()?;

        let mut creatures = Vec::with_capacity(config.seeking.count + config.avoiding.count);
        for population in [&config.seeking, &config.avoiding] {
            for _ in 0..population.count {
                let agent = spawn_agent(&mut rng, population.speed, config.radius);
                creatures.push(Creature::new(agent, population.role, population.reaction_radius));
            }
        }

        let beacons = (0..config.beacons.count)
            .map(|_| {
                let agent = spawn_agent(&mut rng, config.beacons.speed, config.radius);
                Beacon::new(agent, config.beacons.random_heading)
            })
            .collect::<Vec<_>>();

        log::info!(
            "Arena ready: {} seeking, {} avoiding, {} beacons, walls at {:?}",
            config.seeking.count,
            config.avoiding.count,
            beacons.len(),
            config.bounds().max
        );

        Ok(Self::from_parts(config.bounds(), creatures, beacons, rng))
    }

    /// Assemble an arena from ready-made agents; order is kept as given
    pub fn from_parts(
        bounds: ArenaBounds,
        creatures: Vec<Creature>,
        beacons: Vec<Beacon>,
        rng: Pcg32,
    ) -> Self {
        Self {
            creatures,
            beacons,
            bounds,
            rng,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn beacons(&self) -> &[Beacon] {
        &self.beacons
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    pub fn tick_count(&self) -> u64 {
        self.time_ticks
    }

    /// Events recorded by the last [`Arena::step`]
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// All agents in canonical order: creatures, then beacons
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        let creatures = (0..self.creatures.len()).map(AgentId::Creature);
        let beacons = (0..self.beacons.len()).map(AgentId::Beacon);
        creatures.chain(beacons)
    }

    pub fn agent_count(&self) -> usize {
        self.creatures.len() + self.beacons.len()
    }

    /// Panics if `id` is out of range
    pub fn agent(&self, id: AgentId) -> &Agent {
        match id {
            AgentId::Creature(i) => &self.creatures[i].agent,
            AgentId::Beacon(i) => &self.beacons[i].agent,
        }
    }

    pub(super) fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        match id {
            AgentId::Creature(i) => &mut self.creatures[i].agent,
            AgentId::Beacon(i) => &mut self.beacons[i].agent,
        }
    }

    pub fn kind(&self, id: AgentId) -> Kind {
        match id {
            AgentId::Creature(i) => self.creatures[i].role().kind(),
            AgentId::Beacon(_) => Kind::Beacon,
        }
    }

    /// Draw request for one agent in its current state
    pub fn draw_request(&self, id: AgentId) -> DrawRequest {
        let agent = self.agent(id);
        DrawRequest {
            agent: id,
            position: agent.pos,
            heading: agent.heading,
            radius: agent.radius,
            color: ColorClass::from(self.kind(id)),
        }
    }

    /// Emit the walls and every agent once, before the first step
    pub fn initialize_graphics(&self, sink: &mut dyn DrawSink) {
        sink.arena(self.bounds.max);
        for id in self.agent_ids() {
            sink.draw(&self.draw_request(id));
        }
        sink.end_frame();
    }

    /// Count of creatures with the given role
    pub fn role_count(&self, role: Role) -> usize {
        self.creatures.iter().filter(|c| c.role() == role).count()
    }
}

/// Random spawn: integer coordinates in the spawn square, heading PI / k
fn spawn_agent(rng: &mut impl Rng, speed: f32, radius: f32) -> Agent {
    let x = rng.random_range(-SPAWN_HALF_EXTENT..=SPAWN_HALF_EXTENT) as f32;
    let y = rng.random_range(-SPAWN_HALF_EXTENT..=SPAWN_HALF_EXTENT) as f32;
    let heading = PI / rng.random_range(1..=SPAWN_HEADING_DIVISOR_MAX) as f32;
    Agent::new(Vec2::new(x, y), heading, speed, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Scenario;

    #[test]
    fn test_new_spawns_configured_counts() {
        let arena = Arena::new(&Scenario::Swarm.config()).unwrap();
        assert_eq!(arena.role_count(Role::Seeking), 10);
        assert_eq!(arena.role_count(Role::Avoiding), 10);
        assert_eq!(arena.beacons().len(), 2);
        assert_eq!(arena.agent_count(), 22);
        assert_eq!(arena.tick_count(), 0);
    }

    #[test]
    fn test_canonical_order() {
        let arena = Arena::new(&Scenario::Crowd.config()).unwrap();
        let kinds: Vec<Kind> = arena.agent_ids().map(|id| arena.kind(id)).collect();
        assert!(kinds[..5].iter().all(|k| *k == Kind::Seeking));
        assert!(kinds[5..15].iter().all(|k| *k == Kind::Avoiding));
        assert!(kinds[15..].iter().all(|k| *k == Kind::Beacon));
        assert_eq!(arena.agent_ids().last(), Some(AgentId::Beacon(4)));
    }

    #[test]
    fn test_spawn_ranges() {
        let arena = Arena::new(&ArenaConfig {
            seed: 3,
            ..Scenario::Crowd.config()
        })
        .unwrap();
        for id in arena.agent_ids() {
            let agent = arena.agent(id);
            assert!(agent.pos.x.abs() <= 100.0 && agent.pos.y.abs() <= 100.0);
            assert_eq!(agent.pos.x.fract(), 0.0);
            let k = PI / agent.heading;
            assert!((k - k.round()).abs() < 1e-4 && (1.0..=5.0).contains(&k.round()));
            assert_eq!(agent.prev_pos, agent.pos);
        }
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let config = Scenario::Swarm.config();
        let a = Arena::new(&config).unwrap();
        let b = Arena::new(&config).unwrap();
        assert_eq!(a.creatures(), b.creatures());
        assert_eq!(a.beacons(), b.beacons());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Scenario::Swarm.config();
        config.seeking.speed = f32::NAN;
        assert!(matches!(
            Arena::new(&config),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_initialize_graphics_draws_everyone() {
        let arena = Arena::new(&Scenario::Swarm.config()).unwrap();
        let mut frame: Vec<DrawRequest> = Vec::new();
        arena.initialize_graphics(&mut frame);
        assert_eq!(frame.len(), arena.agent_count());
        assert_eq!(frame[0].color, ColorClass::SeekingGreen);
        assert_eq!(frame[10].color, ColorClass::AvoidingRed);
        assert_eq!(frame[21].color, ColorClass::BeaconYellow);
    }
}
