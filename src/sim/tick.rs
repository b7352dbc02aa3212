//! One simulation step
//!
//! Runs in two passes. First every agent moves, is kept inside the walls and
//! is drawn. Then every ordered pair of distinct agents is visited: creatures
//! re-aim from the lights, and the first agent of the pair bounces off the
//! second if they overlap. The mirrored pair handles the other agent.

use super::agent::AgentId;
use super::collision::{bounce_off, enforce_walls};
use super::state::{Arena, SimEvent};
use crate::renderer::DrawSink;

impl Arena {
    /// Advance the world by `dt`, streaming draw requests to `sink`
    pub fn step(&mut self, dt: f32, sink: &mut dyn DrawSink) {
        step(self, dt, sink);
    }
}

/// Advance the arena by one step of `dt`
pub fn step(arena: &mut Arena, dt: f32, sink: &mut dyn DrawSink) {
    arena.events.clear();

    move_agents(arena, dt, sink);
    interact(arena);

    arena.time_ticks += 1;
    sink.end_frame();
}

fn move_agents(arena: &mut Arena, dt: f32, sink: &mut dyn DrawSink) {
    let bounds = arena.bounds;

    for id in arena.agent_ids() {
        match id {
            AgentId::Creature(i) => arena.creatures[i].agent.advance(dt),
            AgentId::Beacon(i) => {
                if let Some(heading) = arena.beacons[i].advance(dt, &mut arena.rng) {
                    log::debug!("Beacon {i} turned to {heading} rad");
                    arena.events.push(SimEvent::BeaconTurn { beacon: i, heading });
                }
            }
        }

        if let Some(wall) = enforce_walls(arena.agent_mut(id), &bounds) {
            log::trace!("{id:?} bounced off {wall:?} wall");
            arena.events.push(SimEvent::WallBounce { agent: id, wall });
        }

        sink.draw(&arena.draw_request(id));
    }
}

fn interact(arena: &mut Arena) {
    let ids: Vec<AgentId> = arena.agent_ids().collect();
    let bounds = arena.bounds;

    for &a in &ids {
        for &b in &ids {
            if a == b {
                continue;
            }

            let both_inside =
                bounds.contains(arena.agent(a).pos) && bounds.contains(arena.agent(b).pos);
            if let (true, AgentId::Creature(ci), AgentId::Beacon(_)) = (both_inside, a, b) {
                // Re-aim against every light, not just `b`
                if arena.creatures[ci].steer(&arena.beacons) {
                    arena.events.push(SimEvent::HeadingSteered { creature: ci });
                }
            }

            let other = *arena.agent(b);
            if bounce_off(arena.agent_mut(a), &other) {
                log::trace!("{a:?} bounced off {b:?}");
                arena.events.push(SimEvent::Collision { agent: a, other: b });
            }
        }
    }
}
