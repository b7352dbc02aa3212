//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Caller-driven steps only
//! - Seeded RNG owned by the arena
//! - Stable iteration order (creatures, then beacons)
//! - Rendering only through the `DrawSink` trait

pub mod agent;
pub mod beacon;
pub mod collision;
pub mod creature;
pub mod state;
pub mod tick;

pub use agent::{Agent, AgentId, Kind};
pub use beacon::Beacon;
pub use collision::{Wall, bounce_off, enforce_walls, reflect_heading};
pub use creature::{Creature, Role};
pub use state::{Arena, SimEvent};
pub use tick::step;
