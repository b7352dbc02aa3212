//! Rendering sink
//!
//! The simulation never draws by itself. Each step it hands a `DrawRequest`
//! per agent to whatever `DrawSink` the driving loop supplies.

pub mod ascii;

pub use ascii::AsciiCanvas;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;
use crate::sim::{AgentId, Kind};

/// Colour an agent is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorClass {
    SeekingGreen,
    AvoidingRed,
    BeaconYellow,
}

impl ColorClass {
    pub fn name(&self) -> &'static str {
        match self {
            ColorClass::SeekingGreen => "green",
            ColorClass::AvoidingRed => "red",
            ColorClass::BeaconYellow => "yellow",
        }
    }
}

impl From<Kind> for ColorClass {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Seeking => ColorClass::SeekingGreen,
            Kind::Avoiding => ColorClass::AvoidingRed,
            Kind::Beacon => ColorClass::BeaconYellow,
        }
    }
}

/// One agent, as it should appear this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub agent: AgentId,
    pub position: Vec2,
    pub heading: f32,
    pub radius: f32,
    pub color: ColorClass,
}

impl DrawRequest {
    /// Small dot on the rim showing where the agent is headed: (centre, diameter)
    pub fn heading_marker(&self) -> (Vec2, f32) {
        (
            self.position + polar_to_cartesian(self.radius, self.heading),
            self.radius * 0.75,
        )
    }
}

/// Receiver for frames produced by the arena
pub trait DrawSink {
    /// Arena outline, given as half-extents around the origin
    fn arena(&mut self, _half_extents: Vec2) {}

    fn draw(&mut self, request: &DrawRequest);

    /// Called once every agent of a frame has been drawn
    fn end_frame(&mut self) {}
}

/// Headless sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DrawSink for NullSink {
    fn draw(&mut self, _request: &DrawRequest) {}
}

/// Records requests in order
impl DrawSink for Vec<DrawRequest> {
    fn draw(&mut self, request: &DrawRequest) {
        self.push(*request);
    }
}
