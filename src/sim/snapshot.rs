//! Read-only view of the simulation handed to renderers

use serde::Serialize;

use super::state::{Appearance, Phase, Scenery, SimulationState};
use crate::consts::WING_FRAMES;
use crate::tuning::Tuning;

/// Body pose plus the animation values a renderer derives from it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyView {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    /// 0 = wings up, 1 = mid, 2 = down
    pub wing_frame: u32,
    /// Radians, nose down positive
    pub tilt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub passed: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u32,
    pub body: BodyView,
    /// Left to right
    pub obstacles: Vec<ObstacleView>,
    pub appearance: Appearance,
    pub scenery: Scenery,
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,
}

impl Snapshot {
    pub fn capture(state: &SimulationState, tuning: &Tuning) -> Self {
        let body = &state.body;
        Self {
            phase: state.phase,
            score: state.score,
            body: BodyView {
                x: body.x,
                y: body.y,
                velocity: body.velocity,
                width: tuning.body_width,
                height: tuning.body_height,
                wing_frame: (state.wing_phase.max(0.0).floor() as u32) % WING_FRAMES,
                tilt: body.tilt(),
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    width: tuning.obstacle_width,
                    gap_top: o.gap_top,
                    gap_bottom: o.gap_bottom(tuning.gap_height),
                    passed: o.passed,
                })
                .collect(),
            appearance: state.appearance,
            scenery: state.scenery.clone(),
            world_width: tuning.world.width,
            world_height: tuning.world.height,
            ground_height: tuning.world.ground_height,
        }
    }

    /// Serialize for hosts that render outside Rust
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
