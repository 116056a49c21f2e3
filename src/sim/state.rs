//! Game state and core simulation types
//!
//! [`SimulationState`] is the single source of truth. Only the tick mutates it;
//! hosts and renderers read it or a [`super::Snapshot`] of it.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::obstacle::Obstacle;
use super::random::RandomSource;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first activate; body parked at its start pose
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a collision; frozen until reset
    Over,
}

/// Body sprite color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyColor {
    Yellow,
    Red,
    Blue,
}

/// Obstacle sprite color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleColor {
    Green,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backdrop {
    Day,
    Night,
}

/// Cosmetic look of a run, re-rolled on every reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub body: BodyColor,
    pub obstacle: ObstacleColor,
    pub backdrop: Backdrop,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            body: BodyColor::Yellow,
            obstacle: ObstacleColor::Green,
            backdrop: Backdrop::Day,
        }
    }
}

impl Appearance {
    const BODIES: [BodyColor; 3] = [BodyColor::Yellow, BodyColor::Red, BodyColor::Blue];
    const OBSTACLES: [ObstacleColor; 2] = [ObstacleColor::Green, ObstacleColor::Red];

    pub fn random(source: &mut dyn RandomSource) -> Self {
        let body = Self::BODIES[source.pick(Self::BODIES.len())];
        let obstacle = Self::OBSTACLES[source.pick(Self::OBSTACLES.len())];
        let backdrop = if source.next_unit() < 0.5 {
            Backdrop::Day
        } else {
            Backdrop::Night
        };
        Self {
            body,
            obstacle,
            backdrop,
        }
    }
}

/// A background cloud (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Cloud {
    const fn new(x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            speed,
        }
    }
}

/// Starting cloud layout
pub const CLOUDS: [Cloud; 3] = [
    Cloud::new(0.0, 50.0, 100.0, 60.0, 0.5),
    Cloud::new(300.0, 100.0, 120.0, 70.0, 0.7),
    Cloud::new(600.0, 30.0, 80.0, 50.0, 0.3),
];

/// Scrolling scenery that keeps moving in every phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
    /// Horizontal offset of the tiled ground, in `(-tile, 0]`
    pub ground_offset: f32,
}

impl Default for Scenery {
    fn default() -> Self {
        Self {
            clouds: CLOUDS.to_vec(),
            ground_offset: 0.0,
        }
    }
}

impl Scenery {
    /// Drift clouds and scroll the ground by `dt` frames
    ///
    /// The ground tile is square, so its width is the ground height.
    pub fn drift(&mut self, dt: f32, tuning: &Tuning) {
        let world = &tuning.world;
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed * dt;
            if cloud.x + cloud.width < 0.0 {
                cloud.x = world.width;
            }
        }
        if world.ground_height > 0.0 {
            let offset = self.ground_offset - tuning.scroll_speed * dt;
            self.ground_offset = offset % world.ground_height;
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: Phase,
    pub body: Body,
    /// Live obstacles, oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Obstacles generated this run, including recycled ones
    pub obstacles_spawned: u32,
    /// Wing animation phase; advances only while running
    pub wing_phase: f32,
    pub appearance: Appearance,
    pub scenery: Scenery,
}

impl SimulationState {
    /// Fresh idle state with a newly rolled appearance
    pub fn new(tuning: &Tuning, source: &mut dyn RandomSource) -> Self {
        Self::with_appearance(tuning, Appearance::random(source))
    }

    pub fn with_appearance(tuning: &Tuning, appearance: Appearance) -> Self {
        Self {
            phase: Phase::Idle,
            body: Body::at(tuning.body_start),
            obstacles: Vec::new(),
            score: 0,
            obstacles_spawned: 0,
            wing_phase: 0.0,
            appearance,
            scenery: Scenery::default(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedSource;

    #[test]
    fn test_new_state_is_idle() {
        let tuning = Tuning::default();
        let state = SimulationState::new(&tuning, &mut ScriptedSource::constant(0.0));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.body.x, tuning.body_start.x);
        assert_eq!(state.body.y, tuning.body_start.y);
        assert_eq!(state.body.velocity, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_appearance_follows_draws() {
        let mut source = ScriptedSource::new(vec![0.9, 0.6, 0.7]);
        let appearance = Appearance::random(&mut source);
        assert_eq!(appearance.body, BodyColor::Blue);
        assert_eq!(appearance.obstacle, ObstacleColor::Red);
        assert_eq!(appearance.backdrop, Backdrop::Night);
    }

    #[test]
    fn test_cloud_wraps_to_right_boundary() {
        let tuning = Tuning::default();
        let mut scenery = Scenery::default();
        // First cloud is 100 wide moving 0.5/frame from x = 0
        for _ in 0..201 {
            scenery.drift(1.0, &tuning);
        }
        assert_eq!(scenery.clouds[0].x, tuning.world.width);
    }

    #[test]
    fn test_ground_offset_wraps() {
        let tuning = Tuning::default();
        let mut scenery = Scenery::default();
        for _ in 0..60 {
            scenery.drift(1.0, &tuning);
            assert!(scenery.ground_offset <= 0.0);
            assert!(scenery.ground_offset > -tuning.world.ground_height);
        }
    }
}
