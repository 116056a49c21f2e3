//! Collision detection between the body, obstacles and world bounds
//!
//! The body collides through a shrunk hit-box: only the middle 30%..70% of its
//! sprite on each axis counts. Against an obstacle the hit-box must overlap the
//! column horizontally and lie entirely above the gap top or entirely below the
//! gap bottom, which makes grazing the gap edges survivable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::obstacle::Obstacle;
use crate::consts::{HITBOX_FAR, HITBOX_NEAR};
use crate::tuning::Tuning;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Open-interval overlap on the x axis
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle,
    Ceiling,
    Ground,
}

/// Inset hit-box for the body
pub fn body_hitbox(body: &Body, tuning: &Tuning) -> Rect {
    let size = Vec2::new(tuning.body_width, tuning.body_height);
    let pos = body.pos();
    Rect::new(pos + size * HITBOX_NEAR, pos + size * HITBOX_FAR)
}

/// Horizontal extent of an obstacle column between the top and bottom boundaries
pub fn obstacle_column(obstacle: &Obstacle, tuning: &Tuning) -> Rect {
    Rect::new(
        Vec2::new(obstacle.x, 0.0),
        Vec2::new(obstacle.right_edge(tuning.obstacle_width), tuning.world.floor()),
    )
}

/// Whether the body hits the solid part of an obstacle
pub fn hits_obstacle(body: &Body, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let hitbox = body_hitbox(body, tuning);
    if !hitbox.overlaps_x(&obstacle_column(obstacle, tuning)) {
        return false;
    }
    let above_gap = hitbox.max.y < obstacle.gap_top;
    let below_gap = hitbox.min.y > obstacle.gap_bottom(tuning.gap_height);
    above_gap || below_gap
}

/// Whether the body has left the playable band
pub fn out_of_bounds(body: &Body, tuning: &Tuning) -> Option<CrashCause> {
    if body.y > tuning.max_body_y() {
        Some(CrashCause::Ground)
    } else if body.y < 0.0 {
        Some(CrashCause::Ceiling)
    } else {
        None
    }
}

/// First collision this step, obstacles before bounds
pub fn detect(body: &Body, obstacles: &[Obstacle], tuning: &Tuning) -> Option<CrashCause> {
    if obstacles.iter().any(|o| hits_obstacle(body, o, tuning)) {
        return Some(CrashCause::Obstacle);
    }
    out_of_bounds(body, tuning)
}
