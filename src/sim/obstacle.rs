//! Procedural obstacle stream
//!
//! Obstacles enter at the right boundary, scroll left and are dropped once
//! fully past the left boundary. The sequence is kept in spawn order, which is
//! also left-to-right order.

use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use crate::tuning::Tuning;

/// A column with a passable gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Y of the top of the gap
    pub gap_top: f32,
    /// Already counted towards the score
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_top + gap_height
    }

    #[inline]
    pub fn right_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// What one [`advance`] call changed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StreamUpdate {
    /// Newly appended obstacle, if the spawn trigger fired
    pub spawned: Option<Obstacle>,
    /// Obstacles dropped off the left boundary
    pub recycled: usize,
}

/// New obstacle at the right boundary with a uniformly placed gap
///
/// The gap is drawn inside [`Tuning::gap_top_range`], so it always lies
/// within the playable band.
pub fn generate(tuning: &Tuning, source: &mut dyn RandomSource) -> Obstacle {
    let (low, high) = tuning.gap_top_range();
    let gap_top = low + source.next_unit() * (high - low);
    Obstacle {
        x: tuning.world.width,
        gap_top: gap_top.clamp(low, high),
        passed: false,
    }
}

/// Whether a new obstacle is due
///
/// Only the newest obstacle matters: once it has moved `spawn_gap` left of the
/// right boundary the next one is spawned.
pub fn spawn_due(obstacles: &[Obstacle], tuning: &Tuning) -> bool {
    match obstacles.last() {
        None => true,
        Some(newest) => newest.x < tuning.world.width - tuning.spawn_gap,
    }
}

/// Scroll every obstacle left by `dt` frames, recycle and spawn
pub fn advance(
    obstacles: &mut Vec<Obstacle>,
    dt: f32,
    tuning: &Tuning,
    source: &mut dyn RandomSource,
) -> StreamUpdate {
    let shift = tuning.scroll_speed * dt;
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= shift;
    }

    let before = obstacles.len();
    obstacles.retain(|o| o.right_edge(tuning.obstacle_width) >= 0.0);
    let recycled = before - obstacles.len();
    if recycled > 0 {
        log::debug!("Recycled {recycled} obstacle(s)");
    }

    let spawned = if spawn_due(obstacles, tuning) {
        let obstacle = generate(tuning, source);
        log::debug!("Spawned obstacle with gap at {:.1}", obstacle.gap_top);
        obstacles.push(obstacle);
        Some(obstacle)
    } else {
        None
    };

    StreamUpdate { spawned, recycled }
}
