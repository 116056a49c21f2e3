//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters as a normalized `dt`
//! - Randomness only through an injected [`RandomSource`]
//! - Obstacles kept in spawn (left-to-right) order
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod random;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use body::Body;
pub use clock::{FrameClock, normalize_delta, substep_count};
pub use collision::{CrashCause, Rect, body_hitbox, detect, hits_obstacle, out_of_bounds};
pub use obstacle::{Obstacle, StreamUpdate, advance, generate};
pub use random::{RandomSource, ScriptedSource, SeededSource};
pub use snapshot::{BodyView, ObstacleView, Snapshot};
pub use state::{Appearance, Backdrop, BodyColor, Cloud, ObstacleColor, Phase, Scenery, SimulationState};
pub use tick::{GameEvent, TickInput, step, tick};
