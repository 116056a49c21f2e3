//! Skyflap - a side-scrolling flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `tuning`: Data-driven game balance and world geometry, validated at startup
//! - `game`: Frame driver tying the clock, input latch and simulation together
//! - `platform`: Browser/native platform abstraction (input latch, frame loop)

pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use platform::InputLatch;
pub use tuning::{ConfigError, Tuning, World};

/// Game configuration constants
///
/// Distances are in reference pixels, speeds in pixels per reference frame.
pub mod consts {
    /// Reference frame duration (60 Hz); `dt == 1.0` is one of these
    pub const REF_FRAME_MS: f64 = 16.67;
    /// Raw frame deltas are clamped to this before normalizing (tab suspension, stalls)
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Largest normalized slice a single tick is integrated in
    pub const MAX_SUBSTEP_DT: f32 = 1.0;
    /// Maximum substeps per tick to bound work on absurd deltas
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration per reference frame
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a flap (up is negative y)
    pub const FLAP_SPEED: f32 = -8.0;
    /// Horizontal obstacle scroll speed
    pub const PIPE_SPEED: f32 = 2.0;

    /// Obstacle geometry
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const GAP_HEIGHT: f32 = 150.0;
    /// Minimum distance between the gap and the top boundary / ground
    pub const GAP_MARGIN: f32 = 50.0;
    /// New obstacle once the newest one is this far left of the right boundary
    pub const SPAWN_GAP: f32 = 300.0;

    /// Body sprite is 34x24 scaled by 1.5
    pub const BODY_WIDTH: f32 = 34.0 * 1.5;
    pub const BODY_HEIGHT: f32 = 24.0 * 1.5;
    pub const BODY_START_X: f32 = 100.0;
    pub const BODY_START_Y: f32 = 200.0;
    /// Hit-box spans this fraction range of the body on both axes
    pub const HITBOX_NEAR: f32 = 0.3;
    pub const HITBOX_FAR: f32 = 0.7;

    /// Ground strip height (also the width of one ground tile)
    pub const GROUND_HEIGHT: f32 = 112.0;
    /// Default world size when the host does not supply one
    pub const WORLD_WIDTH: f32 = 480.0;
    pub const WORLD_HEIGHT: f32 = 640.0;

    /// Wing animation advance per reference frame while running
    pub const WING_RATE: f32 = 0.1;
    /// Frames in the wing cycle (up, mid, down)
    pub const WING_FRAMES: u32 = 3;
    /// Body tilt = velocity * TILT_PER_SPEED, clamped to +-MAX_TILT radians
    pub const TILT_PER_SPEED: f32 = 0.2;
    pub const MAX_TILT: f32 = 0.5;
}
