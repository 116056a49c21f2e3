//! Data-driven game balance
//!
//! Everything the simulation treats as a constant lives in [`Tuning`]. Values are
//! fixed once a [`crate::Game`] is built; [`Tuning::validate`] rejects any
//! combination that would make obstacle generation or the start pose impossible.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised when validating a tuning set.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("flap speed {0} must be negative (up is -y)")]
    FlapNotUpward(f32),
    #[error("ground height {ground} leaves no room in a world {height} tall")]
    GroundTooTall { ground: f32, height: f32 },
    #[error("gap of {gap} with margin {margin} does not fit a playable band of {band}")]
    GapDoesNotFit { gap: f32, margin: f32, band: f32 },
    #[error("spawn spacing {spacing} must exceed obstacle width {width}")]
    SpawnGapTooShort { spacing: f32, width: f32 },
    #[error("frame clamp {max_frame_ms} ms exceeds {limit_ms} ms, the most sub-stepping can cover")]
    FrameClampTooLong { max_frame_ms: f64, limit_ms: f64 },
    #[error("body start y {y} is outside the playable range 0..={max}")]
    BodyOutOfBand { y: f32, max: f32 },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Viewport geometry the simulation plays in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,
        }
    }
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ground_height: GROUND_HEIGHT,
        }
    }

    /// Y coordinate of the ground surface
    #[inline]
    pub fn floor(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Game balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub flap_speed: f32,
    pub scroll_speed: f32,
    pub gap_height: f32,
    pub gap_margin: f32,
    pub obstacle_width: f32,
    pub spawn_gap: f32,
    pub body_width: f32,
    pub body_height: f32,
    pub body_start: Vec2,
    pub ref_frame_ms: f64,
    pub max_frame_ms: f64,
    pub world: World,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_speed: FLAP_SPEED,
            scroll_speed: PIPE_SPEED,
            gap_height: GAP_HEIGHT,
            gap_margin: GAP_MARGIN,
            obstacle_width: PIPE_WIDTH,
            spawn_gap: SPAWN_GAP,
            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,
            body_start: Vec2::new(BODY_START_X, BODY_START_Y),
            ref_frame_ms: REF_FRAME_MS,
            max_frame_ms: MAX_FRAME_MS,
            world: World::default(),
        }
    }
}

impl Tuning {
    /// Default balance in a world of the given size
    pub fn for_world(world: World) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON tuning file and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Range `[low, high]` the top of a gap is drawn from
    pub fn gap_top_range(&self) -> (f32, f32) {
        let low = self.gap_margin;
        let high = self.world.floor() - self.gap_height - self.gap_margin;
        (low, high)
    }

    /// Largest body `y` that is still above the ground
    pub fn max_body_y(&self) -> f32 {
        self.world.floor() - self.body_height
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravity", self.gravity as f64)?;
        positive("scroll speed", self.scroll_speed as f64)?;
        positive("gap height", self.gap_height as f64)?;
        non_negative("gap margin", self.gap_margin as f64)?;
        positive("obstacle width", self.obstacle_width as f64)?;
        positive("spawn gap", self.spawn_gap as f64)?;
        positive("body width", self.body_width as f64)?;
        positive("body height", self.body_height as f64)?;
        positive("reference frame", self.ref_frame_ms)?;
        positive("frame clamp", self.max_frame_ms)?;
        positive("world width", self.world.width as f64)?;
        positive("world height", self.world.height as f64)?;
        non_negative("ground height", self.world.ground_height as f64)?;
        non_negative("body start x", self.body_start.x as f64)?;

        let limit_ms = self.ref_frame_ms * f64::from(MAX_SUBSTEPS) * f64::from(MAX_SUBSTEP_DT);
        if self.max_frame_ms > limit_ms {
            return Err(ConfigError::FrameClampTooLong {
                max_frame_ms: self.max_frame_ms,
                limit_ms,
            });
        }
        if !self.flap_speed.is_finite() || self.flap_speed >= 0.0 {
            return Err(ConfigError::FlapNotUpward(self.flap_speed));
        }
        if self.world.ground_height >= self.world.height {
            return Err(ConfigError::GroundTooTall {
                ground: self.world.ground_height,
                height: self.world.height,
            });
        }
        let (low, high) = self.gap_top_range();
        if high < low {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.gap_height,
                margin: self.gap_margin,
                band: self.world.floor(),
            });
        }
        if self.spawn_gap <= self.obstacle_width {
            return Err(ConfigError::SpawnGapTooShort {
                spacing: self.spawn_gap,
                width: self.obstacle_width,
            });
        }
        let max_y = self.max_body_y();
        if !self.body_start.y.is_finite() || self.body_start.y < 0.0 || self.body_start.y > max_y {
            return Err(ConfigError::BodyOutOfBand {
                y: self.body_start.y,
                max: max_y,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_gap_range_matches_band() {
        let tuning = Tuning::default();
        let (low, high) = tuning.gap_top_range();
        assert_eq!(low, 50.0);
        // 640 - 112 - 150 - 50
        assert_eq!(high, 328.0);
    }

    #[test]
    fn test_gap_taller_than_band_fails() {
        let tuning = Tuning {
            gap_height: 500.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_downward_flap_fails() {
        let tuning = Tuning {
            flap_speed: 8.0,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::FlapNotUpward(_))));
    }

    #[test]
    fn test_spawn_gap_must_exceed_width() {
        let tuning = Tuning {
            spawn_gap: 40.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::SpawnGapTooShort { .. })
        ));
    }

    #[test]
    fn test_non_finite_value_fails() {
        let tuning = Tuning {
            gravity: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NotPositive { name: "gravity", .. })
        ));
    }

    #[test]
    fn test_body_start_below_ground_fails() {
        let tuning = Tuning {
            body_start: Vec2::new(100.0, 600.0),
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::BodyOutOfBand { .. })
        ));
    }

    #[test]
    fn test_frame_clamp_beyond_substep_budget_fails() {
        let tuning = Tuning {
            max_frame_ms: 1000.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::FrameClampTooLong { .. })
        ));

        // Exactly MAX_SUBSTEPS reference frames is still covered
        let tuning = Tuning {
            max_frame_ms: REF_FRAME_MS * f64::from(MAX_SUBSTEPS),
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.4, "world": { "width": 800.0, "height": 600.0, "ground_height": 100.0 } }"#)
            .unwrap();
        assert_eq!(tuning.gravity, 0.4);
        assert_eq!(tuning.flap_speed, FLAP_SPEED);
        assert_eq!(tuning.world.width, 800.0);
    }

    #[test]
    fn test_invalid_json_reports_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ gravity"),
            Err(ConfigError::Parse(_))
        ));
    }
}
