//! The flapping body

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TILT, TILT_PER_SPEED};

/// The player-controlled body
///
/// `x` never changes during play; the world scrolls past it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
}

impl Body {
    /// Body at rest at the given position
    pub fn at(pos: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            velocity: 0.0,
        }
    }

    /// Top-left corner of the body
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Replace velocity with the flap impulse
    ///
    /// No cooldown: flapping again before gravity has acted just resets it.
    pub fn apply_flap(&mut self, flap_speed: f32) {
        self.velocity = flap_speed;
    }

    /// Advance by `dt` reference frames under constant gravity
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.y += self.velocity * dt;
        self.velocity += gravity * dt;
    }

    /// Nose tilt in radians, derived from vertical speed
    pub fn tilt(&self) -> f32 {
        (self.velocity * TILT_PER_SPEED).clamp(-MAX_TILT, MAX_TILT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flap_resets_velocity() {
        let mut body = Body::at(Vec2::new(100.0, 200.0));
        body.velocity = 12.0;
        body.apply_flap(-8.0);
        assert_eq!(body.velocity, -8.0);
        body.apply_flap(-8.0);
        assert_eq!(body.velocity, -8.0);
    }

    #[test]
    fn test_integrate_uses_velocity_before_gravity() {
        let mut body = Body::at(Vec2::new(100.0, 200.0));
        body.velocity = -8.0;
        body.integrate(1.0, 0.5);
        assert_eq!(body.y, 192.0);
        assert_eq!(body.velocity, -7.5);
        assert_eq!(body.x, 100.0);
    }

    #[test]
    fn test_gravity_accumulates_linearly() {
        let mut body = Body::at(Vec2::new(100.0, 200.0));
        body.velocity = -8.0;
        for _ in 0..40 {
            body.integrate(1.0, 0.5);
        }
        assert!((body.velocity - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut body = Body::at(Vec2::new(100.0, 200.0));
        body.velocity = 3.0;
        body.integrate(0.0, 0.5);
        assert_eq!(body, Body { x: 100.0, y: 200.0, velocity: 3.0 });
    }

    #[test]
    fn test_tilt_is_clamped() {
        let mut body = Body::at(Vec2::ZERO);
        body.velocity = -8.0;
        assert_eq!(body.tilt(), -0.5);
        body.velocity = 1.0;
        assert!((body.tilt() - 0.2).abs() < 1e-6);
        body.velocity = 30.0;
        assert_eq!(body.tilt(), 0.5);
    }
}
