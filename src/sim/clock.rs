//! Wall-clock to simulation time conversion
//!
//! Host timestamps (milliseconds, monotonic) become a dimensionless `dt` where
//! `1.0` is one reference frame. Everything downstream scales by `dt`, so motion
//! is the same at any display refresh rate.

use crate::consts::{MAX_SUBSTEP_DT, MAX_SUBSTEPS};

/// Slack so a delta that is a hair over a whole number of sub-steps is not split again
const SUBSTEP_EPSILON: f32 = 1e-4;

/// Convert a raw frame delta to a normalized `dt`
///
/// Negative and non-finite deltas yield `0.0`; large deltas are clamped to
/// `max_frame_ms` first.
pub fn normalize_delta(raw_ms: f64, ref_frame_ms: f64, max_frame_ms: f64) -> f32 {
    if !raw_ms.is_finite() || raw_ms < 0.0 {
        log::warn!("Discarding invalid frame delta {raw_ms} ms");
        return 0.0;
    }
    if raw_ms > max_frame_ms {
        log::debug!("Clamping frame delta {raw_ms:.1} ms to {max_frame_ms} ms");
    }
    (raw_ms.min(max_frame_ms) / ref_frame_ms) as f32
}

/// Number of equal sub-steps a tick of `dt` is integrated in
///
/// Each sub-step is at most [`MAX_SUBSTEP_DT`] up to [`MAX_SUBSTEPS`]; `dt == 0`
/// still runs one (motionless) sub-step so collisions are evaluated.
pub fn substep_count(dt: f32) -> u32 {
    let steps = ((dt - SUBSTEP_EPSILON) / MAX_SUBSTEP_DT).ceil();
    if steps.is_finite() && steps > 1.0 {
        (steps as u32).min(MAX_SUBSTEPS)
    } else {
        1
    }
}

/// Tracks the previous timestamp between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    ref_frame_ms: f64,
    max_frame_ms: f64,
}

impl FrameClock {
    pub fn new(ref_frame_ms: f64, max_frame_ms: f64) -> Self {
        Self {
            last: None,
            ref_frame_ms,
            max_frame_ms,
        }
    }

    /// Normalized `dt` since the previous call
    ///
    /// The first call has nothing to measure against and returns `0.0`. A
    /// non-finite timestamp is ignored and does not replace the previous one.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite timestamp {now_ms}");
            return 0.0;
        }
        let dt = match self.last {
            Some(prev) => normalize_delta(now_ms - prev, self.ref_frame_ms, self.max_frame_ms),
            None => 0.0,
        };
        self.last = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (loop restarted)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
