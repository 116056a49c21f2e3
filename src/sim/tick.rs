//! Simulation tick
//!
//! Core game loop step. A tick applies the latched input, drifts the scenery,
//! and while running integrates the body and obstacle stream in sub-steps no
//! longer than one reference frame, checking collisions and score after each.

use serde::{Deserialize, Serialize};

use super::clock::substep_count;
use super::collision::{self, CrashCause};
use super::obstacle;
use super::random::RandomSource;
use super::score;
use super::state::{Phase, SimulationState};
use crate::consts::WING_RATE;
use crate::tuning::Tuning;

/// Input commands for a single tick
///
/// Any number of activates between two ticks collapse into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap / start / restart (key, tap and click are all the same)
    pub activate: bool,
}

/// Something that happened during a tick, for hosts to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// State was reinitialized after a finished run
    Reset,
    /// Idle -> Running
    Started,
    Flapped,
    Spawned { gap_top: f32 },
    Scored { score: u32 },
    /// Running -> Over
    Crashed { cause: CrashCause, score: u32 },
}

/// Advance the game state by `dt` reference frames
///
/// Returns the events produced, in order. A `dt` that is negative or not
/// finite is treated as zero.
pub fn tick(
    state: &mut SimulationState,
    input: &TickInput,
    dt: f32,
    tuning: &Tuning,
    source: &mut dyn RandomSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    if input.activate {
        activate(state, tuning, source, &mut events);
    }

    state.scenery.drift(dt, tuning);

    if !state.is_running() {
        return events;
    }

    let steps = substep_count(dt);
    let sub_dt = dt / steps as f32;
    for _ in 0..steps {
        run_substep(state, sub_dt, tuning, source, &mut events);
        if !state.is_running() {
            break;
        }
    }

    events
}

/// Value-in, value-out form of [`tick`]
pub fn step(
    mut state: SimulationState,
    input: TickInput,
    dt: f32,
    tuning: &Tuning,
    source: &mut dyn RandomSource,
) -> (SimulationState, Vec<GameEvent>) {
    let events = tick(&mut state, &input, dt, tuning, source);
    (state, events)
}

/// Interpret one activate for the current phase
///
/// Over resets and immediately starts the next run, so a restart costs the
/// player a single input like the first start does.
fn activate(
    state: &mut SimulationState,
    tuning: &Tuning,
    source: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    if state.phase == Phase::Over {
        log::info!("Resetting after run with score {}", state.score);
        *state = SimulationState::new(tuning, source);
        events.push(GameEvent::Reset);
    }

    if state.phase == Phase::Idle {
        log::info!("Run started");
        state.phase = Phase::Running;
        events.push(GameEvent::Started);
    }

    state.body.apply_flap(tuning.flap_speed);
    events.push(GameEvent::Flapped);
}

fn run_substep(
    state: &mut SimulationState,
    dt: f32,
    tuning: &Tuning,
    source: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    state.wing_phase += WING_RATE * dt;
    state.body.integrate(dt, tuning.gravity);

    let update = obstacle::advance(&mut state.obstacles, dt, tuning, source);
    if let Some(spawned) = update.spawned {
        state.obstacles_spawned += 1;
        events.push(GameEvent::Spawned {
            gap_top: spawned.gap_top,
        });
    }

    let crash = collision::detect(&state.body, &state.obstacles, tuning);

    // An obstacle cleared in the crashing sub-step still counts toward the final score
    let scored = score::award(&state.body, &mut state.obstacles);
    if scored > 0 {
        state.score += scored;
        events.push(GameEvent::Scored { score: state.score });
    }

    if let Some(cause) = crash {
        state.phase = Phase::Over;
        log::info!("Game over ({cause:?}) with score {}", state.score);
        events.push(GameEvent::Crashed {
            cause,
            score: state.score,
        });
    }
}
