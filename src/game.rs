//! Frame driver
//!
//! [`Game`] holds the only mutable slot for the simulation. Each host frame it
//! turns the timestamp into a `dt`, drains the input latch, runs one tick and
//! hands back a snapshot.

use crate::platform::InputLatch;
use crate::sim::{
    FrameClock, GameEvent, RandomSource, SeededSource, SimulationState, Snapshot, TickInput, tick,
};
use crate::tuning::{ConfigError, Tuning, World};

/// Game instance holding all state
pub struct Game {
    tuning: Tuning,
    clock: FrameClock,
    state: SimulationState,
    source: Box<dyn RandomSource>,
    latch: InputLatch,
    events: Vec<GameEvent>,
}

impl Game {
    /// Validated game with a seeded random source
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        log::info!("Game initialized with seed: {seed}");
        Self::with_source(tuning, Box::new(SeededSource::new(seed)))
    }

    /// Validated game drawing from the given source
    pub fn with_source(
        tuning: Tuning,
        mut source: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let state = SimulationState::new(&tuning, source.as_mut());
        let clock = FrameClock::new(tuning.ref_frame_ms, tuning.max_frame_ms);
        Ok(Self {
            tuning,
            clock,
            state,
            source,
            latch: InputLatch::new(),
            events: Vec::new(),
        })
    }

    /// Handle for input listeners
    pub fn latch(&self) -> InputLatch {
        self.latch.clone()
    }

    /// Queue an activate for the next frame
    pub fn activate(&self) {
        self.latch.signal();
    }

    /// Run one host frame at `now_ms` and return what to draw
    pub fn frame(&mut self, now_ms: f64) -> Snapshot {
        let dt = self.clock.advance(now_ms);
        self.advance(dt);
        self.snapshot()
    }

    /// Run one tick of `dt` reference frames with whatever input is latched
    pub fn advance(&mut self, dt: f32) -> &[GameEvent] {
        let input = TickInput {
            activate: self.latch.take(),
        };
        self.events = tick(
            &mut self.state,
            &input,
            dt,
            &self.tuning,
            self.source.as_mut(),
        );
        &self.events
    }

    /// Frame loop stopped; the next frame measures no elapsed time
    pub fn suspend(&mut self) {
        self.clock.reset();
    }

    /// Switch to a new viewport size
    ///
    /// Rejected sizes leave the current geometry in place.
    pub fn resize(&mut self, world: World) -> Result<(), ConfigError> {
        let tuning = Tuning {
            world,
            ..self.tuning.clone()
        };
        tuning.validate()?;
        log::info!("World resized to {}x{}", world.width, world.height);
        self.tuning = tuning;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.tuning)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Phase, ScriptedSource};

    fn scripted_game() -> Game {
        Game::with_source(Tuning::default(), Box::new(ScriptedSource::constant(0.5))).unwrap()
    }

    #[test]
    fn test_invalid_tuning_fails_fast() {
        let tuning = Tuning {
            gap_height: 1000.0,
            ..Tuning::default()
        };
        assert!(matches!(
            Game::new(tuning, 1),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_first_frame_activate_flaps_without_motion() {
        let mut game = scripted_game();
        game.activate();
        let snapshot = game.frame(1234.0);
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.body.velocity, FLAP_SPEED);
        assert_eq!(snapshot.body.y, BODY_START_Y);
    }

    #[test]
    fn test_activates_in_one_frame_collapse() {
        let mut game = scripted_game();
        game.frame(0.0);
        game.activate();
        game.activate();
        game.activate();
        game.frame(REF_FRAME_MS);
        let flaps = game
            .events()
            .iter()
            .filter(|e| **e == GameEvent::Flapped)
            .count();
        assert_eq!(flaps, 1);
    }

    #[test]
    fn test_latch_clone_feeds_game() {
        let mut game = scripted_game();
        let latch = game.latch();
        latch.signal();
        game.advance(0.0);
        assert_eq!(game.state().phase, Phase::Running);
    }

    #[test]
    fn test_suspend_discards_gap() {
        let mut game = scripted_game();
        game.activate();
        game.frame(0.0);
        game.suspend();
        let before = game.state().body;
        game.frame(60_000.0);
        assert_eq!(game.state().body, before);
    }

    #[test]
    fn test_resize_rejects_tiny_world() {
        let mut game = scripted_game();
        assert!(game.resize(World::new(320.0, 200.0)).is_err());
        assert_eq!(game.tuning().world, World::default());
        assert!(game.resize(World::new(800.0, 900.0)).is_ok());
        assert_eq!(game.tuning().world.width, 800.0);
    }
}
