//! Session lifecycle: acquire perception, start, tick, stop on game over.

use rand::Rng;

use crate::canvas::Canvas;
use crate::compute;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::geometry::Viewport;
use crate::perception::PerceptionSource;
use crate::state::{GameEvent, GameState, GameStatus, HudSnapshot};

/// Owns the game state together with the perception source feeding it.
pub struct Session<P: PerceptionSource> {
    state: GameState,
    perception: P,
}

impl<P: PerceptionSource> Session<P> {
    pub fn new(config: &GameConfig, viewport: Viewport, perception: P) -> Self {
        Self {
            state: compute::init_state(config, viewport),
            perception,
        }
    }

    /// Start (or restart) a session.  Perception must come up first; if it
    /// does not, the error is returned and the state is left untouched.
    pub fn start(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if let Err(e) = self.perception.start() {
            log::error!("could not start perception: {e}");
            return Err(e);
        }
        Ok(compute::start_session(&mut self.state))
    }

    /// Run one frame against the latest landmarks.
    pub fn tick(
        &mut self,
        now_ms: u64,
        rng: &mut impl Rng,
        canvas: &mut impl Canvas,
    ) -> Vec<GameEvent> {
        let hand = self.perception.latest();
        let events = compute::tick(&mut self.state, hand, now_ms, rng, canvas);

        if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            self.perception.stop();
        }
        events
    }

    pub fn resize(&mut self, viewport: Viewport) {
        compute::resize(&mut self.state, viewport);
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn snapshot(&self) -> HudSnapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn perception(&self) -> &P {
        &self.perception
    }

    pub fn perception_mut(&mut self) -> &mut P {
        &mut self.perception
    }
}
