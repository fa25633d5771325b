//! Fixed-step play session
//!
//! Accumulates wall-clock frame time and feeds the simulation in fixed steps,
//! capped per frame. Deaths restart the current level; completions archive
//! the level and move on to a freshly generated one.

use std::path::PathBuf;
use std::sync::Arc;

use crate::input::InputSource;
use crate::level::{Level, generate_sized};
use crate::persistence::{LevelRepository, SaveError};
use crate::random::RandomSource;
use crate::settings::Settings;
use crate::sim::{GameState, InputState, StepOutcome, step};

/// Something the front end should react to
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Player hit a hazard; the level restarted
    Died { scrolled: f32 },
    /// Level beaten and archived; a new level started
    Completed { beaten: u32, saved_to: PathBuf },
}

pub struct Session<R: RandomSource> {
    state: GameState,
    accumulator: f32,
    levels_beaten: u32,
    rng: R,
    repository: LevelRepository,
    settings: Settings,
}

impl<R: RandomSource> Session<R> {
    /// Start on a freshly generated level
    pub fn new(settings: Settings, mut rng: R) -> Self {
        let level = generate_sized(
            &mut rng,
            settings.level_length_cells,
            settings.level_height_cells,
        );
        Self::with_level(settings, rng, level)
    }

    /// Start on a given level (e.g. one from the editor)
    pub fn with_level(settings: Settings, rng: R, level: Level) -> Self {
        let settings = settings.sanitized();
        Self {
            state: GameState::from_level(level, &settings.tuning),
            accumulator: 0.0,
            levels_beaten: 0,
            rng,
            repository: LevelRepository::new(&settings.base_dir),
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn levels_beaten(&self) -> u32 {
        self.levels_beaten
    }

    /// Time carried over to the next frame (seconds)
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn repository(&self) -> &LevelRepository {
        &self.repository
    }

    /// Restart on `level`, dropping any carried-over time
    pub fn play_level(&mut self, level: impl Into<Arc<Level>>) {
        self.state = GameState::from_level(level, &self.settings.tuning);
        self.accumulator = 0.0;
    }

    /// Sample `source` once and advance by one frame
    pub fn update_from(
        &mut self,
        frame_dt: f32,
        source: &mut impl InputSource,
    ) -> Result<Option<SessionEvent>, SaveError> {
        let input = source.sample();
        self.update(frame_dt, input)
    }

    /// Advance by one frame of `frame_dt` seconds.
    ///
    /// The jump edge only reaches the first step of the frame. Time beyond
    /// `max_substeps` steps stays in the accumulator for later frames.
    pub fn update(
        &mut self,
        frame_dt: f32,
        input: InputState,
    ) -> Result<Option<SessionEvent>, SaveError> {
        let frame_dt = if frame_dt.is_nan() {
            0.0
        } else {
            frame_dt.clamp(0.0, self.settings.max_frame_dt)
        };
        self.accumulator += frame_dt;

        let dt = self.settings.fixed_dt;
        let mut input = input;
        let mut substeps = 0;
        while self.accumulator >= dt && substeps < self.settings.max_substeps {
            match step(&self.state, input, dt) {
                StepOutcome::Continuing(next) => self.state = next,
                StepOutcome::Died => return Ok(Some(self.restart_after_death())),
                StepOutcome::Completed => return self.advance_after_completion().map(Some),
            }
            self.accumulator -= dt;
            substeps += 1;
            input = InputState::IDLE;
        }

        if self.accumulator >= dt {
            log::debug!(
                "Substep cap hit, deferring {:.4}s of simulation",
                self.accumulator
            );
        }
        Ok(None)
    }

    fn restart_after_death(&mut self) -> SessionEvent {
        let scrolled = self.state.level_scrolled;
        log::info!("Player died after {:.0}px", scrolled);
        let level = Arc::clone(&self.state.level);
        self.play_level(level);
        SessionEvent::Died { scrolled }
    }

    /// Archive the beaten level and start a new one. If the save fails the
    /// same level restarts from the beginning and the error is returned; the
    /// save is only attempted again when that level is beaten again.
    fn advance_after_completion(&mut self) -> Result<SessionEvent, SaveError> {
        let beaten = self.levels_beaten + 1;
        let saved_to = match self.repository.save_beaten_level(&self.state.level, beaten) {
            Ok(path) => path,
            Err(e) => {
                let level = Arc::clone(&self.state.level);
                self.play_level(level);
                return Err(e);
            }
        };
        self.levels_beaten = beaten;
        log::info!("Level completed ({} beaten)", beaten);

        let next = generate_sized(
            &mut self.rng,
            self.settings.level_length_cells,
            self.settings.level_height_cells,
        );
        self.play_level(next);
        Ok(SessionEvent::Completed { beaten, saved_to })
    }
}
