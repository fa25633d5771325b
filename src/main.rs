//! Grid Dash entry point
//!
//! Headless runner: generates levels and plays them with a simple autopilot,
//! archiving every level it beats.
//!
//! Usage: `grid-dash [seconds]` (settings are read from `grid-dash.json`)

use std::path::Path;

use grid_dash::sim::{GameState, InputState};
use grid_dash::{SeededRandom, Session, SessionEvent, Settings};

/// Render-frame delta the runner pretends to see
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 30.0;

/// Jumps when a spike is about to reach the player
struct Autopilot {
    /// Jump window, measured as gap between player and spike (px)
    min_gap: f32,
    max_gap: f32,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            min_gap: 14.0,
            max_gap: 48.0,
        }
    }

    fn sample(&self, state: &GameState) -> InputState {
        let player = &state.player;
        if !player.on_ground {
            return InputState::IDLE;
        }
        let front = player.pos.x + player.size;
        let nearest_gap = state
            .spikes
            .iter()
            .filter(|s| s.pos.x + s.size > player.pos.x)
            .map(|s| s.pos.x - front)
            .fold(f32::INFINITY, f32::min);

        InputState {
            jump_pressed: (self.min_gap..=self.max_gap).contains(&nearest_gap),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grid Dash (headless) starting...");

    let seconds = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f32>().ok())
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);

    let settings = Settings::load(Path::new(Settings::FILE_NAME));
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Level seed: {}", seed);

    let mut session = Session::new(settings, SeededRandom::new(seed));
    let autopilot = Autopilot::new();
    let frames = (seconds / FRAME_DT).ceil() as u64;
    let mut deaths = 0u32;

    for _ in 0..frames {
        let input = autopilot.sample(session.state());
        match session.update(FRAME_DT, input) {
            Ok(Some(SessionEvent::Died { .. })) => deaths += 1,
            Ok(Some(SessionEvent::Completed { beaten, saved_to })) => {
                log::info!("Beat level {} -> {}", beaten, saved_to.display());
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("Stopping: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!(
        "Simulated {:.1}s: {} levels beaten, {} deaths, {:.0}% through the current level",
        seconds,
        session.levels_beaten(),
        deaths,
        session.state().progress() * 100.0
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}
