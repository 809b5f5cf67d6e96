//! Passive presentation interface.
//!
//! Shells implement [`Renderer`]; the game loop pushes derived values into it
//! after every state change. Nothing here owns game state.

use crate::game_state::GameState;
use rand::Rng;

pub const CORRECT_MESSAGE: &str = "Correct!";
pub const INCORRECT_MESSAGE: &str = "Wrong! Try again.";
pub const TIMEOUT_MESSAGE: &str = "Time's up!";

pub trait Renderer {
    fn render_word(&mut self, word: &str);
    fn render_time(&mut self, time: &str);
    /// Raw countdown value behind [`Renderer::render_time`], for shells that act on it.
    fn render_seconds(&mut self, _seconds: u32) {}
    fn render_level(&mut self, level: &str);
    fn render_message(&mut self, message: &str);
    /// `progress` is in `[0, 1]`; 1 means fully eclipsed.
    fn render_eclipse(&mut self, progress: f64);
}

#[must_use]
pub fn format_time(seconds: u32) -> String {
    format!("{seconds}s")
}

#[must_use]
pub fn format_level(level: u32) -> String {
    format!("Level {level}")
}

#[must_use]
pub fn game_over_message(levels_completed: u32) -> String {
    format!("Game over! Levels completed: {levels_completed}")
}

/// Pushes every derived display value of `state` into `renderer`.
pub fn present<R: Rng, V: Renderer + ?Sized>(state: &GameState<R>, renderer: &mut V) {
    renderer.render_word(state.current_word());
    renderer.render_seconds(state.time_remaining());
    renderer.render_time(&format_time(state.time_remaining()));
    renderer.render_level(&format_level(state.level()));
    renderer.render_eclipse(state.eclipse_progress());
}
