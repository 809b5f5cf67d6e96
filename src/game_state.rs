use crate::renderer::{
    CORRECT_MESSAGE, INCORRECT_MESSAGE, Renderer, TIMEOUT_MESSAGE, game_over_message, present,
};
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::time::Duration;

pub const DEFAULT_TIME: u32 = 20;
/// Every reset starts from this many seconds before the per-level reduction.
pub const BASE_TIME: u32 = 20;
pub const MAX_OPPORTUNITIES: u32 = 4;
pub const MIN_TIME: u32 = 2;
pub const LEVELS_PER_STEP: u32 = 5;
pub const TIME_STEP: u32 = 2;
/// Period of the shell's countdown tick.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Seconds on the clock for the first word only; resets always start from [`BASE_TIME`].
    pub initial_time: u32,
    pub initial_opportunities: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_time: DEFAULT_TIME,
            initial_opportunities: MAX_OPPORTUNITIES,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new(initial_time: u32, initial_opportunities: u32) -> Self {
        Self {
            initial_time,
            initial_opportunities,
        }
        .clamped()
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            initial_time: self.initial_time,
            initial_opportunities: self.initial_opportunities.clamp(1, MAX_OPPORTUNITIES),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counting,
    TimedOut,
    /// The game is over and the clock no longer runs.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    GameOver,
}

/// State of one game session.
///
/// Mutated only by [`GameState::submit`] and [`GameState::tick`]; once the
/// last opportunity is gone the state is frozen in [`Phase::GameOver`].
#[derive(Debug)]
pub struct GameState<R: Rng = ThreadRng> {
    bank: WordBank,
    rng: R,
    current_word: String,
    time_remaining: u32,
    level: u32,
    opportunities: u32,
    phase: Phase,
}

impl GameState<ThreadRng> {
    pub fn new(bank: WordBank) -> Self {
        Self::with_config(bank, GameConfig::default())
    }

    pub fn with_config(bank: WordBank, config: GameConfig) -> Self {
        Self::with_rng(bank, config, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(bank: WordBank, config: GameConfig, mut rng: R) -> Self {
        let config = config.clamped();
        let current_word = bank.pick_word_with(&mut rng).to_string();
        info_log!(
            "New game: {}s per word, {} opportunities, first word '{}'",
            config.initial_time,
            config.initial_opportunities,
            current_word
        );
        Self {
            bank,
            rng,
            current_word,
            time_remaining: config.initial_time,
            level: 1,
            opportunities: config.initial_opportunities,
            phase: Phase::Active,
        }
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn levels_completed(&self) -> u32 {
        self.level - 1
    }

    pub fn opportunities(&self) -> u32 {
        self.opportunities
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Fraction of the sun covered: 0 with every opportunity left, 1 when none remain.
    pub fn eclipse_progress(&self) -> f64 {
        1.0 - f64::from(self.opportunities) / f64::from(MAX_OPPORTUNITIES)
    }

    /// Compares `input` to the current word by exact equality. The caller trims.
    pub fn submit(&mut self, input: &str) -> Outcome {
        let outcome = if input == self.current_word {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        if self.is_over() {
            debug_log!("submit('{}') ignored: game is over", input);
            return outcome;
        }

        match outcome {
            Outcome::Correct => self.advance_level(),
            Outcome::Incorrect => {
                debug_log!("Wrong answer '{}' for '{}'", input, self.current_word);
                self.miss();
            }
        }
        outcome
    }

    /// One second of countdown. Reaching zero is scored exactly like a wrong answer.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::Stopped;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return TickOutcome::Counting;
        }

        info_log!("Time ran out on '{}'", self.current_word);
        self.miss();
        TickOutcome::TimedOut
    }

    fn advance_level(&mut self) {
        self.level += 1;
        if self.level % LEVELS_PER_STEP == 0 {
            self.time_remaining = self.time_remaining.saturating_sub(TIME_STEP).max(MIN_TIME);
        }
        self.reset_time();
        self.next_word();
        info_log!(
            "Level {} reached, {}s for '{}'",
            self.level,
            self.time_remaining,
            self.current_word
        );
    }

    fn miss(&mut self) {
        self.opportunities = self.opportunities.saturating_sub(1);
        if self.opportunities == 0 {
            self.phase = Phase::GameOver;
            info_log!("Game over after {} completed levels", self.levels_completed());
            return;
        }
        self.next_word();
        self.reset_time();
        debug_log!(
            "{} opportunities left, next word '{}'",
            self.opportunities,
            self.current_word
        );
    }

    fn reset_time(&mut self) {
        let reduction = (self.level / LEVELS_PER_STEP) * TIME_STEP;
        self.time_remaining = BASE_TIME.saturating_sub(reduction).max(MIN_TIME);
    }

    fn next_word(&mut self) {
        self.current_word = self.bank.pick_word_with(&mut self.rng).to_string();
    }
}

// Shell interface

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit(String),
    NewGame,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// One [`TICK_INTERVAL`] elapsed.
    Tick,
    Action(UserAction),
}

/// A front end that can display the game and feed it events.
///
/// The implementor owns the tick source: while ticking is enabled it must
/// yield [`ShellEvent::Tick`] once per [`TICK_INTERVAL`].
pub trait GameInterface: Renderer {
    /// Blocks until the next tick is due or the user does something.
    fn next_event(&mut self) -> ShellEvent;

    fn set_ticking(&mut self, ticking: bool);

    /// The target word was replaced (it may be drawn again unchanged).
    /// Shells holding a partial answer discard it here.
    fn word_issued(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_played: u32,
    pub best_levels_completed: u32,
}

impl SessionSummary {
    fn record(&mut self, levels_completed: u32) {
        self.games_played += 1;
        self.best_levels_completed = self.best_levels_completed.max(levels_completed);
    }
}

fn announce_game_over<R: Rng, I: GameInterface + ?Sized>(
    state: &GameState<R>,
    interface: &mut I,
    summary: &mut SessionSummary,
) {
    interface.set_ticking(false);
    summary.record(state.levels_completed());
    interface.render_message(&game_over_message(state.levels_completed()));
}

/// Runs games until the interface asks to exit.
pub fn game_loop<I: GameInterface + ?Sized>(
    bank: &WordBank,
    config: GameConfig,
    interface: &mut I,
) -> SessionSummary {
    game_loop_with(bank, config, interface, rand::thread_rng)
}

/// Like [`game_loop`] but every game draws words from an RNG produced by `make_rng`.
pub fn game_loop_with<R, F, I>(
    bank: &WordBank,
    config: GameConfig,
    interface: &mut I,
    mut make_rng: F,
) -> SessionSummary
where
    R: Rng,
    F: FnMut() -> R,
    I: GameInterface + ?Sized,
{
    let mut summary = SessionSummary::default();
    let mut state = GameState::with_rng(bank.clone(), config, make_rng());
    interface.render_message("");
    present(&state, interface);
    interface.set_ticking(true);

    loop {
        match interface.next_event() {
            ShellEvent::Tick => {
                if state.is_over() {
                    continue;
                }
                if state.tick() == TickOutcome::TimedOut {
                    if state.is_over() {
                        announce_game_over(&state, interface, &mut summary);
                    } else {
                        interface.render_message(TIMEOUT_MESSAGE);
                        interface.word_issued();
                    }
                }
                present(&state, interface);
            }
            ShellEvent::Action(UserAction::Submit(input)) => {
                if state.is_over() {
                    debug_log!("Submission after game over ignored");
                    continue;
                }
                match state.submit(input.trim()) {
                    Outcome::Correct => interface.render_message(CORRECT_MESSAGE),
                    Outcome::Incorrect if state.is_over() => {
                        announce_game_over(&state, interface, &mut summary);
                    }
                    Outcome::Incorrect => interface.render_message(INCORRECT_MESSAGE),
                }
                if !state.is_over() {
                    interface.word_issued();
                }
                present(&state, interface);
            }
            ShellEvent::Action(UserAction::NewGame) => {
                if !state.is_over() {
                    summary.record(state.levels_completed());
                }
                state = GameState::with_rng(bank.clone(), config, make_rng());
                interface.render_message("");
                present(&state, interface);
                interface.set_ticking(true);
            }
            ShellEvent::Action(UserAction::Exit) => {
                if !state.is_over() {
                    summary.record(state.levels_completed());
                }
                info_log!(
                    "Session ended: {} games, best {} levels",
                    summary.games_played,
                    summary.best_levels_completed
                );
                return summary;
            }
        }
    }
}
