// Library interface for swift-type
// This allows integration tests to access internal modules

pub mod cli;
pub mod game_state;
pub mod logging;
pub mod renderer;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game_state::{
    GameConfig, GameInterface, GameState, Outcome, Phase, SessionSummary, ShellEvent,
    TickOutcome, UserAction, game_loop, game_loop_with,
};
pub use renderer::{Renderer, format_level, format_time, game_over_message, present};
pub use wordbank::{WordBank, load_wordbank_from_file, load_wordbank_from_str};
