use crate::game_state::{
    DEFAULT_TIME, GameConfig, GameInterface, MAX_OPPORTUNITIES, ShellEvent, UserAction,
};
use crate::renderer::Renderer;
use crate::{debug_log, info_log};
use clap::Parser;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

/// Swift Type: type the word before the clock runs out
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Seconds on the clock for the first word
    #[arg(short = 't', long = "time", default_value_t = DEFAULT_TIME)]
    pub time: u32,

    /// Misses allowed before the game ends (1-4)
    #[arg(short = 'o', long = "opportunities", default_value_t = MAX_OPPORTUNITIES)]
    pub opportunities: u32,

    /// Use the line-based prompt instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Write the log here instead of the cache directory
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.time, self.opportunities)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub enum LineInput {
    Answer(String),
    Exit,
    NewGame,
}

fn parse_line(line: &str) -> LineInput {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("exit") {
        LineInput::Exit
    } else if trimmed.eq_ignore_ascii_case("next") {
        LineInput::NewGame
    } else {
        LineInput::Answer(trimmed.to_string())
    }
}

fn eclipse_bar(progress: f64) -> String {
    let total = MAX_OPPORTUNITIES as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let covered = ((progress * total as f64).round() as usize).min(total);
    format!("{}{}", "●".repeat(covered), "○".repeat(total - covered))
}

/// Line-oriented front end.
///
/// A blocking `read_line` cannot be interrupted by the clock, so the time spent
/// typing is measured after the fact and replayed as ticks before the answer.
/// An answer that arrives after the countdown ran out is dropped.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<ShellEvent>,
    word: String,
    time: String,
    seconds_left: u32,
    level: String,
    eclipse: f64,
    ticking: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            word: String::new(),
            time: String::new(),
            seconds_left: DEFAULT_TIME,
            level: String::new(),
            eclipse: 0.0,
            ticking: false,
        }
    }

    fn print_prompt(&self) {
        if self.ticking {
            println!(
                "\n[{} | {} | {}] Type: {}",
                self.level,
                self.time,
                eclipse_bar(self.eclipse),
                self.word
            );
        } else {
            println!("\nType 'next' for a new game or 'exit' to quit:");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input),
        }
    }

    /// Queues the ticks that elapsed while the player typed, followed by the answer.
    fn queue_answer(&mut self, answer: String, elapsed_secs: u64) {
        let elapsed = u32::try_from(elapsed_secs).unwrap_or(u32::MAX);
        if self.ticking && elapsed >= self.seconds_left {
            info_log!("Answer '{}' arrived after {}s, discarded", answer, elapsed);
            println!("Too slow!");
            for _ in 0..self.seconds_left {
                self.pending.push_back(ShellEvent::Tick);
            }
            return;
        }
        if self.ticking {
            for _ in 0..elapsed {
                self.pending.push_back(ShellEvent::Tick);
            }
        }
        self.pending
            .push_back(ShellEvent::Action(UserAction::Submit(answer)));
    }
}

impl<R: BufRead> Renderer for CliInterface<R> {
    fn render_word(&mut self, word: &str) {
        word.clone_into(&mut self.word);
    }

    fn render_time(&mut self, time: &str) {
        time.clone_into(&mut self.time);
    }

    fn render_seconds(&mut self, seconds: u32) {
        self.seconds_left = seconds;
    }

    fn render_level(&mut self, level: &str) {
        level.clone_into(&mut self.level);
    }

    fn render_message(&mut self, message: &str) {
        if !message.is_empty() {
            println!("{message}");
        }
    }

    fn render_eclipse(&mut self, progress: f64) {
        self.eclipse = progress;
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn next_event(&mut self) -> ShellEvent {
        if let Some(event) = self.pending.pop_front() {
            return event;
        }

        self.print_prompt();
        let started = Instant::now();
        let Some(line) = self.read_line() else {
            debug_log!("CliInterface - input closed, exiting");
            return ShellEvent::Action(UserAction::Exit);
        };

        match parse_line(&line) {
            LineInput::Exit => {
                println!("Exiting.");
                ShellEvent::Action(UserAction::Exit)
            }
            LineInput::NewGame => ShellEvent::Action(UserAction::NewGame),
            LineInput::Answer(answer) => {
                self.queue_answer(answer, started.elapsed().as_secs());
                self.pending
                    .pop_front()
                    .unwrap_or(ShellEvent::Action(UserAction::Exit))
            }
        }
    }

    fn set_ticking(&mut self, ticking: bool) {
        self.ticking = ticking;
        if !ticking {
            self.pending.clear();
        }
    }
}
