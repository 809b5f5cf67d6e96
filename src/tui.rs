//! TUI (Terminal User Interface) module for Swift Type
//!
//! Full-screen front end built on Ratatui. It owns the one-second tick
//! source and the text the player is typing; the game itself lives in
//! [`crate::game_state`].
//!
//! # State Machine
//! - `Playing`: characters edit the input line, ENTER submits, ticks are emitted
//! - `GameOver`: ticks stop, `N` starts a new game
//!
//! ESC (or Ctrl-C) exits from either state.

use crate::game_state::{GameInterface, ShellEvent, TICK_INTERVAL, UserAction};
use crate::renderer::{CORRECT_MESSAGE, Renderer};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::io;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const MAX_INPUT_CHARS: usize = 40;
const LOW_TIME_SECONDS: u32 = 5;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const SUN_STYLE: Style = Style::new().fg(Color::Yellow).bg(Color::DarkGray);
const ECLIPSE_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Playing,
    GameOver,
}

/// Everything shown on screen. Kept apart from the terminal so key handling
/// can be exercised without one.
#[derive(Debug)]
struct Screen {
    state: TuiState,
    word: String,
    time: String,
    level: String,
    message: String,
    eclipse: f64,
    seconds: u32,
    input: String,
}

impl Screen {
    fn new() -> Self {
        Self {
            state: TuiState::GameOver,
            word: String::new(),
            time: String::new(),
            level: String::new(),
            message: String::new(),
            eclipse: 0.0,
            seconds: u32::MAX,
            input: String::new(),
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn is_quit(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        if Self::is_quit(&key) {
            info_log!("handle_key() - quit requested");
            return Some(UserAction::Exit);
        }
        match self.state {
            TuiState::Playing => self.handle_playing_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
        }
    }

    fn handle_playing_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char(c) if !Self::has_modifier_keys(&key) => {
                // Garbage from escape sequences (alt-tab and the like)
                if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                    debug_log!("handle_playing_input() - Ignoring invalid character: {:?}", c);
                } else if self.input.chars().count() < MAX_INPUT_CHARS {
                    self.input.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter if !self.input.trim().is_empty() => {
                let answer = std::mem::take(&mut self.input);
                info_log!("handle_playing_input() - submitting '{}'", answer);
                Some(UserAction::Submit(answer))
            }
            _ => {
                debug_log!("handle_playing_input() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            _ => None,
        }
    }

    fn time_style(&self) -> Style {
        if self.seconds <= LOW_TIME_SECONDS {
            ERROR_STYLE.add_modifier(Modifier::BOLD)
        } else {
            INFO_STYLE
        }
    }

    fn message_style(&self) -> Style {
        if self.message == CORRECT_MESSAGE {
            SUCCESS_STYLE
        } else if self.state == TuiState::GameOver {
            HEADER_STYLE
        } else {
            ERROR_STYLE
        }
    }

    /// Render the complete UI layout.
    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Time / level
                Constraint::Length(5), // Target word
                Constraint::Length(3), // Eclipse
                Constraint::Length(3), // Input
                Constraint::Min(3),    // Message
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        self.render_stats(f, chunks[1]);
        self.render_word(f, chunks[2]);
        self.render_eclipse(f, chunks[3]);
        self.render_input(f, chunks[4]);
        self.render_message(f, chunks[5]);
        self.render_instructions(f, chunks[6]);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("SWIFT TYPE")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_stats(&self, f: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let time = Paragraph::new(self.time.as_str())
            .style(self.time_style())
            .alignment(Alignment::Center)
            .block(Block::default().title("Time").borders(Borders::ALL));
        let level = Paragraph::new(self.level.as_str())
            .style(INFO_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().title("Level").borders(Borders::ALL));
        f.render_widget(time, halves[0]);
        f.render_widget(level, halves[1]);
    }

    fn render_word(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(self.word.as_str(), WORD_STYLE)),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Type this").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_eclipse(&self, f: &mut Frame, area: Rect) {
        let style = if self.eclipse >= 1.0 {
            ECLIPSE_STYLE
        } else {
            SUN_STYLE
        };
        let gauge = Gauge::default()
            .block(Block::default().title("Eclipse").borders(Borders::ALL))
            .gauge_style(style)
            .ratio(self.eclipse.clamp(0.0, 1.0))
            .label(format!("{:.0}%", self.eclipse * 100.0));
        f.render_widget(gauge, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let cursor = if self.state == TuiState::Playing { "_" } else { "" };
        let paragraph = Paragraph::new(format!("> {}{cursor}", self.input))
            .block(Block::default().title("Your answer").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_message(&self, f: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            self.message.as_str(),
            self.message_style(),
        )))
        .block(Block::default().title("Information").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(&self, f: &mut Frame, area: Rect) {
        let text = match self.state {
            TuiState::Playing => "Type the word | ENTER: Submit | BACKSPACE: Delete | ESC: Quit",
            TuiState::GameOver => "N: New Game | ESC: Quit",
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling and the tick schedule.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    screen: Screen,
    next_tick: Option<Instant>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            screen: Screen::new(),
            next_tick: None,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let screen = &self.screen;
        self.terminal.draw(|f| screen.render(f))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Waits at most `timeout` for a key press that maps to an action.
    fn poll_action(&mut self, timeout: Duration) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
                let action = self.screen.handle_key(key);
                self.draw_or_log();
                Ok(action)
            }
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            other => {
                debug_log!("poll_action() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl Renderer for TuiInterface {
    fn render_word(&mut self, word: &str) {
        word.clone_into(&mut self.screen.word);
    }

    fn render_seconds(&mut self, seconds: u32) {
        self.screen.seconds = seconds;
    }

    fn render_time(&mut self, time: &str) {
        time.clone_into(&mut self.screen.time);
    }

    fn render_level(&mut self, level: &str) {
        level.clone_into(&mut self.screen.level);
    }

    fn render_message(&mut self, message: &str) {
        message.clone_into(&mut self.screen.message);
    }

    fn render_eclipse(&mut self, progress: f64) {
        self.screen.eclipse = progress;
        // Eclipse is pushed last by `present`, so the frame is complete here.
        self.draw_or_log();
    }
}

impl GameInterface for TuiInterface {
    fn next_event(&mut self) -> ShellEvent {
        loop {
            let timeout = match self.next_tick {
                Some(due) => {
                    let now = Instant::now();
                    if now >= due {
                        self.next_tick = Some(due + TICK_INTERVAL);
                        return ShellEvent::Tick;
                    }
                    due - now
                }
                None => Duration::from_millis(EVENT_POLL_TIMEOUT_MS),
            };

            match self.poll_action(timeout) {
                Ok(Some(action)) => return ShellEvent::Action(action),
                Ok(None) => {}
                Err(e) => {
                    info_log!("next_event() - Input error: {}, exiting", e);
                    return ShellEvent::Action(UserAction::Exit);
                }
            }
        }
    }

    fn word_issued(&mut self) {
        self.screen.input.clear();
    }

    fn set_ticking(&mut self, ticking: bool) {
        if ticking {
            self.screen.state = TuiState::Playing;
            self.screen.input.clear();
            self.next_tick = Some(Instant::now() + TICK_INTERVAL);
        } else {
            self.screen.state = TuiState::GameOver;
            self.next_tick = None;
        }
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
