use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::io::Cursor;
use swift_type::cli::CliInterface;
use swift_type::{
    GameConfig, GameInterface, GameState, Outcome, Phase, Renderer, ShellEvent, TickOutcome,
    UserAction, WordBank, game_loop_with, load_wordbank_from_file, load_wordbank_from_str,
};

const WORDS: [&str; 7] = [
    "Hola",
    "Mundo",
    "Java",
    "Programación",
    "Eventos",
    "IntelliJ",
    "JavaFX",
];

fn default_bank() -> WordBank {
    WordBank::new(WORDS.iter().map(|w| (*w).to_string()).collect()).unwrap()
}

fn new_game(seed: u64) -> GameState<StdRng> {
    GameState::with_rng(default_bank(), GameConfig::default(), StdRng::seed_from_u64(seed))
}

fn answer_correctly(state: &mut GameState<StdRng>) -> Outcome {
    let word = state.current_word().to_string();
    state.submit(&word)
}

#[test]
fn test_level_counts_correct_answers() {
    for n in [0, 1, 4, 5, 13, 50] {
        let mut state = new_game(n);
        for _ in 0..n {
            assert_eq!(answer_correctly(&mut state), Outcome::Correct);
        }
        assert_eq!(state.level(), 1 + n as u32);
        assert_eq!(state.levels_completed(), n as u32);
    }
}

#[test]
fn test_opportunities_bounded_and_four_misses_end_game() {
    // Every combination of wrong answers (false) and timeouts (true).
    for mask in 0..16u32 {
        let mut state = new_game(u64::from(mask));
        for i in 0..4 {
            assert!(!state.is_over());
            if mask & (1 << i) == 0 {
                state.submit("wrongword");
            } else {
                let mut outcome = TickOutcome::Counting;
                while outcome == TickOutcome::Counting {
                    outcome = state.tick();
                }
            }
            assert!(state.opportunities() <= 4);
            assert_eq!(state.opportunities(), 3 - i);
        }
        assert!(state.is_over(), "mask {mask:04b}");
        assert_eq!(state.phase(), Phase::GameOver);
    }
}

#[test]
fn test_time_stays_in_range_after_resets() {
    let mut state = new_game(9);
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        if state.is_over() {
            break;
        }
        let reset = match rng.gen_range(0..10) {
            0 => {
                state.submit("wrongword");
                true
            }
            1..=4 => state.tick() == TickOutcome::TimedOut,
            _ => {
                answer_correctly(&mut state);
                true
            }
        };
        assert!(state.time_remaining() <= 20);
        if reset && !state.is_over() {
            assert!((2..=20).contains(&state.time_remaining()));
        }
    }
}

#[test]
fn test_every_fifth_level_shortens_the_clock() {
    let mut state = new_game(1);
    for _ in 0..60 {
        answer_correctly(&mut state);
        let level = state.level();
        if level % 5 == 0 {
            let expected = 20u32.saturating_sub((level / 5) * 2).max(2);
            assert_eq!(state.time_remaining(), expected, "level {level}");
        }
    }
    assert_eq!(state.time_remaining(), 2);
}

#[test]
fn test_four_wrong_submissions_freeze_the_word() {
    let mut state = new_game(21);
    for _ in 0..4 {
        state.submit("wrongword");
    }
    assert!(state.is_over());

    let frozen = state.current_word().to_string();
    for _ in 0..10 {
        state.submit("wrongword");
        state.tick();
        assert_eq!(state.current_word(), frozen);
    }
}

#[test]
fn test_first_loss_on_twentieth_tick() {
    let mut state = new_game(4);
    for tick in 1..=20 {
        let outcome = state.tick();
        if tick < 20 {
            assert_eq!(outcome, TickOutcome::Counting);
            assert_eq!(state.opportunities(), 4, "tick {tick}");
        } else {
            assert_eq!(outcome, TickOutcome::TimedOut);
            assert_eq!(state.opportunities(), 3);
        }
    }
}

#[test]
fn test_pick_word_only_returns_configured_words() {
    let bank = default_bank();
    for _ in 0..1000 {
        assert!(WORDS.contains(&bank.pick_word()));
    }
}

#[test]
fn test_eclipse_follows_opportunities() {
    let mut state = new_game(2);
    let expected = [0.25, 0.5, 0.75, 1.0];
    assert!(state.eclipse_progress().abs() < f64::EPSILON);
    for progress in expected {
        state.submit("wrongword");
        assert!((state.eclipse_progress() - progress).abs() < f64::EPSILON);
    }
}

#[test]
fn test_custom_wordbank_file_to_game() {
    use std::fs::File;
    use std::io::Write;

    let wordbank_path = std::env::temp_dir().join("swift_type_custom_wordbank.txt");
    {
        let mut file = File::create(&wordbank_path).unwrap();
        writeln!(file, "# fruit").unwrap();
        writeln!(file, "manzana").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  pera  ").unwrap();
    }

    let words = load_wordbank_from_file(&wordbank_path).unwrap();
    assert_eq!(words, vec!["manzana", "pera"]);
    let bank = WordBank::new(words).unwrap();

    let mut state = GameState::with_config(bank, GameConfig::default());
    assert!(["manzana", "pera"].contains(&state.current_word()));
    let word = state.current_word().to_string();
    assert_eq!(state.submit(&word), Outcome::Correct);

    std::fs::remove_file(&wordbank_path).unwrap();
}

#[test]
fn test_empty_wordbank_file_cannot_start() {
    let words = load_wordbank_from_str("# nothing here\n\n");
    assert!(WordBank::new(words).is_err());
}

#[derive(Default)]
struct Recorder {
    events: VecDeque<ShellEvent>,
    word: String,
    messages: Vec<String>,
    ticking: bool,
}

impl Renderer for Recorder {
    fn render_word(&mut self, word: &str) {
        self.word = word.to_string();
    }
    fn render_time(&mut self, _time: &str) {}
    fn render_level(&mut self, _level: &str) {}
    fn render_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
    fn render_eclipse(&mut self, _progress: f64) {}
}

impl GameInterface for Recorder {
    fn next_event(&mut self) -> ShellEvent {
        if let Some(event) = self.events.pop_front() {
            return event;
        }
        // Answer the word on screen until the script runs dry, then stop.
        if self.ticking && self.messages.iter().filter(|m| *m == "Correct!").count() < 9 {
            ShellEvent::Action(UserAction::Submit(self.word.clone()))
        } else {
            ShellEvent::Action(UserAction::Exit)
        }
    }

    fn set_ticking(&mut self, ticking: bool) {
        self.ticking = ticking;
    }
}

#[test]
fn test_game_loop_plays_until_exit() {
    let mut ui = Recorder::default();
    ui.events.push_back(ShellEvent::Tick);
    ui.events.push_back(ShellEvent::Action(UserAction::Submit("nope".to_string())));

    let summary = game_loop_with(&default_bank(), GameConfig::default(), &mut ui, || {
        StdRng::seed_from_u64(77)
    });
    assert_eq!(summary.games_played, 1);
    assert_eq!(summary.best_levels_completed, 9);
    assert_eq!(ui.messages.iter().filter(|m| *m == "Wrong! Try again.").count(), 1);
}

#[test]
fn test_game_loop_over_stdin() {
    let input = "wrong\nwrong\nwrong\nwrong\nnext\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop_with(&default_bank(), GameConfig::default(), &mut interface, || {
        StdRng::seed_from_u64(8)
    });
    assert_eq!(summary.games_played, 2);
    assert_eq!(summary.best_levels_completed, 0);
}

#[test]
fn test_longer_first_word_does_not_change_resets() {
    let mut state = GameState::with_rng(
        default_bank(),
        GameConfig::new(30, 4),
        StdRng::seed_from_u64(0),
    );
    assert_eq!(state.time_remaining(), 30);
    state.submit("wrong");
    assert_eq!(state.time_remaining(), 20);
    assert!((2..=20).contains(&state.time_remaining()));
}
