use std::io;
use std::process::ExitCode;
use swift_type::cli::{CliInterface, parse_cli};
use swift_type::logging::{get_log_path, init_logging};
use swift_type::tui::TuiInterface;
use swift_type::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
use swift_type::{WordBank, game_loop, info_log};

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(get_log_path)
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Logging disabled, cannot open '{}': {e}", path.display());
    }

    let words = match &cli.wordbank_path {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load word bank from '{path}': {e}");
                return ExitCode::FAILURE;
            }
        },
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    let bank = match WordBank::new(words) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Cannot start: {e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!("Loaded {} words", bank.len());

    let config = cli.game_config();
    let summary = if cli.plain {
        println!("Loaded {} words. Type 'exit' to quit.", bank.len());
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&bank, config, &mut interface)
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to initialise terminal: {e}");
                return ExitCode::FAILURE;
            }
        };
        // Dropping the interface restores the terminal before the summary prints.
        let summary = game_loop(&bank, config, &mut interface);
        drop(interface);
        summary
    };

    println!(
        "Games played: {}, best: {} levels completed",
        summary.games_played, summary.best_levels_completed
    );
    ExitCode::SUCCESS
}
