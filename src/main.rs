use number_guess::cli::{CliInterface, parse_cli};
use number_guess::logging::{LogTarget, default_log_path, init_logging};
use number_guess::tui::TuiInterface;
use number_guess::{Game, GameRng, LoopOptions, game_loop};
use std::io;
use std::time::Duration;

fn main() {
    let cli = parse_cli();

    // The TUI owns the terminal, so its logs go to a file.
    let target = match (cli.tui, default_log_path()) {
        (true, Some(path)) => LogTarget::File(path),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = init_logging(&target, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let rng = cli.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    let mut game = match Game::with_rng(cli.game_config(), rng) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid game settings: {e}");
            return;
        }
    };

    if let Some(rounds) = &cli.rounds
        && let Err(e) = game.start_new_session(rounds)
    {
        eprintln!("Invalid round count '{rounds}': {e}");
        return;
    }

    let options = LoopOptions {
        round_delay: Duration::from_secs(cli.round_delay),
    };

    if cli.tui {
        match TuiInterface::new() {
            Ok(mut tui) => game_loop(&mut game, &mut tui, &options),
            Err(e) => eprintln!("Failed to start the terminal interface: {e}"),
        }
    } else {
        println!("Welcome to the number guessing game! Type 'help' for the rules.");
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut game, &mut interface, &options);
    }
}
