use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use kusokurae::engine;
use kusokurae::game::{Game, GameConfig, GameObserver, GameStatus, RoundOutcome};
use kusokurae::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of players (3 or 4)
    #[arg(short, long, default_value_t = 3)]
    players: usize,
    /// Shuffle seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Play the whole game headless and print the result
    #[arg(long)]
    autoplay: bool,
    /// Print every hand after the deal (headless only)
    #[arg(long)]
    cards_first: bool,
}

/// Prints each resolved round as it happens.
struct RoundPrinter;

impl GameObserver for RoundPrinter {
    fn on_status_change(&mut self, status: GameStatus) {
        log::debug!("status: {status:?}");
    }

    fn on_round_resolved(&mut self, outcome: &RoundOutcome) {
        let cards: Vec<String> =
            outcome.moves.iter().map(|m| format!("P{}:{}", m.seat + 1, m.card)).collect();
        println!(
            "round {:>2}  {}  -> P{} {:+}{}",
            outcome.seq,
            cards.join(" "),
            outcome.winner + 1,
            outcome.score,
            if outcome.is_doubled { " (doubled)" } else { "" }
        );
    }
}

fn run_headless(args: &Args, seed: u64) -> io::Result<()> {
    let config = GameConfig::new(args.players).with_seed(seed);
    let mut game = Game::with_observer(config, RoundPrinter).map_err(io::Error::other)?;
    game.start().map_err(io::Error::other)?;
    println!("kusokurae {}: {} players, seed {seed}", kusokurae::VERSION, args.players);
    if args.cards_first {
        for p in game.players() {
            let hand: Vec<String> = p.hand().iter().map(|c| c.to_string()).collect();
            println!("P{}: {}", p.index(), hand.join(" "));
        }
    }

    engine::play_out(&mut game).map_err(io::Error::other)?;

    for p in game.players() {
        println!("P{}: {:+} ({} cards taken)", p.index(), p.score(), p.cards_taken());
    }
    let winners: Vec<String> = game.winners().iter().map(|s| format!("P{}", s + 1)).collect();
    println!("winner(s): {}", winners.join(", "));
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random::<u64>);

    if args.autoplay || !io::stdout().is_terminal() {
        return run_headless(&args, seed);
    }

    let mut app = AppState::new(args.players, seed).map_err(io::Error::other)?;
    let mut terminal = setup_terminal()?;
    let res = controller::run(&mut terminal, &mut app, Duration::from_millis(250));

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
