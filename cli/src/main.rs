use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use minefield_core::{Coord, CellCount, GameConfig, GamePhase, StartCell};

use crate::command::{Command, HELP};
use crate::session::Session;

mod command;
mod render;
mod session;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SafeStart {
    /// The first reveal may hit a mine
    None,
    /// The first revealed cell is never a mine
    Safe,
    /// The first revealed cell always opens an empty region
    Zero,
}

impl From<SafeStart> for StartCell {
    fn from(safe_start: SafeStart) -> Self {
        match safe_start {
            SafeStart::None => StartCell::Random,
            SafeStart::Safe => StartCell::SimpleSafe,
            SafeStart::Zero => StartCell::AlwaysZero,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows
    #[arg(long, default_value_t = GameConfig::easy().rows(), allow_negative_numbers = true)]
    rows: Coord,

    /// Number of columns
    #[arg(long, default_value_t = GameConfig::easy().cols(), allow_negative_numbers = true)]
    cols: Coord,

    /// Number of mines
    #[arg(long, default_value_t = GameConfig::easy().mines())]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Protection for the first revealed cell
    #[arg(long, value_enum, default_value_t = SafeStart::None)]
    safe_start: SafeStart,
}

fn print_state(session: &Session) -> anyhow::Result<()> {
    let rendered = match session.board() {
        Some(board) => render::render_board(board)?,
        None => render::render_pending(
            session.config(),
            session.pending_flags(),
            session.remaining_flags(),
        )?,
    };
    println!("{rendered}");
    match session.phase() {
        GamePhase::Won => println!("Congratulations, You won! Type n for a new game."),
        GamePhase::Lost => println!("Game Over! Type n for a new game."),
        GamePhase::NotStarted | GamePhase::InProgress => {}
    }
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = GameConfig::new(args.rows, args.cols, args.mines).with_context(|| {
        format!(
            "{}x{} board with {} mines",
            args.rows, args.cols, args.mines
        )
    })?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut session =
        Session::new(config, args.safe_start.into(), seed).context("building the board")?;

    println!("{HELP}");
    print_state(&session)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("flushing prompt")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("reading command")? == 0 {
            break;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(command::ParseCommandError::Empty) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        log::debug!("Command: {:?}", command);

        match command {
            Command::Reveal(coords) => match session.reveal(coords) {
                Ok(_) => print_state(&session)?,
                Err(err) => println!("{err}"),
            },
            Command::Flag(coords) => match session.toggle_flag(coords) {
                Ok(outcome) if outcome.has_update() => print_state(&session)?,
                Ok(_) => {}
                Err(err) => println!("{err}"),
            },
            Command::New => {
                session
                    .restart(rand::random())
                    .context("building the board")?;
                print_state(&session)?;
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("args: {:?}", args);

    run(args)
}
