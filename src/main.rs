//! # Interactive Tic-Tac-Toe (m,n,k) Player
//!
//! Terminal front end for the `mnk` game core. The binary is presentation
//! glue only: it parses commands, forwards them to the [`GameSession`],
//! and renders the boards and status the core hands back.
//!
//! ## Usage
//! ```text
//! play [--rows N] [--cols N] [--win-length K] [--mode multi|single]
//!      [--seed S] [--delay-ms MS]
//! ```
//!
//! In-game commands: a cell index places a mark; `jump N` browses the
//! history; `history` lists positions; `new R C K` applies a fresh
//! configuration; `mode single|multi` switches opponent type; `help`,
//! `quit`.

use clap::{Parser, ValueEnum};
use colored::Colorize;
use mnk::{
    Board, GameConfig, GameMode, GameSession, GameStatus, MoveResult, Player,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Two humans alternating at the same terminal
    Multi,
    /// Human X against a random-move computer O
    Single,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> GameMode {
        match mode {
            ModeArg::Multi => GameMode::Multiplayer,
            ModeArg::Single => GameMode::SinglePlayer,
        }
    }
}

/// Command line arguments for the player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of board rows
    #[arg(long, default_value_t = 3)]
    rows: usize,

    /// Number of board columns
    #[arg(long, default_value_t = 3)]
    cols: usize,

    /// Marks in a row required to win
    #[arg(long, default_value_t = 3)]
    win_length: usize,

    /// Opponent type
    #[arg(long, value_enum, default_value_t = ModeArg::Single)]
    mode: ModeArg,

    /// Seed for the computer's random moves (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Computer move delay in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = GameConfig::new(args.rows, args.cols, args.win_length);
    let rng = match args.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
    };
    let controller = match mnk::GameController::with_rng(config, args.mode.into(), rng) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1);
        }
    };
    let mut session =
        GameSession::from_controller(controller, Duration::from_millis(args.delay_ms));

    println!("{}", "tic-tac-toe arena".bold());
    println!("{}", session.controller().config());
    print_help();
    render(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match parse_command(input) {
            Command::Quit => break,
            Command::Help => {
                print_help();
                continue;
            }
            Command::Move(index) => {
                match session.submit_human_move(index) {
                    MoveResult::Applied { player, index, .. } => {
                        println!("{} plays cell {}", mark(player), index);
                    }
                    MoveResult::Ignored(reason) => {
                        println!("{}", format!("ignored: {}", reason).yellow());
                    }
                }
                if let Some(MoveResult::Applied { player, index, .. }) =
                    session.wait_for_computer_move().await
                {
                    println!("{} plays cell {}", mark(player), index);
                }
            }
            Command::Jump(index) => match session.jump_to_move(index) {
                Ok(()) => println!("viewing position after {} move(s)", index),
                Err(err) => println!("{}", err.to_string().red()),
            },
            Command::History => {
                let active = session.controller().active_index();
                for (i, _) in session.controller().boards().iter().enumerate() {
                    let marker = if i == active { ">" } else { " " };
                    println!("{} {:>3}: after {} move(s)", marker, i, i);
                }
                continue;
            }
            Command::New(config) => match session.submit_configuration(config) {
                Ok(()) => println!("new game: {}", config),
                Err(err) => {
                    for problem in err.problems() {
                        println!("{}", problem.red());
                    }
                    continue;
                }
            },
            Command::Mode(mode) => {
                session.set_mode(mode);
                println!("mode changed, game reset");
            }
            Command::Unknown => {
                println!("{}", "unrecognized command; try `help`".yellow());
                continue;
            }
        }
        render(&session);
        if session.status().is_game_over() {
            println!("game over - `new R C K` or `jump N` to continue");
        }
    }
}

enum Command {
    Move(usize),
    Jump(usize),
    History,
    New(GameConfig),
    Mode(GameMode),
    Help,
    Quit,
    Unknown,
}

fn parse_command(input: &str) -> Command {
    if let Ok(index) = input.parse::<usize>() {
        return Command::Move(index);
    }
    let mut parts = input.split_whitespace();
    match parts.next() {
        Some("jump") => match parts.next().and_then(|n| n.parse().ok()) {
            Some(index) => Command::Jump(index),
            None => Command::Unknown,
        },
        Some("history") => Command::History,
        Some("new") => {
            let nums: Vec<usize> = parts.filter_map(|p| p.parse().ok()).collect();
            match nums.as_slice() {
                [rows, cols, win] => Command::New(GameConfig::new(*rows, *cols, *win)),
                _ => Command::Unknown,
            }
        }
        Some("mode") => match parts.next() {
            Some("single") => Command::Mode(GameMode::SinglePlayer),
            Some("multi") => Command::Mode(GameMode::Multiplayer),
            _ => Command::Unknown,
        },
        Some("help") => Command::Help,
        Some("quit") | Some("exit") => Command::Quit,
        _ => Command::Unknown,
    }
}

fn print_help() {
    println!("commands:");
    println!("  <index>          place your mark at that cell");
    println!("  jump <n>         browse to the position after n moves");
    println!("  history          list all recorded positions");
    println!("  new <r> <c> <k>  start over with a new configuration");
    println!("  mode single|multi  switch opponent type (resets game)");
    println!("  quit             leave the game");
}

fn mark(player: Player) -> colored::ColoredString {
    match player {
        Player::X => "X".red().bold(),
        Player::O => "O".blue().bold(),
    }
}

fn render(session: &GameSession) {
    let board = session.controller().board();
    println!();
    print_board(board);
    match session.status() {
        GameStatus::InProgress { to_move } => {
            println!("status: in progress, {} to move", mark(to_move));
        }
        status => println!("status: {}", status),
    }
}

fn print_board(board: &Board) {
    let width = (board.len().saturating_sub(1)).to_string().len();
    for row in 0..board.rows() {
        let mut line = String::new();
        for col in 0..board.cols() {
            let index = board.index_of(row, col);
            let cell = match board.at(row, col).player() {
                Some(Player::X) => format!("{:>width$}", "X").red().bold().to_string(),
                Some(Player::O) => format!("{:>width$}", "O").blue().bold().to_string(),
                None => format!("{:>width$}", index).dimmed().to_string(),
            };
            line.push_str(&cell);
            if col + 1 < board.cols() {
                line.push_str(" | ");
            }
        }
        println!("  {}", line);
        if row + 1 < board.rows() {
            println!("  {}", "-".repeat((width + 3) * board.cols() - 3));
        }
    }
}
