//! Quoridor-MCTS command line front end.
//!
//! ## Usage
//!
//! - `quoridor-mcts` - Show a demo
//! - `quoridor-mcts demo` - Run the search demo
//! - `quoridor-mcts selfplay` - Play a search-vs-search game and report
//!   the training records it yields

use anyhow::Result;
use clap::{Parser, Subcommand};

use quoridor_mcts::board::{Board, Player};
use quoridor_mcts::dataset::{decode_records, encode_record};
use quoridor_mcts::mcts::{SearchParams, Searcher};
use quoridor_mcts::moves::describe;

/// Quoridor-MCTS: a Quoridor engine built on Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "quoridor-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simple demo of the engine
    Demo,
    /// Play a full search-vs-search game and encode its positions
    Selfplay {
        /// Tree iterations per move
        #[arg(long, default_value_t = 400)]
        rollouts: u32,
        /// RNG seed for a reproducible game
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Abort the game after this many plies
        #[arg(long, default_value_t = 150)]
        max_plies: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Selfplay {
            rollouts,
            seed,
            max_plies,
        }) => run_selfplay(rollouts, seed, max_plies),
        Some(Commands::Demo) | None => {
            run_demo();
            Ok(())
        }
    }
}

fn run_demo() {
    println!("Quoridor-MCTS: Monte Carlo Tree Search Quoridor Engine\n");

    let mut board = Board::new();
    board.move_pawn(1, 0, Player::White);
    board.move_pawn(-1, 0, Player::Black);
    board.place_wall(4, 4, true, Player::White);
    println!("{board}");

    let params = SearchParams {
        rollouts: 1_000,
        ..SearchParams::default()
    };
    let mut searcher = Searcher::new(params);
    println!("Running 1000 search iterations for black...");
    if let Some(mv) = searcher.best_move(&board, Player::Black) {
        println!("Best move: {}", describe(mv));
    }
}

fn run_selfplay(rollouts: u32, seed: u64, max_plies: u32) -> Result<()> {
    let params = SearchParams {
        rollouts,
        ..SearchParams::default()
    };
    let mut searcher = Searcher::seeded(params, seed);

    let mut board = Board::new();
    let mut to_move = Player::White;
    let mut stream = Vec::new();

    for ply in 0..max_plies {
        let counts = searcher.visit_distribution(&board, to_move);
        let Some(mv) = (0..=255u8).max_by_key(|&m| counts[m as usize]) else {
            break;
        };
        if counts[mv as usize] == 0 {
            break;
        }
        stream.extend(encode_record(&board, &counts));
        println!("ply {ply:3}: {:?} plays {}", to_move, describe(mv));
        board.execute_move(mv, to_move);
        if board.winner().is_some() {
            break;
        }
        to_move = to_move.other();
    }

    println!("\n{board}");
    match board.winner() {
        Some(winner) => println!("winner: {winner:?}"),
        None => println!("no winner within {max_plies} plies"),
    }

    let records = decode_records(&stream)?;
    println!("encoded {} training records, {} bytes", records.len(), stream.len());
    Ok(())
}
