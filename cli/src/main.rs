//! Print random puzzles.
//!
//! ```text
//! $ flowlink --width 6 --height 4 --seed 11 --solution
//! ```
//!
//! Each puzzle is printed as its clue grid: uppercase letters mark the two ends of each pair, `.` an empty cell.
//! With `--solution` the solved grid follows, with path cells in the lowercase letter of their pair.
//! `--paths` draws the solved links with box-drawing characters instead.

use std::env;
use std::num::NonZero;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, warn};

use flowlink::{Board, Generator};

const DEFAULT_SIDE: NonZero<usize> = NonZero::<usize>::MIN.saturating_add(4);

/// Generate Numberlink puzzles.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Board width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_SIDE)]
    width: NonZero<usize>,

    /// Board height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_SIDE)]
    height: NonZero<usize>,

    /// Seed for the generator; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Also print the solved grid
    #[arg(long, default_value_t = false)]
    solution: bool,

    /// Also draw the solved paths
    #[arg(short, long, default_value_t = false)]
    paths: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.debug {
        env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    let seed = args.seed.unwrap_or_else(rand::random);
    debug!("seed {seed}");

    let mut generator = Generator::seeded(seed);
    let mut board = Board::with_dims((args.width, args.height));
    let mut failures = 0;

    for i in 0..args.count {
        if i > 0 {
            println!();
        }

        let report = generator.generate(&mut board);
        debug!("puzzle {i}: {report:?}");
        if !report.converged {
            warn!("puzzle {i} leaves some cells off every path");
            failures += 1;
        }

        print!("{board}");
        if args.solution || args.paths {
            board.swap_solution();
            if args.solution {
                println!();
                print!("{board}");
            }
            if args.paths {
                println!();
                print!("{}", board.draw_paths());
            }
            board.swap_solution();
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
