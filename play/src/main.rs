use std::num::NonZero;
use std::process::ExitCode;

use clap::Parser;
use netwalk::{Board, Generator, GeneratorConfig, Location};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Generate a scrambled NetWalk board and print it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Board height in cells, at least 2
    #[arg(long, default_value_t = 9)]
    height: usize,

    /// Endpoint goal
    #[arg(long, default_value_t = 30)]
    endpoints: usize,

    /// Require exactly `endpoints` endpoints instead of at least that many
    #[arg(long)]
    exact: bool,

    /// Candidates to try before settling for the best one
    #[arg(long, default_value_t = 3000)]
    attempts: usize,

    /// Seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,

    /// Chance of linking a neighbor while growing the initial tree
    #[arg(long, default_value_t = GeneratorConfig::default().link_probability)]
    link_probability: f64,

    /// Chance of growing an extra branch past its first cell
    #[arg(long, default_value_t = GeneratorConfig::default().extend_probability)]
    extend_probability: f64,
}

fn powered_map(board: &Board) -> String {
    let reachable = board.reachable();
    let mut out = String::with_capacity(reachable.len() + reachable.nrows());

    for (y, row) in reachable.rows().into_iter().enumerate() {
        for (x, powered) in row.iter().enumerate() {
            out.push(match (board.is_root(Location(x, y)), *powered) {
                (true, _) => '@',
                (false, true) => '#',
                (false, false) if board.tile(Location(x, y)).is_empty() => ' ',
                (false, false) => '.',
            });
        }
        out.push('\n');
    }

    out
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let (Some(width), Some(height)) = (NonZero::new(args.width), NonZero::new(args.height)) else {
        eprintln!("board dimensions must be nonzero");
        return ExitCode::FAILURE;
    };
    let config = GeneratorConfig {
        link_probability: args.link_probability,
        extend_probability: args.extend_probability,
        ..Default::default()
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut generator = Generator::with_rng(config, rng);
    let dims = (width, height);
    let result = if args.exact {
        generator.with_exact_endpoints(dims, args.endpoints, args.attempts)
    } else {
        generator.with_min_endpoints(dims, args.endpoints, args.attempts)
    };

    let board = match result {
        Ok(board) => board,
        Err(reason) => {
            eprintln!("cannot generate board: {}", reason);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", board);
    println!();
    print!("{}", powered_map(&board));
    println!(
        "{}x{}, {} endpoints, {}",
        args.width,
        args.height,
        board.count_endpoints(),
        if board.solved() { "solved" } else { "unsolved" }
    );

    ExitCode::SUCCESS
}
