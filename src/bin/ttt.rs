//! Play tic-tac-toe against the minimax engine in the terminal.

use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use ttt_minimax::game::{ComputerKind, GameConfig, Seat, TextGame};
use ttt_minimax::random::{CustomNumberGenerator, RandomGenerator, StandardRandomGenerator};

#[derive(Parser, Debug)]
#[command(name = "ttt")]
#[command(version, about = "Play tic-tac-toe against a perfect opponent", long_about = None)]
struct Args {
    /// Who moves first. Asked interactively when omitted.
    #[arg(long, value_enum)]
    first: Option<FirstArg>,

    /// How the computer picks its moves
    #[arg(long, value_enum, default_value_t = OpponentArg::Perfect)]
    opponent: OpponentArg,

    /// Seed for the random opponent, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FirstArg {
    Human,
    Computer,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OpponentArg {
    Perfect,
    Random,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            first: self.first.map(|first| match first {
                FirstArg::Human => Seat::Human,
                FirstArg::Computer => Seat::Computer,
            }),
            computer: match self.opponent {
                OpponentArg::Perfect => ComputerKind::Perfect,
                OpponentArg::Random => ComputerKind::Random,
            },
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .target(env_logger::Target::Stderr)
        .init();

    let config = args.game_config();
    let result = match args.seed {
        Some(seed) => run(config, CustomNumberGenerator::from_seed(seed)),
        None => run(config, StandardRandomGenerator),
    };

    if let Err(e) = result {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn run<K: RandomGenerator>(config: GameConfig, random: K) -> ttt_minimax::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut game =
        TextGame::new(stdin.lock(), stdout.lock(), config).with_random_generator(random);
    game.play()?;
    Ok(())
}
