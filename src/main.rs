use clap::{Parser, ValueEnum};
use engine::{Config, Player};
use tracing_subscriber::EnvFilter;

pub mod tui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ComputerSide {
    None,
    Sente,
    Gote,
}

impl ComputerSide {
    fn player(self) -> Option<Player> {
        match self {
            ComputerSide::None => None,
            ComputerSide::Sente => Some(Player::Sente),
            ComputerSide::Gote => Some(Player::Gote),
        }
    }
}

/// Console shogi without drops.
#[derive(Debug, Parser)]
#[command(name = "shogi", version)]
struct Args {
    /// Side played by the random computer opponent.
    #[arg(long, value_enum, default_value_t = ComputerSide::Gote)]
    computer: ComputerSide,

    /// Seed for the computer's move choice.
    #[arg(long)]
    seed: Option<u64>,

    /// Start from this position instead of the standard opening.
    #[arg(long)]
    sfen: Option<String>,

    /// Promote automatically when a piece would otherwise have no legal move.
    #[arg(long)]
    forced_promotion: bool,

    /// Print the board without colours.
    #[arg(long)]
    no_color: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config {
        forced_promotion: args.forced_promotion,
        ..Config::default()
    };
    let options = tui::Options {
        computer: args.computer.player(),
        seed: args.seed,
        sfen: args.sfen,
        color: !args.no_color,
    };

    if let Err(err) = tui::run(config, options) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
