//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "namewheel", version, about = "Wheel of names picker")]
pub struct NamewheelCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run complete spins on a simulated clock and print every event
    Spin {
        /// Comma separated entry names (defaults to the six sample names)
        #[arg(long)]
        names: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        spins: usize,
        /// Spin duration in seconds, 3 to 6
        #[arg(long)]
        duration: Option<f64>,
        #[arg(long)]
        mute: bool,
        /// Remove each winner before the next spin
        #[arg(long)]
        remove_winners: bool,
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the winning slice index for a rotation
    Select {
        #[arg(long, allow_negative_numbers = true)]
        rotation: f64,
        #[arg(long)]
        count: usize,
    },
    /// Win distribution per slice over many seeded spins
    Stats {
        #[arg(long, default_value_t = 6)]
        count: usize,
        #[arg(long, default_value_t = 10_000)]
        spins: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Sample rotation deltas from the seeded source
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Spin { .. } => "spin",
            Commands::Select { .. } => "select",
            Commands::Stats { .. } => "stats",
            Commands::Rng { .. } => "rng",
            Commands::Cfg => "cfg",
        }
    }
}
