//! Command handler modules for the namewheel CLI.
//!
//! Each command lives in its own file and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, writing to the
//! injected output streams.

mod cfg;
mod rng;
mod select;
mod spin;
mod stats;

pub use cfg::handle_cfg_command;
pub use rng::handle_rng_command;
pub use select::handle_select_command;
pub use spin::{SpinOptions, handle_spin_command};
pub use stats::handle_stats_command;
