//! # Namewheel CLI Library
//!
//! Command-line front end for the wheel of names engine. Spins run on a
//! simulated clock, so a full spin → reveal → celebration sequence completes
//! instantly and is reproducible from a seed.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, executes the subcommand against the injected
//! output streams and returns the process exit code.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = namewheel_cli::run(
//!     ["namewheel", "select", "--rotation", "90", "--count", "4"],
//!     &mut out,
//!     &mut err,
//! );
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().starts_with("Winner index: 3"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `spin`: Run complete spins and print every event
//! - `select`: Winning slice for a rotation
//! - `stats`: Win distribution with a chi-square statistic
//! - `rng`: Sample rotation deltas for a seed
//! - `cfg`: Resolved configuration with value sources

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod ui;

use cli::{Commands, NamewheelCli};
use commands::{
    SpinOptions, handle_cfg_command, handle_rng_command, handle_select_command,
    handle_spin_command, handle_stats_command,
};

pub use error::{CliError, EXIT_ERROR, EXIT_SUCCESS};

const COMMANDS: &[&str] = &["spin", "select", "stats", "rng", "cfg"];

/// Parses `args` and runs the subcommand.
///
/// Returns `0` on success and `2` on any error. Help and version output go
/// to `out` and also return `0`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match NamewheelCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return EXIT_ERROR;
                    }
                    EXIT_SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e);
                    EXIT_ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Spin {
            names,
            seed,
            spins,
            duration,
            mute,
            remove_winners,
            json,
        } => handle_spin_command(
            SpinOptions {
                names,
                seed,
                spins,
                duration,
                mute,
                remove_winners,
                json,
            },
            out,
            err,
        ),
        Commands::Select { rotation, count } => handle_select_command(rotation, count, out),
        Commands::Stats { count, spins, seed } => handle_stats_command(count, spins, seed, out),
        Commands::Rng { seed } => handle_rng_command(seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            e.exit_code()
        }
    }
}

fn write_usage(err: &mut dyn Write, e: &clap::Error) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Namewheel CLI")?;
    writeln!(err, "Usage: namewheel <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: namewheel --help")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_capture(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn command_list_matches_subcommands() {
        use clap::CommandFactory;

        let cmd = NamewheelCli::command();
        let mut names: Vec<&str> = cmd
            .get_subcommands()
            .map(|c| c.get_name())
            .filter(|name| *name != "help")
            .collect();
        names.sort_unstable();
        let mut expected = COMMANDS.to_vec();
        expected.sort_unstable();
        assert_eq!(names, expected);
    }

    #[test]
    fn unknown_command_prints_usage_and_fails() {
        let (code, out, err) = run_capture(&["namewheel", "juggle"]);
        assert_eq!(code, EXIT_ERROR);
        assert!(out.is_empty());
        assert!(err.contains("Usage: namewheel <command>"));
        assert!(err.contains("  spin"));
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, _) = run_capture(&["namewheel", "--help"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.contains("spin"));
    }

    #[test]
    fn handler_errors_are_reported_once() {
        let (code, _, err) = run_capture(&["namewheel", "select", "--rotation", "1", "--count", "0"]);
        assert_eq!(code, EXIT_ERROR);
        assert_eq!(err.matches("Error:").count(), 1);
    }
}
