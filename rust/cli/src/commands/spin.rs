//! Simulated spins.
//!
//! Drives the real spin coordinator on a simulated clock: each spin is
//! requested, the clock is advanced through the spin, settle and celebration
//! windows, and the announcement is then dismissed (or the winner removed).
//! Every event is printed with the simulated time it happened at.

use crate::config;
use crate::error::CliError;
use crate::ui;
use namewheel_engine::coordinator::SpinCoordinator;
use namewheel_engine::entry::EntryList;
use namewheel_engine::events::WheelEvent;
use namewheel_engine::machine::{CELEBRATION_LIFETIME, SETTLE_DELAY};
use namewheel_engine::scheduler::ManualScheduler;
use namewheel_engine::settings::validate_spin_duration;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct SpinOptions {
    pub names: Option<String>,
    pub seed: Option<u64>,
    pub spins: usize,
    pub duration: Option<f64>,
    pub mute: bool,
    pub remove_winners: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct EventLine<'a> {
    at_ms: u128,
    #[serde(flatten)]
    event: &'a WheelEvent,
}

pub fn handle_spin_command(
    opts: SpinOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.spins == 0 {
        return Err(CliError::InvalidInput("--spins must be at least 1".into()));
    }

    let config = config::load()?;
    let mut settings = config.settings();
    if let Some(secs) = opts.duration {
        validate_spin_duration(secs).map_err(|e| CliError::InvalidInput(e.to_string()))?;
        settings.spin_duration_secs = secs;
    }
    if opts.mute {
        settings.sound_enabled = false;
    }

    let mut entries = match opts.names.as_deref() {
        Some(raw) => parse_names(raw)?,
        None => EntryList::with_defaults(),
    };

    let seed = opts.seed.or(config.seed).unwrap_or_else(rand::random);
    let mut wheel = SpinCoordinator::manual(seed);
    if !opts.json {
        writeln!(out, "Seed: {}", seed)?;
    }

    let mut winners = Vec::new();
    for round in 0..opts.spins {
        if round > 0 && entries.is_empty() {
            ui::display_warning(err, &format!("no entries left after {} spins", round))?;
            break;
        }

        let events = wheel.request_spin(&entries, &settings)?;
        print_events(out, &wheel, &events, opts.json)?;

        for window in [settings.spin_duration(), SETTLE_DELAY, CELEBRATION_LIFETIME] {
            let events = wheel.advance(window)?;
            winners.extend(events.iter().filter_map(|event| match event {
                WheelEvent::RevealStarted { winner, .. } => Some(winner.name.clone()),
                _ => None,
            }));
            print_events(out, &wheel, &events, opts.json)?;
        }

        let events = if opts.remove_winners {
            wheel.remove_winner(&mut entries)?
        } else {
            wheel.dismiss()?
        };
        print_events(out, &wheel, &events, opts.json)?;
    }

    if !opts.json {
        writeln!(out, "Winners: {}", winners.join(", "))?;
    }
    Ok(())
}

/// Comma separated names, trimmed; blanks between commas are skipped.
fn parse_names(raw: &str) -> Result<EntryList, CliError> {
    let names = raw.split(',').map(str::trim).filter(|name| !name.is_empty());
    Ok(EntryList::from_names(names)?)
}

fn print_events(
    out: &mut dyn Write,
    wheel: &SpinCoordinator<ManualScheduler>,
    events: &[WheelEvent],
    json: bool,
) -> Result<(), CliError> {
    let at: Duration = wheel.now();
    for event in events {
        if json {
            let line = EventLine {
                at_ms: at.as_millis(),
                event,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        } else {
            writeln!(out, "{}", ui::format_event(at, event))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use namewheel_engine::errors::WheelError;

    #[test]
    fn parse_names_skips_blanks_and_trims() {
        let entries = parse_names(" Ann, ,Ben ,").expect("names");
        let names: Vec<&str> = entries.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Ben"]);
    }

    #[test]
    fn parse_names_rejects_duplicates() {
        let result = parse_names("Ann,ann");
        assert!(matches!(
            result,
            Err(CliError::Wheel(WheelError::DuplicateName(_)))
        ));
    }
}
