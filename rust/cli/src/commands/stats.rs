//! Win distribution over many seeded spins.
//!
//! Accumulates rotation the way the wheel does across consecutive spins and
//! counts which slice ends up under the pointer. The report includes a
//! chi-square statistic against the uniform distribution with `count - 1`
//! degrees of freedom.

use crate::error::CliError;
use namewheel_engine::rotation::{RotationSource, SeededRotation};
use namewheel_engine::selection::select_winner;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct StatsReport {
    seed: u64,
    spins: usize,
    slices: usize,
    counts: Vec<u64>,
    expected: f64,
    chi_square: f64,
    degrees_of_freedom: usize,
}

pub fn handle_stats_command(
    count: usize,
    spins: usize,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if count == 0 {
        return Err(CliError::InvalidInput("--count must be at least 1".into()));
    }
    if spins == 0 {
        return Err(CliError::InvalidInput("--spins must be at least 1".into()));
    }

    let seed = seed.unwrap_or_else(rand::random);
    let mut source = SeededRotation::new_with_seed(seed);
    let mut counts = vec![0u64; count];
    let mut rotation = 0.0;
    for _ in 0..spins {
        rotation += source.next_delta();
        counts[select_winner(rotation, count)?] += 1;
    }

    let expected = spins as f64 / count as f64;
    let report = StatsReport {
        seed,
        spins,
        slices: count,
        chi_square: chi_square(&counts, expected),
        counts,
        expected,
        degrees_of_freedom: count - 1,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn chi_square(observed: &[u64], expected: f64) -> f64 {
    observed
        .iter()
        .map(|&o| {
            let diff = o as f64 - expected;
            diff * diff / expected
        })
        .sum()
}
