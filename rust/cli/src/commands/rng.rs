//! Rotation source inspection.
//!
//! The `rng` command prints the first few deltas the seeded ChaCha20 rotation
//! source produces, so a seed can be checked for determinism by eye.

use crate::error::CliError;
use namewheel_engine::rotation::{RotationSource, SeededRotation};
use std::io::Write;

const SAMPLE_SIZE: usize = 5;

pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut source = SeededRotation::new_with_seed(seed);
    let deltas: Vec<String> = (0..SAMPLE_SIZE)
        .map(|_| format!("{:.3}", source.next_delta()))
        .collect();
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Rotation deltas: [{}]", deltas.join(", "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_prints_same_deltas() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        handle_rng_command(Some(42), &mut first).expect("rng");
        handle_rng_command(Some(42), &mut second).expect("rng");
        assert_eq!(first, second);
    }

    #[test]
    fn prints_five_deltas_in_range() {
        let mut out = Vec::new();
        handle_rng_command(Some(7), &mut out).expect("rng");
        let output = String::from_utf8(out).expect("utf8");
        let line = output
            .lines()
            .find(|l| l.starts_with("Rotation deltas"))
            .expect("deltas line");
        let values: Vec<f64> = line
            .trim_start_matches("Rotation deltas: [")
            .trim_end_matches(']')
            .split(", ")
            .map(|v| v.parse().expect("number"))
            .collect();
        assert_eq!(values.len(), SAMPLE_SIZE);
        assert!(values.iter().all(|v| (1800.0..=3600.0).contains(v)));
    }
}
