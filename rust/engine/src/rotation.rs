use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Smallest rotation added by one spin (five full turns).
pub const MIN_SPIN_DEGREES: f64 = 1800.0;
/// Exclusive upper bound of a spin's added rotation (ten full turns).
pub const MAX_SPIN_DEGREES: f64 = 3600.0;

/// Supplies the rotation each spin adds to the wheel.
///
/// Implementations must return values in `[MIN_SPIN_DEGREES, MAX_SPIN_DEGREES)`.
pub trait RotationSource {
    fn next_delta(&mut self) -> f64;
}

/// Uniform deltas drawn from a seeded ChaCha20 stream.
#[derive(Debug, Clone)]
pub struct SeededRotation {
    rng: ChaCha20Rng,
    seed: u64,
}

impl SeededRotation {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from the thread RNG; the chosen seed is kept for replay.
    pub fn from_entropy() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RotationSource for SeededRotation {
    fn next_delta(&mut self) -> f64 {
        self.rng.random_range(MIN_SPIN_DEGREES..MAX_SPIN_DEGREES)
    }
}

/// Replays a fixed list of deltas, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedRotation {
    deltas: Vec<f64>,
    position: usize,
}

impl FixedRotation {
    /// Out-of-range values are clamped into the valid spin range.
    pub fn new(deltas: impl IntoIterator<Item = f64>) -> Self {
        let deltas: Vec<f64> = deltas
            .into_iter()
            .map(|d| d.clamp(MIN_SPIN_DEGREES, MAX_SPIN_DEGREES - f64::EPSILON * MAX_SPIN_DEGREES))
            .collect();
        Self {
            deltas,
            position: 0,
        }
    }
}

impl RotationSource for FixedRotation {
    fn next_delta(&mut self) -> f64 {
        if self.deltas.is_empty() {
            return MIN_SPIN_DEGREES;
        }
        let d = self.deltas[self.position % self.deltas.len()];
        self.position += 1;
        d
    }
}
