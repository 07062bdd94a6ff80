//! Sources of uniform samples in `[0, 1)` for the draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that yields uniform samples in `[0, 1)`
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// Production source backed by `StdRng`
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream, used by statistical tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
/// An empty list always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Uniform index into a list of `len` items; `None` for an empty list
pub fn pick_uniform_index(len: usize, sample: f64) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let idx = (sample * len as f64).floor();
    if idx.is_nan() || idx < 0.0 {
        return Some(0);
    }
    Some((idx as usize).min(len - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_random_stays_in_unit_interval() {
        let mut rng = StdRandom::seeded(7);
        for _ in 0..10_000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_sequence_wraps_around() {
        let mut rng = SequenceRandom::new(vec![0.1, 0.2]);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.2);
        assert_eq!(rng.next_unit(), 0.1);
    }

    #[test]
    fn test_uniform_index_bounds() {
        assert_eq!(pick_uniform_index(0, 0.5), None);
        assert_eq!(pick_uniform_index(4, 0.0), Some(0));
        assert_eq!(pick_uniform_index(4, 0.99), Some(3));
        assert_eq!(pick_uniform_index(4, 1.0), Some(3));
    }
}
