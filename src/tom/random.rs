//! Random sources for dice rolls
//!
//! Everything that rolls dice takes a `&mut impl RandomSource`, so tests can pin results with
//! [`FixedRandom`] or a closure while the binary uses [`ThreadRandom`] or [`SeededRandom`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces an integer in the inclusive range `min..=max`
///
/// Callers guarantee `min <= max`.
pub trait RandomSource {
    fn roll(&mut self, min: i64, max: i64) -> i64;
}

impl<F> RandomSource for F
where
    F: FnMut(i64, i64) -> i64,
{
    fn roll(&mut self, min: i64, max: i64) -> i64 {
        self(min, max)
    }
}

/// Always yields the same value, clamped into the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub i64);

impl RandomSource for FixedRandom {
    fn roll(&mut self, min: i64, max: i64) -> i64 {
        self.0.clamp(min, max)
    }
}

/// Deterministic generator for reproducible runs
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }
}

/// The thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn roll(&mut self, min: i64, max: i64) -> i64 {
        rand::thread_rng().gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clamps() {
        let mut random = FixedRandom(9);
        assert_eq!(random.roll(1, 6), 6);
        assert_eq!(random.roll(10, 20), 10);
        assert_eq!(random.roll(1, 20), 9);
    }

    #[test]
    fn test_closure_source() {
        let mut calls = Vec::new();
        let mut random = |min: i64, max: i64| {
            calls.push((min, max));
            max
        };
        assert_eq!(random.roll(2, 5), 5);
        drop(random);
        assert_eq!(calls, vec![(2, 5)]);
    }

    #[test]
    fn test_seeded_is_reproducible_and_in_range() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..100 {
            let x = a.roll(-3, 3);
            assert_eq!(x, b.roll(-3, 3));
            assert!((-3..=3).contains(&x));
        }
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(ThreadRandom.roll(4, 4), 4);
    }
}
