//! Random draws used by the expression generator
//!
//! Every random decision the generator makes goes through [`RandomSource`],
//! so tests can swap the thread RNG for a seeded or fully scripted source.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniform draws for the generator
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let scaled = (self.next_unit() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }

    /// `true` with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}

/// Adapter from any `rand` RNG
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for `--seed` sessions and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Seeded source when a seed is given, thread RNG otherwise
pub fn boxed_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::thread()),
    }
}

/// Replays a fixed list of unit draws, wrapping around at the end.
///
/// An empty script always yields 0.0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.position % self.draws.len()];
        self.position += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_source_replays_and_wraps() {
        let mut source = ScriptedSource::new(vec![0.1, 0.9]);
        assert_eq!(source.next_unit(), 0.1);
        assert_eq!(source.next_unit(), 0.9);
        assert_eq!(source.next_unit(), 0.1);
        assert_eq!(source.consumed(), 3);
    }

    #[test]
    fn test_scripted_source_empty_yields_zero() {
        let mut source = ScriptedSource::default();
        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(source.next_index(9), 0);
    }

    #[test]
    fn test_next_index_scales_unit_draw() {
        let mut source = ScriptedSource::new(vec![0.0, 0.5, 0.999]);
        assert_eq!(source.next_index(9), 0);
        assert_eq!(source.next_index(9), 4);
        assert_eq!(source.next_index(9), 8);
    }

    #[test]
    fn test_chance_threshold() {
        let mut source = ScriptedSource::new(vec![0.2, 0.3]);
        assert!(source.chance(0.25));
        assert!(!source.chance(0.25));
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        for _ in 0..20 {
            assert_eq!(a.next_index(9), b.next_index(9));
        }
    }

    #[test]
    fn test_boxed_source_forwards_draws() {
        let mut boxed: Box<dyn RandomSource> = Box::new(ScriptedSource::new(vec![0.5]));
        assert_eq!(boxed.next_index(4), 2);
        assert!(!boxed.chance(0.25));
    }

    #[test]
    fn test_boxed_source_seeded_is_reproducible() {
        let mut a = boxed_source(Some(99));
        let mut b = boxed_source(Some(99));
        assert_eq!(a.next_unit(), b.next_unit());
    }

    #[test]
    fn test_rng_source_stays_in_range() {
        let mut source = RngSource::thread();
        for _ in 0..200 {
            let unit = source.next_unit();
            assert!((0.0..1.0).contains(&unit));
            assert!(source.next_index(3) < 3);
        }
    }
}
