//! Injected randomness capability
//!
//! Effect `create` calls are the only non-deterministic part of the engine.
//! They receive a `RandomSource` instead of reaching for an ambient RNG, so a
//! seeded source makes particle creation reproducible under test while
//! `thread_rng` serves production.

use rand::Rng;

/// Uniform randomness as consumed by effect creation
///
/// Object-safe so effects can take `&mut dyn RandomSource`. Blanket
/// implemented for every [`rand::Rng`], which covers `thread_rng()` and
/// `StdRng::seed_from_u64(..)`.
pub trait RandomSource {
    /// Uniform float in `[min, max)`. Returns `min` when the range is empty.
    fn uniform(&mut self, min: f32, max: f32) -> f32;

    /// Uniform index in `[0, len)`. `len` must be nonzero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            min
        } else {
            self.gen_range(min..max)
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty collection");
        if len <= 1 {
            0
        } else {
            self.gen_range(0..len)
        }
    }
}

/// Convenience operations over any `RandomSource`
pub trait RandomSourceExt: RandomSource {
    /// Uniform pick from a nonempty slice
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.pick_index(items.len())]
    }

    /// Uniform float in `[center - spread, center + spread)`
    fn jitter(&mut self, center: f32, spread: f32) -> f32 {
        self.uniform(center - spread, center + spread)
    }
}

impl<R: RandomSource + ?Sized> RandomSourceExt for R {}
