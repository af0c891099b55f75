//! C1: the single seeded random source threaded through every simulation
//! stage.
//!
//! Owned by the pipeline driver and passed by `&mut` to each stage
//! constructor — never a process global, so draw order stays auditable and
//! runs stay byte-identical for a fixed seed.

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};
use rand_distr::{Distribution, Normal};

pub struct Rng {
    inner: StdRng,
}

impl Rng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: StdRng::seed_from_u64(seed) }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn rand(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform draw in `[lo, hi)`.
    pub fn rand_range(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..hi)
    }

    /// Uniform integer draw in `[lo, hi]` inclusive.
    pub fn rand_int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..=hi)
    }

    /// A sample from `Normal(mean, std)`. Falls back to `mean` if `std` is
    /// non-positive (degenerate distribution).
    pub fn gauss(&mut self, mean: f64, std: f64) -> f64 {
        if std <= 0.0 {
            return mean;
        }
        Normal::new(mean, std)
            .map(|n| n.sample(&mut self.inner))
            .unwrap_or(mean)
    }

    /// `true` with probability `p`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.inner.gen::<f64>() < p
    }

    /// A Poisson(lambda) draw via Knuth's algorithm (lambda is small here —
    /// weekly message counts — so this is adequately fast and exact).
    pub fn poisson(&mut self, lambda: f64) -> u32 {
        if lambda <= 0.0 {
            return 0;
        }
        let l = (-lambda).exp();
        let mut k = 0u32;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.inner.gen::<f64>();
            if p <= l {
                return k - 1;
            }
        }
    }
}
