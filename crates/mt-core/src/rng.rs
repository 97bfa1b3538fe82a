//! Seedable RNG wrappers — all randomness in the engine flows through here.
//!
//! Two streams exist, and nothing else in the workspace touches `rand`
//! directly.  `SimRng` is the engine stream: overtaking draws, weaving and
//! horn triggers, reason sampling.  `VehicleRng` is derived per vehicle for
//! creation-time parameter jitter, seeded as
//!
//!   global_seed ^ id.seed_key().wrapping_mul(MIXING_CONSTANT)
//!
//! so a vehicle's parameters are a function of `(global_seed, id)` alone:
//! registering or removing other vehicles cannot shift them, and a fixed
//! seed replays identical ticks as long as the driver replays the same
//! registration and position sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VehicleId;

/// Golden-ratio increment (2⁶⁴/φ); decorrelates nearby seed keys.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// The engine stream for shared stochastic decisions (overtaking draws,
/// weaving triggers, horn triggers, reason sampling).
///
/// The tick pipeline consumes it in registry order, which is what makes
/// ticks reproducible; anything that wants randomness outside that order
/// should take a [`child`](SimRng::child) stream instead.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off an independent stream keyed by `offset`.  Draws from the
    /// child never affect the parent's sequence.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform draw over `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Bernoulli draw.  `p` outside [0, 1] is clamped rather than a panic,
    /// since callers hand in computed probabilities.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform pick from a slice; `None` when empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── VehicleRng ────────────────────────────────────────────────────────────────

/// Per-vehicle jitter stream, alive only during parameter derivation.
///
/// The factory builds one from `(its seed, the new id)`, draws the handful
/// of jitter values, and drops it; `behavior_parameters` rebuilds the same
/// stream to reproduce a vehicle's derivation after the fact.
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    pub fn new(global_seed: u64, id: VehicleId) -> Self {
        let seed = global_seed ^ id.seed_key().wrapping_mul(MIXING_CONSTANT);
        VehicleRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
