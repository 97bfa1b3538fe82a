//! The vehicle factory — the only component that creates agents.
//!
//! Id assignment is sequential per class (`CAR_000001`, `CAR_000002`, …,
//! `BUS_000001`, …) from counters owned by the factory instance.  Parameter
//! jitter is drawn from a per-vehicle RNG seeded by `(factory seed, id)`, so
//! a vehicle's parameters are reproducible regardless of how many other
//! vehicles were created first.

use std::collections::HashMap;

use mt_core::{
    Archetype, MtError, MtResult, Point3, SimRng, VehicleClass, VehicleId, VehicleRng,
};

use crate::{BehaviorParams, TrafficConfig, Vehicle};

// ── VehicleFactory ────────────────────────────────────────────────────────────

/// Creates [`Vehicle`] records from configuration plus per-instance
/// randomization.
pub struct VehicleFactory {
    config: TrafficConfig,
    seed: u64,
    /// Per-class serial counters.  Next id for a class is `counter + 1`.
    counters: HashMap<VehicleClass, u32>,
    /// Stream for class selection in `create_random`.
    mix_rng: SimRng,
}

impl VehicleFactory {
    pub fn new(config: TrafficConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            counters: HashMap::new(),
            mix_rng: SimRng::new(seed),
        }
    }

    pub fn with_defaults(seed: u64) -> Self {
        Self::new(TrafficConfig::default(), seed)
    }

    /// The active configuration (immutable for the session).
    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Create a vehicle of `class` at `position`.
    ///
    /// `archetype` defaults to the class's configured archetype.  Fails only
    /// when `class` has no configuration entry.
    pub fn create(
        &mut self,
        class: VehicleClass,
        position: Point3,
        archetype: Option<Archetype>,
        destination: Option<Point3>,
    ) -> MtResult<Vehicle> {
        let cfg = self
            .config
            .class_config(class)
            .ok_or(MtError::UnknownClass(class))?
            .clone();

        let archetype = archetype.unwrap_or(cfg.default_archetype);

        let serial = self.counters.entry(class).or_insert(0);
        *serial += 1;
        let id = VehicleId::new(class, *serial);

        let mut rng = VehicleRng::new(self.seed, id);
        let params =
            BehaviorParams::derive(&self.config.behavior, &cfg, class, archetype, &mut rng);

        Ok(Vehicle {
            id,
            class,
            archetype,
            length: cfg.length,
            width: cfg.width,
            height: cfg.height,
            max_speed: cfg.max_speed,
            acceleration: cfg.acceleration,
            deceleration: cfg.deceleration,
            position,
            heading: 0.0,
            current_speed: 0.0,
            destination,
            params,
            is_overtaking: false,
            time_since_last_horn: 0.0,
            emergency_braking: false,
        })
    }

    /// Create a vehicle whose class is drawn from the configured mix ratios.
    pub fn create_random(
        &mut self,
        position: Point3,
        destination: Option<Point3>,
    ) -> MtResult<Vehicle> {
        let class = self.select_random_class();
        self.create(class, position, None, destination)
    }

    /// Create up to `min(count, positions.len())` vehicles via
    /// [`create_random`](Self::create_random).
    ///
    /// Destinations beyond the end of `destinations` default to `None`.
    pub fn create_batch(
        &mut self,
        count: usize,
        positions: &[Point3],
        destinations: &[Option<Point3>],
    ) -> MtResult<Vec<Vehicle>> {
        let n = count.min(positions.len());
        let mut vehicles = Vec::with_capacity(n);
        for i in 0..n {
            let destination = destinations.get(i).copied().flatten();
            vehicles.push(self.create_random(positions[i], destination)?);
        }
        Ok(vehicles)
    }

    /// Re-derive the behavior parameters a vehicle of `(class, archetype)`
    /// with `id` would receive.  Useful for calibration inspection and tests.
    pub fn behavior_parameters(
        &self,
        class: VehicleClass,
        archetype: Archetype,
        id: VehicleId,
    ) -> MtResult<BehaviorParams> {
        let cfg = self
            .config
            .class_config(class)
            .ok_or(MtError::UnknownClass(class))?;
        let mut rng = VehicleRng::new(self.seed, id);
        Ok(BehaviorParams::derive(
            &self.config.behavior,
            cfg,
            class,
            archetype,
            &mut rng,
        ))
    }

    // ── Class selection ───────────────────────────────────────────────────

    /// Weighted draw over the configured mix ratios.
    ///
    /// Builds a cumulative table from the (possibly unnormalized) weights and
    /// selects the first class whose cumulative probability meets or exceeds
    /// a uniform draw in [0, 1).  Degenerate weights (sum ≤ 0) fall back to a
    /// uniform distribution; an empty mix falls back to `Car`.
    fn select_random_class(&mut self) -> VehicleClass {
        let mix = &self.config.mix_ratios;
        if mix.is_empty() {
            return VehicleClass::Car;
        }

        let total: f64 = mix.iter().map(|&(_, w)| w).sum();
        let uniform = 1.0 / mix.len() as f64;

        let draw: f64 = self.mix_rng.gen_range(0.0..1.0);
        let mut cumulative = 0.0;
        for &(class, weight) in mix {
            cumulative += if total > 0.0 { weight / total } else { uniform };
            if draw <= cumulative {
                return class;
            }
        }

        // Rounding can leave the final cumulative slightly below 1.0.
        mix[0].0
    }

    // ── Statistics & test hooks ───────────────────────────────────────────

    /// Totals created so far, by class.
    pub fn stats(&self) -> FactoryStats {
        let total = self.counters.values().map(|&c| c as usize).sum();
        FactoryStats {
            total_created: total,
            created_by_class: self.counters.clone(),
        }
    }

    /// Reset all serial counters and the class-selection stream.
    ///
    /// Ids issued after a reset repeat earlier serials, so this is only safe
    /// between independent simulation runs.
    pub fn reset(&mut self) {
        self.counters.clear();
        self.mix_rng = SimRng::new(self.seed);
    }
}

/// Snapshot of factory creation totals.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactoryStats {
    pub total_created: usize,
    pub created_by_class: HashMap<VehicleClass, u32>,
}
