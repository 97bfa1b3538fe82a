//! Shared behavior calibration tables.
//!
//! Loaded (or defaulted) once at startup and treated as immutable for the
//! session.  Both the agent factory and the behavior model consume this
//! struct; the per-class *physical* configuration lives with the factory.
//!
//! Lookup misses degrade gracefully to documented defaults instead of
//! raising — the fallback constants below are part of the public contract so
//! tests can assert on them.

use std::collections::HashMap;

use crate::{Archetype, VehicleClass};

/// Base lane discipline assumed for a class with no table entry.
pub const DEFAULT_LANE_DISCIPLINE: f64 = 0.5;
/// Base overtaking aggressiveness assumed for a class with no table entry.
pub const DEFAULT_OVERTAKING: f64 = 0.5;
/// Following-distance multiplier assumed for an archetype with no entry.
pub const DEFAULT_FOLLOWING_FACTOR: f64 = 1.5;

/// Driver-behavior calibration, keyed by class and archetype.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorConfig {
    /// Base lane discipline per class, in [0, 1].
    pub lane_discipline_by_class: HashMap<VehicleClass, f64>,
    /// Base overtaking aggressiveness per class, in [0, 1].
    pub overtaking_by_class: HashMap<VehicleClass, f64>,
    /// Following-distance multiplier per archetype (≥ 0.5 after derivation).
    pub following_distance_by_archetype: HashMap<Archetype, f64>,
}

impl BehaviorConfig {
    /// Base lane discipline for `class`, or [`DEFAULT_LANE_DISCIPLINE`].
    pub fn lane_discipline(&self, class: VehicleClass) -> f64 {
        self.lane_discipline_by_class
            .get(&class)
            .copied()
            .unwrap_or(DEFAULT_LANE_DISCIPLINE)
    }

    /// Base overtaking aggressiveness for `class`, or [`DEFAULT_OVERTAKING`].
    pub fn overtaking(&self, class: VehicleClass) -> f64 {
        self.overtaking_by_class
            .get(&class)
            .copied()
            .unwrap_or(DEFAULT_OVERTAKING)
    }

    /// Following-distance multiplier for `archetype`, or
    /// [`DEFAULT_FOLLOWING_FACTOR`].
    pub fn following_distance(&self, archetype: Archetype) -> f64 {
        self.following_distance_by_archetype
            .get(&archetype)
            .copied()
            .unwrap_or(DEFAULT_FOLLOWING_FACTOR)
    }
}

impl Default for BehaviorConfig {
    /// Calibration from observed mixed-traffic studies.
    fn default() -> Self {
        let lane_discipline_by_class = HashMap::from([
            (VehicleClass::Car,          0.7),
            (VehicleClass::Bus,          0.5),
            (VehicleClass::AutoRickshaw, 0.3),
            (VehicleClass::Motorcycle,   0.2),
            (VehicleClass::Truck,        0.8),
            (VehicleClass::Bicycle,      0.1),
        ]);
        let overtaking_by_class = HashMap::from([
            (VehicleClass::Car,          0.6),
            (VehicleClass::Bus,          0.4),
            (VehicleClass::AutoRickshaw, 0.8),
            (VehicleClass::Motorcycle,   0.9),
            (VehicleClass::Truck,        0.3),
            (VehicleClass::Bicycle,      0.2),
        ]);
        let following_distance_by_archetype = HashMap::from([
            (Archetype::Conservative, 2.0),
            (Archetype::Normal,       1.5),
            (Archetype::Aggressive,   1.0),
            (Archetype::Erratic,      0.8),
        ]);
        Self {
            lane_discipline_by_class,
            overtaking_by_class,
            following_distance_by_archetype,
        }
    }
}
