//! Per-instance behavior parameters and their derivation.
//!
//! Each parameter is derived exactly once at creation time as
//!
//!   base value × archetype modifier × ±20 % uniform jitter
//!
//! then clamped into its valid range.  Parameters are never recomputed
//! afterwards except by an explicit factory re-derivation.

use mt_core::{Archetype, BehaviorConfig, VehicleClass, VehicleRng};

use crate::ClassConfig;

/// Floor for the following-distance multiplier (no ceiling).
pub const FOLLOWING_DISTANCE_FLOOR: f64 = 0.5;
/// Floor for horn activations per minute.
pub const HORN_FREQUENCY_FLOOR: f64 = 0.1;

// ── BehaviorParams ────────────────────────────────────────────────────────────

/// The eight behavioral scalars owned by one vehicle.
///
/// All values are in [0, 1] except `following_distance_factor` (multiplier,
/// ≥ 0.5) and `horn_usage_frequency` (activations per minute, ≥ 0.1).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorParams {
    pub lane_discipline_factor: f64,
    pub overtaking_aggressiveness: f64,
    pub following_distance_factor: f64,
    pub speed_compliance: f64,
    pub horn_usage_frequency: f64,
    pub traffic_light_compliance: f64,
    pub right_of_way_respect: f64,
    pub risk_tolerance: f64,
}

impl Default for BehaviorParams {
    /// Mid-range parameters used before factory derivation.
    fn default() -> Self {
        Self {
            lane_discipline_factor: 0.5,
            overtaking_aggressiveness: 0.5,
            following_distance_factor: 1.5,
            speed_compliance: 0.8,
            horn_usage_frequency: 2.0,
            traffic_light_compliance: 0.8,
            right_of_way_respect: 0.7,
            risk_tolerance: 0.5,
        }
    }
}

// ── Archetype modifiers ───────────────────────────────────────────────────────

/// The five multipliers one archetype applies to its base parameters.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ArchetypeModifiers {
    pub lane_discipline: f64,
    pub overtaking: f64,
    pub following_distance: f64,
    pub speed_compliance: f64,
    pub risk_tolerance: f64,
}

impl ArchetypeModifiers {
    /// Fixed modifier set per archetype.
    pub(crate) fn of(archetype: Archetype) -> ArchetypeModifiers {
        match archetype {
            Archetype::Conservative => ArchetypeModifiers {
                lane_discipline:    1.2,
                overtaking:         0.6,
                following_distance: 1.3,
                speed_compliance:   1.1,
                risk_tolerance:     0.7,
            },
            Archetype::Normal => ArchetypeModifiers {
                lane_discipline:    1.0,
                overtaking:         1.0,
                following_distance: 1.0,
                speed_compliance:   1.0,
                risk_tolerance:     1.0,
            },
            Archetype::Aggressive => ArchetypeModifiers {
                lane_discipline:    0.8,
                overtaking:         1.4,
                following_distance: 0.8,
                speed_compliance:   0.9,
                risk_tolerance:     1.3,
            },
            Archetype::Erratic => ArchetypeModifiers {
                lane_discipline:    0.6,
                overtaking:         1.2,
                following_distance: 0.9,
                speed_compliance:   0.7,
                risk_tolerance:     1.5,
            },
        }
    }
}

// ── Derivation ────────────────────────────────────────────────────────────────

/// Apply ±20 % jitter and clamp to [0, 1].
fn jitter_unit(value: f64, rng: &mut VehicleRng) -> f64 {
    let factor = 1.0 + rng.gen_range(-0.2..=0.2);
    (value * factor).clamp(0.0, 1.0)
}

impl BehaviorParams {
    /// Derive the full parameter set for `(class config, archetype)` from the
    /// calibration bases, the archetype modifiers, and per-vehicle jitter.
    ///
    /// `rng` must be the vehicle's own seeded stream so derivation is
    /// reproducible per id regardless of creation order.
    pub fn derive(
        behavior:  &BehaviorConfig,
        class_cfg: &ClassConfig,
        class:     VehicleClass,
        archetype: Archetype,
        rng:       &mut VehicleRng,
    ) -> BehaviorParams {
        let m = ArchetypeModifiers::of(archetype);

        let base_lane_discipline = behavior.lane_discipline(class);
        let base_overtaking      = behavior.overtaking(class);
        let base_following       = behavior.following_distance(archetype);

        BehaviorParams {
            lane_discipline_factor:
                jitter_unit(base_lane_discipline * m.lane_discipline, rng),
            overtaking_aggressiveness:
                jitter_unit(base_overtaking * m.overtaking, rng),
            following_distance_factor:
                (base_following * m.following_distance * rng.gen_range(0.8..=1.2))
                    .max(FOLLOWING_DISTANCE_FLOOR),
            speed_compliance:
                jitter_unit(0.8 * m.speed_compliance, rng),
            horn_usage_frequency:
                (class_cfg.horn_usage_frequency * rng.gen_range(0.5..=1.5))
                    .max(HORN_FREQUENCY_FLOOR),
            traffic_light_compliance:
                jitter_unit(class_cfg.traffic_light_compliance, rng),
            right_of_way_respect:
                jitter_unit(class_cfg.right_of_way_respect, rng),
            risk_tolerance:
                jitter_unit(0.5 * m.risk_tolerance, rng),
        }
    }
}
