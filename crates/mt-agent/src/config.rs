//! Per-class physical configuration and the top-level traffic config.

use std::collections::HashMap;

use mt_core::{Archetype, BehaviorConfig, VehicleClass};

// ── ClassConfig ───────────────────────────────────────────────────────────────

/// Physical and behavioral defaults for one vehicle class.
///
/// All physical attributes are positive reals; speeds in km/h, dimensions in
/// metres, accelerations in m/s².
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassConfig {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,

    /// Archetype assigned when the caller does not request one.
    pub default_archetype: Archetype,

    /// Horn activations per minute before per-instance jitter.
    pub horn_usage_frequency: f64,
    /// Probability of complying with a traffic light, in [0, 1].
    pub traffic_light_compliance: f64,
    /// Respect for right-of-way conventions, in [0, 1].
    pub right_of_way_respect: f64,
}

// ── TrafficConfig ─────────────────────────────────────────────────────────────

/// The full configuration surface consumed by the factory.
///
/// Immutable for the session once constructed.  `mix_ratios` is an ordered
/// list (not a map) so the cumulative-probability table built from it is
/// deterministic; the weights need not be normalized.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficConfig {
    pub class_configs: HashMap<VehicleClass, ClassConfig>,
    pub mix_ratios: Vec<(VehicleClass, f64)>,
    pub behavior: BehaviorConfig,
}

impl TrafficConfig {
    /// Configuration entry for `class`, if present.
    pub fn class_config(&self, class: VehicleClass) -> Option<&ClassConfig> {
        self.class_configs.get(&class)
    }
}

impl Default for TrafficConfig {
    /// Default fleet calibration for dense mixed traffic.
    fn default() -> Self {
        let class_configs = HashMap::from([
            (VehicleClass::Car, ClassConfig {
                length: 4.0, width: 1.8, height: 1.5,
                max_speed: 120.0, acceleration: 3.0, deceleration: 8.0,
                default_archetype: Archetype::Normal,
                horn_usage_frequency: 2.0,
                traffic_light_compliance: 0.8,
                right_of_way_respect: 0.7,
            }),
            (VehicleClass::Motorcycle, ClassConfig {
                length: 2.0, width: 0.8, height: 1.2,
                max_speed: 100.0, acceleration: 4.0, deceleration: 6.0,
                default_archetype: Archetype::Aggressive,
                horn_usage_frequency: 3.0,
                traffic_light_compliance: 0.6,
                right_of_way_respect: 0.4,
            }),
            (VehicleClass::AutoRickshaw, ClassConfig {
                length: 2.8, width: 1.4, height: 1.8,
                max_speed: 60.0, acceleration: 2.0, deceleration: 5.0,
                default_archetype: Archetype::Erratic,
                horn_usage_frequency: 4.0,
                traffic_light_compliance: 0.5,
                right_of_way_respect: 0.3,
            }),
            (VehicleClass::Bus, ClassConfig {
                length: 12.0, width: 2.5, height: 3.0,
                max_speed: 80.0, acceleration: 1.5, deceleration: 6.0,
                default_archetype: Archetype::Normal,
                horn_usage_frequency: 1.5,
                traffic_light_compliance: 0.9,
                right_of_way_respect: 0.8,
            }),
            (VehicleClass::Truck, ClassConfig {
                length: 15.0, width: 2.5, height: 3.5,
                max_speed: 70.0, acceleration: 1.0, deceleration: 5.0,
                default_archetype: Archetype::Conservative,
                horn_usage_frequency: 1.0,
                traffic_light_compliance: 0.9,
                right_of_way_respect: 0.9,
            }),
            (VehicleClass::Bicycle, ClassConfig {
                length: 1.8, width: 0.6, height: 1.0,
                max_speed: 25.0, acceleration: 2.0, deceleration: 3.0,
                default_archetype: Archetype::Conservative,
                horn_usage_frequency: 0.1,
                traffic_light_compliance: 0.4,
                right_of_way_respect: 0.2,
            }),
        ]);

        let mix_ratios = vec![
            (VehicleClass::Car,          0.35),
            (VehicleClass::Motorcycle,   0.30),
            (VehicleClass::AutoRickshaw, 0.15),
            (VehicleClass::Bus,          0.10),
            (VehicleClass::Truck,        0.08),
            (VehicleClass::Bicycle,      0.02),
        ];

        Self {
            class_configs,
            mix_ratios,
            behavior: BehaviorConfig::default(),
        }
    }
}
