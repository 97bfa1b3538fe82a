//! The `Vehicle` record — one registered traffic participant.

use mt_core::{Archetype, Point3, RoadQuality, SimRng, VehicleClass, VehicleId, Weather};

use crate::BehaviorParams;

/// A simulated traffic participant.
///
/// Constructed only by [`VehicleFactory`][crate::VehicleFactory]; the manager
/// receives vehicles via registration and mutates only kinematic state and
/// transient flags.  `id` is immutable and globally unique for the lifetime
/// of the simulation; `current_speed` is never negative.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,
    pub class: VehicleClass,
    pub archetype: Archetype,

    // ── Physical attributes (metres, km/h, m/s²) ──────────────────────────
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,

    // ── Kinematic state, updated by the external driver ───────────────────
    pub position: Point3,
    /// Heading in degrees.
    pub heading: f64,
    /// Current speed in km/h, ≥ 0.
    pub current_speed: f64,
    /// Optional destination; opaque to the engine.
    pub destination: Option<Point3>,

    // ── Behavior parameters, derived once at creation ─────────────────────
    pub params: BehaviorParams,

    // ── Transient flags ───────────────────────────────────────────────────
    pub is_overtaking: bool,
    /// Seconds since this vehicle last sounded its horn.
    pub time_since_last_horn: f64,
    pub emergency_braking: bool,
}

impl Vehicle {
    /// Replace the vehicle's position (driven externally every tick).
    #[inline]
    pub fn update_position(&mut self, position: Point3) {
        self.position = position;
    }

    /// Set the current speed, clamping negatives to zero.
    #[inline]
    pub fn update_speed(&mut self, speed_kmh: f64) {
        self.current_speed = speed_kmh.max(0.0);
    }

    /// Combined speed-adjustment factor for the given road and weather
    /// conditions.
    ///
    /// Two- and three-wheelers are penalized further in poor conditions
    /// (road ×0.9, weather ×0.8); heavy vehicles hold minimum factors of
    /// 0.6 (road) and 0.7 (weather).
    pub fn speed_adjustment(&self, road: RoadQuality, weather: Weather) -> f64 {
        let mut road_factor: f64 = match road {
            RoadQuality::Excellent => 1.0,
            RoadQuality::Good      => 0.9,
            RoadQuality::Poor      => 0.7,
            RoadQuality::VeryPoor  => 0.5,
        };
        let mut weather_factor: f64 = match weather {
            Weather::Clear     => 1.0,
            Weather::LightRain => 0.8,
            Weather::HeavyRain => 0.5,
            Weather::Fog       => 0.6,
            Weather::DustStorm => 0.4,
        };

        if self.class.is_light_weaver() {
            road_factor *= 0.9;
            weather_factor *= 0.8;
        } else if self.class.is_heavy() {
            road_factor = road_factor.max(0.6);
            weather_factor = weather_factor.max(0.7);
        }

        road_factor * weather_factor
    }

    /// Safe following distance in metres behind a leader at
    /// `leader_speed_kmh`.
    ///
    /// Two-second rule scaled by the vehicle's following-distance factor;
    /// motorcycles follow closer (×0.7), heavy vehicles farther (×1.3).
    /// Never less than 2 m.
    pub fn following_distance(&self, leader_speed_kmh: f64) -> f64 {
        let base = leader_speed_kmh * 2.0 / 3.6; // km/h → m over two seconds
        let mut distance = base * self.params.following_distance_factor;

        if self.class == VehicleClass::Motorcycle {
            distance *= 0.7;
        } else if self.class.is_heavy() {
            distance *= 1.3;
        }

        distance.max(2.0)
    }

    /// One horn draw for this tick.
    ///
    /// The per-minute frequency parameter converts to a per-second
    /// probability, boosted by local density and the vehicle's own
    /// overtaking aggressiveness; motorcycles and auto-rickshaws get a
    /// further ×1.5.
    pub fn should_use_horn(&self, traffic_density: f64, rng: &mut SimRng) -> bool {
        let per_second = self.params.horn_usage_frequency / 60.0;
        let mut p = per_second
            * (1.0 + traffic_density)
            * (1.0 + self.params.overtaking_aggressiveness);

        if self.class.is_light_weaver() {
            p *= 1.5;
        }

        rng.gen_bool(p)
    }
}
