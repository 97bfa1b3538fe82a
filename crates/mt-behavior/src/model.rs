//! The `BehaviorModel` — six calibrated computation entry points.

use mt_core::{
    BehaviorConfig, IntersectionType, LaneDiscipline, RoadQuality, SimRng, VehicleClass, Weather,
};

use crate::types::{
    IntersectionBehavior, LaneDisciplineResult, OvertakeDecision, RoadConditions,
    TrafficConditions, TrafficState,
};

/// Speed gap (km/h) at or below which overtaking is never attempted.
pub const MIN_OVERTAKE_SPEED_GAP: f64 = 5.0;

/// Descending lane-discipline thresholds.  The first level whose threshold
/// the computed factor meets or exceeds is assigned; anything below 0.4 is
/// chaotic.
const DISCIPLINE_THRESHOLDS: [(LaneDiscipline, f64); 4] = [
    (LaneDiscipline::Strict,   0.8),
    (LaneDiscipline::Moderate, 0.6),
    (LaneDiscipline::Loose,    0.4),
    (LaneDiscipline::Chaotic,  0.0),
];

// ── BehaviorModel ─────────────────────────────────────────────────────────────

/// Stateless behavior computations over calibration tables.
///
/// Holds no per-vehicle state; randomness (only the overtaking draw) is
/// injected by the caller so ticks stay reproducible.
pub struct BehaviorModel {
    config: BehaviorConfig,
}

impl Default for BehaviorModel {
    fn default() -> Self {
        Self::new(BehaviorConfig::default())
    }
}

impl BehaviorModel {
    pub fn new(config: BehaviorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    // ── Lane discipline ───────────────────────────────────────────────────

    /// Compute a discipline factor for `(class, road)` and map it to a
    /// discrete level plus dependent metrics.
    ///
    /// Composition order: class base × road-quality multiplier × lane-count
    /// penalty × width adjustment × density penalty × class correction.
    pub fn calculate_lane_discipline(
        &self,
        class: VehicleClass,
        road: &RoadConditions,
    ) -> LaneDisciplineResult {
        let base = self.config.lane_discipline(class);

        let quality = match road.quality {
            RoadQuality::Excellent => 1.2,
            RoadQuality::Good      => 1.0,
            RoadQuality::Poor      => 0.8,
            RoadQuality::VeryPoor  => 0.6,
        };
        let mut factor = base * quality;

        // More lanes erode discipline.
        if road.lane_count > 2 {
            factor *= 0.9_f64.powi(road.lane_count as i32 - 2);
        }

        // Narrow roads force encroachment; generous width helps slightly.
        if road.road_width < 6.0 {
            factor *= 0.8;
        } else if road.road_width > 10.0 {
            factor *= 1.1;
        }

        factor *= 1.0 - 0.3 * road.traffic_density;

        factor *= match class {
            VehicleClass::Motorcycle   => 0.7,
            VehicleClass::AutoRickshaw => 0.6,
            VehicleClass::Bus | VehicleClass::Truck => 1.2,
            _ => 1.0,
        };

        let level = DISCIPLINE_THRESHOLDS
            .iter()
            .find(|&&(_, threshold)| factor >= threshold)
            .map(|&(level, _)| level)
            .unwrap_or(LaneDiscipline::Chaotic);

        LaneDisciplineResult {
            level,
            factor,
            lane_change_probability: self.lane_change_probability(factor, road.traffic_density),
            lateral_deviation: self.lateral_deviation(factor, class),
            speed_variance: self.speed_variance(factor, class),
        }
    }

    /// Expected lane changes per minute — rises as discipline falls and
    /// density climbs.
    fn lane_change_probability(&self, factor: f64, density: f64) -> f64 {
        2.0 * (1.0 - factor) * (1.0 + density)
    }

    /// Metres of drift from lane centre.
    fn lateral_deviation(&self, factor: f64, class: VehicleClass) -> f64 {
        let base = 0.5 * (1.0 - factor);
        base * match class {
            VehicleClass::Motorcycle   => 1.5,
            VehicleClass::AutoRickshaw => 1.3,
            VehicleClass::Bus | VehicleClass::Truck => 0.8,
            _ => 1.0,
        }
    }

    /// Coefficient of variation in speed.
    fn speed_variance(&self, factor: f64, class: VehicleClass) -> f64 {
        let base = 0.2 * (1.0 - factor);
        base * match class {
            VehicleClass::Motorcycle | VehicleClass::AutoRickshaw => 1.4,
            VehicleClass::Bus | VehicleClass::Truck => 0.7,
            _ => 1.0,
        }
    }

    // ── Overtaking ────────────────────────────────────────────────────────

    /// Probability of attempting an overtake, in [0, 1].
    ///
    /// Class aggressiveness × density headroom × per-class tendency
    /// (unknown classes ×1.0), clamped.
    pub fn determine_overtaking_probability(&self, class: VehicleClass, density: f64) -> f64 {
        let base = self.config.overtaking(class);
        let density_factor = (1.0 - density).max(0.1);
        let class_factor = match class {
            VehicleClass::Motorcycle   => 1.5,
            VehicleClass::AutoRickshaw => 1.3,
            VehicleClass::Car          => 1.0,
            VehicleClass::Bus          => 0.7,
            VehicleClass::Truck        => 0.5,
            VehicleClass::Bicycle      => 0.3,
            _ => 1.0,
        };
        (base * density_factor * class_factor).clamp(0.0, 1.0)
    }

    /// Full overtaking decision: a single Bernoulli draw against the
    /// computed probability, with maneuver quantities only on success.
    ///
    /// A desired-vs-leader gap of at most [`MIN_OVERTAKE_SPEED_GAP`] km/h
    /// short-circuits to a declined decision with zero confidence.
    pub fn determine_overtaking_behavior(
        &self,
        class: VehicleClass,
        state: &TrafficState,
        leader_speed: f64,
        desired_speed: f64,
        rng: &mut SimRng,
    ) -> OvertakeDecision {
        let speed_diff = desired_speed - leader_speed;
        if speed_diff <= MIN_OVERTAKE_SPEED_GAP {
            return OvertakeDecision::declined(0.0);
        }

        let base = self.determine_overtaking_probability(class, state.density);
        let speed_factor = (speed_diff / 20.0).min(2.0);
        let congestion_penalty = state.congestion_level * 0.5;
        let probability = (base * speed_factor * (1.0 - congestion_penalty)).clamp(0.0, 1.0);

        if !rng.gen_bool(probability) {
            return OvertakeDecision::declined(probability);
        }

        OvertakeDecision {
            should_overtake: true,
            confidence: probability,
            required_gap: self.required_overtaking_gap(class, speed_diff),
            risk_level: self.overtaking_risk(class, state, speed_diff),
            estimated_time_savings: Self::overtaking_time_savings(speed_diff, state.density),
        }
    }

    /// Seconds of clear gap needed, scaled up with the speed differential.
    /// Unknown classes use the 3.0 s car baseline.
    fn required_overtaking_gap(&self, class: VehicleClass, speed_diff: f64) -> f64 {
        let base_gap = match class {
            VehicleClass::Motorcycle   => 2.0,
            VehicleClass::AutoRickshaw => 2.5,
            VehicleClass::Car          => 3.0,
            VehicleClass::Bus          => 4.0,
            VehicleClass::Truck        => 5.0,
            VehicleClass::Bicycle      => 1.5,
            _ => 3.0,
        };
        base_gap * (1.0 + speed_diff / 50.0)
    }

    /// Weighted density/congestion/speed risk, scaled by the class's risk
    /// perception (unknown classes ×1.0), clamped to [0, 1].
    fn overtaking_risk(&self, class: VehicleClass, state: &TrafficState, speed_diff: f64) -> f64 {
        let density_risk = state.density * 0.4;
        let congestion_risk = state.congestion_level * 0.3;
        let speed_risk = (speed_diff / 100.0).min(0.3);

        let class_factor = match class {
            VehicleClass::Motorcycle   => 0.8,
            VehicleClass::AutoRickshaw => 0.9,
            VehicleClass::Car          => 1.0,
            VehicleClass::Bus          => 1.3,
            VehicleClass::Truck        => 1.5,
            VehicleClass::Bicycle      => 0.6,
            _ => 1.0,
        };

        ((density_risk + congestion_risk + speed_risk) * class_factor).clamp(0.0, 1.0)
    }

    /// Seconds saved by completing the overtake, floored at zero.
    fn overtaking_time_savings(speed_diff: f64, density: f64) -> f64 {
        (speed_diff * 0.1 * (1.0 - density * 0.5)).max(0.0)
    }

    // ── Intersections ─────────────────────────────────────────────────────

    /// Behavior bundle at an intersection of the given type.
    ///
    /// Classes without an adjustment row (bicycles, future classes) use the
    /// car row; intersection types without a calibrated base row (four-way
    /// stops) use the defaults {stopping 0.7, gap 3.0 s, horn 0.5}.
    pub fn model_intersection_behavior(
        &self,
        class: VehicleClass,
        intersection: IntersectionType,
    ) -> IntersectionBehavior {
        // (stopping probability, gap acceptance seconds, horn usage)
        let (base_stopping, base_gap, base_horn) = match intersection {
            IntersectionType::Signalized   => (0.8, 3.0, 0.5),
            IntersectionType::Roundabout   => (0.7, 3.0, 0.5),
            IntersectionType::TJunction    => (0.7, 2.5, 0.8),
            IntersectionType::Uncontrolled => (0.7, 2.0, 0.9),
            IntersectionType::FourWayStop  => (0.7, 3.0, 0.5),
        };

        // (aggressiveness multiplier, gap reduction, horn increase)
        let (aggressiveness, gap_reduction, horn_increase) = match class {
            VehicleClass::Motorcycle   => (1.4, 0.7, 1.5),
            VehicleClass::AutoRickshaw => (1.3, 0.8, 1.8),
            VehicleClass::Car          => (1.0, 1.0, 1.0),
            VehicleClass::Bus          => (0.8, 1.2, 0.8),
            VehicleClass::Truck        => (0.7, 1.3, 0.6),
            // Car row fallback.
            _ => (1.0, 1.0, 1.0),
        };

        let mut stopping_probability = base_stopping;
        if class.is_light_weaver() {
            // More likely to run a yellow or fresh red.
            stopping_probability *= 0.8;
        }

        IntersectionBehavior {
            approach_speed_factor: 0.8 * aggressiveness,
            stopping_probability,
            right_turn_aggressiveness: 0.6 * aggressiveness,
            gap_acceptance_threshold: base_gap * gap_reduction,
            horn_usage_probability: base_horn * horn_increase,
        }
    }

    // ── Stress ────────────────────────────────────────────────────────────

    /// Driver stress in [0, 1]: weighted sum of base, density, speed
    /// frustration, and weather stress, divided by the class's stress
    /// tolerance (unknown classes ÷1.0).
    pub fn calculate_stress_level(
        &self,
        class: VehicleClass,
        conditions: &TrafficConditions,
    ) -> f64 {
        let base_stress = 0.3;
        let density_stress = conditions.density * 0.4;

        let speed_ratio = conditions.current_speed / conditions.desired_speed.max(1.0);
        let speed_stress = ((1.0 - speed_ratio) * 0.3).max(0.0);

        let weather_stress = match conditions.weather {
            Weather::Clear     => 0.0,
            Weather::LightRain => 0.1,
            Weather::HeavyRain => 0.3,
            Weather::Fog       => 0.25,
            Weather::DustStorm => 0.35,
        };

        let tolerance = match class {
            VehicleClass::Motorcycle   => 0.8,
            VehicleClass::AutoRickshaw => 0.7,
            VehicleClass::Car          => 1.0,
            VehicleClass::Bus          => 1.2,
            VehicleClass::Truck        => 1.1,
            VehicleClass::Bicycle      => 0.6,
            _ => 1.0,
        };

        let total = (base_stress + density_stress + speed_stress + weather_stress) / tolerance;
        total.clamp(0.0, 1.0)
    }
}
