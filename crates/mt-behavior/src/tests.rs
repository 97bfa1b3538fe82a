//! Unit tests for the behavior model.

use std::collections::BTreeMap;

use mt_core::{
    BehaviorConfig, IntersectionType, LaneDiscipline, RoadQuality, SimRng, VehicleClass, Weather,
};

use crate::types::{RoadConditions, TrafficConditions, TrafficState};
use crate::weather::{WeatherCategory, WeatherEffects, apply_weather_effects};
use crate::BehaviorModel;

fn model() -> BehaviorModel {
    BehaviorModel::default()
}

fn calm_state() -> TrafficState {
    TrafficState {
        density: 0.0,
        average_speed: 40.0,
        congestion_level: 0.0,
        lane_count: 2,
        road_width: 7.0,
    }
}

/// Config where the car base discipline is an exact chosen value, so the
/// composed factor can be pinned at threshold boundaries.
fn config_with_car_discipline(base: f64) -> BehaviorConfig {
    let mut config = BehaviorConfig::default();
    config.lane_discipline_by_class.insert(VehicleClass::Car, base);
    config
}

/// Road conditions that compose to a ×1.0 multiplier chain for cars.
fn neutral_road() -> RoadConditions {
    RoadConditions {
        quality: RoadQuality::Good,
        lane_count: 2,
        road_width: 7.0,
        traffic_density: 0.0,
    }
}

// ── Lane discipline ───────────────────────────────────────────────────────────

#[cfg(test)]
mod lane_discipline {
    use super::*;

    #[test]
    fn threshold_boundaries_are_inclusive() {
        for (base, expected) in [
            (0.8, LaneDiscipline::Strict),
            (0.6, LaneDiscipline::Moderate),
            (0.4, LaneDiscipline::Loose),
            (0.39, LaneDiscipline::Chaotic),
        ] {
            let m = BehaviorModel::new(config_with_car_discipline(base));
            let result = m.calculate_lane_discipline(VehicleClass::Car, &neutral_road());
            assert_eq!(result.level, expected, "base {base}");
        }
    }

    #[test]
    fn level_assignment_is_monotone_in_factor() {
        let mut last_level = LaneDiscipline::Chaotic;
        for i in 0..=100 {
            let base = i as f64 / 100.0;
            let m = BehaviorModel::new(config_with_car_discipline(base));
            let result = m.calculate_lane_discipline(VehicleClass::Car, &neutral_road());
            assert!(result.level >= last_level, "level dropped at base {base}");
            last_level = result.level;
        }
    }

    #[test]
    fn extra_lanes_and_density_erode_discipline() {
        let m = model();
        let narrow = m.calculate_lane_discipline(VehicleClass::Car, &neutral_road());
        let wide = m.calculate_lane_discipline(
            VehicleClass::Car,
            &RoadConditions { lane_count: 5, traffic_density: 0.9, ..neutral_road() },
        );
        assert!(wide.factor < narrow.factor);
        assert!(wide.level <= narrow.level);
    }

    #[test]
    fn rickshaws_rank_below_trucks() {
        let m = model();
        let road = RoadConditions::default();
        let rickshaw = m.calculate_lane_discipline(VehicleClass::AutoRickshaw, &road);
        let truck = m.calculate_lane_discipline(VehicleClass::Truck, &road);
        assert!(rickshaw.factor < truck.factor);
    }

    #[test]
    fn derived_metrics_follow_the_factor() {
        let m = model();
        let loose = m.calculate_lane_discipline(
            VehicleClass::Motorcycle,
            &RoadConditions { traffic_density: 0.9, ..RoadConditions::default() },
        );
        let tight = m.calculate_lane_discipline(VehicleClass::Truck, &neutral_road());
        assert!(loose.lane_change_probability > tight.lane_change_probability);
        assert!(loose.lateral_deviation > tight.lateral_deviation);
        assert!(loose.speed_variance > tight.speed_variance);
    }

    #[test]
    fn extreme_density_still_assigns_chaotic() {
        // density 10 drives the factor negative; the level must degrade to
        // chaotic, not panic or wrap.
        let m = model();
        let result = m.calculate_lane_discipline(
            VehicleClass::Car,
            &RoadConditions { traffic_density: 10.0, ..neutral_road() },
        );
        assert_eq!(result.level, LaneDiscipline::Chaotic);
    }
}

// ── Overtaking ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod overtaking {
    use super::*;

    #[test]
    fn probability_is_clamped() {
        let m = model();
        // Motorcycle in empty traffic: 0.9 × 1.0 × 1.5 would exceed 1.
        let p = m.determine_overtaking_probability(VehicleClass::Motorcycle, 0.0);
        assert_eq!(p, 1.0);
        // Extreme density floors the headroom at 0.1, never negative.
        let p = m.determine_overtaking_probability(VehicleClass::Truck, 10.0);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn trucks_overtake_less_than_motorcycles() {
        let m = model();
        let truck = m.determine_overtaking_probability(VehicleClass::Truck, 0.5);
        let moto = m.determine_overtaking_probability(VehicleClass::Motorcycle, 0.5);
        assert!(truck < moto);
    }

    #[test]
    fn five_kmh_gap_short_circuits() {
        let m = model();
        let mut rng = SimRng::new(0);
        let d = m.determine_overtaking_behavior(
            VehicleClass::Motorcycle,
            &calm_state(),
            45.0,
            50.0, // exactly the boundary gap
            &mut rng,
        );
        assert!(!d.should_overtake);
        assert_eq!(d.confidence, 0.0);
        assert_eq!(d.required_gap, 0.0);
    }

    #[test]
    fn declined_draw_still_reports_confidence() {
        let m = model();
        let mut rng = SimRng::new(0);
        // Full congestion halves the probability; a bicycle barely overtakes.
        let state = TrafficState { congestion_level: 1.0, density: 0.9, ..calm_state() };
        let d = m.determine_overtaking_behavior(VehicleClass::Bicycle, &state, 10.0, 20.0, &mut rng);
        if !d.should_overtake {
            assert!(d.confidence >= 0.0);
            assert_eq!(d.estimated_time_savings, 0.0);
        }
    }

    #[test]
    fn extreme_speed_gap_is_clamped_everywhere() {
        let m = model();
        let mut rng = SimRng::new(7);
        let d = m.determine_overtaking_behavior(
            VehicleClass::Car,
            &calm_state(),
            0.0,
            1000.0,
            &mut rng,
        );
        // probability = 0.6 × 2.0 × 1.0, clamped → always overtake
        assert!(d.should_overtake);
        assert_eq!(d.confidence, 1.0);
        assert!((0.0..=1.0).contains(&d.risk_level));
        assert!(d.required_gap > 0.0);
        assert!(d.estimated_time_savings > 0.0);
    }

    #[test]
    fn positive_decision_scales_gap_with_speed_diff() {
        let m = model();
        let mut rng = SimRng::new(1);
        let slow = m.determine_overtaking_behavior(
            VehicleClass::Truck, &calm_state(), 0.0, 30.0, &mut rng,
        );
        let fast = m.determine_overtaking_behavior(
            VehicleClass::Truck, &calm_state(), 0.0, 80.0, &mut rng,
        );
        if slow.should_overtake && fast.should_overtake {
            assert!(fast.required_gap > slow.required_gap);
        }
    }
}

// ── Intersections ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod intersections {
    use super::*;

    #[test]
    fn motorcycle_roundabout_approach_factor() {
        let m = model();
        let b = m.model_intersection_behavior(VehicleClass::Motorcycle, IntersectionType::Roundabout);
        assert!((b.approach_speed_factor - 1.12).abs() < 1e-12); // 0.8 × 1.4
    }

    #[test]
    fn light_weavers_stop_less_often() {
        let m = model();
        let car = m.model_intersection_behavior(VehicleClass::Car, IntersectionType::Signalized);
        let moto = m.model_intersection_behavior(VehicleClass::Motorcycle, IntersectionType::Signalized);
        assert!((car.stopping_probability - 0.8).abs() < 1e-12);
        assert!((moto.stopping_probability - 0.8 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn bicycle_falls_back_to_car_adjustments() {
        let m = model();
        let car = m.model_intersection_behavior(VehicleClass::Car, IntersectionType::TJunction);
        let bicycle = m.model_intersection_behavior(VehicleClass::Bicycle, IntersectionType::TJunction);
        assert_eq!(car, bicycle);
    }

    #[test]
    fn four_way_stop_uses_default_base_row() {
        let m = model();
        let b = m.model_intersection_behavior(VehicleClass::Car, IntersectionType::FourWayStop);
        assert!((b.stopping_probability - 0.7).abs() < 1e-12);
        assert!((b.gap_acceptance_threshold - 3.0).abs() < 1e-12);
        assert!((b.horn_usage_probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn uncontrolled_junctions_hornier_than_signals() {
        let m = model();
        let sig = m.model_intersection_behavior(VehicleClass::AutoRickshaw, IntersectionType::Signalized);
        let unc = m.model_intersection_behavior(VehicleClass::AutoRickshaw, IntersectionType::Uncontrolled);
        assert!(unc.horn_usage_probability > sig.horn_usage_probability);
    }
}

// ── Weather ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod weather {
    use super::*;

    #[test]
    fn name_classification_precedence() {
        assert_eq!(WeatherCategory::for_name("max_speed"), WeatherCategory::Speed);
        // "speed" wins over "lane" when both appear.
        assert_eq!(WeatherCategory::for_name("lane_speed_limit"), WeatherCategory::Speed);
        assert_eq!(
            WeatherCategory::for_name("following_distance_factor"),
            WeatherCategory::FollowingDistance
        );
        assert_eq!(WeatherCategory::for_name("safe_distance"), WeatherCategory::FollowingDistance);
        assert_eq!(WeatherCategory::for_name("lane_discipline"), WeatherCategory::LaneDiscipline);
        assert_eq!(WeatherCategory::for_name("overtaking_urge"), WeatherCategory::Overtaking);
        assert_eq!(WeatherCategory::for_name("overtake_gap"), WeatherCategory::Overtaking);
        assert_eq!(WeatherCategory::for_name("horn_usage"), WeatherCategory::Unaffected);
    }

    #[test]
    fn map_application_scales_by_category() {
        let behavior = BTreeMap::from([
            ("speed_factor".to_string(), 1.0),
            ("following_distance".to_string(), 1.0),
            ("lane_discipline".to_string(), 1.0),
            ("overtaking_factor".to_string(), 1.0),
            ("horn_usage".to_string(), 1.0),
        ]);

        let out = apply_weather_effects(&behavior, Weather::HeavyRain);
        assert_eq!(out["speed_factor"], 0.7);
        assert_eq!(out["following_distance"], 1.5);
        assert_eq!(out["lane_discipline"], 0.7);
        assert_eq!(out["overtaking_factor"], 0.5);
        // Unmatched keys pass through untouched.
        assert_eq!(out["horn_usage"], 1.0);
    }

    #[test]
    fn clear_weather_is_identity() {
        let behavior = BTreeMap::from([
            ("speed_factor".to_string(), 0.42),
            ("following_distance".to_string(), 1.7),
        ]);
        assert_eq!(apply_weather_effects(&behavior, Weather::Clear), behavior);
    }

    #[test]
    fn effects_table_orders_by_severity() {
        let light = WeatherEffects::of(Weather::LightRain);
        let heavy = WeatherEffects::of(Weather::HeavyRain);
        assert!(heavy.speed < light.speed);
        assert!(heavy.following_distance > light.following_distance);
        assert!(heavy.overtaking < light.overtaking);
    }
}

// ── Stress ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stress {
    use super::*;

    #[test]
    fn always_clamped_to_unit_interval() {
        let m = model();
        let worst = TrafficConditions {
            density: 10.0,
            current_speed: 0.0,
            desired_speed: 120.0,
            weather: Weather::DustStorm,
        };
        for class in VehicleClass::ALL {
            let stress = m.calculate_stress_level(class, &worst);
            assert!((0.0..=1.0).contains(&stress), "{class}: {stress}");
        }
    }

    #[test]
    fn bicycles_stress_faster_than_buses() {
        let m = model();
        let conditions = TrafficConditions::default();
        let bicycle = m.calculate_stress_level(VehicleClass::Bicycle, &conditions);
        let bus = m.calculate_stress_level(VehicleClass::Bus, &conditions);
        assert!(bicycle > bus);
    }

    #[test]
    fn speed_frustration_never_negative() {
        let m = model();
        // Travelling faster than desired: frustration term must floor at 0.
        let conditions = TrafficConditions {
            current_speed: 80.0,
            desired_speed: 50.0,
            ..TrafficConditions::default()
        };
        let fast = m.calculate_stress_level(VehicleClass::Car, &conditions);
        let baseline = m.calculate_stress_level(
            VehicleClass::Car,
            &TrafficConditions { current_speed: 50.0, desired_speed: 50.0, ..conditions },
        );
        assert_eq!(fast, baseline);
    }

    #[test]
    fn weather_adds_stress() {
        let m = model();
        let clear = m.calculate_stress_level(VehicleClass::Car, &TrafficConditions::default());
        let storm = m.calculate_stress_level(
            VehicleClass::Car,
            &TrafficConditions { weather: Weather::DustStorm, ..TrafficConditions::default() },
        );
        assert!(storm > clear);
    }
}
