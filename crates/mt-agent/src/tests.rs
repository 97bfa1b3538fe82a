//! Unit tests for the vehicle factory and parameter derivation.

use std::collections::HashMap;

use mt_core::{Archetype, Point3, RoadQuality, SimRng, VehicleClass, Weather};

use crate::{TrafficConfig, VehicleFactory};

fn factory() -> VehicleFactory {
    VehicleFactory::with_defaults(42)
}

fn origin() -> Point3 {
    Point3::ground(0.0, 0.0)
}

// ── Creation ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod create {
    use super::*;

    #[test]
    fn physical_attributes_come_from_config() {
        let mut f = factory();
        let v = f.create(VehicleClass::Bus, origin(), None, None).unwrap();
        assert_eq!(v.class, VehicleClass::Bus);
        assert_eq!(v.length, 12.0);
        assert_eq!(v.max_speed, 80.0);
        assert_eq!(v.archetype, Archetype::Normal);
        assert_eq!(v.current_speed, 0.0);
        assert!(!v.is_overtaking);
    }

    #[test]
    fn ids_are_sequential_per_class() {
        let mut f = factory();
        let c1 = f.create(VehicleClass::Car, origin(), None, None).unwrap();
        let m1 = f.create(VehicleClass::Motorcycle, origin(), None, None).unwrap();
        let c2 = f.create(VehicleClass::Car, origin(), None, None).unwrap();
        assert_eq!(c1.id.to_string(), "CAR_000001");
        assert_eq!(c2.id.to_string(), "CAR_000002");
        assert_eq!(m1.id.to_string(), "MOTORCYCLE_000001");
    }

    #[test]
    fn explicit_archetype_overrides_default() {
        let mut f = factory();
        let v = f
            .create(VehicleClass::Truck, origin(), Some(Archetype::Erratic), None)
            .unwrap();
        assert_eq!(v.archetype, Archetype::Erratic);
    }

    #[test]
    fn unknown_class_is_a_config_error() {
        let mut cfg = TrafficConfig::default();
        cfg.class_configs.remove(&VehicleClass::Bicycle);
        let mut f = VehicleFactory::new(cfg, 1);
        assert!(f.create(VehicleClass::Bicycle, origin(), None, None).is_err());
    }

    #[test]
    fn batch_is_bounded_by_positions() {
        let mut f = factory();
        let positions = [origin(), origin(), origin()];
        let vehicles = f.create_batch(10, &positions, &[]).unwrap();
        assert_eq!(vehicles.len(), 3);
        // Short destination list defaults missing entries to None.
        assert!(vehicles.iter().all(|v| v.destination.is_none()));
    }

    #[test]
    fn reset_restarts_serials() {
        let mut f = factory();
        f.create(VehicleClass::Car, origin(), None, None).unwrap();
        f.reset();
        let v = f.create(VehicleClass::Car, origin(), None, None).unwrap();
        assert_eq!(v.id.serial, 1);
    }
}

// ── Parameter derivation ──────────────────────────────────────────────────────

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn unit_parameters_stay_clamped() {
        let mut f = factory();
        for _ in 0..200 {
            let v = f.create(VehicleClass::Motorcycle, origin(), None, None).unwrap();
            let p = &v.params;
            for value in [
                p.lane_discipline_factor,
                p.overtaking_aggressiveness,
                p.speed_compliance,
                p.traffic_light_compliance,
                p.right_of_way_respect,
                p.risk_tolerance,
            ] {
                assert!((0.0..=1.0).contains(&value), "out of range: {value}");
            }
            assert!(p.following_distance_factor >= 0.5);
            assert!(p.horn_usage_frequency >= 0.1);
        }
    }

    #[test]
    fn bicycle_horn_frequency_hits_floor() {
        // Base frequency 0.1 × jitter in [0.5, 1.5] floors at 0.1 about half
        // the time; it must never go below.
        let mut f = factory();
        for _ in 0..100 {
            let v = f.create(VehicleClass::Bicycle, origin(), None, None).unwrap();
            assert!(v.params.horn_usage_frequency >= 0.1);
        }
    }

    #[test]
    fn same_seed_same_id_same_params() {
        let mut f1 = VehicleFactory::with_defaults(7);
        let mut f2 = VehicleFactory::with_defaults(7);
        let a = f1.create(VehicleClass::Car, origin(), None, None).unwrap();
        let b = f2.create(VehicleClass::Car, origin(), None, None).unwrap();
        assert_eq!(a.params, b.params);
    }

    #[test]
    fn params_depend_on_id_not_creation_order() {
        let mut f1 = VehicleFactory::with_defaults(7);
        f1.create(VehicleClass::Bus, origin(), None, None).unwrap();
        let car_after_bus = f1.create(VehicleClass::Car, origin(), None, None).unwrap();

        let mut f2 = VehicleFactory::with_defaults(7);
        let car_first = f2.create(VehicleClass::Car, origin(), None, None).unwrap();

        assert_eq!(car_after_bus.id, car_first.id);
        assert_eq!(car_after_bus.params, car_first.params);
    }

    #[test]
    fn conservative_trucks_more_disciplined_than_erratic_rickshaws() {
        // Statistical: base 0.8 × 1.2 clamps near 1.0 vs base 0.3 × 0.6.
        let mut f = factory();
        let truck = f
            .create(VehicleClass::Truck, origin(), Some(Archetype::Conservative), None)
            .unwrap();
        let rickshaw = f
            .create(VehicleClass::AutoRickshaw, origin(), Some(Archetype::Erratic), None)
            .unwrap();
        assert!(truck.params.lane_discipline_factor > rickshaw.params.lane_discipline_factor);
    }
}

// ── Random class selection ────────────────────────────────────────────────────

#[cfg(test)]
mod mix {
    use super::*;

    #[test]
    fn converges_to_configured_ratios() {
        let mut cfg = TrafficConfig::default();
        cfg.mix_ratios = vec![
            (VehicleClass::Car, 0.5),
            (VehicleClass::Motorcycle, 0.5),
        ];
        let mut f = VehicleFactory::new(cfg, 99);

        let mut counts: HashMap<VehicleClass, usize> = HashMap::new();
        let n = 10_000;
        for _ in 0..n {
            let v = f.create_random(origin(), None).unwrap();
            *counts.entry(v.class).or_default() += 1;
        }

        let cars = counts[&VehicleClass::Car] as f64 / n as f64;
        assert!((cars - 0.5).abs() < 0.03, "car share {cars}");
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn unnormalized_weights_are_normalized() {
        let mut cfg = TrafficConfig::default();
        cfg.mix_ratios = vec![
            (VehicleClass::Car, 3.0),
            (VehicleClass::Bus, 1.0),
        ];
        let mut f = VehicleFactory::new(cfg, 5);
        let mut cars = 0usize;
        let n = 4_000;
        for _ in 0..n {
            if f.create_random(origin(), None).unwrap().class == VehicleClass::Car {
                cars += 1;
            }
        }
        let share = cars as f64 / n as f64;
        assert!((share - 0.75).abs() < 0.05, "car share {share}");
    }

    #[test]
    fn degenerate_weights_fall_back_to_uniform() {
        let mut cfg = TrafficConfig::default();
        cfg.mix_ratios = vec![
            (VehicleClass::Car, 0.0),
            (VehicleClass::Bus, 0.0),
        ];
        let mut f = VehicleFactory::new(cfg, 5);
        let mut counts: HashMap<VehicleClass, usize> = HashMap::new();
        for _ in 0..2_000 {
            let v = f.create_random(origin(), None).unwrap();
            *counts.entry(v.class).or_default() += 1;
        }
        let cars = counts[&VehicleClass::Car] as f64 / 2_000.0;
        assert!((cars - 0.5).abs() < 0.05, "uniform fallback share {cars}");
    }
}

// ── Vehicle behaviors ─────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicle {
    use super::*;

    #[test]
    fn speed_adjustment_heavy_vehicle_floors() {
        let mut f = factory();
        let truck = f.create(VehicleClass::Truck, origin(), None, None).unwrap();
        // Very poor road (0.5) floors at 0.6; dust storm (0.4) floors at 0.7.
        let adj = truck.speed_adjustment(RoadQuality::VeryPoor, Weather::DustStorm);
        assert!((adj - 0.6 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn speed_adjustment_two_wheeler_penalty() {
        let mut f = factory();
        let moto = f.create(VehicleClass::Motorcycle, origin(), None, None).unwrap();
        let adj = moto.speed_adjustment(RoadQuality::Good, Weather::Clear);
        assert!((adj - 0.9 * 0.9 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn following_distance_has_two_metre_floor() {
        let mut f = factory();
        let car = f.create(VehicleClass::Car, origin(), None, None).unwrap();
        assert_eq!(car.following_distance(0.0), 2.0);
        assert!(car.following_distance(80.0) > 2.0);
    }

    #[test]
    fn negative_speed_updates_clamp_to_zero() {
        let mut f = factory();
        let mut car = f.create(VehicleClass::Car, origin(), None, None).unwrap();
        car.update_speed(-10.0);
        assert_eq!(car.current_speed, 0.0);
    }

    #[test]
    fn rickshaws_horn_more_than_bicycles() {
        let mut f = factory();
        let rickshaw = f.create(VehicleClass::AutoRickshaw, origin(), None, None).unwrap();
        let bicycle = f.create(VehicleClass::Bicycle, origin(), None, None).unwrap();

        let mut rng = SimRng::new(1);
        let mut rickshaw_horns = 0;
        let mut bicycle_horns = 0;
        for _ in 0..5_000 {
            if rickshaw.should_use_horn(0.5, &mut rng) {
                rickshaw_horns += 1;
            }
            if bicycle.should_use_horn(0.5, &mut rng) {
                bicycle_horns += 1;
            }
        }
        assert!(rickshaw_horns > bicycle_horns);
    }
}
