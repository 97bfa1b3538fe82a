//! Unit tests for mt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{VehicleClass, VehicleId};

    #[test]
    fn display_wire_form() {
        assert_eq!(VehicleId::new(VehicleClass::Car, 123).to_string(), "CAR_000123");
        assert_eq!(
            VehicleId::new(VehicleClass::AutoRickshaw, 7).to_string(),
            "AUTO_RICKSHAW_000007"
        );
    }

    #[test]
    fn ordering_is_class_then_serial() {
        let a = VehicleId::new(VehicleClass::Car, 5);
        let b = VehicleId::new(VehicleClass::Car, 6);
        let c = VehicleId::new(VehicleClass::Motorcycle, 0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn seed_keys_never_collide_across_classes() {
        let car = VehicleId::new(VehicleClass::Car, 1);
        let bus = VehicleId::new(VehicleClass::Bus, 1);
        assert_ne!(car.seed_key(), bus.seed_key());
    }
}

#[cfg(test)]
mod geo {
    use crate::Point3;

    #[test]
    fn planar_distance_ignores_z() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 100.0);
        assert!((a.planar_distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn planar_distance_symmetric() {
        let a = Point3::ground(12.5, -3.0);
        let b = Point3::ground(-7.0, 44.0);
        assert_eq!(a.planar_distance(b), b.planar_distance(a));
    }

    #[test]
    fn finite_check() {
        assert!(Point3::ground(0.0, 0.0).is_finite());
        assert!(!Point3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Point3::new(0.0, f64::INFINITY, 0.0).is_finite());
    }
}

#[cfg(test)]
mod priority {
    use crate::{Priority, VehicleClass};

    #[test]
    fn total_order() {
        assert!(Priority::Emergency.outranks(Priority::Bus));
        assert!(Priority::Bus.outranks(Priority::Truck));
        assert!(Priority::Truck.outranks(Priority::Car));
        assert!(Priority::Car.outranks(Priority::AutoRickshaw));
        assert!(Priority::AutoRickshaw.outranks(Priority::Motorcycle));
        assert!(Priority::Motorcycle.outranks(Priority::Bicycle));
    }

    #[test]
    fn class_ranks() {
        assert_eq!(Priority::of(VehicleClass::Bus).rank(), 2);
        assert_eq!(Priority::of(VehicleClass::Bicycle).rank(), 7);
        // Emergency is an overlay, never derived from a class.
        assert_ne!(Priority::of(VehicleClass::Bus), Priority::Emergency);
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, VehicleClass, VehicleId, VehicleRng};

    #[test]
    fn vehicle_rng_deterministic_same_seed() {
        let id = VehicleId::new(VehicleClass::Car, 0);
        let mut r1 = VehicleRng::new(12345, id);
        let mut r2 = VehicleRng::new(12345, id);
        for _ in 0..100 {
            let a: f64 = r1.gen_range(0.0..1.0);
            let b: f64 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn adjacent_serials_diverge() {
        let mut r0 = VehicleRng::new(1, VehicleId::new(VehicleClass::Car, 0));
        let mut r1 = VehicleRng::new(1, VehicleId::new(VehicleClass::Car, 1));
        let a: f64 = r0.gen_range(0.0..1.0);
        let b: f64 = r1.gen_range(0.0..1.0);
        assert_ne!(a, b, "seeds for adjacent serials should diverge");
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        // Out-of-range probabilities are clamped, not a panic.
        assert!(rng.gen_bool(7.5));
    }

    #[test]
    fn child_streams_differ_from_parent() {
        let mut root = SimRng::new(42);
        let mut child = root.child(1);
        let a: u64 = root.random();
        let b: u64 = child.random();
        assert_ne!(a, b);
    }

    #[test]
    fn choose_on_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}

#[cfg(test)]
mod class {
    use crate::{LaneDiscipline, VehicleClass};

    #[test]
    fn size_factors_monotone_with_footprint() {
        assert!(VehicleClass::Bicycle.size_factor() < VehicleClass::Motorcycle.size_factor());
        assert!(VehicleClass::Car.size_factor() < VehicleClass::Truck.size_factor());
    }

    #[test]
    fn weaver_and_heavy_partitions() {
        assert!(VehicleClass::Motorcycle.is_light_weaver());
        assert!(VehicleClass::AutoRickshaw.is_light_weaver());
        assert!(!VehicleClass::Bus.is_light_weaver());
        assert!(VehicleClass::Truck.is_heavy());
        assert!(!VehicleClass::Bicycle.is_heavy());
    }

    #[test]
    fn discipline_levels_order() {
        assert!(LaneDiscipline::Strict > LaneDiscipline::Moderate);
        assert!(LaneDiscipline::Moderate > LaneDiscipline::Loose);
        assert!(LaneDiscipline::Loose > LaneDiscipline::Chaotic);
    }
}
