//! Vocabulary enums shared by every `mt-*` crate.
//!
//! All lookup tables keyed by these enums live in the crates that own them
//! (`mt-agent` for physical defaults, `mt-behavior` for calibration), always
//! as exhaustive `match` expressions with a documented fallback arm rather
//! than map lookups with implicit defaults.

use std::fmt;

// ── VehicleClass ──────────────────────────────────────────────────────────────

/// The classes of traffic participant the engine models.
///
/// Marked `#[non_exhaustive]` so new classes can be added without breaking
/// downstream matches; every consumer table documents its fallback value for
/// unknown classes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VehicleClass {
    Car,
    Motorcycle,
    AutoRickshaw,
    Bus,
    Truck,
    Bicycle,
}

impl VehicleClass {
    /// Every class the engine ships defaults for, in mix-ratio order.
    pub const ALL: [VehicleClass; 6] = [
        VehicleClass::Car,
        VehicleClass::Motorcycle,
        VehicleClass::AutoRickshaw,
        VehicleClass::Bus,
        VehicleClass::Truck,
        VehicleClass::Bicycle,
    ];

    /// Uppercase tag used in the wire form of [`VehicleId`][crate::VehicleId]
    /// (`CAR_000123`).
    pub fn tag(self) -> &'static str {
        match self {
            VehicleClass::Car          => "CAR",
            VehicleClass::Motorcycle   => "MOTORCYCLE",
            VehicleClass::AutoRickshaw => "AUTO_RICKSHAW",
            VehicleClass::Bus          => "BUS",
            VehicleClass::Truck        => "TRUCK",
            VehicleClass::Bicycle      => "BICYCLE",
        }
    }

    /// Human-readable label, useful for statistics and event records.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Car          => "car",
            VehicleClass::Motorcycle   => "motorcycle",
            VehicleClass::AutoRickshaw => "auto_rickshaw",
            VehicleClass::Bus          => "bus",
            VehicleClass::Truck        => "truck",
            VehicleClass::Bicycle      => "bicycle",
        }
    }

    /// `true` for motorcycles and auto-rickshaws — the classes that weave,
    /// lean on the horn, and filter through gaps.
    #[inline]
    pub fn is_light_weaver(self) -> bool {
        matches!(self, VehicleClass::Motorcycle | VehicleClass::AutoRickshaw)
    }

    /// `true` for buses and trucks.
    #[inline]
    pub fn is_heavy(self) -> bool {
        matches!(self, VehicleClass::Bus | VehicleClass::Truck)
    }

    /// Relative footprint coefficient used in conflict-severity scoring.
    /// Unknown classes score 0.5.
    pub fn size_factor(self) -> f64 {
        match self {
            VehicleClass::Bicycle      => 0.1,
            VehicleClass::Motorcycle   => 0.2,
            VehicleClass::AutoRickshaw => 0.4,
            VehicleClass::Car          => 0.6,
            VehicleClass::Bus          => 0.9,
            VehicleClass::Truck        => 1.0,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Archetype ─────────────────────────────────────────────────────────────────

/// Behavioral style modulating a vehicle's base parameters.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    Conservative,
    #[default]
    Normal,
    Aggressive,
    Erratic,
}

impl Archetype {
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Conservative => "conservative",
            Archetype::Normal       => "normal",
            Archetype::Aggressive   => "aggressive",
            Archetype::Erratic      => "erratic",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Environmental conditions ──────────────────────────────────────────────────

/// Weather conditions affecting behavior calibration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    #[default]
    Clear,
    LightRain,
    HeavyRain,
    Fog,
    DustStorm,
}

/// Road quality levels affecting lane discipline and speed choice.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadQuality {
    Excellent,
    #[default]
    Good,
    Poor,
    VeryPoor,
}

/// Intersection layouts with distinct calibrated base behaviors.
///
/// `FourWayStop` has no dedicated calibration row; it resolves to the
/// documented defaults (stopping probability 0.7, gap acceptance 3.0 s,
/// horn usage 0.5).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionType {
    Signalized,
    Roundabout,
    TJunction,
    FourWayStop,
    Uncontrolled,
}

// ── LaneDiscipline ────────────────────────────────────────────────────────────

/// Discrete lane-discipline level, assigned by scanning a descending
/// threshold table over the continuous discipline factor.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneDiscipline {
    /// Factor < 0.4.
    Chaotic,
    /// Factor ≥ 0.4.
    Loose,
    /// Factor ≥ 0.6.
    Moderate,
    /// Factor ≥ 0.8.
    Strict,
}

impl LaneDiscipline {
    pub fn as_str(self) -> &'static str {
        match self {
            LaneDiscipline::Strict   => "strict",
            LaneDiscipline::Moderate => "moderate",
            LaneDiscipline::Loose    => "loose",
            LaneDiscipline::Chaotic  => "chaotic",
        }
    }
}

impl fmt::Display for LaneDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
