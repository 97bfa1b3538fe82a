//! Behavior deltas and the calibrated rule constants behind them.
//!
//! Every per-tick behavioral adjustment the manager hands back to the driver
//! is expressed as a [`BehaviorDelta`]: a named bag of numbers, flags, and
//! labels.  Later pipeline stages overwrite earlier ones key-by-key
//! (last-write-wins), so merge order is part of the contract — see
//! [`MixedTrafficManager::simulate_tick`][crate::MixedTrafficManager::simulate_tick].

use rustc_hash::FxHashMap;

// ── Delta keys ────────────────────────────────────────────────────────────────

/// Canonical delta key names.  Drivers match on these, so they are part of
/// the public surface and never change casing.
pub mod keys {
    pub const ACTION_TYPE: &str = "action_type";
    pub const PRIORITY: &str = "priority";

    pub const SPEED_ADJUSTMENT: &str = "speed_adjustment";
    pub const CLEARANCE_DISTANCE: &str = "clearance_distance";
    pub const YIELD_DISTANCE: &str = "yield_distance";
    pub const LANE_CHANGE_REQUIRED: &str = "lane_change_required";
    pub const LANE_CHANGE_SUGGESTED: &str = "lane_change_suggested";
    pub const FOLLOWING_DISTANCE_INCREASE: &str = "following_distance_increase";
    pub const OVERTAKING_DISCOURAGED: &str = "overtaking_discouraged";
    pub const OVERTAKING_ENCOURAGED: &str = "overtaking_encouraged";
    pub const GAP_ACCEPTANCE_REDUCED: &str = "gap_acceptance_reduced";

    pub const SPEED_REDUCTION: &str = "speed_reduction";
    pub const LANE_CHANGE_FREQUENCY_INCREASE: &str = "lane_change_frequency_increase";
    pub const HORN_USAGE_INCREASE: &str = "horn_usage_increase";
    pub const STRESS_LEVEL_INCREASE: &str = "stress_level_increase";
    pub const WEAVING_INCREASE: &str = "weaving_increase";
    pub const GAP_ACCEPTANCE_DECREASE: &str = "gap_acceptance_decrease";
    pub const BLOCKING_EFFECT: &str = "blocking_effect";
    pub const LANE_CHANGE_DIFFICULTY: &str = "lane_change_difficulty";

    pub const LATERAL_MOVEMENT: &str = "lateral_movement";
    pub const SPEED_ADVANTAGE: &str = "speed_advantage";
    pub const LANE_DISCIPLINE_REDUCTION: &str = "lane_discipline_reduction";
}

/// `action_type` label values.
pub mod action {
    pub const EMERGENCY_YIELD: &str = "emergency_yield";
    pub const BUS_YIELD: &str = "bus_yield";
    pub const YIELD_TO_PRIORITY: &str = "yield_to_priority";
    pub const ASSERT_PRIORITY: &str = "assert_priority";
    pub const CONGESTION_BEHAVIOR: &str = "congestion_behavior";
    pub const WEAVING: &str = "weaving";
}

// ── DeltaValue ────────────────────────────────────────────────────────────────

/// One value in a behavior delta.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DeltaValue {
    Number(f64),
    Flag(bool),
    Label(&'static str),
}

impl DeltaValue {
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            DeltaValue::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_flag(&self) -> Option<bool> {
        match *self {
            DeltaValue::Flag(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_label(&self) -> Option<&'static str> {
        match *self {
            DeltaValue::Label(s) => Some(s),
            _ => None,
        }
    }
}

// ── BehaviorDelta ─────────────────────────────────────────────────────────────

/// A named bag of behavioral adjustments for one vehicle in one tick.
#[derive(Clone, Default, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BehaviorDelta(FxHashMap<&'static str, DeltaValue>);

impl BehaviorDelta {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set_number(&mut self, key: &'static str, value: f64) {
        self.0.insert(key, DeltaValue::Number(value));
    }

    #[inline]
    pub fn set_flag(&mut self, key: &'static str, value: bool) {
        self.0.insert(key, DeltaValue::Flag(value));
    }

    #[inline]
    pub fn set_label(&mut self, key: &'static str, value: &'static str) {
        self.0.insert(key, DeltaValue::Label(value));
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&DeltaValue> {
        self.0.get(key)
    }

    #[inline]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(DeltaValue::as_number)
    }

    #[inline]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(DeltaValue::as_flag)
    }

    #[inline]
    pub fn label(&self, key: &str) -> Option<&'static str> {
        self.0.get(key).and_then(DeltaValue::as_label)
    }

    #[inline]
    pub fn action_type(&self) -> Option<&'static str> {
        self.label(keys::ACTION_TYPE)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Overlay `other` onto `self`; keys present in both take `other`'s
    /// value.
    pub fn merge(&mut self, other: BehaviorDelta) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &DeltaValue)> {
        self.0.iter().map(|(&k, v)| (k, v))
    }
}

// ── Rule constants ────────────────────────────────────────────────────────────

/// How hard everyone else must get out of an emergency vehicle's way.
#[derive(Copy, Clone, Debug)]
pub struct EmergencyYieldRule {
    /// Lateral clearance to open up, metres.
    pub clearance_distance: f64,
    /// Speed multiplier while yielding.
    pub speed_adjustment: f64,
    /// Probability a yielding vehicle is told to change lanes.
    pub lane_change_probability: f64,
}

pub const EMERGENCY_YIELD: EmergencyYieldRule = EmergencyYieldRule {
    clearance_distance: 20.0,
    speed_adjustment: 0.5,
    lane_change_probability: 0.9,
};

/// Softer deference owed to buses in mixed traffic.
#[derive(Copy, Clone, Debug)]
pub struct BusYieldRule {
    /// Longitudinal gap to grant, metres.
    pub yield_distance: f64,
    /// Speed multiplier while yielding.
    pub speed_adjustment: f64,
    /// Probability a lane change is suggested (not required).
    pub lane_change_probability: f64,
}

pub const BUS_YIELD: BusYieldRule = BusYieldRule {
    yield_distance: 10.0,
    speed_adjustment: 0.8,
    lane_change_probability: 0.6,
};

/// Stochastic weaving through congested traffic by light weavers.
#[derive(Copy, Clone, Debug)]
pub struct WeavingRule {
    /// Per-tick trigger probability for an eligible vehicle.
    pub trigger_probability: f64,
    /// Half-range of the lateral offset draw, metres.
    pub lateral_amplitude: f64,
    /// Speed multiplier granted while weaving.
    pub speed_advantage: f64,
    /// Multiplier applied to the weaver's lane discipline.
    pub lane_discipline_reduction: f64,
}

pub const WEAVING: WeavingRule = WeavingRule {
    trigger_probability: 0.3,
    lateral_amplitude: 0.5,
    speed_advantage: 1.2,
    lane_discipline_reduction: 0.5,
};

/// Calibration for traffic stuck behind a heavy vehicle.
///
/// The manager does not apply this rule itself; it is published for the
/// external car-following model, which owns the ahead/behind geometry the
/// planar interaction scan cannot see.
#[derive(Copy, Clone, Debug)]
pub struct TruckBlockingRule {
    /// Speed multiplier for vehicles trapped behind.
    pub blocking_effect: f64,
    /// Multiplier on the required overtaking gap.
    pub overtaking_difficulty: f64,
    /// Multiplier on safe following distance.
    pub following_distance_increase: f64,
}

pub const TRUCK_BLOCKING: TruckBlockingRule = TruckBlockingRule {
    blocking_effect: 0.7,
    overtaking_difficulty: 1.5,
    following_distance_increase: 1.3,
};

/// The full interaction rule table the manager runs with.
///
/// Held by value on the manager so a scenario can recalibrate individual
/// rules without touching the defaults used everywhere else.
#[derive(Copy, Clone, Debug)]
pub struct InteractionRules {
    pub emergency: EmergencyYieldRule,
    pub bus: BusYieldRule,
    pub weaving: WeavingRule,
    pub truck_blocking: TruckBlockingRule,
}

impl Default for InteractionRules {
    fn default() -> Self {
        Self {
            emergency: EMERGENCY_YIELD,
            bus: BUS_YIELD,
            weaving: WEAVING,
            truck_blocking: TRUCK_BLOCKING,
        }
    }
}
