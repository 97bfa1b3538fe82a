//! Input and output bundles for the behavior model.

use mt_core::{LaneDiscipline, RoadQuality, Weather};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Static description of the road segment a vehicle is on.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadConditions {
    pub quality: RoadQuality,
    pub lane_count: u32,
    /// Carriageway width in metres.
    pub road_width: f64,
    /// Normalized local density, nominally in [0, 1].
    pub traffic_density: f64,
}

impl Default for RoadConditions {
    fn default() -> Self {
        Self {
            quality: RoadQuality::Good,
            lane_count: 2,
            road_width: 7.0,
            traffic_density: 0.5,
        }
    }
}

/// Current traffic-stream state around a vehicle.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficState {
    /// Normalized density, nominally in [0, 1].
    pub density: f64,
    /// Stream mean speed, km/h.
    pub average_speed: f64,
    /// Congestion level in [0, 1].
    pub congestion_level: f64,
    pub lane_count: u32,
    pub road_width: f64,
}

/// Conditions feeding the stress computation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficConditions {
    pub density: f64,
    /// km/h.
    pub current_speed: f64,
    /// km/h.
    pub desired_speed: f64,
    pub weather: Weather,
}

impl Default for TrafficConditions {
    fn default() -> Self {
        Self {
            density: 0.5,
            current_speed: 30.0,
            desired_speed: 50.0,
            weather: Weather::Clear,
        }
    }
}

// ── Outputs ───────────────────────────────────────────────────────────────────

/// Lane discipline level plus its dependent continuous metrics.
///
/// The three derived metrics are deterministic functions of the same
/// underlying factor — never recomputed independently of it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneDisciplineResult {
    pub level: LaneDiscipline,
    /// The continuous factor the level was assigned from.
    pub factor: f64,
    /// Expected lane changes per minute.
    pub lane_change_probability: f64,
    /// Metres from lane centre.
    pub lateral_deviation: f64,
    /// Coefficient of variation in speed.
    pub speed_variance: f64,
}

/// Result of one overtaking decision.
///
/// `confidence` carries the computed overtake probability even when the draw
/// declines; the three maneuver quantities are only populated on a positive
/// decision.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OvertakeDecision {
    pub should_overtake: bool,
    /// Overtake probability in [0, 1].
    pub confidence: f64,
    /// Gap needed in seconds.
    pub required_gap: f64,
    /// Maneuver risk in [0, 1].
    pub risk_level: f64,
    /// Estimated seconds saved.
    pub estimated_time_savings: f64,
}

impl OvertakeDecision {
    /// A declined decision with the given confidence.
    pub(crate) fn declined(confidence: f64) -> Self {
        Self {
            should_overtake: false,
            confidence,
            required_gap: 0.0,
            risk_level: 0.0,
            estimated_time_savings: 0.0,
        }
    }
}

/// Behavior bundle for one `(class, intersection type)` pairing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionBehavior {
    /// Multiplier on approach speed.
    pub approach_speed_factor: f64,
    /// Probability of stopping on a yellow light.
    pub stopping_probability: f64,
    pub right_turn_aggressiveness: f64,
    /// Minimum accepted gap, seconds.
    pub gap_acceptance_threshold: f64,
    pub horn_usage_probability: f64,
}
