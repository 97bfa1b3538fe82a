//! Pairwise interaction classification.
//!
//! The manager scans registered vehicles pairwise; every pair within the
//! interaction radius yields one [`VehicleInteraction`] describing what the
//! pair is doing relative to each other.  Classification is a pure function
//! of distance, relative speed, and the two classes, so the scan can be
//! parallelized without changing its output.

use mt_core::{Priority, VehicleClass, VehicleId};

// ── Classification constants ──────────────────────────────────────────────────

/// |relative speed| above which the pair is an overtaking interaction (km/h).
pub const OVERTAKING_SPEED_GAP: f64 = 10.0;
/// Distance below which a pair is following or in conflict (m).
pub const CLOSE_RANGE: f64 = 10.0;
/// Distance below which a pair is a proximity interaction (m).
pub const PROXIMITY_RANGE: f64 = 30.0;
/// |relative speed| below which a close pair is following, not in
/// conflict (km/h).
pub const FOLLOWING_SPEED_GAP: f64 = 2.0;

// ── InteractionKind ───────────────────────────────────────────────────────────

/// What a vehicle pair is doing, from the primary vehicle's point of view.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InteractionKind {
    /// Primary is closing fast on the secondary.
    Overtaking,
    /// Secondary is closing fast on the primary.
    BeingOvertaken,
    /// Close together at matched speeds.
    Following,
    /// Close together with an unresolved speed mismatch.
    Conflict,
    /// Within awareness range but not yet interacting.
    Proximity,
    /// Inside the scan radius but too far apart to matter.
    Distant,
}

/// Classify a pair from separation and relative speed.
///
/// Decision order is fixed: the overtaking test runs before the range tests,
/// so a fast closure at 8 m is overtaking, not conflict.
pub fn classify_interaction(distance: f64, relative_speed: f64) -> InteractionKind {
    if relative_speed.abs() > OVERTAKING_SPEED_GAP {
        if relative_speed > 0.0 {
            InteractionKind::Overtaking
        } else {
            InteractionKind::BeingOvertaken
        }
    } else if distance < CLOSE_RANGE {
        if relative_speed.abs() < FOLLOWING_SPEED_GAP {
            InteractionKind::Following
        } else {
            InteractionKind::Conflict
        }
    } else if distance < PROXIMITY_RANGE {
        InteractionKind::Proximity
    } else {
        InteractionKind::Distant
    }
}

/// Severity of a potential conflict, in [0, 1].
///
/// Weighted sum of proximity (50 %), closure rate (30 %), and the size
/// mismatch between the two classes (20 %).
pub fn conflict_severity(
    distance: f64,
    relative_speed: f64,
    a: VehicleClass,
    b: VehicleClass,
) -> f64 {
    let proximity = (1.0 - distance / 50.0).max(0.0);
    let closure = (relative_speed.abs() / 30.0).min(1.0);
    let size_mismatch = (a.size_factor() - b.size_factor()).abs();
    (proximity * 0.5 + closure * 0.3 + size_mismatch * 0.2).clamp(0.0, 1.0)
}

// ── VehicleInteraction ────────────────────────────────────────────────────────

/// One classified pair from the interaction scan.
///
/// `relative_speed` is primary minus secondary (km/h);
/// `priority_difference` is primary rank minus secondary rank, so a negative
/// value means the primary outranks the secondary.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VehicleInteraction {
    pub primary: VehicleId,
    pub secondary: VehicleId,
    pub kind: InteractionKind,
    /// Planar separation in metres.
    pub distance: f64,
    /// Primary speed minus secondary speed, km/h.
    pub relative_speed: f64,
    /// Primary rank minus secondary rank; negative ⇒ primary outranks.
    pub priority_difference: i32,
    /// Conflict severity in [0, 1].
    pub severity: f64,
}

impl VehicleInteraction {
    /// Rank difference between two effective priorities.
    #[inline]
    pub(crate) fn rank_difference(primary: Priority, secondary: Priority) -> i32 {
        primary.rank() - secondary.rank()
    }
}
