//! Per-tick event and summary records handed back to the driver.

use std::collections::BTreeMap;

use mt_core::{Point3, Priority, VehicleClass, VehicleId};
use rustc_hash::FxHashMap;

use crate::actions::BehaviorDelta;
use crate::congestion::CongestionZone;
use crate::interaction::VehicleInteraction;

// ── Emergency vehicles ────────────────────────────────────────────────────────

/// Why an emergency vehicle is on the road.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmergencyKind {
    Accident,
    Flooding,
    RoadClosure,
    Construction,
    VehicleBreakdown,
}

/// Side-table record for a registered emergency vehicle.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EmergencyVehicle {
    pub id: VehicleId,
    pub kind: EmergencyKind,
    pub priority: Priority,
    /// Radius within which other vehicles react to the siren, metres.
    pub siren_range: f64,
    pub route_clearance_needed: bool,
}

// ── Horn events ───────────────────────────────────────────────────────────────

/// Why a horn sounded.  Sampled uniformly; the engine does not model intent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HornReason {
    Overtaking,
    Frustration,
    Warning,
    Greeting,
    ClearingPath,
}

impl HornReason {
    pub const ALL: [HornReason; 5] = [
        HornReason::Overtaking,
        HornReason::Frustration,
        HornReason::Warning,
        HornReason::Greeting,
        HornReason::ClearingPath,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HornReason::Overtaking => "overtaking",
            HornReason::Frustration => "frustration",
            HornReason::Warning => "warning",
            HornReason::Greeting => "greeting",
            HornReason::ClearingPath => "clearing_path",
        }
    }
}

/// One horn sounding during a tick.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HornEvent {
    pub vehicle: VehicleId,
    pub class: VehicleClass,
    pub position: Point3,
    pub reason: HornReason,
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Point-in-time traffic statistics plus cumulative counters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrafficStats {
    pub total_vehicles: usize,
    /// Registered vehicle count per class.
    pub class_distribution: BTreeMap<VehicleClass, usize>,
    pub emergency_vehicles: usize,
    /// Interactions found by the most recent scan.
    pub active_interactions: usize,
    /// Zones found by the most recent detection pass.
    pub congestion_zones: usize,
    /// Interactions processed since the manager was created.
    pub total_interactions: u64,
    /// Zone detections since the manager was created.
    pub total_congestion_events: u64,
}

// ── TickResult ────────────────────────────────────────────────────────────────

/// Everything one `simulate_tick` produced.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickResult {
    /// Merged behavior delta per vehicle; vehicles with nothing to adjust
    /// are absent.
    pub behaviors: FxHashMap<VehicleId, BehaviorDelta>,
    pub interactions: Vec<VehicleInteraction>,
    pub congestion_zones: Vec<CongestionZone>,
    pub horn_events: Vec<HornEvent>,
    pub statistics: TrafficStats,
}
