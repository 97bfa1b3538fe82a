//! Grid-based congestion detection.
//!
//! Positions are bucketed into square grid cells; any cell holding at least
//! [`MIN_ZONE_VEHICLES`] vehicles is scored for congestion severity, and
//! cells scoring above the manager's threshold become [`CongestionZone`]s
//! centred on the cell's vehicle centroid.

use mt_core::{Point3, VehicleId};
use rustc_hash::FxHashMap;

/// Minimum vehicles in one grid cell before it can be scored as congested.
pub const MIN_ZONE_VEHICLES: usize = 3;

/// Speed below which a cell is maximally slow, km/h.
const FREE_FLOW_SPEED: f64 = 50.0;
/// Density at which the density term saturates, vehicles/km².
const SATURATION_DENSITY: f64 = 100.0;
/// Vehicle count at which the count term saturates.
const SATURATION_COUNT: f64 = 20.0;

// ── CongestionZone ────────────────────────────────────────────────────────────

/// One detected congestion zone.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CongestionZone {
    /// Centroid of the vehicles in the zone's grid cell (ground plane).
    pub center: Point3,
    /// Zone radius in metres (half the grid size).
    pub radius: f64,
    /// Severity in [0, 1].
    pub severity: f64,
    pub vehicle_count: usize,
    /// Mean speed of the zone's vehicles, km/h.
    pub average_speed: f64,
    /// Vehicles per km².
    pub density: f64,
    /// Simulation time at which the zone was detected, seconds.
    pub formation_time: f64,
}

impl CongestionZone {
    /// Whether a position falls inside this zone.
    #[inline]
    pub fn contains(&self, position: Point3) -> bool {
        self.center.planar_distance(position) <= self.radius
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Grid cell key for a position.  Floor division, so negative coordinates
/// bucket correctly ((-1, -1) for a position just below the origin, not
/// (0, 0)).
#[inline]
pub fn grid_key(position: Point3, grid_size: f64) -> (i64, i64) {
    (
        (position.x / grid_size).floor() as i64,
        (position.y / grid_size).floor() as i64,
    )
}

/// Bucket `(id, position)` pairs into grid cells.
///
/// Cells carry the owning id alongside each position so zone scoring can
/// look the vehicle up directly instead of re-matching positions.
pub fn build_spatial_grid<'a, I>(
    positions: I,
    grid_size: f64,
) -> FxHashMap<(i64, i64), Vec<(VehicleId, Point3)>>
where
    I: IntoIterator<Item = (&'a VehicleId, &'a Point3)>,
{
    let mut grid: FxHashMap<(i64, i64), Vec<(VehicleId, Point3)>> = FxHashMap::default();
    for (&id, &position) in positions {
        grid.entry(grid_key(position, grid_size))
            .or_default()
            .push((id, position));
    }
    grid
}

/// Congestion severity in [0, 1] for one cell's metrics.
///
/// Weighted blend: slow traffic 40 %, density 40 %, raw count 20 %, each
/// term normalized against its saturation constant.
pub fn congestion_severity(average_speed: f64, density: f64, vehicle_count: usize) -> f64 {
    let speed_factor = (1.0 - average_speed / FREE_FLOW_SPEED).max(0.0);
    let density_factor = (density / SATURATION_DENSITY).min(1.0);
    let count_factor = (vehicle_count as f64 / SATURATION_COUNT).min(1.0);
    (speed_factor * 0.4 + density_factor * 0.4 + count_factor * 0.2).min(1.0)
}
