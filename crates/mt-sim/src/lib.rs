//! Mixed-traffic interaction engine.
//!
//! Owns the registered-vehicle registry and runs the per-tick pipeline:
//! pairwise interaction analysis, priority resolution, congestion
//! detection/response, stochastic weaving, and horn simulation, merged into
//! one behavior delta per vehicle.
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | `interaction` | Pair classification and conflict severity               |
//! | `actions`     | Behavior deltas, delta keys, interaction rule constants |
//! | `congestion`  | Spatial grid, zone scoring, `CongestionZone`            |
//! | `events`      | Emergency records, horn events, statistics, tick result |
//! | `manager`     | `MixedTrafficManager` and the tick pipeline             |

pub mod actions;
pub mod congestion;
pub mod events;
pub mod interaction;
pub mod manager;


pub use actions::{BehaviorDelta, DeltaValue, InteractionRules, action, keys};
pub use congestion::{CongestionZone, MIN_ZONE_VEHICLES};
pub use events::{
    EmergencyKind, EmergencyVehicle, HornEvent, HornReason, TickResult, TrafficStats,
};
pub use interaction::{InteractionKind, VehicleInteraction};
pub use manager::{DEFAULT_SIREN_RANGE, ManagerConfig, MixedTrafficManager};
