//! `mt-core` — foundational types for the `mixed_traffic` behavior engine.
//!
//! This crate is a dependency of every other `mt-*` crate.  It intentionally
//! has no `mt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `VehicleId` — typed per-class sequential identifier        |
//! | [`class`]    | `VehicleClass`, `Archetype`, `Weather`, `RoadQuality`, …   |
//! | [`priority`] | `Priority` — the total order used for conflict resolution  |
//! | [`geo`]      | `Point3`, planar distance                                  |
//! | [`config`]   | `BehaviorConfig` — shared calibration tables               |
//! | [`rng`]      | `SimRng` (engine-level), `VehicleRng` (per-vehicle)        |
//! | [`error`]    | `MtError`, `MtResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.           |

pub mod class;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod priority;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use class::{Archetype, IntersectionType, LaneDiscipline, RoadQuality, VehicleClass, Weather};
pub use config::BehaviorConfig;
pub use error::{MtError, MtResult};
pub use geo::Point3;
pub use ids::VehicleId;
pub use priority::Priority;
pub use rng::{SimRng, VehicleRng};
