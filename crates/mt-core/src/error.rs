//! Engine error type.
//!
//! The hot path (per-tick analysis) never raises: configuration-lookup misses
//! degrade to documented defaults and queries for unregistered ids return
//! `None`.  Hard errors are confined to creation-time configuration misses
//! and the registration boundary's geometry validation.

use thiserror::Error;

use crate::{Point3, VehicleClass, VehicleId};

/// The top-level error type shared by all `mt-*` crates.
#[derive(Debug, Error)]
pub enum MtError {
    /// The requested class has no configuration entry.
    #[error("no configuration entry for vehicle class `{0}`")]
    UnknownClass(VehicleClass),

    /// A registry operation referenced an id that is not registered.
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    /// A position with NaN or infinite coordinates reached the registration
    /// boundary.
    #[error("non-finite position {0} for vehicle {1}")]
    InvalidPosition(Point3, VehicleId),

    /// Generic configuration problem (bad table, empty class mix, …).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `mt-*` crates.
pub type MtResult<T> = Result<T, MtError>;
