//! `mt-behavior` — the driver behavior model.
//!
//! A library of stateless (but randomness-using) functions mapping
//! `{vehicle class, archetype, environmental conditions}` to scalar
//! behavioral metrics.  Configured once with calibration tables; every method
//! is a pure function of its inputs plus, where noted, an injected RNG.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`types`]   | Input/output bundles (`TrafficState`, `OvertakeDecision`…) |
//! | [`model`]   | `BehaviorModel` — the six computation entry points         |
//! | [`weather`] | `WeatherCategory`, weather-effect application              |
//!
//! # Graceful degradation
//!
//! Calibration-lookup misses never raise: every table documents its fallback
//! value (e.g. 0.5 base discipline for an unlisted class, the car adjustment
//! row for an unlisted class at intersections) so tests can assert on the
//! exact degraded output.

pub mod model;
pub mod types;
pub mod weather;

#[cfg(test)]
mod tests;

pub use model::BehaviorModel;
pub use types::{
    IntersectionBehavior, LaneDisciplineResult, OvertakeDecision, RoadConditions,
    TrafficConditions, TrafficState,
};
pub use weather::{WeatherCategory, WeatherEffects, apply_weather_effects};
