//! `mt-agent` — vehicle records and the vehicle factory.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`config`]  | `ClassConfig` (physical/behavior defaults), `TrafficConfig` |
//! | [`params`]  | `BehaviorParams` and their archetype-modified derivation    |
//! | [`vehicle`] | `Vehicle` — the agent record registered with the manager    |
//! | [`factory`] | `VehicleFactory` — typed, random, and batch creation        |
//!
//! The factory is the only component that creates vehicles; the manager in
//! `mt-sim` only ever receives them via registration and never constructs or
//! destroys agents itself.

pub mod config;
pub mod factory;
pub mod params;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use config::{ClassConfig, TrafficConfig};
pub use factory::{FactoryStats, VehicleFactory};
pub use params::BehaviorParams;
pub use vehicle::Vehicle;
