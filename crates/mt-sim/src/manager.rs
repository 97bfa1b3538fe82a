//! The mixed-traffic manager: vehicle registry plus the per-tick pipeline.
//!
//! # Tick pipeline
//!
//! `simulate_tick` runs five stages in a fixed order and merges their
//! per-vehicle deltas last-write-wins:
//!
//! 1. pairwise interaction scan,
//! 2. priority resolution (emergency > bus > rank),
//! 3. congestion detection + response,
//! 4. stochastic weaving for motorcycles and auto-rickshaws,
//! 5. horn simulation.
//!
//! Stage order is part of the contract: a congestion delta overwrites a
//! colliding priority delta, and a weaving delta overwrites both.
//!
//! # Determinism
//!
//! The registry and position index are `BTreeMap`s, so every stage visits
//! vehicles in id order and consumes the engine RNG in a reproducible
//! sequence.  Two managers with the same seed fed the same registration and
//! position sequence produce identical ticks.

use std::collections::BTreeMap;

use mt_agent::Vehicle;
use mt_behavior::{BehaviorModel, OvertakeDecision, TrafficConditions, TrafficState};
use mt_core::{MtError, MtResult, Point3, Priority, SimRng, VehicleClass, VehicleId};
use rustc_hash::FxHashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::actions::{BehaviorDelta, InteractionRules, action, keys};
use crate::congestion::{
    CongestionZone, MIN_ZONE_VEHICLES, build_spatial_grid, congestion_severity,
};
use crate::events::{EmergencyKind, EmergencyVehicle, HornEvent, HornReason, TickResult, TrafficStats};
use crate::interaction::{VehicleInteraction, classify_interaction, conflict_severity};

/// Siren radius used when the caller has no better value, metres.
pub const DEFAULT_SIREN_RANGE: f64 = 100.0;

/// Divisor turning a raw vehicle count into the simplified density fed to
/// horn draws.
const HORN_DENSITY_NORMALIZER: f64 = 100.0;

// ── ManagerConfig ─────────────────────────────────────────────────────────────

/// Tunable scan parameters for one manager instance.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ManagerConfig {
    /// Pairwise scan radius, metres.
    pub interaction_radius: f64,
    /// Congestion grid cell edge, metres.
    pub congestion_grid_size: f64,
    /// Severity above which a grid cell becomes a congestion zone.
    pub congestion_threshold: f64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            interaction_radius: 50.0,
            congestion_grid_size: 100.0,
            congestion_threshold: 0.7,
        }
    }
}

// ── MixedTrafficManager ───────────────────────────────────────────────────────

/// Registry and per-tick behavior engine for mixed traffic.
pub struct MixedTrafficManager {
    behavior: BehaviorModel,
    config: ManagerConfig,
    rules: InteractionRules,

    active: BTreeMap<VehicleId, Vehicle>,
    positions: BTreeMap<VehicleId, Point3>,
    emergencies: BTreeMap<VehicleId, EmergencyVehicle>,

    interactions: Vec<VehicleInteraction>,
    zones: Vec<CongestionZone>,

    rng: SimRng,
    sim_time: f64,
    interaction_count: u64,
    congestion_events: u64,
}

impl MixedTrafficManager {
    pub fn new(behavior: BehaviorModel, config: ManagerConfig, seed: u64) -> Self {
        Self {
            behavior,
            config,
            rules: InteractionRules::default(),
            active: BTreeMap::new(),
            positions: BTreeMap::new(),
            emergencies: BTreeMap::new(),
            interactions: Vec::new(),
            zones: Vec::new(),
            rng: SimRng::new(seed),
            sim_time: 0.0,
            interaction_count: 0,
            congestion_events: 0,
        }
    }

    pub fn behavior_model(&self) -> &BehaviorModel {
        &self.behavior
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn rules(&self) -> &InteractionRules {
        &self.rules
    }

    /// Recalibrate individual interaction rules for this instance.
    pub fn rules_mut(&mut self) -> &mut InteractionRules {
        &mut self.rules
    }

    // ── Registry ──────────────────────────────────────────────────────────

    /// Register a vehicle at its current position.
    ///
    /// Re-registering an id replaces the previous record.  Positions with
    /// NaN or infinite coordinates are rejected before they can poison the
    /// spatial grid.
    pub fn register(&mut self, vehicle: Vehicle) -> MtResult<()> {
        if !vehicle.position.is_finite() {
            return Err(MtError::InvalidPosition(vehicle.position, vehicle.id));
        }
        self.positions.insert(vehicle.id, vehicle.position);
        self.active.insert(vehicle.id, vehicle);
        Ok(())
    }

    /// Register a vehicle with emergency status: it outranks every nominal
    /// class in priority resolution until unregistered.
    pub fn register_emergency(
        &mut self,
        vehicle: Vehicle,
        kind: EmergencyKind,
        siren_range: f64,
    ) -> MtResult<()> {
        let id = vehicle.id;
        self.register(vehicle)?;
        self.emergencies.insert(
            id,
            EmergencyVehicle {
                id,
                kind,
                priority: Priority::Emergency,
                siren_range,
                route_clearance_needed: true,
            },
        );
        Ok(())
    }

    /// Remove a vehicle from the registry, the position index, and the
    /// emergency table.  Returns the vehicle if it was registered.
    pub fn unregister(&mut self, id: VehicleId) -> Option<Vehicle> {
        self.positions.remove(&id);
        self.emergencies.remove(&id);
        self.active.remove(&id)
    }

    /// Update a vehicle's position.
    ///
    /// Unknown ids are ignored — position feeds and unregistration race
    /// benignly.  Non-finite coordinates are rejected.
    pub fn update_position(&mut self, id: VehicleId, position: Point3) -> MtResult<()> {
        if !position.is_finite() {
            return Err(MtError::InvalidPosition(position, id));
        }
        if let Some(slot) = self.positions.get_mut(&id) {
            *slot = position;
            if let Some(vehicle) = self.active.get_mut(&id) {
                vehicle.update_position(position);
            }
        }
        Ok(())
    }

    /// Update a vehicle's speed (clamped at zero).  Unknown ids are ignored.
    pub fn update_speed(&mut self, id: VehicleId, speed_kmh: f64) {
        if let Some(vehicle) = self.active.get_mut(&id) {
            vehicle.update_speed(speed_kmh);
        }
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.active.get(&id)
    }

    pub fn vehicle_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_emergency(&self, id: VehicleId) -> bool {
        self.emergencies.contains_key(&id)
    }

    pub fn emergency_record(&self, id: VehicleId) -> Option<&EmergencyVehicle> {
        self.emergencies.get(&id)
    }

    /// Effective priority of a registered vehicle: the emergency overlay if
    /// present, the nominal class rank otherwise.
    pub fn effective_priority(&self, id: VehicleId, class: VehicleClass) -> Priority {
        if self.emergencies.contains_key(&id) {
            Priority::Emergency
        } else {
            Priority::of(class)
        }
    }

    /// Interactions found by the most recent scan.
    pub fn interactions(&self) -> &[VehicleInteraction] {
        &self.interactions
    }

    /// Zones found by the most recent detection pass.
    pub fn congestion_zones(&self) -> &[CongestionZone] {
        &self.zones
    }

    /// Accumulated simulation time, seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    // ── Interaction analysis ──────────────────────────────────────────────

    /// Scan all registered pairs within `radius` metres and classify them.
    ///
    /// Pairs are enumerated in id order, so output order is deterministic;
    /// with the `parallel` feature the classification map runs on Rayon but
    /// produces the identical vector.
    pub fn analyze_interactions(&mut self, radius: f64) -> Vec<VehicleInteraction> {
        let ids: Vec<VehicleId> = self.active.keys().copied().collect();

        let mut pairs = Vec::with_capacity(ids.len().saturating_sub(1) * ids.len() / 2);
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                pairs.push((a, b));
            }
        }

        #[cfg(feature = "parallel")]
        let found: Vec<VehicleInteraction> = pairs
            .par_iter()
            .filter_map(|&(a, b)| self.pair_interaction(a, b, radius))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let found: Vec<VehicleInteraction> = pairs
            .iter()
            .filter_map(|&(a, b)| self.pair_interaction(a, b, radius))
            .collect();

        self.interaction_count += found.len() as u64;
        self.interactions = found.clone();
        found
    }

    /// Classify one pair, or `None` if either id is incomplete in the
    /// registry or the pair is out of range.
    fn pair_interaction(
        &self,
        a: VehicleId,
        b: VehicleId,
        radius: f64,
    ) -> Option<VehicleInteraction> {
        let pos_a = *self.positions.get(&a)?;
        let pos_b = *self.positions.get(&b)?;
        let vehicle_a = self.active.get(&a)?;
        let vehicle_b = self.active.get(&b)?;

        let distance = pos_a.planar_distance(pos_b);
        if distance > radius {
            return None;
        }

        let relative_speed = vehicle_a.current_speed - vehicle_b.current_speed;
        let priority_a = self.effective_priority(a, vehicle_a.class);
        let priority_b = self.effective_priority(b, vehicle_b.class);

        Some(VehicleInteraction {
            primary: a,
            secondary: b,
            kind: classify_interaction(distance, relative_speed),
            distance,
            relative_speed,
            priority_difference: VehicleInteraction::rank_difference(priority_a, priority_b),
            severity: conflict_severity(distance, relative_speed, vehicle_a.class, vehicle_b.class),
        })
    }

    // ── Priority resolution ───────────────────────────────────────────────

    /// Resolve each interaction into per-vehicle priority actions.
    ///
    /// Precedence: emergency status beats bus status beats nominal rank.
    /// In the rank case both parties get an action (the loser yields, the
    /// winner asserts); equal ranks produce nothing.  A vehicle in several
    /// interactions keeps only the delta written last (id-pair scan order).
    pub fn handle_priority(
        &mut self,
        interactions: &[VehicleInteraction],
    ) -> FxHashMap<VehicleId, BehaviorDelta> {
        let mut actions: FxHashMap<VehicleId, BehaviorDelta> = FxHashMap::default();

        for interaction in interactions {
            // Either party may have been unregistered since the scan.
            let (Some(primary), Some(secondary)) = (
                self.active.get(&interaction.primary),
                self.active.get(&interaction.secondary),
            ) else {
                continue;
            };
            let primary_class = primary.class;
            let secondary_class = secondary.class;

            if self.emergencies.contains_key(&interaction.primary) {
                let delta = self.emergency_yield_delta();
                actions.insert(interaction.secondary, delta);
            } else if self.emergencies.contains_key(&interaction.secondary) {
                let delta = self.emergency_yield_delta();
                actions.insert(interaction.primary, delta);
            } else if primary_class == VehicleClass::Bus && secondary_class != VehicleClass::Bus {
                let delta = self.bus_yield_delta();
                actions.insert(interaction.secondary, delta);
            } else if secondary_class == VehicleClass::Bus && primary_class != VehicleClass::Bus {
                let delta = self.bus_yield_delta();
                actions.insert(interaction.primary, delta);
            } else {
                let primary_priority = Priority::of(primary_class);
                let secondary_priority = Priority::of(secondary_class);
                if primary_priority.outranks(secondary_priority) {
                    actions.insert(interaction.secondary, Self::yield_to_priority_delta());
                    actions.insert(interaction.primary, Self::assert_priority_delta());
                } else if secondary_priority.outranks(primary_priority) {
                    actions.insert(interaction.primary, Self::yield_to_priority_delta());
                    actions.insert(interaction.secondary, Self::assert_priority_delta());
                }
            }
        }

        actions
    }

    fn emergency_yield_delta(&mut self) -> BehaviorDelta {
        let rule = self.rules.emergency;
        let mut delta = BehaviorDelta::new();
        delta.set_label(keys::ACTION_TYPE, action::EMERGENCY_YIELD);
        delta.set_number(keys::SPEED_ADJUSTMENT, rule.speed_adjustment);
        delta.set_flag(
            keys::LANE_CHANGE_REQUIRED,
            self.rng.gen_bool(rule.lane_change_probability),
        );
        delta.set_number(keys::CLEARANCE_DISTANCE, rule.clearance_distance);
        delta.set_label(keys::PRIORITY, "emergency");
        delta
    }

    fn bus_yield_delta(&mut self) -> BehaviorDelta {
        let rule = self.rules.bus;
        let mut delta = BehaviorDelta::new();
        delta.set_label(keys::ACTION_TYPE, action::BUS_YIELD);
        delta.set_number(keys::SPEED_ADJUSTMENT, rule.speed_adjustment);
        delta.set_flag(
            keys::LANE_CHANGE_SUGGESTED,
            self.rng.gen_bool(rule.lane_change_probability),
        );
        delta.set_number(keys::YIELD_DISTANCE, rule.yield_distance);
        delta.set_label(keys::PRIORITY, "bus");
        delta
    }

    fn yield_to_priority_delta() -> BehaviorDelta {
        let mut delta = BehaviorDelta::new();
        delta.set_label(keys::ACTION_TYPE, action::YIELD_TO_PRIORITY);
        delta.set_number(keys::SPEED_ADJUSTMENT, 0.9);
        delta.set_number(keys::FOLLOWING_DISTANCE_INCREASE, 1.2);
        delta.set_flag(keys::OVERTAKING_DISCOURAGED, true);
        delta
    }

    fn assert_priority_delta() -> BehaviorDelta {
        let mut delta = BehaviorDelta::new();
        delta.set_label(keys::ACTION_TYPE, action::ASSERT_PRIORITY);
        delta.set_number(keys::SPEED_ADJUSTMENT, 1.0);
        delta.set_flag(keys::OVERTAKING_ENCOURAGED, true);
        delta.set_number(keys::GAP_ACCEPTANCE_REDUCED, 0.8);
        delta
    }

    // ── Congestion ────────────────────────────────────────────────────────

    /// Detect congestion zones on a square grid of the given cell size.
    ///
    /// Cells are scored in key order so zone output is deterministic.
    pub fn detect_congestion(&mut self, grid_size: f64) -> Vec<CongestionZone> {
        let grid = build_spatial_grid(self.positions.iter(), grid_size);
        let mut cells: Vec<_> = grid.into_iter().collect();
        cells.sort_unstable_by_key(|&(key, _)| key);

        let mut zones = Vec::new();

        for (_, members) in cells {
            if members.len() < MIN_ZONE_VEHICLES {
                continue;
            }
            let count = members.len();

            let center_x = members.iter().map(|&(_, p)| p.x).sum::<f64>() / count as f64;
            let center_y = members.iter().map(|&(_, p)| p.y).sum::<f64>() / count as f64;

            let total_speed: f64 = members
                .iter()
                .filter_map(|(id, _)| self.active.get(id))
                .map(|v| v.current_speed)
                .sum();
            let average_speed = total_speed / count as f64;

            // vehicles per km²
            let density = count as f64 / (grid_size * grid_size / 1_000_000.0);

            let severity = congestion_severity(average_speed, density, count);
            if severity > self.config.congestion_threshold {
                zones.push(CongestionZone {
                    center: Point3::ground(center_x, center_y),
                    radius: grid_size / 2.0,
                    severity,
                    vehicle_count: count,
                    average_speed,
                    density,
                    formation_time: self.sim_time,
                });
            }
        }

        self.congestion_events += zones.len() as u64;
        self.zones = zones.clone();
        zones
    }

    /// Behavior modifications for every vehicle inside a congestion zone.
    ///
    /// A vehicle covered by several zones takes the worst severity.  Light
    /// weavers additionally get weaving headroom; heavy vehicles instead
    /// get blocking/lane-change penalties.
    pub fn apply_congestion_behavior(
        &self,
        zones: &[CongestionZone],
    ) -> FxHashMap<VehicleId, BehaviorDelta> {
        let mut modifications: FxHashMap<VehicleId, BehaviorDelta> = FxHashMap::default();

        for (&id, vehicle) in &self.active {
            let Some(&position) = self.positions.get(&id) else {
                continue;
            };

            let severity = zones
                .iter()
                .filter(|zone| zone.contains(position))
                .map(|zone| zone.severity)
                .fold(f64::NEG_INFINITY, f64::max);
            if !severity.is_finite() {
                continue;
            }

            let mut delta = BehaviorDelta::new();
            delta.set_label(keys::ACTION_TYPE, action::CONGESTION_BEHAVIOR);
            delta.set_number(keys::SPEED_REDUCTION, severity * 0.5);
            delta.set_number(keys::FOLLOWING_DISTANCE_INCREASE, 1.0 + severity * 0.5);
            delta.set_number(keys::LANE_CHANGE_FREQUENCY_INCREASE, severity * 2.0);
            delta.set_number(keys::HORN_USAGE_INCREASE, severity * 1.5);
            delta.set_number(keys::STRESS_LEVEL_INCREASE, severity * 0.3);

            if vehicle.class.is_light_weaver() {
                delta.set_number(keys::WEAVING_INCREASE, severity * 1.5);
                delta.set_number(keys::GAP_ACCEPTANCE_DECREASE, severity * 0.3);
            } else if vehicle.class.is_heavy() {
                delta.set_number(keys::BLOCKING_EFFECT, severity * 0.8);
                delta.set_number(keys::LANE_CHANGE_DIFFICULTY, severity * 1.2);
            }

            modifications.insert(id, delta);
        }

        modifications
    }

    // ── Micro-behaviors ───────────────────────────────────────────────────

    /// Stochastic weaving for motorcycles and auto-rickshaws.
    ///
    /// Each eligible vehicle draws once per tick; the lateral offset is
    /// uniform over ±`lateral_amplitude`.
    pub fn simulate_weaving(&mut self) -> FxHashMap<VehicleId, BehaviorDelta> {
        let rule = self.rules.weaving;
        let rng = &mut self.rng;
        let mut behaviors: FxHashMap<VehicleId, BehaviorDelta> = FxHashMap::default();

        for (&id, vehicle) in &self.active {
            if !vehicle.class.is_light_weaver() {
                continue;
            }
            if !rng.gen_bool(rule.trigger_probability) {
                continue;
            }

            let mut delta = BehaviorDelta::new();
            delta.set_label(keys::ACTION_TYPE, action::WEAVING);
            delta.set_number(
                keys::LATERAL_MOVEMENT,
                rule.lateral_amplitude * rng.gen_range(-1.0..=1.0),
            );
            delta.set_number(keys::SPEED_ADVANTAGE, rule.speed_advantage);
            delta.set_number(keys::LANE_DISCIPLINE_REDUCTION, rule.lane_discipline_reduction);
            behaviors.insert(id, delta);
        }

        behaviors
    }

    /// Per-tick horn draws for every vehicle, against the simplified global
    /// density.  A sounding vehicle's horn timer resets to zero.
    pub fn simulate_horn_usage(&mut self) -> Vec<HornEvent> {
        let traffic_density = self.active.len() as f64 / HORN_DENSITY_NORMALIZER;
        let rng = &mut self.rng;
        let mut events = Vec::new();

        for (&id, vehicle) in &self.active {
            if !vehicle.should_use_horn(traffic_density, rng) {
                continue;
            }
            let position = self.positions.get(&id).copied().unwrap_or(vehicle.position);
            let reason = rng
                .choose(&HornReason::ALL)
                .copied()
                .unwrap_or(HornReason::Warning);
            events.push(HornEvent {
                vehicle: id,
                class: vehicle.class,
                position,
                reason,
            });
        }

        for event in &events {
            if let Some(vehicle) = self.active.get_mut(&event.vehicle) {
                vehicle.time_since_last_horn = 0.0;
            }
        }

        events
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run the full pipeline for one tick of `dt` seconds.
    pub fn simulate_tick(&mut self, dt: f64) -> TickResult {
        self.sim_time += dt;
        for vehicle in self.active.values_mut() {
            vehicle.time_since_last_horn += dt;
        }

        let interactions = self.analyze_interactions(self.config.interaction_radius);
        let mut priority = self.handle_priority(&interactions);

        let congestion_zones = self.detect_congestion(self.config.congestion_grid_size);
        let mut congestion = self.apply_congestion_behavior(&congestion_zones);

        let mut weaving = self.simulate_weaving();
        let horn_events = self.simulate_horn_usage();

        // Merge order is the contract: priority, then congestion, then
        // weaving, later stages overwriting colliding keys.
        let mut behaviors: FxHashMap<VehicleId, BehaviorDelta> = FxHashMap::default();
        for &id in self.active.keys() {
            let mut delta = BehaviorDelta::new();
            if let Some(d) = priority.remove(&id) {
                delta.merge(d);
            }
            if let Some(d) = congestion.remove(&id) {
                delta.merge(d);
            }
            if let Some(d) = weaving.remove(&id) {
                delta.merge(d);
            }
            if !delta.is_empty() {
                behaviors.insert(id, delta);
            }
        }

        TickResult {
            behaviors,
            interactions,
            congestion_zones,
            horn_events,
            statistics: self.statistics(),
        }
    }

    // ── Driver conveniences ───────────────────────────────────────────────

    /// Overtaking decision for a registered vehicle against the engine RNG.
    ///
    /// Desired speed is the vehicle's compliance-weighted maximum.
    pub fn overtaking_decision(
        &mut self,
        id: VehicleId,
        state: &TrafficState,
        leader_speed_kmh: f64,
    ) -> Option<OvertakeDecision> {
        let vehicle = self.active.get(&id)?;
        let desired = vehicle.max_speed * vehicle.params.speed_compliance;
        let class = vehicle.class;
        Some(
            self.behavior
                .determine_overtaking_behavior(class, state, leader_speed_kmh, desired, &mut self.rng),
        )
    }

    /// Stress level for a registered vehicle under the given conditions.
    pub fn stress_level(&self, id: VehicleId, conditions: &TrafficConditions) -> Option<f64> {
        let vehicle = self.active.get(&id)?;
        Some(self.behavior.calculate_stress_level(vehicle.class, conditions))
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Current registry and pipeline statistics.
    pub fn statistics(&self) -> TrafficStats {
        let mut class_distribution: BTreeMap<VehicleClass, usize> = BTreeMap::new();
        for vehicle in self.active.values() {
            *class_distribution.entry(vehicle.class).or_insert(0) += 1;
        }

        TrafficStats {
            total_vehicles: self.active.len(),
            class_distribution,
            emergency_vehicles: self.emergencies.len(),
            active_interactions: self.interactions.len(),
            congestion_zones: self.zones.len(),
            total_interactions: self.interaction_count,
            total_congestion_events: self.congestion_events,
        }
    }
}
