//! World - fixed-step orchestration of bodies, carriers and oscillators
//!
//! The world owns every body and the gravity field, queues contact and trigger
//! events from the external collision detector, and runs one step as:
//!
//! 1. snapshot gravity
//! 2. integrate all bodies, committing cached velocities
//! 3. oscillators (spring forces, platform/pendulum motion, carrier propagation)
//! 4. queued contact/trigger events, in submission order
//! 5. position integration
//!
//! The heavy lifting lives in the submodules; this file only wires them.

use std::collections::HashMap;

use crate::core::Vec2;
use crate::domain::config::BodyConfig;
use crate::domain::error::EngineError;
use crate::domain::media::MediumVolume;
use crate::systems::body::{BodyId, PhysicsBody};
use crate::systems::body_system::BodySystem;
use crate::systems::gravity::{GravityDirection, GravityField, GravitySample};
use crate::systems::moving_with::MovingWith;
use crate::systems::oscillators::{Oscillator, OscillatorId, OscillatorRegistry};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "events/events.rs"]
mod events;
#[path = "step/step.rs"]
mod step;
#[path = "step/contacts.rs"]
mod contacts;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/motion.rs"]
mod motion;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "init/scene.rs"]
mod scene;
mod facade;

pub use events::{ContactEvent, ContactPhase, TriggerEvent, TriggerPhase, WorldEvent};
pub use facade::World;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// Ids handed out while loading a scene bundle.
#[derive(Debug, Clone, Default)]
pub struct SceneHandles {
    pub bodies: HashMap<String, BodyId>,
    pub oscillators: Vec<OscillatorId>,
}

impl SceneHandles {
    pub fn body(&self, name: &str) -> Option<BodyId> {
        self.bodies.get(name).copied()
    }
}

/// The simulation world
pub struct WorldCore {
    bodies: BodySystem,
    gravity: GravityField,
    carriers: Vec<MovingWith>,
    oscillators: OscillatorRegistry,
    events: Vec<WorldEvent>,

    // State
    fixed_dt: f32,
    time: f32,
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    pub fn new() -> Self {
        init::create_world_core(init::DEFAULT_FIXED_DT)
    }

    pub fn with_fixed_dt(fixed_dt: f32) -> Self {
        init::create_world_core(fixed_dt)
    }

    /// Replaces the whole world with the scene in `json`.
    pub fn load_scene_json(&mut self, json: &str) -> Result<SceneHandles, EngineError> {
        scene::load_scene_json(self, json)
    }

    pub fn time(&self) -> f32 { self.time }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn fixed_dt(&self) -> f32 { self.fixed_dt }

    pub fn set_fixed_dt(&mut self, dt: f32) {
        settings::set_fixed_dt(self, dt);
    }

    pub fn body_count(&self) -> usize { self.bodies.body_count() }

    pub fn carrier_count(&self) -> usize { self.carriers.len() }

    pub fn oscillator_count(&self) -> usize { self.oscillators.len() }

    pub fn pending_events(&self) -> &[WorldEvent] { &self.events }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === GRAVITY ===

    pub fn gravity(&self) -> GravitySample {
        self.gravity.get()
    }

    pub fn gravity_version(&self) -> u64 {
        self.gravity.version()
    }

    /// Any direction; zero switches gravity off.
    pub fn set_gravity_direction(&mut self, direction: Vec2) {
        settings::set_gravity_direction(self, direction);
    }

    pub fn set_named_gravity(&mut self, direction: GravityDirection) {
        settings::set_gravity_direction(self, direction.to_vector());
    }

    /// Rotates gravity by quarter turns, Left -> Down -> Right -> Up for positive turns.
    pub fn rotate_gravity(&mut self, quarter_turns: i32) {
        settings::rotate_gravity(self, quarter_turns);
    }

    // === BODIES ===

    /// Panics when `config` would produce a zero or non-finite mass.
    pub fn create_body(&mut self, config: &BodyConfig) -> BodyId {
        commands::create_body(self, config)
    }

    /// Removes the body together with its oscillators and carrier role.
    pub fn destroy_body(&mut self, id: BodyId) {
        commands::destroy_body(self, id)
    }

    pub fn contains_body(&self, id: BodyId) -> bool {
        self.bodies.contains(id)
    }

    pub fn body(&self, id: BodyId) -> &PhysicsBody {
        known_body!(self.bodies.get(id), id, "body")
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut PhysicsBody {
        known_body!(self.bodies.get_mut(id), id, "body_mut")
    }

    pub fn bodies(&self) -> impl Iterator<Item = &PhysicsBody> {
        self.bodies.iter()
    }

    pub fn apply_force(&mut self, id: BodyId, force: Vec2) {
        commands::body_op(self, id, "apply_force", |b| b.apply_force(force));
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        commands::body_op(self, id, "set_velocity", |b| b.set_velocity(velocity));
    }

    pub fn add_velocity(&mut self, id: BodyId, delta: Vec2) {
        commands::body_op(self, id, "add_velocity", |b| b.add_velocity(delta));
    }

    pub fn set_position(&mut self, id: BodyId, position: Vec2) {
        commands::body_op(self, id, "set_position", |b| b.set_position(position));
    }

    pub fn set_base_velocity(&mut self, id: BodyId, base: Vec2) {
        commands::body_op(self, id, "set_base_velocity", |b| b.set_base_velocity(base));
    }

    pub fn add_mass(&mut self, id: BodyId, delta: f32) {
        commands::body_op(self, id, "add_mass", |b| b.add_mass(delta));
    }

    pub fn remove_mass(&mut self, id: BodyId, delta: f32) {
        commands::body_op(self, id, "remove_mass", |b| b.remove_mass(delta));
    }

    /// Disabled bodies keep their state but are skipped by every pass.
    pub fn set_enabled(&mut self, id: BodyId, enabled: bool) {
        commands::body_op(self, id, "set_enabled", |b| b.set_enabled(enabled));
    }

    pub fn reset_collision_flags(&mut self, id: BodyId) {
        commands::body_op(self, id, "reset_collision_flags", |b| b.reset_collision_flags());
    }

    /// Ballistic preview for throwing `id` with `launch_velocity`.
    pub fn predict_throw(&self, id: BodyId, origin: Vec2, launch_velocity: Vec2, steps: usize) -> Vec<Vec2> {
        commands::predict_throw(self, id, origin, launch_velocity, steps)
    }

    // === CARRIERS & OSCILLATORS ===

    /// Lets `id` carry bodies that land on top of it. Returns false if it already does.
    pub fn add_carrier(&mut self, id: BodyId, angle_tolerance_deg: f32) -> bool {
        motion::add_carrier(self, id, angle_tolerance_deg)
    }

    pub fn carrier(&self, id: BodyId) -> Option<&MovingWith> {
        self.carriers.iter().find(|c| c.carrier() == id)
    }

    /// Platform starting at the body's current position.
    pub fn add_platform(
        &mut self,
        id: BodyId,
        direction: Vec2,
        amplitude: f32,
        frequency: f32,
        use_cos: bool,
    ) -> OscillatorId {
        motion::add_platform(self, id, direction, amplitude, frequency, use_cos)
    }

    /// `length == 0` uses the current pivot distance; a bob already on the
    /// pivot is an error.
    pub fn add_pendulum(&mut self, id: BodyId, pivot: Vec2, length: f32) -> Result<OscillatorId, EngineError> {
        motion::add_pendulum(self, id, pivot, length)
    }

    /// `origin == None` springs back to the current position.
    pub fn add_spring(&mut self, id: BodyId, omega: f32, gamma: f32, origin: Option<Vec2>) -> OscillatorId {
        motion::add_spring(self, id, omega, gamma, origin)
    }

    pub fn oscillator(&self, id: OscillatorId) -> Option<&Oscillator> {
        self.oscillators.get(id)
    }

    /// Platforms restart their phase, pendulums stop. Returns false for unknown ids.
    pub fn reset_oscillator(&mut self, id: OscillatorId) -> bool {
        self.oscillators.reset(id)
    }

    // === EVENTS ===

    /// Queues one side of a contact. `normal` points from `other` towards `body`.
    pub fn report_contact(&mut self, body: BodyId, other: Option<BodyId>, normal: Vec2, phase: ContactPhase) {
        self.events.push(WorldEvent::Contact(ContactEvent { body, other, normal, phase }));
    }

    /// Queues both sides of a contact; `b` (if any) receives the negated normal.
    pub fn report_collision(&mut self, a: BodyId, b: Option<BodyId>, normal: Vec2, phase: ContactPhase) {
        self.report_contact(a, b, normal, phase);
        if let Some(b) = b {
            self.report_contact(b, Some(a), -normal, phase);
        }
    }

    pub fn report_trigger(&mut self, body: BodyId, volume: MediumVolume, phase: TriggerPhase) {
        self.events.push(WorldEvent::Trigger(TriggerEvent { body, volume, phase }));
    }

    // === STEPPING ===

    /// Step the simulation forward by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    /// Step by the configured fixed timestep
    pub fn step_fixed(&mut self) {
        step::step(self, self.fixed_dt);
    }

    /// Removes every body, carrier, oscillator and queued event.
    pub fn clear(&mut self) {
        commands::clear(self)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
