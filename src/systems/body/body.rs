use serde::{Deserialize, Serialize};

use crate::core::Vec2;
use crate::domain::config::BodyConfig;
use crate::domain::media::MediumVolume;
use crate::systems::collision::{resolve_dynamic, resolve_static};
use crate::systems::drag::{apply_quadratic_drag, apply_quick_drag, DragParams, MediumState};
use crate::systems::gravity::GravitySample;

use super::contact::{BodySnapshot, ContactListener, ContactPartner};

pub type BodyId = u32;

/// Seconds a lost base velocity is kept before it starts to fade.
pub const BASE_VELOCITY_RESET_DELAY: f32 = 0.5;
/// Fade rate of the base velocity, per second.
pub const BASE_VELOCITY_RESET_RATE: f32 = 2.0;
/// Squared speed below which a fading base velocity snaps to zero.
pub const BASE_VELOCITY_SNAP_SQ: f32 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// Gravity, drag and collisions act on it.
    #[default]
    Dynamic,
    /// Driven from outside only; treated as infinitely heavy by others.
    Kinematic,
}

/// Smallest positive subnormal `f32`.
const TINIEST_F32: f32 = 1.0e-45;

/// Relative comparison with a floor of eight subnormal steps, so tiny
/// speeds near zero still count as changing.
#[inline]
fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(TINIEST_F32 * 8.0)
}

/// A simulated point mass in 2D.
pub struct PhysicsBody {
    // === Identity ===
    pub id: BodyId,
    kind: BodyKind,
    /// Disabled bodies are skipped entirely (e.g. while held by the player).
    enabled: bool,

    // === Configuration ===
    mass: f32,
    pub gravity_scale: f32,
    pub use_custom_gravity: bool,
    pub custom_gravity: Vec2,
    pub drag_axis_factor: Vec2,
    pub drag_coefficient: f32,
    pub frontal_area: f32,
    pub use_quick_drag: bool,
    /// Fluid density + quick drag, overridable by trigger volumes.
    pub medium: MediumState,
    pub collision_drag_enabled: bool,
    pub collision_drag: f32,
    pub collision_drag_with_dynamics: bool,
    /// <0 phases through, 0..1 bounces, >1 gains energy.
    pub bounciness: f32,
    pub freeze_x: bool,
    pub freeze_y: bool,

    // === State ===
    position: Vec2,
    velocity: Vec2,
    /// Velocity at the end of the last integration, before contacts.
    cached_velocity: Vec2,
    /// Velocity inherited from a carrier.
    base_velocity: Vec2,
    /// Time the base velocity decay was armed, if pending.
    base_decay_since: Option<f32>,
    touching_static: bool,
    touching_dynamic: bool,
    force: Vec2,
    terminal_x: bool,
    terminal_y: bool,
}

impl PhysicsBody {
    pub fn new(id: BodyId, config: &BodyConfig) -> Self {
        let mass = finite!(config.mass, "PhysicsBody::new mass");
        assert!(mass != 0.0, "PhysicsBody::new: zero mass for body {id}");

        Self {
            id,
            kind: config.kind,
            enabled: true,
            mass,
            gravity_scale: config.gravity_scale,
            use_custom_gravity: config.use_custom_gravity,
            custom_gravity: config.custom_gravity,
            drag_axis_factor: config.drag_axis_factor,
            drag_coefficient: config.drag_coefficient,
            frontal_area: config.frontal_area,
            use_quick_drag: config.use_quick_drag,
            medium: MediumState::new(config.fluid_density, config.quick_drag),
            collision_drag_enabled: config.collision_drag_enabled,
            collision_drag: config.collision_drag,
            collision_drag_with_dynamics: config.collision_drag_with_dynamics,
            bounciness: config.bounciness,
            freeze_x: config.freeze_x,
            freeze_y: config.freeze_y,
            position: finite!(config.position, "PhysicsBody::new position"),
            velocity: finite!(config.velocity, "PhysicsBody::new velocity"),
            cached_velocity: config.velocity,
            base_velocity: Vec2::zero(),
            base_decay_since: None,
            touching_static: false,
            touching_dynamic: false,
            force: Vec2::zero(),
            terminal_x: false,
            terminal_y: false,
        }
    }

    // === Accessors ===

    pub fn kind(&self) -> BodyKind { self.kind }
    pub fn is_dynamic(&self) -> bool { self.kind == BodyKind::Dynamic }
    pub fn is_enabled(&self) -> bool { self.enabled }
    pub fn mass(&self) -> f32 { self.mass }
    pub fn position(&self) -> Vec2 { self.position }
    pub fn velocity(&self) -> Vec2 { self.velocity }
    pub fn cached_velocity(&self) -> Vec2 { self.cached_velocity }
    pub fn base_velocity(&self) -> Vec2 { self.base_velocity }
    pub fn is_base_velocity_decaying(&self) -> bool { self.base_decay_since.is_some() }
    pub fn is_touching_static(&self) -> bool { self.touching_static }
    pub fn is_touching_dynamic(&self) -> bool { self.touching_dynamic }
    pub fn pending_force(&self) -> Vec2 { self.force }
    /// Diagnostic only: speed on x did not change over the last step.
    pub fn terminal_velocity_x(&self) -> bool { self.terminal_x }
    pub fn terminal_velocity_y(&self) -> bool { self.terminal_y }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            kind: self.kind,
            mass: self.mass,
            cached_velocity: self.cached_velocity,
            bounciness: self.bounciness,
        }
    }

    // === Commands ===

    /// Accumulates a force, consumed by the next position integration.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += finite!(force, "apply_force");
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = finite!(velocity, "set_velocity");
    }

    pub fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += finite!(delta, "add_velocity");
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = finite!(position, "set_position");
    }

    /// Sets the carrier velocity and cancels any pending decay.
    pub fn set_base_velocity(&mut self, base: Vec2) {
        self.base_decay_since = None;
        self.base_velocity = finite!(base, "set_base_velocity");
    }

    /// Arms the base velocity decay; a decay already pending keeps its start time.
    pub fn reset_base_velocity(&mut self, now: f32) {
        if self.base_decay_since.is_some() {
            return;
        }
        self.base_decay_since = Some(now);
    }

    pub fn add_mass(&mut self, delta: f32) {
        self.set_mass(self.mass + finite!(delta, "add_mass"));
    }

    pub fn remove_mass(&mut self, delta: f32) {
        self.set_mass(self.mass - finite!(delta, "remove_mass"));
    }

    fn set_mass(&mut self, mass: f32) {
        assert!(mass != 0.0, "body {}: mass change would reach zero", self.id);
        self.mass = mass;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Sets a touch flag for the next collision drag pass.
    pub fn mark_touching(&mut self, static_surface: bool) {
        if static_surface {
            self.touching_static = true;
        } else {
            self.touching_dynamic = true;
        }
    }

    pub fn reset_collision_flags(&mut self) {
        self.touching_static = false;
        self.touching_dynamic = false;
    }

    pub fn enter_medium(&mut self, volume: MediumVolume) {
        self.medium.enter(volume);
    }

    pub fn exit_medium(&mut self) {
        self.medium.exit();
    }

    // === Stepping ===

    /// Per-step integration: drag, gravity, collision drag, then the
    /// cached-velocity snapshot. Positions move later, in `integrate_position`.
    pub fn integrate(&mut self, gravity: &GravitySample, time: f32, dt: f32) {
        if !self.enabled {
            return;
        }

        if self.kind == BodyKind::Dynamic {
            self.decay_base_velocity(time, dt);

            if self.use_quick_drag {
                self.apply_gravity(gravity, dt);
                self.velocity =
                    apply_quick_drag(self.velocity, self.base_velocity, self.medium.quick_drag);
            } else {
                let params = self.drag_params();
                self.velocity = apply_quadratic_drag(self.velocity, self.base_velocity, &params, dt);
                self.apply_gravity(gravity, dt);
            }

            if self.collision_drag_enabled
                && (self.touching_static || (self.collision_drag_with_dynamics && self.touching_dynamic))
            {
                self.apply_collision_drag(gravity);
                self.reset_collision_flags();
            }
        }

        self.terminal_x = approximately(self.cached_velocity.x.abs(), self.velocity.x.abs());
        self.terminal_y = approximately(self.cached_velocity.y.abs(), self.velocity.y.abs());
        self.cached_velocity = self.velocity;
    }

    /// Consumes accumulated forces and moves the body by its velocity.
    pub fn integrate_position(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }

        if self.kind == BodyKind::Dynamic {
            self.velocity += self.force * (dt / self.mass);
        }
        self.force = Vec2::zero();

        if self.freeze_x {
            self.velocity.x = 0.0;
        }
        if self.freeze_y {
            self.velocity.y = 0.0;
        }

        self.position += self.velocity * dt;
    }

    fn drag_params(&self) -> DragParams {
        DragParams {
            axis_factor: self.drag_axis_factor,
            coefficient: self.drag_coefficient,
            fluid_density: self.medium.fluid_density,
            frontal_area: self.frontal_area,
            mass: self.mass,
        }
    }

    /// Gravity this body feels: its custom vector, or the field times its scale.
    pub fn effective_gravity(&self, gravity: &GravitySample) -> Vec2 {
        if self.use_custom_gravity {
            self.custom_gravity
        } else {
            gravity.vector * self.gravity_scale
        }
    }

    fn apply_gravity(&mut self, gravity: &GravitySample, dt: f32) {
        self.velocity -= self.effective_gravity(gravity) * dt;
    }

    fn decay_base_velocity(&mut self, time: f32, dt: f32) {
        let Some(since) = self.base_decay_since else {
            return;
        };
        if since + BASE_VELOCITY_RESET_DELAY > time {
            return;
        }

        self.base_velocity = self
            .base_velocity
            .lerp(Vec2::zero(), BASE_VELOCITY_RESET_RATE * dt);

        if self.base_velocity.length_squared() < BASE_VELOCITY_SNAP_SQ {
            self.base_velocity = Vec2::zero();
            self.base_decay_since = None;
        }
    }

    /// Lerps the axis perpendicular to gravity towards the base velocity.
    fn apply_collision_drag(&mut self, gravity: &GravitySample) {
        let vertical_gravity = gravity.vector.x == 0.0
            || (self.use_custom_gravity && self.custom_gravity.x == 0.0);

        if vertical_gravity {
            self.velocity.x += (self.base_velocity.x - self.velocity.x) * self.collision_drag;
        } else {
            self.velocity.y += (self.base_velocity.y - self.velocity.y) * self.collision_drag;
        }
    }
}

impl ContactListener for PhysicsBody {
    fn on_contact_enter(&mut self, partner: &ContactPartner, normal: Vec2) {
        if self.kind == BodyKind::Kinematic || !self.enabled {
            return;
        }
        let normal = finite!(normal, "on_contact_enter normal");

        self.velocity = match partner {
            ContactPartner::Body(other) if other.kind == BodyKind::Dynamic => {
                resolve_dynamic(&self.snapshot(), other, normal)
            }
            _ => resolve_static(self.cached_velocity, normal, self.bounciness),
        };
    }

    fn on_contact_stay(&mut self, partner: &ContactPartner, _normal: Vec2) {
        self.mark_touching(partner.is_static());
    }

    fn on_contact_exit(&mut self, _partner: &ContactPartner) {}
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
