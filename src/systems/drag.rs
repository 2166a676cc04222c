//! Drag models
//!
//! Two per-body modes, only one of which runs per step:
//! - quadratic: `axis * Cd * rho * A * v^2 / (2m)` per axis, explicit Euler every step
//! - quick: lerp towards the base velocity by a designer factor
//!
//! Both work on velocity relative to the base velocity a carrier hands down.

use crate::core::Vec2;
use crate::domain::media::MediumVolume;

/// Inputs of the quadratic drag formula.
#[derive(Clone, Copy, Debug)]
pub struct DragParams {
    pub axis_factor: Vec2,
    pub coefficient: f32,
    pub fluid_density: f32,
    pub frontal_area: f32,
    pub mass: f32,
}

/// Host-engine sign: zero counts as positive.
#[inline]
fn sign(v: f32) -> f32 {
    if v >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Drag deceleration magnitude on one axis for relative speed `v`.
#[inline]
pub fn axis_deceleration(axis_factor: f32, params: &DragParams, v: f32) -> f32 {
    axis_factor * params.coefficient * params.fluid_density * params.frontal_area * v * v
        / (2.0 * params.mass)
}

/// One explicit Euler drag step.
///
/// The per-axis change is capped at the relative speed so drag alone never
/// flips the direction of travel, even for huge `dt` or tiny masses.
pub fn apply_quadratic_drag(velocity: Vec2, base: Vec2, params: &DragParams, dt: f32) -> Vec2 {
    let rel = velocity - base;

    let dx = axis_deceleration(params.axis_factor.x, params, rel.x) * dt;
    let dy = axis_deceleration(params.axis_factor.y, params, rel.y) * dt;

    Vec2::new(
        velocity.x - sign(rel.x) * dx.min(rel.x.abs()),
        velocity.y - sign(rel.y) * dy.min(rel.y.abs()),
    )
}

/// `lerp(velocity, base, factor)` with no clamping: factors above 1 overshoot
/// past the base velocity, negative factors push away from it.
#[inline]
pub fn apply_quick_drag(velocity: Vec2, base: Vec2, factor: f32) -> Vec2 {
    velocity.lerp(base, factor)
}

/// Fluid density and quick drag currently acting on a body.
///
/// Trigger volumes override both values through a single remembered slot:
/// entering a second volume before leaving the first overwrites the slot,
/// so overlapping volumes do not restore correctly.
#[derive(Clone, Copy, Debug)]
pub struct MediumState {
    pub fluid_density: f32,
    pub quick_drag: f32,
    default_density: f32,
    remembered_quick_drag: f32,
}

impl MediumState {
    pub fn new(fluid_density: f32, quick_drag: f32) -> Self {
        Self {
            fluid_density,
            quick_drag,
            default_density: fluid_density,
            remembered_quick_drag: quick_drag,
        }
    }

    pub fn enter(&mut self, volume: MediumVolume) {
        self.remembered_quick_drag = self.quick_drag;
        self.quick_drag = volume.quick_drag;
        self.fluid_density = volume.density;
    }

    pub fn exit(&mut self) {
        self.fluid_density = self.default_density;
        self.quick_drag = self.remembered_quick_drag;
    }
}
