use crate::core::Vec2;
use crate::systems::body::BodyId;

use super::{CarrierMotion, MotionContext, MotionSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DampingRegime {
    Under,
    Critical,
    Over,
}

/// Spring towards `origin` with viscous damping:
/// `F = k(origin - pos) - b * cached_velocity`, `k = omega^2 m`, `b = gamma m`.
pub struct DampedHarmonicOscillator {
    body: BodyId,
    pub omega: f32,
    pub gamma: f32,
    origin: Vec2,
}

impl DampedHarmonicOscillator {
    pub fn new(body: BodyId, origin: Vec2, omega: f32, gamma: f32) -> Self {
        Self {
            body,
            omega: finite!(omega, "DampedHarmonicOscillator::new omega"),
            gamma: finite!(gamma, "DampedHarmonicOscillator::new gamma"),
            origin: finite!(origin, "DampedHarmonicOscillator::new origin"),
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Damping rate at which the body returns fastest without overshooting.
    pub fn critical_damping(&self) -> f32 {
        (4.0 * self.omega * self.omega).sqrt()
    }

    pub fn regime(&self) -> DampingRegime {
        let critical = self.critical_damping();
        if (self.gamma - critical).abs() <= 1e-5 * critical.max(1.0) {
            DampingRegime::Critical
        } else if self.gamma < critical {
            DampingRegime::Under
        } else {
            DampingRegime::Over
        }
    }

    pub fn force_on(&self, mass: f32, position: Vec2, cached_velocity: Vec2) -> Vec2 {
        let k = self.omega * self.omega * mass;
        let b = self.gamma * mass;
        (self.origin - position) * k - cached_velocity * b
    }
}

impl MotionSource for DampedHarmonicOscillator {
    fn body(&self) -> BodyId {
        self.body
    }

    fn step(&mut self, ctx: &mut MotionContext) -> Option<CarrierMotion> {
        let body = &mut *ctx.body;
        let force = self.force_on(body.mass(), body.position(), body.cached_velocity());
        body.apply_force(force);
        None
    }

    /// Nothing to rewind; the spring is stateless.
    fn reset(&mut self) {}
}
