use std::f32::consts::{FRAC_PI_2, TAU};

use crate::core::Vec2;
use crate::systems::body::BodyId;

use super::{CarrierMotion, MotionContext, MotionSource};

/// Moves a body along `direction` as `start + dir * A * sin(2*pi*f*t + phase)`.
///
/// The body is steered by position: every step the gap to the target becomes
/// a velocity, and the velocity change becomes the acceleration riders feel.
pub struct MovingPlatform {
    body: BodyId,
    start: Vec2,
    direction: Vec2,
    amplitude: f32,
    frequency: f32,
    use_cos: bool,
    time: f32,
    velocity: Vec2,
}

impl MovingPlatform {
    /// Panics on a zero `direction`.
    pub fn new(
        body: BodyId,
        start: Vec2,
        direction: Vec2,
        amplitude: f32,
        frequency: f32,
        use_cos: bool,
    ) -> Self {
        let direction = finite!(direction, "MovingPlatform::new direction").normalize();
        assert!(
            direction != Vec2::zero(),
            "MovingPlatform::new: zero direction for body {body}"
        );
        Self {
            body,
            start,
            direction,
            amplitude,
            frequency,
            use_cos,
            time: 0.0,
            velocity: Vec2::zero(),
        }
    }

    pub fn elapsed(&self) -> f32 { self.time }
    pub fn velocity(&self) -> Vec2 { self.velocity }
    pub fn start(&self) -> Vec2 { self.start }

    /// Target position for elapsed time `t`.
    pub fn target_at(&self, t: f32) -> Vec2 {
        let phase = if self.use_cos { FRAC_PI_2 } else { 0.0 };
        let progress = (t * TAU * self.frequency + phase).sin() * self.amplitude;
        self.start + self.direction * progress
    }
}

impl MotionSource for MovingPlatform {
    fn body(&self) -> BodyId {
        self.body
    }

    fn step(&mut self, ctx: &mut MotionContext) -> Option<CarrierMotion> {
        let dt = ctx.dt;
        self.time += dt;

        let position = ctx.body.position();
        let wanted_velocity = (self.target_at(self.time) - position) / dt;
        let acceleration = (wanted_velocity - self.velocity) / dt;

        // Euler-Cromer: velocity first, then position with the new velocity
        self.velocity += acceleration * dt;
        ctx.body.set_position(position + self.velocity * dt);

        Some(CarrierMotion {
            velocity: self.velocity,
            acceleration,
        })
    }

    /// Restarts the phase at t = 0.
    fn reset(&mut self) {
        self.time = 0.0;
    }
}
