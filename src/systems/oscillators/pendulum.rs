use crate::core::Vec2;
use crate::domain::error::EngineError;
use crate::systems::body::BodyId;
use crate::systems::gravity::GRAVITY_ACCELERATION;

use super::{CarrierMotion, MotionContext, MotionSource};

/// Per-second fraction of velocity lost to air friction.
const PENDULUM_DAMPING: f32 = 0.2;

/// A bob swinging on a rigid rod around `pivot`.
///
/// The pendulum owns its velocity; the body is only positioned.
pub struct Pendulum {
    body: BodyId,
    pivot: Vec2,
    length: f32,
    velocity: Vec2,
}

impl Pendulum {
    /// `length == 0` takes the current pivot distance. A bob resting on
    /// its pivot has no rod and is rejected.
    pub fn new(body: BodyId, position: Vec2, pivot: Vec2, length: f32) -> Result<Self, EngineError> {
        let pivot = finite!(pivot, "Pendulum::new pivot");
        let length = if length == 0.0 {
            (pivot - position).length()
        } else {
            length
        };
        if !(length > 0.0 && length.is_finite()) {
            return Err(EngineError::invalid(
                format!("pendulum {body} length"),
                format!("{length} (rod length must be > 0)"),
            ));
        }

        Ok(Self {
            body,
            pivot,
            length,
            velocity: Vec2::zero(),
        })
    }

    pub fn pivot(&self) -> Vec2 { self.pivot }
    pub fn length(&self) -> f32 { self.length }
    pub fn velocity(&self) -> Vec2 { self.velocity }
}

impl MotionSource for Pendulum {
    fn body(&self) -> BodyId {
        self.body
    }

    fn step(&mut self, ctx: &mut MotionContext) -> Option<CarrierMotion> {
        let dt = ctx.dt;
        let position = ctx.body.position();

        self.velocity -= ctx.gravity.vector * dt;

        let tension = (self.pivot - position).normalize();
        let weight = (-tension).dot(ctx.gravity.pull_direction());
        let tangent = Vec2::new(-tension.y, tension.x);
        let perpendicular = self.velocity.length() * self.velocity.normalize().dot(tangent);

        let acceleration = tension * (GRAVITY_ACCELERATION * weight)
            + tension * (perpendicular * perpendicular / self.length);
        self.velocity += acceleration * dt;
        self.velocity = self.velocity.lerp(Vec2::zero(), PENDULUM_DAMPING * dt);

        ctx.body.set_position(position + self.velocity * dt);

        Some(CarrierMotion {
            velocity: self.velocity,
            acceleration,
        })
    }

    /// Stops the swing where it is.
    fn reset(&mut self) {
        self.velocity = Vec2::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::BodyConfig;
    use crate::systems::body::PhysicsBody;
    use crate::systems::gravity::GravityField;

    fn bob_at(position: Vec2) -> PhysicsBody {
        PhysicsBody::new(7, &BodyConfig::kinematic().at(position))
    }

    #[test]
    fn length_defaults_to_pivot_distance() {
        let p = Pendulum::new(7, Vec2::new(3.0, 0.0), Vec2::new(0.0, 4.0), 0.0).unwrap();
        assert!((p.length() - 5.0).abs() < 1e-5);
        let q = Pendulum::new(7, Vec2::new(3.0, 0.0), Vec2::new(0.0, 4.0), 2.0).unwrap();
        assert_eq!(q.length(), 2.0);
    }

    #[test]
    fn bob_on_the_pivot_has_no_rod() {
        let at = Vec2::new(1.0, 1.0);
        assert!(matches!(
            Pendulum::new(7, at, at, 0.0),
            Err(EngineError::InvalidValue { .. })
        ));
        assert!(Pendulum::new(7, at, at, -1.0).is_err());
        assert!(Pendulum::new(7, at, at, 0.5).is_ok());
    }

    #[test]
    fn hanging_bob_stays_at_rest() {
        // pivot above the bob along the pull direction (-y)
        let mut body = bob_at(Vec2::zero());
        let mut pendulum = Pendulum::new(7, Vec2::zero(), Vec2::new(0.0, 2.0), 0.0).unwrap();
        let g = GravityField::new().get();

        for _ in 0..50 {
            let mut ctx = MotionContext { body: &mut body, gravity: &g, dt: 0.02 };
            pendulum.step(&mut ctx);
        }
        assert!(body.position().length() < 1e-3);
        assert!(pendulum.velocity().length() < 1e-3);
    }

    #[test]
    fn displaced_bob_swings_towards_the_bottom() {
        let start = Vec2::new(1.0, 1.0);
        let pivot = Vec2::new(0.0, 2.0);
        let mut body = bob_at(start);
        let mut pendulum = Pendulum::new(7, start, pivot, 0.0).unwrap();
        let g = GravityField::new().get();

        let mut min_x = start.x;
        for _ in 0..40 {
            let mut ctx = MotionContext { body: &mut body, gravity: &g, dt: 0.01 };
            let motion = pendulum.step(&mut ctx).unwrap();
            assert_eq!(motion.velocity, pendulum.velocity());
            min_x = min_x.min(body.position().x);
        }
        assert!(min_x < start.x - 0.1, "bob should move towards x = 0, got {min_x}");
        // rod stays roughly taut
        let rod = (body.position() - pivot).length();
        assert!((rod - pendulum.length()).abs() < 0.2, "rod length drifted to {rod}");
    }

    #[test]
    fn reset_zeroes_velocity_only() {
        let start = Vec2::new(1.0, 1.0);
        let mut body = bob_at(start);
        let mut pendulum = Pendulum::new(7, start, Vec2::new(0.0, 2.0), 0.0).unwrap();
        let g = GravityField::new().get();
        for _ in 0..10 {
            let mut ctx = MotionContext { body: &mut body, gravity: &g, dt: 0.02 };
            pendulum.step(&mut ctx);
        }
        let moved_to = body.position();
        pendulum.reset();
        assert_eq!(pendulum.velocity(), Vec2::zero());
        assert_eq!(body.position(), moved_to);
    }
}
