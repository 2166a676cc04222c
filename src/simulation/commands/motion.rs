use tracing::{debug, warn};

use crate::core::Vec2;
use crate::domain::error::EngineError;
use crate::systems::body::{BodyId, PhysicsBody};
use crate::systems::moving_with::MovingWith;
use crate::systems::oscillators::{
    DampedHarmonicOscillator, MovingPlatform, Oscillator, OscillatorId, Pendulum,
};

use super::WorldCore;

pub(super) fn add_carrier(world: &mut WorldCore, id: BodyId, angle_tolerance_deg: f32) -> bool {
    known_body!(world.bodies.get(id), id, "add_carrier");
    if world.carriers.iter().any(|c| c.carrier() == id) {
        return false;
    }
    let angle = finite!(angle_tolerance_deg, "add_carrier angle");
    world.carriers.push(MovingWith::new(id, angle));
    debug!(id, angle, "carrier added");
    true
}

/// Platforms and pendulums overwrite the position every step; a dynamic body
/// would still integrate gravity on top of that.
fn warn_if_dynamic(body: &PhysicsBody, what: &str) {
    if body.is_dynamic() {
        warn!(id = body.id, what, "kinematic motion source attached to a dynamic body");
    }
}

pub(super) fn add_platform(
    world: &mut WorldCore,
    id: BodyId,
    direction: Vec2,
    amplitude: f32,
    frequency: f32,
    use_cos: bool,
) -> OscillatorId {
    let body = known_body!(world.bodies.get(id), id, "add_platform");
    warn_if_dynamic(body, "platform");
    let platform = MovingPlatform::new(id, body.position(), direction, amplitude, frequency, use_cos);
    world.oscillators.add(Oscillator::Platform(platform))
}

pub(super) fn add_pendulum(
    world: &mut WorldCore,
    id: BodyId,
    pivot: Vec2,
    length: f32,
) -> Result<OscillatorId, EngineError> {
    let body = known_body!(world.bodies.get(id), id, "add_pendulum");
    warn_if_dynamic(body, "pendulum");
    let pendulum = Pendulum::new(id, body.position(), pivot, length)?;
    Ok(world.oscillators.add(Oscillator::Pendulum(pendulum)))
}

pub(super) fn add_spring(
    world: &mut WorldCore,
    id: BodyId,
    omega: f32,
    gamma: f32,
    origin: Option<Vec2>,
) -> OscillatorId {
    let body = known_body!(world.bodies.get(id), id, "add_spring");
    let origin = origin.unwrap_or_else(|| body.position());
    let spring = DampedHarmonicOscillator::new(id, origin, omega, gamma);
    debug!(body = id, omega, gamma, regime = ?spring.regime(), "spring attached");
    world.oscillators.add(Oscillator::Spring(spring))
}
