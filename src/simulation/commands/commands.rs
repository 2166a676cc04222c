use tracing::debug;

use crate::core::Vec2;
use crate::domain::config::BodyConfig;
use crate::systems::body::{BodyId, PhysicsBody};
use crate::systems::trajectory::predict_trajectory;

use super::WorldCore;

pub(super) fn create_body(world: &mut WorldCore, config: &BodyConfig) -> BodyId {
    let id = world.bodies.add_body(config);
    debug!(id, kind = ?config.kind, mass = config.mass, "body created");
    id
}

pub(super) fn destroy_body(world: &mut WorldCore, id: BodyId) {
    if !world.bodies.remove_body(id) {
        panic!("destroy_body: unknown body id {id}");
    }
    let oscillators = world.oscillators.remove_for_body(id);
    let carriers_before = world.carriers.len();
    world.carriers.retain(|c| c.carrier() != id);
    // riders pointing at `id` are pruned lazily by the carrier's next propagate

    debug!(
        id,
        oscillators,
        carrier = carriers_before != world.carriers.len(),
        "body destroyed"
    );
}

/// Looks the body up and runs `op` on it; unknown ids are a caller bug.
pub(super) fn body_op(world: &mut WorldCore, id: BodyId, name: &str, op: impl FnOnce(&mut PhysicsBody)) {
    let body = known_body!(world.bodies.get_mut(id), id, name);
    op(body);
}

pub(super) fn predict_throw(
    world: &WorldCore,
    id: BodyId,
    origin: Vec2,
    launch_velocity: Vec2,
    steps: usize,
) -> Vec<Vec2> {
    let body = known_body!(world.bodies.get(id), id, "predict_throw");
    predict_trajectory(
        origin,
        launch_velocity,
        body.effective_gravity(&world.gravity.get()),
        world.fixed_dt,
        steps,
        |_| false,
    )
}

pub(super) fn clear(world: &mut WorldCore) {
    world.bodies.clear();
    world.carriers.clear();
    world.oscillators.clear();
    world.events.clear();
    world.time = 0.0;
    world.frame = 0;
}
