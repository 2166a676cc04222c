use tracing::debug;

use crate::domain::config::SceneConfig;
use crate::domain::error::EngineError;

use super::{SceneHandles, WorldCore};

/// Parses and validates the bundle before touching the world, so a bad
/// bundle leaves the current world intact.
pub(super) fn load_scene_json(world: &mut WorldCore, json: &str) -> Result<SceneHandles, EngineError> {
    let scene = SceneConfig::from_json(json)?;

    world.clear();
    world.set_fixed_dt(scene.fixed_dt);
    world.set_named_gravity(scene.gravity_direction);

    let mut handles = SceneHandles::default();
    for body in scene.bodies.iter() {
        let id = world.create_body(&body.config);
        if let Some(carrier) = &body.carrier {
            world.add_carrier(id, carrier.angle_tolerance_deg);
        }
        handles.bodies.insert(body.name.clone(), id);
    }

    // names were checked by validate()
    let lookup = |name: &str| handles.body(name).ok_or_else(|| EngineError::UnknownBody(name.to_string()));

    let mut oscillators = Vec::new();
    for p in scene.platforms.iter() {
        let id = lookup(&p.body)?;
        oscillators.push(world.add_platform(id, p.direction, p.amplitude, p.frequency, p.use_cos));
    }
    for p in scene.pendulums.iter() {
        let id = lookup(&p.body)?;
        oscillators.push(world.add_pendulum(id, p.pivot, p.length)?);
    }
    for s in scene.springs.iter() {
        let id = lookup(&s.body)?;
        oscillators.push(world.add_spring(id, s.omega, s.gamma, s.origin));
    }
    handles.oscillators = oscillators;

    debug!(
        bodies = handles.bodies.len(),
        oscillators = handles.oscillators.len(),
        fixed_dt = scene.fixed_dt,
        "scene loaded"
    );
    Ok(handles)
}
