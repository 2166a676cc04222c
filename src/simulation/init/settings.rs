use tracing::debug;

use crate::core::Vec2;
use crate::systems::gravity::rotate_quarter_turns;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_fixed_dt(world: &mut WorldCore, dt: f32) {
    assert!(dt > 0.0 && dt.is_finite(), "set_fixed_dt: dt must be positive and finite, got {dt}");
    world.fixed_dt = dt;
}

pub(super) fn set_gravity_direction(world: &mut WorldCore, direction: Vec2) {
    world.gravity.set_direction(direction);
    let g = world.gravity.get().vector;
    debug!(x = g.x, y = g.y, version = world.gravity.version(), "gravity changed");
}

/// Same turn as `GravityDirection::rotated`, applied to the live vector so
/// diagonal directions rotate too.
pub(super) fn rotate_gravity(world: &mut WorldCore, quarter_turns: i32) {
    let v = rotate_quarter_turns(world.gravity.get().vector, quarter_turns);
    set_gravity_direction(world, v);
}
