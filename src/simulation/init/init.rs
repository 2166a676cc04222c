use crate::systems::body_system::BodySystem;
use crate::systems::gravity::GravityField;
use crate::systems::oscillators::OscillatorRegistry;

use super::perf_stats::PerfStats;
use super::WorldCore;

/// Default fixed timestep, matching a 50 Hz physics tick.
pub(super) const DEFAULT_FIXED_DT: f32 = 0.02;

pub(super) fn create_world_core(fixed_dt: f32) -> WorldCore {
    assert!(
        fixed_dt > 0.0 && fixed_dt.is_finite(),
        "WorldCore: fixed dt must be positive and finite, got {fixed_dt}"
    );
    WorldCore {
        bodies: BodySystem::new(),
        gravity: GravityField::new(),
        carriers: Vec::new(),
        oscillators: OscillatorRegistry::new(),
        events: Vec::with_capacity(64),
        fixed_dt,
        time: 0.0,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
