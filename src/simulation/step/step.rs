use tracing::trace;

use crate::systems::gravity::GravitySample;
use crate::systems::oscillators::MotionContext;

use super::{contacts, PerfTimer, WorldCore};

pub(super) fn step(world: &mut WorldCore, dt: f32) {
    assert!(
        dt > 0.0 && dt.is_finite(),
        "step: dt must be positive and finite, got {dt}"
    );

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.body_count = world.bodies.body_count() as u32;
        world.perf_stats.oscillator_count = world.oscillators.len() as u32;
    }
    let step_start = perf_on.then(PerfTimer::start);

    // Every body reads the same gravity for the whole step
    let gravity = world.gravity.get();
    let time = world.time;

    let mut lap = perf_on.then(PerfTimer::start);

    // === INTEGRATION ===
    // Drag, gravity and collision drag; commits cached velocities before
    // anything reads them.
    world.bodies.integrate_all(&gravity, time, dt);
    if let Some(lap) = lap.as_mut() {
        world.perf_stats.integrate_ms = lap.lap_ms();
    }

    // === OSCILLATORS ===
    run_oscillators(world, &gravity, dt);
    if let Some(lap) = lap.as_mut() {
        world.perf_stats.oscillators_ms = lap.lap_ms();
    }

    // === CONTACTS & TRIGGERS ===
    let tally = contacts::process_events(world);
    if let Some(lap) = lap.as_mut() {
        world.perf_stats.contacts_ms = lap.lap_ms();
        world.perf_stats.contacts_processed = tally.contacts;
        world.perf_stats.triggers_processed = tally.triggers;
        world.perf_stats.events_dropped = tally.dropped;
    }

    // === POSITIONS ===
    world.bodies.integrate_positions(dt);
    if let Some(lap) = lap.as_mut() {
        world.perf_stats.positions_ms = lap.lap_ms();
    }

    world.time += dt;
    world.frame += 1;

    if let Some(t0) = step_start {
        world.perf_stats.step_ms = t0.elapsed_ms();
    }

    trace!(
        frame = world.frame,
        bodies = world.bodies.body_count(),
        contacts = tally.contacts,
        triggers = tally.triggers,
        "step done"
    );
}

/// Runs every motion source in registration order and hands carrier motion
/// to the riders of the moved body.
fn run_oscillators(world: &mut WorldCore, gravity: &GravitySample, dt: f32) {
    let WorldCore {
        bodies,
        carriers,
        oscillators,
        ..
    } = world;

    for (source, _) in oscillators.iter_mut() {
        let body_id = source.body();
        let Some(body) = bodies.get_mut(body_id) else {
            continue;
        };
        if !body.is_enabled() {
            continue;
        }

        let mut ctx = MotionContext { body, gravity, dt };
        let Some(motion) = source.step(&mut ctx) else {
            continue;
        };

        if let Some(carrier) = carriers.iter_mut().find(|c| c.carrier() == body_id) {
            carrier.propagate(bodies, motion.velocity, motion.acceleration, dt);
        }
    }
}
