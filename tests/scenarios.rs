use std::fs;

use gravitas_engine::simulation::WorldEvent;
use gravitas_engine::systems::gravity::GRAVITY_ACCELERATION;
use gravitas_engine::{BodyConfig, ContactPhase, GravityDirection, Vec2, WorldCore};

fn close(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn free_fall_of_a_heavy_body() {
    let mut world = WorldCore::new();
    let id = world.create_body(&BodyConfig::frictionless().with_mass(2.0));
    for _ in 0..10 {
        world.step(0.02);
    }
    assert!(close(world.body(id).velocity().y, -GRAVITY_ACCELERATION * 0.2, 1e-4));
}

#[test]
fn switching_gravity_mid_fall() {
    let mut world = WorldCore::new();
    let id = world.create_body(&BodyConfig::frictionless());
    for _ in 0..5 {
        world.step_fixed();
    }
    world.set_named_gravity(GravityDirection::Left);
    for _ in 0..5 {
        world.step_fixed();
    }
    // Left pulls towards -x; y keeps the speed it already had
    let v = world.body(id).velocity();
    assert!(close(v.x, -GRAVITY_ACCELERATION * 0.1, 1e-4));
    assert!(close(v.y, -GRAVITY_ACCELERATION * 0.1, 1e-4));
}

#[test]
fn quadratic_drag_approaches_terminal_velocity() {
    let mut world = WorldCore::new();
    let id = world.create_body(&BodyConfig::default());
    for _ in 0..2000 {
        world.step_fixed();
    }
    // g = Cd * rho * A * v^2 / (2m)
    let terminal = (2.0 * GRAVITY_ACCELERATION / 1.225f32).sqrt();
    let body = world.body(id);
    assert!(close(body.velocity().y, -terminal, 0.05));
    assert!(body.terminal_velocity_y());
}

#[test]
fn static_bounce_keeps_speed() {
    let mut world = WorldCore::new();
    world.set_gravity_direction(Vec2::zero());
    let id = world.create_body(&BodyConfig::frictionless().with_velocity(Vec2::new(0.0, -5.0)));
    world.report_contact(id, None, Vec2::new(0.0, 1.0), ContactPhase::Enter);
    assert!(matches!(world.pending_events(), [WorldEvent::Contact(_)]));
    world.step_fixed();
    let v = world.body(id).velocity();
    assert!(close(v.length(), 5.0, 1e-5));
    assert!(v.y > 0.0);
}

#[test]
fn demo_scene_runs() {
    let json = fs::read_to_string("demos/scenes/lift.json").expect("demo scene should exist");
    let mut world = WorldCore::new();
    let handles = world.load_scene_json(&json).expect("demo scene should load");

    let lift = handles.body("lift").unwrap();
    let player = handles.body("player").unwrap();
    let bobber = handles.body("bobber").unwrap();
    assert_eq!(world.body_count(), 5);
    assert_eq!(world.carrier_count(), 2);
    assert_eq!(world.oscillator_count(), 3);

    world.report_collision(lift, Some(player), Vec2::new(0.0, -1.0), ContactPhase::Enter);
    for _ in 0..100 {
        world.step_fixed();
    }

    assert_eq!(world.carrier(lift).unwrap().riders(), &[player]);
    assert_eq!(
        world.body(player).base_velocity(),
        world.carrier(lift).unwrap().last_velocity()
    );
    for body in world.bodies() {
        assert!(body.position().is_finite() && body.velocity().is_finite());
    }
    assert_eq!(world.body(bobber).position().x, 6.0);
}
