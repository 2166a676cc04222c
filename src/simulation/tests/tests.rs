use super::*;
use crate::domain::media::{Medium, MediumVolume};
use crate::systems::oscillators::Oscillator;

fn zero_g_world() -> WorldCore {
    let mut world = WorldCore::new();
    world.set_gravity_direction(Vec2::zero());
    world
}

#[test]
fn dropped_body_reaches_expected_speed() {
    let mut world = WorldCore::new();
    let id = world.create_body(&BodyConfig::frictionless().with_mass(2.0));

    for _ in 0..10 {
        world.step(0.02);
    }

    let v = world.body(id).velocity();
    assert!((v.y - -1.962).abs() < 1e-4, "vy = {}", v.y);
    assert_eq!(v.x, 0.0);
    assert_eq!(world.frame(), 10);
    assert!((world.time() - 0.2).abs() < 1e-5);
}

#[test]
fn equal_masses_swap_velocities_head_on() {
    let mut world = zero_g_world();
    let a = world.create_body(&BodyConfig::frictionless().with_velocity(Vec2::new(2.0, 0.0)));
    let b = world.create_body(
        &BodyConfig::frictionless()
            .at(Vec2::new(1.0, 0.0))
            .with_velocity(Vec2::new(-2.0, 0.0)),
    );

    world.report_collision(a, Some(b), Vec2::new(1.0, 0.0), ContactPhase::Enter);
    world.step(0.02);

    assert!((world.body(a).velocity().x - -2.0).abs() < 1e-3);
    assert!((world.body(b).velocity().x - 2.0).abs() < 1e-3);
}

#[test]
fn both_sides_resolve_from_committed_cached_velocities() {
    // Each side reads the other's cached velocity, which the first
    // resolution does not touch.
    let mut world = zero_g_world();
    let a = world.create_body(&BodyConfig::frictionless().with_velocity(Vec2::new(3.0, 0.0)));
    let b = world.create_body(&BodyConfig::frictionless().with_mass(3.0));

    world.report_collision(a, Some(b), Vec2::new(-1.0, 0.0), ContactPhase::Enter);
    world.step(0.02);

    // a: (1*3 + 3*0 + 3*1*(0 - 3)) / 4 = -1.5 ; b: (3*0 + 1*3 + 1*1*(3 - 0)) / 4 = 1.5
    assert!((world.body(a).velocity().x - -1.5).abs() < 1e-4);
    assert!((world.body(b).velocity().x - 1.5).abs() < 1e-4);
}

#[test]
fn gravity_direction_keeps_magnitude() {
    let mut world = WorldCore::new();
    let dirs = [
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, -1.0),
        Vec2::new(0.6, 0.8),
        Vec2::new(-3.0, 4.0),
    ];
    for d in dirs {
        world.set_gravity_direction(d);
        let g = world.gravity().vector;
        assert!((g.length() - 9.81).abs() < 1e-4);
        let n = d.normalize();
        assert!((g.normalize() - n).length() < 1e-5);
    }
    assert_eq!(world.gravity_version(), dirs.len() as u64);

    world.set_gravity_direction(Vec2::zero());
    assert_eq!(world.gravity().vector, Vec2::zero());
}

#[test]
fn gravity_rotates_in_quarter_turns() {
    let mut world = WorldCore::new();
    world.set_named_gravity(GravityDirection::Left);
    world.rotate_gravity(1);
    let g = world.gravity().vector;
    assert!((g - GravityDirection::Down.to_vector() * 9.81).length() < 1e-4);

    world.rotate_gravity(-2);
    let g = world.gravity().vector;
    assert!((g - GravityDirection::Up.to_vector() * 9.81).length() < 1e-4);
}

#[test]
fn world_rotation_agrees_with_named_rotation() {
    for start in [GravityDirection::Left, GravityDirection::Down, GravityDirection::Right, GravityDirection::Up] {
        for turns in [-3, -1, 1, 2, 7] {
            let mut world = WorldCore::new();
            world.set_named_gravity(start);
            world.rotate_gravity(turns);
            assert_eq!(
                GravityDirection::from_vector(world.gravity().vector),
                Some(start.rotated(turns)),
                "{start:?} turned {turns}"
            );
        }
    }
}

#[test]
fn kinematic_body_velocity_is_untouched() {
    let mut world = WorldCore::new();
    let mut config = BodyConfig::kinematic().with_velocity(Vec2::new(1.5, -0.5)).with_bounciness(3.0);
    config.drag_coefficient = 4.0;
    config.gravity_scale = 10.0;
    let id = world.create_body(&config);

    world.report_contact(id, None, Vec2::new(0.0, 1.0), ContactPhase::Enter);
    for _ in 0..20 {
        world.step_fixed();
    }

    let body = world.body(id);
    assert_eq!(body.velocity(), Vec2::new(1.5, -0.5));
    assert!((body.position().x - 1.5 * 0.4).abs() < 1e-4);
}

#[test]
fn rider_inherits_platform_motion() {
    let mut world = zero_g_world();
    let platform = world.create_body(&BodyConfig::kinematic());
    assert!(world.add_carrier(platform, 10.0));
    assert!(!world.add_carrier(platform, 10.0));
    world.add_platform(platform, Vec2::new(1.0, 0.0), 1.0, 0.5, false);

    let rider = world.create_body(&BodyConfig::frictionless().at(Vec2::new(0.0, 1.0)));

    // rider on top: seen from the platform the normal points down
    world.report_collision(platform, Some(rider), Vec2::new(0.0, -1.0), ContactPhase::Enter);
    world.step_fixed();
    assert_eq!(world.carrier(platform).unwrap().riders(), &[rider]);
    let boarded_at = world.carrier(platform).unwrap().last_velocity();

    for _ in 0..20 {
        world.step_fixed();
    }

    let carried = world.carrier(platform).unwrap().last_velocity();
    let body = world.body(rider);
    assert_eq!(body.base_velocity(), carried);
    assert!((body.velocity() - (carried - boarded_at)).length() < 1e-3);

    let Some(Oscillator::Platform(p)) = world.oscillator(1) else {
        panic!("platform oscillator missing");
    };
    assert_eq!(p.velocity(), carried);
}

#[test]
fn side_contact_does_not_board() {
    let mut world = zero_g_world();
    let platform = world.create_body(&BodyConfig::kinematic());
    world.add_carrier(platform, 10.0);
    let rider = world.create_body(&BodyConfig::frictionless());

    world.report_contact(platform, Some(rider), Vec2::new(1.0, 0.0), ContactPhase::Enter);
    world.step_fixed();
    assert!(world.carrier(platform).unwrap().riders().is_empty());
}

#[test]
fn leaving_a_carrier_arms_base_velocity_decay() {
    let mut world = zero_g_world();
    let platform = world.create_body(&BodyConfig::kinematic());
    world.add_carrier(platform, 10.0);
    world.add_platform(platform, Vec2::new(1.0, 0.0), 2.0, 0.25, true);
    let rider = world.create_body(&BodyConfig::frictionless());

    world.report_contact(platform, Some(rider), Vec2::new(0.0, -1.0), ContactPhase::Enter);
    for _ in 0..5 {
        world.step_fixed();
    }
    assert!(world.body(rider).base_velocity() != Vec2::zero());

    world.report_contact(platform, Some(rider), Vec2::new(0.0, -1.0), ContactPhase::Exit);
    world.step_fixed();
    assert!(world.carrier(platform).unwrap().riders().is_empty());
    assert!(world.body(rider).is_base_velocity_decaying());

    // delay plus fade
    for _ in 0..200 {
        world.step_fixed();
    }
    assert_eq!(world.body(rider).base_velocity(), Vec2::zero());
    assert!(!world.body(rider).is_base_velocity_decaying());
}

#[test]
fn trigger_volume_overrides_quick_drag_until_exit() {
    let mut world = zero_g_world();
    let id = world.create_body(&BodyConfig::default().with_quick_drag(0.05).with_velocity(Vec2::new(10.0, 0.0)));

    world.report_trigger(id, MediumVolume::of(Medium::Water), TriggerPhase::Enter);
    world.step_fixed();
    // trigger lands after this step's integration
    assert!((world.body(id).velocity().x - 9.5).abs() < 1e-4);
    assert_eq!(world.body(id).medium.fluid_density, 15.0);

    world.step_fixed();
    assert!((world.body(id).velocity().x - 9.5 * 0.2).abs() < 1e-4);

    world.report_trigger(id, MediumVolume::of(Medium::Water), TriggerPhase::Exit);
    world.step_fixed();
    world.step_fixed();
    assert!((world.body(id).velocity().x - 9.5 * 0.2 * 0.2 * 0.95).abs() < 1e-4);
    assert_eq!(world.body(id).medium.fluid_density, 1.225);
}

#[test]
fn spring_with_critical_damping_settles_at_origin() {
    let mut world = zero_g_world();
    let id = world.create_body(&BodyConfig::frictionless().at(Vec2::new(1.0, 0.0)));
    world.add_spring(id, 2.0, 4.0, Some(Vec2::zero()));

    let mut min_x = f32::MAX;
    for _ in 0..250 {
        world.step_fixed();
        min_x = min_x.min(world.body(id).position().x);
    }
    assert!(world.body(id).position().length() < 0.01);
    assert!(min_x > -0.05, "critically damped spring overshot to {min_x}");
}

#[test]
fn undamped_spring_oscillates_around_origin() {
    let mut world = zero_g_world();
    let mut config = BodyConfig::frictionless().at(Vec2::new(0.0, 1.0));
    config.freeze_x = true;
    let id = world.create_body(&config);
    world.add_spring(id, 2.0, 0.0, Some(Vec2::zero()));

    let mut crossed = false;
    for _ in 0..200 {
        world.step_fixed();
        crossed |= world.body(id).position().y < -0.5;
        assert!(world.body(id).position().y.abs() < 1.2);
        assert_eq!(world.body(id).position().x, 0.0);
    }
    assert!(crossed);
}

#[test]
fn destroy_body_drops_its_motion_and_events() {
    let mut world = zero_g_world();
    world.enable_perf_metrics(true);
    let platform = world.create_body(&BodyConfig::kinematic());
    world.add_carrier(platform, 10.0);
    world.add_platform(platform, Vec2::new(0.0, 1.0), 1.0, 1.0, false);
    let other = world.create_body(&BodyConfig::default());

    world.report_contact(platform, Some(other), Vec2::new(0.0, -1.0), ContactPhase::Enter);
    world.destroy_body(platform);
    assert_eq!(world.oscillator_count(), 0);
    assert_eq!(world.carrier_count(), 0);
    assert_eq!(world.body_count(), 1);

    world.step_fixed();
    let stats = world.get_perf_stats();
    assert_eq!(stats.events_dropped(), 1);
    assert_eq!(stats.contacts_processed(), 0);
    assert!(world.pending_events().is_empty());
}

#[test]
fn trigger_for_destroyed_body_is_dropped_without_blocking_the_queue() {
    let mut world = zero_g_world();
    world.enable_perf_metrics(true);
    let gone = world.create_body(&BodyConfig::default());
    let diver = world.create_body(&BodyConfig::default());
    let water = MediumVolume::of(Medium::Water);

    world.report_trigger(gone, water, TriggerPhase::Enter);
    world.report_trigger(diver, water, TriggerPhase::Enter);
    world.destroy_body(gone);
    world.step_fixed();

    let stats = world.get_perf_stats();
    assert_eq!(stats.events_dropped(), 1);
    assert_eq!(stats.triggers_processed(), 1);
    assert_eq!(world.body(diver).medium.fluid_density, water.density);
}

#[test]
fn contact_with_destroyed_partner_resolves_as_static() {
    let mut world = zero_g_world();
    let a = world.create_body(&BodyConfig::frictionless().with_velocity(Vec2::new(0.0, -4.0)));
    let b = world.create_body(&BodyConfig::default());
    world.report_contact(a, Some(b), Vec2::new(0.0, 1.0), ContactPhase::Enter);
    world.destroy_body(b);
    world.step_fixed();
    assert!((world.body(a).velocity().y - 4.0).abs() < 1e-4);
}

#[test]
fn disabled_body_is_frozen_in_place() {
    let mut world = WorldCore::new();
    let id = world.create_body(&BodyConfig::default().at(Vec2::new(2.0, 3.0)));
    world.set_enabled(id, false);
    world.apply_force(id, Vec2::new(100.0, 0.0));
    for _ in 0..10 {
        world.step_fixed();
    }
    let body = world.body(id);
    assert_eq!(body.position(), Vec2::new(2.0, 3.0));
    assert_eq!(body.velocity(), Vec2::zero());

    world.set_enabled(id, true);
    world.step_fixed();
    assert!(world.body(id).velocity().y < 0.0);
}

#[test]
fn perf_stats_are_zero_when_disabled() {
    let mut world = WorldCore::new();
    world.create_body(&BodyConfig::default());
    world.step_fixed();
    assert_eq!(world.get_perf_stats().body_count(), 0);

    world.enable_perf_metrics(true);
    world.report_contact(1, None, Vec2::new(0.0, 1.0), ContactPhase::Stay);
    world.step_fixed();
    let stats = world.get_perf_stats();
    assert_eq!(stats.body_count(), 1);
    assert_eq!(stats.contacts_processed(), 1);
    assert!(stats.step_ms() >= 0.0);
}

#[test]
fn scene_json_builds_the_world() {
    let json = r#"{
        "fixedDt": 0.01,
        "gravityDirection": "left",
        "bodies": [
            { "name": "lift", "kind": "kinematic", "carrier": {} },
            { "name": "crate", "mass": 2.0, "position": { "x": 0.0, "y": 1.0 } }
        ],
        "platforms": [ { "body": "lift", "direction": { "x": 0.0, "y": 1.0 }, "amplitude": 2.0 } ],
        "springs": [ { "body": "crate", "omega": 1.0 } ]
    }"#;

    let mut world = WorldCore::new();
    world.create_body(&BodyConfig::default());
    let handles = world.load_scene_json(json).unwrap();

    assert_eq!(world.body_count(), 2);
    assert_eq!(world.fixed_dt(), 0.01);
    assert!((world.gravity().vector.x - 9.81).abs() < 1e-5);
    assert_eq!(handles.oscillators.len(), 2);

    let lift = handles.body("lift").unwrap();
    let crate_id = handles.body("crate").unwrap();
    assert!(world.carrier(lift).is_some());
    assert_eq!(world.body(crate_id).mass(), 2.0);
    assert_eq!(world.body(crate_id).position(), Vec2::new(0.0, 1.0));

    world.step_fixed();
    assert!(world.body(lift).position().y > 0.0);
}

#[test]
fn bad_scene_leaves_world_untouched() {
    let mut world = WorldCore::new();
    let id = world.create_body(&BodyConfig::default());

    let err = world
        .load_scene_json(r#"{ "bodies": [ { "name": "a", "mass": 0.0 } ] }"#)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidValue { .. }));
    assert!(world.load_scene_json("not json").is_err());
    assert!(world
        .load_scene_json(r#"{ "springs": [ { "body": "ghost", "omega": 1.0 } ] }"#)
        .is_err());

    assert!(world.contains_body(id));
    assert_eq!(world.body_count(), 1);
}

#[test]
fn pendulum_resting_on_its_pivot_keeps_the_old_world() {
    let mut world = WorldCore::new();
    let id = world.create_body(&BodyConfig::kinematic());
    world.set_fixed_dt(0.01);

    let err = world
        .load_scene_json(
            r#"{ "fixedDt": 0.05,
                 "bodies": [ { "name": "bob", "kind": "kinematic" } ],
                 "pendulums": [ { "body": "bob", "pivot": { "x": 0.0, "y": 0.0 } } ] }"#,
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidValue { .. }));
    assert!(world.contains_body(id));
    assert_eq!(world.body_count(), 1);
    assert_eq!(world.oscillator_count(), 0);
    assert_eq!(world.fixed_dt(), 0.01);

    // same shape through the direct call
    assert!(world.add_pendulum(id, Vec2::zero(), 0.0).is_err());
    assert_eq!(world.oscillator_count(), 0);
}

#[test]
fn predict_throw_uses_body_gravity_scale() {
    let mut world = WorldCore::new();
    let mut config = BodyConfig::default();
    config.gravity_scale = 0.0;
    let id = world.create_body(&config);

    let path = world.predict_throw(id, Vec2::zero(), Vec2::new(1.0, 0.0), 6);
    assert_eq!(path.len(), 6);
    assert!((path[5].x - 5.0 * 0.02).abs() < 1e-6);
    assert_eq!(path[5].y, 0.0);
}

#[test]
fn predict_throw_follows_custom_gravity() {
    let mut world = WorldCore::new();
    let mut config = BodyConfig::frictionless();
    config.use_custom_gravity = true;
    config.custom_gravity = Vec2::new(-4.0, 0.0);
    config.gravity_scale = 3.0;
    let id = world.create_body(&config);

    let path = world.predict_throw(id, Vec2::zero(), Vec2::new(0.0, 1.0), 11);
    let t = 10.0 * world.fixed_dt();
    let last = path[10];
    // a = -custom = (4, 0); world gravity and scale play no part
    assert!((last.x - 0.5 * 4.0 * t * t).abs() < 1e-4, "x = {}", last.x);
    assert!((last.y - t).abs() < 1e-5, "y = {}", last.y);

    // the preview matches what the body then does
    world.set_velocity(id, Vec2::new(0.0, 1.0));
    for _ in 0..10 {
        world.step_fixed();
    }
    assert!((world.body(id).velocity().x - 4.0 * t).abs() < 1e-4);
    assert!((world.body(id).velocity().y - 1.0).abs() < 1e-5);
}

#[test]
fn clear_resets_everything() {
    let mut world = WorldCore::new();
    let id = world.create_body(&BodyConfig::kinematic());
    world.add_carrier(id, 10.0);
    world.add_pendulum(id, Vec2::new(0.0, 2.0), 0.0).unwrap();
    world.step_fixed();
    world.clear();
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.oscillator_count(), 0);
    assert_eq!(world.carrier_count(), 0);
    assert_eq!(world.frame(), 0);
}

#[test]
#[should_panic(expected = "unknown body id 42")]
fn unknown_body_panics() {
    let mut world = WorldCore::new();
    world.set_velocity(42, Vec2::new(1.0, 0.0));
}

#[test]
#[should_panic(expected = "unknown body id 7")]
fn destroying_twice_panics() {
    let mut world = WorldCore::new();
    world.destroy_body(7);
}

#[test]
#[should_panic(expected = "dt must be positive")]
fn zero_dt_panics() {
    WorldCore::new().step(0.0);
}
