use approx::assert_relative_eq;
use nalgebra::Vector3;
use spaceflight::{braking_required, PilotState};

use crate::common::{
    assert_frame_valid, assert_state_valid, create_reference_motor_config,
    create_slow_motor_config, create_test_pilot_config, wait_for_condition, TestApp,
    TestAppBuilder,
};

const MAX_STEPS: usize = 3600;
const ARRIVAL_TOLERANCE: f64 = 0.5;

fn pursuit_app(target: Vector3<f64>) -> TestApp {
    TestAppBuilder::new()
        .with_motor(create_slow_motor_config())
        .with_pilot(create_test_pilot_config())
        .with_target(target)
        .build()
}

fn reference_app(target: Vector3<f64>) -> TestApp {
    TestAppBuilder::new()
        .with_motor(create_reference_motor_config())
        .with_pilot(create_test_pilot_config())
        .with_target(target)
        .build()
}

/// Farthest a body at the speed cap moves in one tick
fn one_tick_travel(app: &TestApp) -> f64 {
    app.sim.controller().config().max_speed * app.time_step()
}

/// Fly until stopped at the safe distance, checking invariants on the way
fn fly_to_arrival(app: &mut TestApp) {
    let arrived = wait_for_condition(
        app,
        |app| {
            assert_state_valid(app.sim.controller().state());
            app.sim.arrived(ARRIVAL_TOLERANCE)
        },
        MAX_STEPS,
    );
    assert!(
        arrived,
        "did not arrive within {} steps, distance {:?}",
        MAX_STEPS,
        app.sim.distance_to_target()
    );
}

fn assert_speed_capped(app: &TestApp) {
    let cap = app.sim.controller().config().max_speed;
    for report in &app.reports {
        assert!(
            report.speed <= cap,
            "step {} speed {} above cap {}",
            report.step,
            report.speed,
            cap
        );
    }
}

#[test]
fn test_pursue_target_ahead() {
    let mut app = pursuit_app(Vector3::new(0.0, 0.0, 100.0));
    fly_to_arrival(&mut app);

    assert_eq!(app.reports[0].decision, PilotState::Seeking);
    assert!(app
        .reports
        .iter()
        .any(|report| report.decision == PilotState::Braking));
    assert_speed_capped(&app);

    let distance = app.sim.distance_to_target().unwrap();
    assert!(distance > 4.5 && distance <= 5.5, "stopped at {}", distance);
    assert_relative_eq!(app.sim.body().position.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(app.sim.body().position.y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_pursue_target_behind_turns_first() {
    let mut app = pursuit_app(Vector3::new(0.0, 0.0, -100.0));

    let first = app.run_frame();
    assert_eq!(first.decision, PilotState::Holding);
    assert_eq!(first.speed, 0.0);
    assert_eq!(app.sim.controller().throttle(), 0.0);

    fly_to_arrival(&mut app);

    let first_seek = app
        .reports
        .iter()
        .position(|report| report.decision == PilotState::Seeking)
        .expect("pilot never started seeking");
    assert!(first_seek > 0);
    assert!(app.reports[..first_seek]
        .iter()
        .all(|report| report.speed == 0.0));
    assert_speed_capped(&app);
    assert!(app.sim.body().position.z < 0.0);
}

#[test]
fn test_pursue_off_axis_targets() {
    for target in [
        Vector3::new(100.0, 0.0, 100.0),
        Vector3::new(30.0, 40.0, -80.0),
        Vector3::new(0.0, 100.0, 0.0),
    ] {
        let mut app = pursuit_app(target);
        fly_to_arrival(&mut app);
        assert_speed_capped(&app);

        let distance = app.sim.distance_to_target().unwrap();
        assert!(
            distance > 4.0 && distance <= 5.5,
            "target {:?}: stopped at {}",
            target,
            distance
        );
        assert!(app.sim.controller().is_facing(&target));
    }
}

#[test]
fn test_stays_stopped_after_arrival() {
    let mut app = pursuit_app(Vector3::new(0.0, 0.0, 100.0));
    fly_to_arrival(&mut app);
    assert!(wait_for_condition(&mut app, |app| app.sim.settled(), 60));
    let position = app.sim.body().position;

    app.run_steps(300);
    assert_eq!(app.sim.controller().speed(), 0.0);
    assert_eq!(app.sim.body().position, position);
    assert_frame_valid(&app.sim.frame());
}

#[test]
fn test_retarget_mid_flight() {
    let mut app = pursuit_app(Vector3::new(0.0, 0.0, 100.0));
    app.run_steps(120);
    assert!(app.sim.controller().speed() > 0.0);

    let new_target = Vector3::new(0.0, 0.0, -50.0);
    app.sim.set_target(Some(new_target));
    let report = app.run_frame();
    assert_eq!(report.decision, PilotState::Holding);
    assert_eq!(app.sim.pilot().target(), Some(new_target));

    fly_to_arrival(&mut app);
    assert_speed_capped(&app);
    assert!(app.sim.body().position.z < 0.0);
}

#[test]
fn test_target_inside_safe_distance_never_moves() {
    let mut app = pursuit_app(Vector3::new(0.0, 0.0, 3.0));
    app.run_steps(120);

    assert!(app
        .reports
        .iter()
        .all(|report| report.decision == PilotState::Braking && report.speed == 0.0));
    assert_eq!(app.sim.body().position, Vector3::zeros());
    assert!(app.sim.settled());
    // Already two metres inside the buffer
    assert!(!app.sim.arrived(ARRIVAL_TOLERANCE));
}

#[test]
fn test_reference_motor_stops_at_safe_distance() {
    for target in [
        Vector3::new(0.0, 0.0, 100.0),
        Vector3::new(0.0, 0.0, -200.0),
        Vector3::new(100.0, 0.0, 100.0),
        Vector3::new(30.0, 40.0, -80.0),
        Vector3::new(0.0, 0.0, 500.0),
    ] {
        let mut app = reference_app(target);
        let settled = wait_for_condition(&mut app, |app| app.sim.settled(), MAX_STEPS);
        assert!(settled, "target {:?}: never settled", target);

        let tolerance = one_tick_travel(&app);
        let distance = app.sim.distance_to_target().unwrap();
        assert!(
            distance <= 5.0 && distance >= 5.0 - tolerance,
            "target {:?}: stopped at {}",
            target,
            distance
        );
        assert!(app.sim.arrived(tolerance));
        assert_speed_capped(&app);
    }
}

#[test]
fn test_cleared_target_coasts_down() {
    let mut app = pursuit_app(Vector3::new(0.0, 0.0, 100.0));
    app.run_steps(60);
    let speed = app.sim.controller().speed();
    assert!(speed > 0.0);

    app.sim.set_target(None);
    let report = app.run_frame();
    assert_eq!(report.decision, PilotState::NoTarget);
    assert_eq!(report.distance, None);
    // No commands are issued, so the last throttle stays in effect
    assert!(report.speed >= speed);
}

#[test]
fn test_braking_rule_matches_pilot_decisions() {
    let mut app = reference_app(Vector3::new(0.0, 0.0, 200.0));
    let safe_distance = create_test_pilot_config().safe_distance;
    let deceleration = create_reference_motor_config().max_deceleration;

    for _ in 0..MAX_STEPS {
        let speed = app.sim.controller().speed();
        // Decided on where the body is at the start of the step
        let remaining = app.sim.distance_to_target().unwrap() - safe_distance;
        let report = app.run_frame();
        let expected = if braking_required(speed, deceleration, remaining) {
            PilotState::Braking
        } else {
            PilotState::Seeking
        };
        assert_eq!(report.decision, expected, "step {}", report.step);
        if app.sim.settled() {
            return;
        }
    }
    panic!("did not settle within {} steps", MAX_STEPS);
}
