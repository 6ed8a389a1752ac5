use approx::assert_relative_eq;
use nalgebra::Vector3;
use spaceflight::{FlightController, SpatialComponent};

use crate::common::{
    assert_frame_valid, assert_position_eq, assert_state_valid, create_activated_controller,
    create_reference_motor_config, create_test_body, run_controller,
};

const DT: f64 = 1.0 / 60.0;

#[test]
fn test_full_throttle_for_two_seconds() {
    let (mut controller, mut body) =
        create_activated_controller(create_reference_motor_config(), create_test_body());
    controller.full_throttle();
    run_controller(&mut controller, &mut body, 120, DT);

    assert_relative_eq!(controller.speed(), 20.0, epsilon = 1e-9);
    // Distance under constant acceleration, sampled with explicit Euler
    assert!(body.position.z > 19.0 && body.position.z < 21.0);
    assert_relative_eq!(body.position.x, 0.0);
    assert_relative_eq!(body.position.y, 0.0);
    assert_state_valid(controller.state());
}

#[test]
fn test_speed_saturates_at_cap() {
    let (mut controller, mut body) =
        create_activated_controller(create_reference_motor_config(), create_test_body());
    controller.full_throttle();
    run_controller(&mut controller, &mut body, 60 * 15, DT);

    assert_eq!(controller.speed(), 100.0);
    assert_state_valid(controller.state());
}

#[test]
fn test_reverse_from_rest_stays_put() {
    let (mut controller, mut body) =
        create_activated_controller(create_reference_motor_config(), create_test_body());
    controller.full_reverse();
    run_controller(&mut controller, &mut body, 60, DT);

    assert_eq!(controller.speed(), 0.0);
    assert_eq!(controller.throttle(), 0.0);
    assert_position_eq(&body.position, &Vector3::zeros(), 1e-12);
}

#[test]
fn test_turn_eventually_faces_direction() {
    let (mut controller, mut body) =
        create_activated_controller(create_reference_motor_config(), create_test_body());
    let target = Vector3::new(100.0, 0.0, 0.0);
    assert!(!controller.is_facing(&target));

    controller.turn_to(target);
    let mut faced = false;
    for _ in 0..120 {
        run_controller(&mut controller, &mut body, 1, DT);
        if controller.is_facing_within(&target, 1.0) {
            faced = true;
            break;
        }
    }
    assert!(faced, "controller never turned toward +X");
    assert_eq!(body.attitude, controller.state().motion.orientation);
}

#[test]
fn test_turn_and_throttle_moves_along_new_heading() {
    let (mut controller, mut body) =
        create_activated_controller(create_reference_motor_config(), create_test_body());
    controller.turn_to(Vector3::new(-1.0, 0.0, 0.0));
    run_controller(&mut controller, &mut body, 120, DT);

    let position_before = body.position;
    controller.full_throttle();
    run_controller(&mut controller, &mut body, 60, DT);

    let travelled = body.position - position_before;
    assert!(travelled.x < 0.0);
    assert!(travelled.z.abs() < 1e-3 * travelled.norm());
}

#[test]
fn test_facing_ahead_for_every_tolerance() {
    let controller: FlightController = FlightController::new();
    let ahead = Vector3::new(0.0, 0.0, 25.0);
    for tolerance in [0.0, 1.0, 45.0, 90.0, 179.0, 180.0, 360.0] {
        assert!(controller.is_facing_within(&ahead, tolerance));
    }
}

#[test]
fn test_facing_behind_only_at_half_turn() {
    let controller: FlightController = FlightController::new();
    let behind = Vector3::new(0.0, 0.0, -25.0);
    for tolerance in [0.0, 45.0, 90.0, 179.9] {
        assert!(!controller.is_facing_within(&behind, tolerance));
    }
    assert!(controller.is_facing_within(&behind, 180.0));
    assert!(controller.is_facing_within(&behind, 720.0));
    assert!(!controller.is_facing_within(&behind, -10.0));
}

#[test]
fn test_estimated_arrival_infinite_when_stopping_short() {
    let (mut controller, mut body) =
        create_activated_controller(create_reference_motor_config(), create_test_body());
    controller.full_throttle();
    run_controller(&mut controller, &mut body, 120, DT);
    let v = controller.speed();

    // v²/(4·decel) is the largest distance with a real solution
    let limit = v * v / 40.0;
    for distance in [limit * 1.01, limit * 1.5, limit * 10.0, 1e6] {
        assert_eq!(controller.estimated_arrival(distance, true), f64::INFINITY);
    }
    assert!(controller.estimated_arrival(limit * 0.5, true).is_finite());
    assert!(controller.estimated_arrival(1e6, false).is_finite());
}

#[test]
fn test_estimated_arrival_accelerating_solves_equation() {
    let (mut controller, mut body) =
        create_activated_controller(create_reference_motor_config(), create_test_body());
    controller.full_throttle();
    run_controller(&mut controller, &mut body, 30, DT);
    let v = controller.speed();

    for distance in [1.0, 10.0, 250.0] {
        let t = controller.estimated_arrival(distance, false);
        assert!(t > 0.0);
        assert_relative_eq!(10.0 * t * t + v * t, distance, epsilon = 1e-9);
    }
}

#[test]
fn test_transmission_frame_tracks_state() {
    let mut body = SpatialComponent::at_position(Vector3::new(0.0, 10.0, 0.0));
    body.mass = 7.5;
    let (mut controller, _) =
        create_activated_controller(create_reference_motor_config(), body.clone());
    controller.full_throttle();
    run_controller(&mut controller, &mut body, 60, DT);

    let frame = controller.state().transmission_frame();
    assert_frame_valid(&frame);
    assert_eq!(frame.mass, 7.5);
    assert_eq!(frame.speed, controller.speed());
    assert_eq!(frame.speed_cap, 100.0);
    assert_eq!(frame.turn_cap, 10.0);

    let json = serde_json::to_string(&frame).unwrap();
    let decoded: spaceflight::TransmissionFrame = serde_json::from_str(&json).unwrap();
    assert_relative_eq!(decoded.speed, frame.speed);
    assert_position_eq(&decoded.position, &frame.position, 1e-12);
}
