use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::forward_axis;

/// External owner of an entity's pose.
///
/// A flight controller reads mass and pose from it once per tick and writes
/// back the new attitude and linear velocity.
pub trait PoseProvider {
    fn mass(&self) -> f64;
    fn position(&self) -> Vector3<f64>;
    fn attitude(&self) -> UnitQuaternion<f64>;

    /// World-space forward (+Z) axis.
    fn forward(&self) -> Vector3<f64> {
        forward_axis(&self.attitude())
    }

    fn set_attitude(&mut self, attitude: UnitQuaternion<f64>);
    fn set_velocity(&mut self, velocity: Vector3<f64>);
}

/// Kinematic rigid body: no gravity, no drag, no angular dynamics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Mass [kg], bookkeeping only
    pub mass: f64,

    /// Position in world space [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,

    /// Angular velocity in body frame [rad/s]
    pub angular_velocity: Vector3<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            mass: 1.0,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl SpatialComponent {
    pub fn new(mass: f64, position: Vector3<f64>, attitude: UnitQuaternion<f64>) -> Self {
        Self {
            mass,
            position,
            attitude,
            ..Default::default()
        }
    }

    /// Create a new spatial component at a specific position
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a body at `position` yawed by `heading` radians about +Y.
    pub fn at_position_facing(position: Vector3<f64>, heading: f64) -> Self {
        Self {
            position,
            attitude: UnitQuaternion::from_axis_angle(&Vector3::y_axis(), heading),
            ..Default::default()
        }
    }

    /// Advance position with the current velocity.
    pub fn integrate(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }
}

impl PoseProvider for SpatialComponent {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn position(&self) -> Vector3<f64> {
        self.position
    }

    fn attitude(&self) -> UnitQuaternion<f64> {
        self.attitude
    }

    fn set_attitude(&mut self, attitude: UnitQuaternion<f64>) {
        self.attitude = attitude;
    }

    fn set_velocity(&mut self, velocity: Vector3<f64>) {
        self.velocity = velocity;
    }
}
