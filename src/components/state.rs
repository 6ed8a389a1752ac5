use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::components::PoseProvider;

/// Position and attitude snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub attitude: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
        }
    }
}

/// Physical presence of an entity: mass and pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Existence {
    pub mass: f64,
    pub pose: Pose,
}

impl Existence {
    pub fn new(mass: f64, pose: Pose) -> Self {
        Self { mass, pose }
    }

    /// Snapshot mass and pose from an external body.
    pub fn capture<P: PoseProvider + ?Sized>(body: &P) -> Self {
        Self {
            mass: body.mass(),
            pose: Pose {
                position: body.position(),
                attitude: body.attitude(),
            },
        }
    }
}

/// Kinematic state and its caps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Forward speed, never negative
    pub speed: f64,
    pub speed_cap: f64,
    pub orientation: UnitQuaternion<f64>,
    pub turn_cap: f64,
}

impl Motion {
    pub fn new(speed_cap: f64, turn_cap: f64) -> Self {
        Self {
            speed: 0.0,
            speed_cap,
            orientation: UnitQuaternion::identity(),
            turn_cap,
        }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// In-flight state, written once per tick by the flight controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub existence: Existence,
    pub motion: Motion,
}

impl FlightState {
    pub fn new(existence: Existence, motion: Motion) -> Self {
        Self { existence, motion }
    }

    /// Flattened view for transmission. The wire format is up to the caller.
    pub fn transmission_frame(&self) -> TransmissionFrame {
        TransmissionFrame {
            mass: self.existence.mass,
            position: self.existence.pose.position,
            attitude: self.existence.pose.attitude,
            speed: self.motion.speed,
            speed_cap: self.motion.speed_cap,
            orientation: self.motion.orientation,
            turn_cap: self.motion.turn_cap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmissionFrame {
    pub mass: f64,
    pub position: Vector3<f64>,
    pub attitude: UnitQuaternion<f64>,
    pub speed: f64,
    pub speed_cap: f64,
    pub orientation: UnitQuaternion<f64>,
    pub turn_cap: f64,
}
