//! Propulsion models. Every flight controller owns exactly one motor.

mod acceleration;
mod config;

pub use acceleration::AccelerationMotor;
pub use config::{MotorAttribute, MotorConfig};

use nalgebra::{UnitQuaternion, Vector3};

use crate::utils::SimError;

/// Capability set shared by all motor kinds.
///
/// The throttle is the only externally driven input; orientation is only
/// changed by the motor's own turn step.
pub trait Motor {
    /// Replace the configuration and reset orientation to its initial value.
    fn configure(&mut self, config: MotorConfig) -> Result<(), SimError>;

    fn config(&self) -> &MotorConfig;

    fn throttle(&self) -> f64;

    /// Store the throttle, clamped to `[-1, 1]`.
    fn set_throttle(&mut self, value: f64);

    fn full_forward(&mut self) {
        self.set_throttle(1.0);
    }

    fn full_reverse(&mut self) {
        self.set_throttle(-1.0);
    }

    fn full_stop(&mut self) {
        self.set_throttle(0.0);
    }

    /// Request a heading; applied lazily by [`Motor::advance_turn`].
    fn turn_to(&mut self, direction: Vector3<f64>);

    /// Signed acceleration for the current throttle.
    fn acceleration(&self) -> f64;

    /// Speed after `dt` seconds starting from `prev_speed`.
    fn advance_speed(&self, prev_speed: f64, dt: f64) -> f64;

    /// Step the orientation toward the requested heading.
    fn advance_turn(&mut self, dt: f64) -> UnitQuaternion<f64>;

    fn orientation(&self) -> UnitQuaternion<f64>;
}
