use nalgebra::{UnitQuaternion, Vector3};

use super::{Motor, MotorConfig};
use crate::utils::{look_rotation, nlerp_shortest, SimError};

/// Motor driven by constant acceleration.
///
/// Full throttle accelerates at `max_acceleration`, full reverse decelerates
/// at `max_deceleration`. Speed is kept within `[0, max_speed]`; braking never
/// turns into backward motion.
#[derive(Debug, Clone)]
pub struct AccelerationMotor {
    config: MotorConfig,
    throttle: f64,
    orientation: UnitQuaternion<f64>,
    heading: Option<Vector3<f64>>,
}

impl Default for AccelerationMotor {
    fn default() -> Self {
        Self {
            config: MotorConfig::default(),
            throttle: 0.0,
            orientation: UnitQuaternion::identity(),
            heading: None,
        }
    }
}

impl AccelerationMotor {
    pub fn new(config: MotorConfig) -> Result<Self, SimError> {
        let mut motor = Self::default();
        motor.configure(config)?;
        Ok(motor)
    }

    /// Unit heading requested by the last `turn_to`, if any.
    pub fn heading(&self) -> Option<Vector3<f64>> {
        self.heading
    }

    /// Interpolation factor applied per turn step.
    ///
    /// This is a lerp fraction rather than an angular rate limit, so angular
    /// progress shrinks as the remaining gap closes.
    pub fn turn_fraction(&self, dt: f64) -> f64 {
        (self.config.max_turn * dt).clamp(0.0, 1.0)
    }
}

impl Motor for AccelerationMotor {
    fn configure(&mut self, config: MotorConfig) -> Result<(), SimError> {
        config.validate()?;
        self.orientation = config
            .initial_orientation
            .unwrap_or_else(UnitQuaternion::identity);
        self.config = config;
        Ok(())
    }

    fn config(&self) -> &MotorConfig {
        &self.config
    }

    fn throttle(&self) -> f64 {
        self.throttle
    }

    fn set_throttle(&mut self, value: f64) {
        // Adding 0.0 folds -0.0 into 0.0
        self.throttle = if value.is_nan() {
            0.0
        } else {
            value.clamp(-1.0, 1.0) + 0.0
        };
    }

    fn turn_to(&mut self, direction: Vector3<f64>) {
        let norm = direction.norm();
        self.heading = if norm.is_finite() && norm > f64::EPSILON {
            Some(direction / norm)
        } else {
            None
        };
    }

    fn acceleration(&self) -> f64 {
        let magnitude = if self.throttle < 0.0 {
            self.config.max_deceleration
        } else {
            self.config.max_acceleration
        };
        magnitude * self.throttle
    }

    fn advance_speed(&self, prev_speed: f64, dt: f64) -> f64 {
        (prev_speed + self.acceleration() * dt).clamp(0.0, self.config.max_speed)
    }

    fn advance_turn(&mut self, dt: f64) -> UnitQuaternion<f64> {
        let Some(target) = self.heading.as_ref().and_then(look_rotation) else {
            return self.orientation;
        };
        self.orientation = nlerp_shortest(&self.orientation, &target, self.turn_fraction(dt));
        self.orientation
    }

    fn orientation(&self) -> UnitQuaternion<f64> {
        self.orientation
    }
}
