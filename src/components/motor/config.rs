use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{
    SimError, DEFAULT_MAX_ACCELERATION, DEFAULT_MAX_DECELERATION, DEFAULT_MAX_SPEED,
    DEFAULT_MAX_TURN,
};

/// Named attributes accepted by motor configuration maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorAttribute {
    MaxSpeed,
    MaxTurn,
    MaxAcceleration,
    MaxDeceleration,
    Rotation,
}

impl MotorAttribute {
    pub fn key(&self) -> &'static str {
        match self {
            MotorAttribute::MaxSpeed => "max_speed",
            MotorAttribute::MaxTurn => "max_turn",
            MotorAttribute::MaxAcceleration => "max_acceleration",
            MotorAttribute::MaxDeceleration => "max_deceleration",
            MotorAttribute::Rotation => "rotation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "max_speed" => Some(MotorAttribute::MaxSpeed),
            "max_turn" => Some(MotorAttribute::MaxTurn),
            "max_acceleration" => Some(MotorAttribute::MaxAcceleration),
            "max_deceleration" => Some(MotorAttribute::MaxDeceleration),
            "rotation" => Some(MotorAttribute::Rotation),
            _ => None,
        }
    }
}

impl fmt::Display for MotorAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tuning values of an acceleration motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Maximum forward speed [m/s]
    pub max_speed: f64,
    /// Turn interpolation rate [1/s]
    pub max_turn: f64,
    /// Full throttle acceleration [m/s²]
    pub max_acceleration: f64,
    /// Full reverse deceleration magnitude [m/s²]
    pub max_deceleration: f64,
    /// Orientation the motor starts from; identity when unset
    #[serde(rename = "rotation")]
    pub initial_orientation: Option<UnitQuaternion<f64>>,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            max_turn: DEFAULT_MAX_TURN,
            max_acceleration: DEFAULT_MAX_ACCELERATION,
            max_deceleration: DEFAULT_MAX_DECELERATION,
            initial_orientation: None,
        }
    }
}

impl MotorConfig {
    pub fn new(max_speed: f64, max_turn: f64, max_acceleration: f64, max_deceleration: f64) -> Self {
        Self {
            max_speed,
            max_turn,
            max_acceleration,
            max_deceleration,
            initial_orientation: None,
        }
    }

    pub fn with_orientation(mut self, orientation: UnitQuaternion<f64>) -> Self {
        self.initial_orientation = Some(orientation);
        self
    }

    /// Every cap must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), SimError> {
        let caps = [
            (MotorAttribute::MaxSpeed, self.max_speed),
            (MotorAttribute::MaxTurn, self.max_turn),
            (MotorAttribute::MaxAcceleration, self.max_acceleration),
            (MotorAttribute::MaxDeceleration, self.max_deceleration),
        ];
        for (attribute, value) in caps {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    attribute, value
                )));
            }
        }
        Ok(())
    }
}
