use nalgebra::{Quaternion, UnitQuaternion};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::components::{MotorAttribute, MotorConfig};
use crate::config::ConfigError;

/// Value stored under a [`MotorAttribute`] key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Scalar(f64),
    Rotation(UnitQuaternion<f64>),
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Scalar(value)
    }
}

impl From<UnitQuaternion<f64>> for AttributeValue {
    fn from(value: UnitQuaternion<f64>) -> Self {
        AttributeValue::Rotation(value)
    }
}

/// Collects motor attributes from loose sources; missing ones fall back to
/// [`MotorConfig::default`].
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct MotorConfigBuilder {
    pub max_speed: Option<f64>,
    pub max_turn: Option<f64>,
    pub max_acceleration: Option<f64>,
    pub max_deceleration: Option<f64>,
    pub rotation: Option<UnitQuaternion<f64>>,
}

impl MotorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_speed(mut self, value: f64) -> Self {
        self.max_speed = Some(value);
        self
    }

    pub fn max_turn(mut self, value: f64) -> Self {
        self.max_turn = Some(value);
        self
    }

    pub fn max_acceleration(mut self, value: f64) -> Self {
        self.max_acceleration = Some(value);
        self
    }

    pub fn max_deceleration(mut self, value: f64) -> Self {
        self.max_deceleration = Some(value);
        self
    }

    pub fn rotation(mut self, value: UnitQuaternion<f64>) -> Self {
        self.rotation = Some(value);
        self
    }

    /// Build from an attribute map. Later entries override earlier ones.
    pub fn from_attributes<I>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (MotorAttribute, AttributeValue)>,
    {
        let mut builder = Self::new();
        for (attribute, value) in attributes {
            builder.set(attribute, value)?;
        }
        Ok(builder)
    }

    /// Build from a flat JSON object. Unknown keys are ignored.
    ///
    /// `rotation` is read as `[i, j, k, w]`.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let mut builder = Self::new();
        let Some(object) = value.as_object() else {
            return Err(ConfigError::ValidationError(
                "motor configuration must be an object".to_string(),
            ));
        };

        for (key, raw) in object {
            let Some(attribute) = MotorAttribute::from_key(key) else {
                continue;
            };
            let value = match attribute {
                MotorAttribute::Rotation => AttributeValue::Rotation(parse_rotation(raw)?),
                _ => AttributeValue::Scalar(
                    raw.as_f64()
                        .ok_or_else(|| ConfigError::invalid(key.as_str(), raw))?,
                ),
            };
            builder.set(attribute, value)?;
        }
        Ok(builder)
    }

    fn set(&mut self, attribute: MotorAttribute, value: AttributeValue) -> Result<(), ConfigError> {
        match (attribute, value) {
            (MotorAttribute::MaxSpeed, AttributeValue::Scalar(v)) => self.max_speed = Some(v),
            (MotorAttribute::MaxTurn, AttributeValue::Scalar(v)) => self.max_turn = Some(v),
            (MotorAttribute::MaxAcceleration, AttributeValue::Scalar(v)) => {
                self.max_acceleration = Some(v)
            }
            (MotorAttribute::MaxDeceleration, AttributeValue::Scalar(v)) => {
                self.max_deceleration = Some(v)
            }
            (MotorAttribute::Rotation, AttributeValue::Rotation(q)) => self.rotation = Some(q),
            (attribute, value) => {
                return Err(ConfigError::invalid(attribute.key(), format!("{:?}", value)))
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Result<MotorConfig, ConfigError> {
        let defaults = MotorConfig::default();
        let config = MotorConfig {
            max_speed: self.max_speed.unwrap_or(defaults.max_speed),
            max_turn: self.max_turn.unwrap_or(defaults.max_turn),
            max_acceleration: self.max_acceleration.unwrap_or(defaults.max_acceleration),
            max_deceleration: self.max_deceleration.unwrap_or(defaults.max_deceleration),
            initial_orientation: self.rotation,
        };

        for (attribute, value) in [
            (MotorAttribute::MaxSpeed, config.max_speed),
            (MotorAttribute::MaxTurn, config.max_turn),
            (MotorAttribute::MaxAcceleration, config.max_acceleration),
            (MotorAttribute::MaxDeceleration, config.max_deceleration),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(attribute.key(), value));
            }
        }

        info!(
            "Built motor config: max_speed={}, max_turn={}, max_acceleration={}, max_deceleration={}",
            config.max_speed, config.max_turn, config.max_acceleration, config.max_deceleration
        );
        Ok(config)
    }
}

fn parse_rotation(raw: &Value) -> Result<UnitQuaternion<f64>, ConfigError> {
    let items = raw
        .as_array()
        .ok_or_else(|| ConfigError::invalid("rotation", raw))?;
    let coords = items
        .iter()
        .map(|item| item.as_f64().ok_or_else(|| ConfigError::invalid("rotation", raw)))
        .collect::<Result<Vec<f64>, _>>()?;
    match coords.as_slice() {
        &[i, j, k, w] => {
            let q = Quaternion::new(w, i, j, k);
            if q.norm() <= f64::EPSILON || !q.norm().is_finite() {
                return Err(ConfigError::invalid("rotation", raw));
            }
            Ok(UnitQuaternion::new_normalize(q))
        }
        _ => Err(ConfigError::invalid("rotation", raw)),
    }
}
