use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::components::{MotorConfig, SpatialComponent};
use crate::utils::{
    deg_to_rad, Position, DEFAULT_MAX_STEPS, DEFAULT_SAFE_DISTANCE, DEFAULT_TIMESTEP,
    WANDER_INTERVAL_JITTER, WANDER_MIN_INTERVAL, WANDER_RANGE_FACTOR,
};

mod builders;
mod errors;

pub use builders::{AttributeValue, MotorConfigBuilder};
pub use errors::ConfigError;

/// Tuning of the predictive pilot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    /// Distance to keep from the target [m]
    pub safe_distance: f64,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            safe_distance: DEFAULT_SAFE_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    pub seed: u64,
    /// Minimum time between waypoint changes [s]
    pub min_interval: f64,
    /// Upper bound of the random extra delay [s]
    pub interval_jitter: f64,
    /// Farthest waypoint range in multiples of max speed
    pub range_factor: f64,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            min_interval: WANDER_MIN_INTERVAL,
            interval_jitter: WANDER_INTERVAL_JITTER,
            range_factor: WANDER_RANGE_FACTOR,
        }
    }
}

impl WanderConfig {
    /// Intervals must be finite and non-negative. The farthest waypoint range,
    /// `max_speed * range_factor`, must be finite with `range_factor >= 1`.
    pub fn validate(&self, max_speed: f64) -> Result<(), ConfigError> {
        if !(self.min_interval.is_finite() && self.min_interval >= 0.0) {
            return Err(ConfigError::invalid("min_interval", self.min_interval));
        }
        if !(self.interval_jitter.is_finite() && self.interval_jitter >= 0.0) {
            return Err(ConfigError::invalid("interval_jitter", self.interval_jitter));
        }
        if !(self.range_factor.is_finite() && self.range_factor >= 1.0) {
            return Err(ConfigError::invalid("range_factor", self.range_factor));
        }
        if !(max_speed * self.range_factor).is_finite() {
            return Err(ConfigError::invalid("range_factor", self.range_factor));
        }
        Ok(())
    }
}

/// Initial state of the simulated body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub mass: f64,
    pub position: Position,
    /// Yaw about +Y [deg]
    pub heading: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            position: Position::default(),
            heading: 0.0,
        }
    }
}

impl BodyConfig {
    pub fn to_spatial(&self) -> SpatialComponent {
        let mut body =
            SpatialComponent::at_position_facing(self.position.into(), deg_to_rad(self.heading));
        body.mass = self.mass;
        body
    }
}

/// Full description of a single-entity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed tick [s]
    pub time_step: f64,
    pub max_steps: usize,
    /// Emit a state frame every this many steps
    pub report_every: usize,
    pub motor: MotorConfig,
    pub pilot: PilotConfig,
    pub body: BodyConfig,
    pub target: Option<Position>,
    pub wander: Option<WanderConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIMESTEP,
            max_steps: DEFAULT_MAX_STEPS,
            report_every: 60,
            motor: MotorConfig::default(),
            pilot: PilotConfig::default(),
            body: BodyConfig::default(),
            target: Some(Position::new(0.0, 0.0, 500.0)),
            wander: None,
        }
    }
}

impl SimulationConfig {
    /// Parse YAML, then load it like JSON so both formats share one path.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(source)?;
        let value = serde_json::to_value(yaml)?;
        Self::from_json(&value)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_json(&value)
    }

    /// Build from a JSON value. The `motor` section goes through
    /// [`MotorConfigBuilder`] so loose attribute maps are accepted.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_value(value.clone())?;
        if let Some(motor) = value.get("motor") {
            config.motor = MotorConfigBuilder::from_json(motor)?.build()?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load a `.json` file as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading simulation config from {}", path.display());
        let source = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    pub fn target_position(&self) -> Option<Vector3<f64>> {
        self.target.map(Vector3::from)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::invalid("time_step", self.time_step));
        }
        if self.report_every == 0 {
            return Err(ConfigError::invalid("report_every", self.report_every));
        }
        if !(self.pilot.safe_distance.is_finite() && self.pilot.safe_distance >= 0.0) {
            return Err(ConfigError::invalid("safe_distance", self.pilot.safe_distance));
        }
        if !(self.body.mass.is_finite() && self.body.mass >= 0.0) {
            return Err(ConfigError::invalid("mass", self.body.mass));
        }
        self.motor
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        match &self.wander {
            Some(wander) => wander.validate(self.motor.max_speed),
            None => Ok(()),
        }
    }
}
