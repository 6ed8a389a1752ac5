//! Throttle-driven flight model with a predictive braking pilot.
//!
//! A [`FlightController`] owns one [`Motor`] and integrates its outputs every
//! fixed tick; a [`PredictivePilot`] decides throttle and heading so the
//! entity intercepts a target and stops short of it.

pub mod components;
pub mod config;
pub mod simulation;
pub mod systems;
pub mod utils;

pub use components::{
    AccelerationMotor, Existence, FlightState, Motion, Motor, MotorAttribute, MotorConfig, Pose,
    PoseProvider, SpatialComponent, TransmissionFrame,
};
pub use config::{
    AttributeValue, BodyConfig, ConfigError, MotorConfigBuilder, PilotConfig, SimulationConfig,
    WanderConfig,
};
pub use simulation::{Simulation, StepReport};
pub use systems::{braking_required, FlightController, PilotState, PredictivePilot, Wanderer};
pub use utils::SimError;
