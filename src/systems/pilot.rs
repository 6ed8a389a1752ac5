use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::Motor;
use crate::config::PilotConfig;
use crate::systems::FlightController;

/// Decision taken by the pilot on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotState {
    /// No target assigned; no commands issued
    NoTarget,
    /// Facing the target and far enough away: full throttle
    Seeking,
    /// Inside stopping distance: full reverse
    Braking,
    /// Target off-heading: throttle cut while turning
    Holding,
}

/// Stopping test used by the pilot.
///
/// With `t = v / a` the time to stop at full deceleration, braking starts
/// once `v·t/2 ≥ remaining`. A zero deceleration is a configuration error
/// and is rejected before a motor is ever built.
#[inline]
pub fn braking_required(speed: f64, deceleration: f64, remaining: f64) -> bool {
    let t = speed / deceleration;
    speed * t / 2.0 >= remaining
}

/// Flies a controller to a target point and stops `safe_distance` short of it.
///
/// The pilot is purely reactive: every tick it recomputes its decision from
/// the controller's current kinematics. It never accelerates while the target
/// is markedly off-heading, to avoid overshoot loops.
#[derive(Debug, Clone)]
pub struct PredictivePilot {
    safe_distance: f64,
    target: Option<Vector3<f64>>,
    last_state: PilotState,
}

impl Default for PredictivePilot {
    fn default() -> Self {
        Self::new(PilotConfig::default())
    }
}

impl PredictivePilot {
    pub fn new(config: PilotConfig) -> Self {
        Self {
            safe_distance: config.safe_distance,
            target: None,
            last_state: PilotState::NoTarget,
        }
    }

    pub fn safe_distance(&self) -> f64 {
        self.safe_distance
    }

    /// Assign or clear the target. Last write wins.
    pub fn set_target(&mut self, target: Option<Vector3<f64>>) {
        match target {
            Some(position) => debug!("Target set to {:?}", position),
            None => debug!("Target cleared"),
        }
        self.target = target;
    }

    pub fn target(&self) -> Option<Vector3<f64>> {
        self.target
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Decision taken on the most recent update.
    pub fn last_state(&self) -> PilotState {
        self.last_state
    }

    /// Whether the controller has to start slowing down to stop short of the
    /// target. Always `false` without a target.
    pub fn should_brake<M: Motor>(&self, controller: &FlightController<M>) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let remaining = controller.distance_to(&target) - self.safe_distance;
        braking_required(
            controller.speed(),
            controller.config().max_deceleration,
            remaining,
        )
    }

    /// Issue this tick's turn and throttle commands.
    pub fn update<M: Motor>(&mut self, controller: &mut FlightController<M>) -> PilotState {
        let state = match self.target {
            None => PilotState::NoTarget,
            Some(target) => {
                controller.turn_to(target - controller.position());

                if !controller.is_facing(&target) {
                    controller.full_stop();
                    PilotState::Holding
                } else if self.should_brake(controller) {
                    controller.full_reverse();
                    PilotState::Braking
                } else {
                    controller.full_throttle();
                    PilotState::Seeking
                }
            }
        };

        if state != self.last_state {
            debug!(
                "Pilot state {:?} -> {:?} (speed={}, throttle={})",
                self.last_state,
                state,
                controller.speed(),
                controller.throttle()
            );
            self.last_state = state;
        }
        state
    }
}
