use nalgebra::Vector3;
use serde::Serialize;
use tracing::info;

use crate::components::{PoseProvider, SpatialComponent, TransmissionFrame};
use crate::config::SimulationConfig;
use crate::systems::{FlightController, PilotState, PredictivePilot, Wanderer};
use crate::utils::SimError;

/// Summary of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub time: f64,
    pub decision: PilotState,
    pub speed: f64,
    /// Distance to the current target, if any
    pub distance: Option<f64>,
}

/// Fixed-step driver for one flight entity.
///
/// Each step runs the wanderer, then the pilot, then the controller, and
/// finally moves the body, so commands issued on a tick affect that same
/// tick's integration.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    body: SpatialComponent,
    controller: FlightController,
    pilot: PredictivePilot,
    wanderer: Option<Wanderer>,
    time: f64,
    steps: usize,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;

        let body = config.body.to_spatial();
        let mut controller = FlightController::new();
        controller.activate(config.motor, &body)?;

        let mut pilot = PredictivePilot::new(config.pilot);
        pilot.set_target(config.target_position());
        let wanderer = config.wander.map(Wanderer::new);

        info!(
            "Simulation ready: time_step={}, target={:?}, wander={}",
            config.time_step,
            pilot.target(),
            wanderer.is_some()
        );

        Ok(Self {
            config,
            body,
            controller,
            pilot,
            wanderer,
            time: 0.0,
            steps: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn body(&self) -> &SpatialComponent {
        &self.body
    }

    pub fn controller(&self) -> &FlightController {
        &self.controller
    }

    pub fn pilot(&self) -> &PredictivePilot {
        &self.pilot
    }

    pub fn pilot_mut(&mut self) -> &mut PredictivePilot {
        &mut self.pilot
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Retarget the pilot. Last write wins.
    pub fn set_target(&mut self, target: Option<Vector3<f64>>) {
        self.pilot.set_target(target);
    }

    pub fn distance_to_target(&self) -> Option<f64> {
        self.pilot
            .target()
            .map(|target| (target - self.body.position()).norm())
    }

    /// Stopped within `tolerance` of the safe distance.
    pub fn arrived(&self, tolerance: f64) -> bool {
        match self.distance_to_target() {
            Some(distance) => {
                self.controller.speed() == 0.0
                    && (distance - self.pilot.safe_distance()).abs() <= tolerance
            }
            None => false,
        }
    }

    /// At rest inside the safe distance. The pilot keeps braking from here
    /// on, so the body will not move again until the target changes.
    pub fn settled(&self) -> bool {
        match self.distance_to_target() {
            Some(distance) => {
                self.controller.speed() == 0.0 && distance <= self.pilot.safe_distance()
            }
            None => false,
        }
    }

    pub fn frame(&self) -> TransmissionFrame {
        self.controller.state().transmission_frame()
    }

    pub fn step(&mut self) -> StepReport {
        let dt = self.config.time_step;

        // Decisions below must see where the body is now
        self.controller.sync(&self.body);
        if let Some(wanderer) = self.wanderer.as_mut() {
            wanderer.update(self.time, self.controller.config().max_speed, &mut self.pilot);
        }
        let decision = self.pilot.update(&mut self.controller);
        self.controller.tick(&mut self.body, dt);
        self.body.integrate(dt);

        self.time += dt;
        self.steps += 1;

        StepReport {
            step: self.steps,
            time: self.time,
            decision,
            speed: self.controller.speed(),
            distance: self.distance_to_target(),
        }
    }

    pub fn run(&mut self, steps: usize) -> Option<StepReport> {
        (0..steps).map(|_| self.step()).last()
    }

    /// Step until `condition` holds, for at most `max_steps` steps.
    pub fn run_until<F>(&mut self, condition: F, max_steps: usize) -> bool
    where
        F: Fn(&Simulation) -> bool,
    {
        for _ in 0..max_steps {
            if condition(self) {
                return true;
            }
            self.step();
        }
        condition(self)
    }
}
