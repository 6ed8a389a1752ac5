use nalgebra::Vector3;
use tracing::{info, trace};

use crate::components::{
    AccelerationMotor, Existence, FlightState, Motion, Motor, MotorConfig, PoseProvider,
};
use crate::utils::{angle_between_deg, forward_axis, SimError, DEFAULT_FACING_TOLERANCE};

/// Per-tick integrator for one flight entity.
///
/// The controller owns its motor and flight state. It holds no activity
/// logic of its own: throttle and heading commands come from a pilot, and
/// [`FlightController::tick`] turns them into a new orientation and speed.
///
/// A freshly created controller is usable before [`FlightController::activate`]
/// is called: it carries a default motor and a zeroed state.
#[derive(Debug, Clone)]
pub struct FlightController<M: Motor = AccelerationMotor> {
    motor: M,
    state: FlightState,
    active: bool,
}

impl<M: Motor + Default> Default for FlightController<M> {
    fn default() -> Self {
        Self::with_motor(M::default())
    }
}

impl<M: Motor + Default> FlightController<M> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Motor> FlightController<M> {
    pub fn with_motor(motor: M) -> Self {
        let config = *motor.config();
        let mut motion = Motion::new(config.max_speed, config.max_turn);
        motion.orientation = motor.orientation();
        Self {
            motor,
            state: FlightState::new(Existence::default(), motion),
            active: false,
        }
    }

    /// Configure the motor and snapshot the initial state from `body`.
    ///
    /// Without an explicit initial orientation the motor starts from the
    /// body's current attitude.
    pub fn activate<P: PoseProvider + ?Sized>(
        &mut self,
        mut config: MotorConfig,
        body: &P,
    ) -> Result<(), SimError> {
        if config.initial_orientation.is_none() {
            config.initial_orientation = Some(body.attitude());
        }
        self.motor.configure(config)?;

        let mut motion = Motion::new(config.max_speed, config.max_turn);
        motion.orientation = self.motor.orientation();
        self.state = FlightState::new(Existence::capture(body), motion);
        self.active = true;

        info!(
            "Flight controller activated: max_speed={}, max_turn={}, max_acceleration={}, max_deceleration={}",
            config.max_speed, config.max_turn, config.max_acceleration, config.max_deceleration
        );
        Ok(())
    }

    /// Refresh the existence snapshot from `body` without advancing.
    ///
    /// Queries such as [`FlightController::distance_to`] read this snapshot,
    /// so callers deciding on the current pose sync before deciding.
    pub fn sync<P: PoseProvider + ?Sized>(&mut self, body: &P) {
        self.state.existence = Existence::capture(body);
    }

    /// Advance one fixed step: refresh existence, turn, then speed.
    pub fn tick<P: PoseProvider + ?Sized>(&mut self, body: &mut P, dt: f64) {
        let dt = dt.max(0.0);

        self.sync(body);

        let orientation = self.motor.advance_turn(dt);
        self.state.motion.orientation = orientation;
        self.state.existence.pose.attitude = orientation;
        body.set_attitude(orientation);

        let speed = self.motor.advance_speed(self.state.motion.speed, dt);
        self.state.motion.speed = speed;
        body.set_velocity(speed * forward_axis(&orientation));
        if speed == 0.0 {
            self.motor.full_stop();
        }

        trace!(
            "tick dt={} throttle={} speed={} position={:?}",
            dt,
            self.motor.throttle(),
            speed,
            self.state.existence.pose.position
        );
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn config(&self) -> &MotorConfig {
        self.motor.config()
    }

    /// Current forward speed.
    pub fn speed(&self) -> f64 {
        self.state.motion.speed
    }

    pub fn throttle(&self) -> f64 {
        self.motor.throttle()
    }

    pub fn position(&self) -> Vector3<f64> {
        self.state.existence.pose.position
    }

    pub fn forward(&self) -> Vector3<f64> {
        forward_axis(&self.state.existence.pose.attitude)
    }

    pub fn set_throttle(&mut self, value: f64) {
        self.motor.set_throttle(value);
    }

    pub fn full_throttle(&mut self) {
        self.motor.full_forward();
    }

    pub fn full_reverse(&mut self) {
        self.motor.full_reverse();
    }

    pub fn full_stop(&mut self) {
        self.motor.full_stop();
    }

    pub fn turn_to(&mut self, direction: Vector3<f64>) {
        self.motor.turn_to(direction);
    }

    /// Euclidean distance from the current position to `target`.
    pub fn distance_to(&self, target: &Vector3<f64>) -> f64 {
        (target - self.position()).norm()
    }

    /// Whether `target` lies within ±45° of the forward axis.
    pub fn is_facing(&self, target: &Vector3<f64>) -> bool {
        self.is_facing_within(target, DEFAULT_FACING_TOLERANCE)
    }

    /// Whether `target` lies within `tolerance` degrees of the forward axis.
    ///
    /// The tolerance is clamped to `[0, 360]`; angles near 360 count as
    /// facing too.
    pub fn is_facing_within(&self, target: &Vector3<f64>, tolerance: f64) -> bool {
        let tolerance = tolerance.clamp(0.0, 360.0);
        let angle = angle_between_deg(&(target - self.position()), &self.forward());
        angle <= tolerance || angle >= 360.0 - tolerance
    }

    /// Time needed to cover `distance` from the current speed.
    ///
    /// Solves `a·t² + v·t = distance` with `a = max_acceleration`, or
    /// `a = -max_deceleration` when `use_deceleration` is set:
    ///
    /// ```text
    ///      ±√(4ad + v²) − v
    /// t = ──────────────────
    ///            2a
    /// ```
    ///
    /// Returns `f64::INFINITY` when the discriminant is not positive, i.e. the
    /// entity stops before reaching the distance while decelerating.
    pub fn estimated_arrival(&self, distance: f64, use_deceleration: bool) -> f64 {
        let config = self.motor.config();
        let v = self.speed();
        let a = if use_deceleration {
            -config.max_deceleration
        } else {
            config.max_acceleration
        };

        let n = 4.0 * a * distance + v.powi(2);
        if n <= 0.0 {
            return f64::INFINITY;
        }
        let n = n.sqrt();
        let a2 = 2.0 * a;

        // Positive root first
        let t = (n - v) / a2;
        if t > 0.0 {
            return t;
        }
        (-n - v) / a2
    }
}
