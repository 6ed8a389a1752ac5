use nalgebra::Vector3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::WanderConfig;
use crate::systems::PredictivePilot;
use crate::utils::RngManager;

/// Keeps a pilot busy by handing it random waypoints.
///
/// A new waypoint is chosen at most once per `min_interval` seconds, plus a
/// random delay of up to `interval_jitter` seconds re-drawn on every check.
/// Waypoints lie in a cube around the origin scaled by a random range between
/// `max_speed` and `max_speed * range_factor`.
#[derive(Debug, Clone)]
pub struct Wanderer {
    config: WanderConfig,
    rng: ChaCha8Rng,
    last_choice: Option<f64>,
    waypoint: Option<Vector3<f64>>,
}

impl Wanderer {
    pub fn new(config: WanderConfig) -> Self {
        let rng = RngManager::new(config.seed).get_rng("wanderer");
        Self {
            config,
            rng,
            last_choice: None,
            waypoint: None,
        }
    }

    pub fn waypoint(&self) -> Option<Vector3<f64>> {
        self.waypoint
    }

    /// Pick a new waypoint for `pilot` if the decision interval has elapsed.
    ///
    /// Returns the new waypoint when one was chosen.
    pub fn update(
        &mut self,
        now: f64,
        max_speed: f64,
        pilot: &mut PredictivePilot,
    ) -> Option<Vector3<f64>> {
        if let Some(last) = self.last_choice {
            let jitter = self.rng.gen::<f64>() * self.config.interval_jitter;
            if now - last - jitter < self.config.min_interval {
                return None;
            }
        }

        let waypoint = self.next_waypoint(max_speed);
        info!("Wanderer picked waypoint {:?} at t={:.2}", waypoint, now);
        pilot.set_target(Some(waypoint));
        self.waypoint = Some(waypoint);
        self.last_choice = Some(now);
        Some(waypoint)
    }

    fn next_waypoint(&mut self, max_speed: f64) -> Vector3<f64> {
        let far = max_speed * self.config.range_factor;
        // An unvalidated config must not abort the tick
        let range = if far.is_finite() && far > max_speed {
            self.rng.gen_range(max_speed..far)
        } else {
            max_speed
        };
        let direction = Vector3::new(
            self.rng.gen_range(-1.0_f64..=1.0),
            self.rng.gen_range(-1.0_f64..=1.0),
            self.rng.gen_range(-1.0_f64..=1.0),
        );
        direction * range
    }
}
