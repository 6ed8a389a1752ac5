// Motor defaults applied when a configuration attribute is missing.
pub const DEFAULT_MAX_SPEED: f64 = 100.0;
pub const DEFAULT_MAX_TURN: f64 = 10.0;
pub const DEFAULT_MAX_ACCELERATION: f64 = 10.0;
pub const DEFAULT_MAX_DECELERATION: f64 = 10.0;

/// Half-angle of the cone (degrees) in which a target counts as "ahead".
pub const DEFAULT_FACING_TOLERANCE: f64 = 45.0;

/// Distance kept from the target when braking.
pub const DEFAULT_SAFE_DISTANCE: f64 = 5.0;

pub const DEFAULT_TIMESTEP: f64 = 1.0 / 60.0; // Fixed tick [s]
pub const DEFAULT_MAX_STEPS: usize = 60 * 60 * 5;

// Wanderer timing
pub const WANDER_MIN_INTERVAL: f64 = 5.0; // s
pub const WANDER_INTERVAL_JITTER: f64 = 10.0; // s
pub const WANDER_RANGE_FACTOR: f64 = 10.0; // multiples of max speed
