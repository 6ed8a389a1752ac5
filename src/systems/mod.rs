pub mod controller;
pub mod pilot;
pub mod wanderer;

pub use controller::FlightController;
pub use pilot::{braking_required, PilotState, PredictivePilot};
pub use wanderer::Wanderer;
