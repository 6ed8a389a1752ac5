pub mod motor;
pub mod spatial;
pub mod state;

pub use motor::{AccelerationMotor, Motor, MotorAttribute, MotorConfig};
pub use spatial::{PoseProvider, SpatialComponent};
pub use state::{Existence, FlightState, Motion, Pose, TransmissionFrame};
