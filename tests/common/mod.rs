#![allow(dead_code)]


// Re-export
pub use assertions::{assert_frame_valid, assert_position_eq, assert_state_valid};
pub use fixtures::*;
pub use helpers::*;
pub use test_app::{TestApp, TestAppBuilder};
