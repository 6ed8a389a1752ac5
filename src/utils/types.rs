use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Plain position triple used in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<Position> for Vector3<f64> {
    fn from(pos: Position) -> Self {
        Vector3::new(pos.x, pos.y, pos.z)
    }
}

impl From<Vector3<f64>> for Position {
    fn from(vec: Vector3<f64>) -> Self {
        Self {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}
