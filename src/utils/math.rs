use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Local forward axis (+Z) of the given attitude in world space.
#[inline]
pub fn forward_axis(attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
    attitude * Vector3::z()
}

/// Rotation that points the local +Z axis along `direction`, keeping +Y up.
///
/// Returns `None` for a zero (or non-finite) direction. When `direction` is
/// parallel to +Y the world +Z axis is used as the up hint instead.
pub fn look_rotation(direction: &Vector3<f64>) -> Option<UnitQuaternion<f64>> {
    let norm = direction.norm();
    if !norm.is_finite() || norm <= f64::EPSILON {
        return None;
    }
    let dir = direction / norm;
    let up = if dir.cross(&Vector3::y()).norm() <= 1e-9 {
        Vector3::z()
    } else {
        Vector3::y()
    };
    Some(UnitQuaternion::face_towards(&dir, &up))
}

/// Normalized quaternion lerp along the shortest arc.
///
/// The factor is clamped to `[0, 1]`, so `0` returns `from` and `1` returns
/// `to` (up to sign).
pub fn nlerp_shortest(
    from: &UnitQuaternion<f64>,
    to: &UnitQuaternion<f64>,
    factor: f64,
) -> UnitQuaternion<f64> {
    let t = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    };
    let a: &Quaternion<f64> = from.as_ref();
    let mut b: Quaternion<f64> = *to.quaternion();
    if a.dot(&b) < 0.0 {
        b = -b;
    }
    let blended = a.lerp(&b, t);
    if blended.norm() <= f64::EPSILON {
        return *from;
    }
    UnitQuaternion::new_normalize(blended)
}

/// Unsigned angle between two vectors in degrees, `[0, 180]`.
///
/// Zero-length inputs yield `0`.
pub fn angle_between_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let prod = a.norm() * b.norm();
    if prod <= 1e-15 {
        return 0.0;
    }
    let cos = (a.dot(b) / prod).clamp(-1.0, 1.0);
    rad_to_deg(cos.acos())
}
