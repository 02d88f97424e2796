use glam::{Quat, Vec3};

use crate::EPSILON;

/// Angle in radians between two vectors, 0 if either is near zero length.
pub fn angle_between(v1: Vec3, v2: Vec3) -> f32 {
    let length_factor = v1.length() * v2.length();
    if length_factor < EPSILON {
        return 0.0;
    }
    (v1.dot(v2) / length_factor).clamp(-1.0, 1.0).acos()
}

/// The rotation carrying v1 onto v2, with a fallback axis for the
/// antiparallel case where the cross product degenerates.
pub fn rotation_between(v1: Vec3, v2: Vec3) -> Quat {
    let angle = angle_between(v1, v2);
    if angle.is_nan() || angle < EPSILON {
        return Quat::IDENTITY;
    }
    let axis = if angle > 179.99_f32.to_radians() {
        // 180 degree rotation; must pick an axis perpendicular to v1
        let axis = v1.cross(Vec3::X);
        if axis.length() < EPSILON {
            Vec3::Y
        } else {
            axis.normalize()
        }
    } else {
        v1.cross(v2).normalize()
    };
    Quat::from_axis_angle(axis, angle)
}

// relative comparison; the epsilon in the denominator avoids a zero check
pub fn close_enough(a: f32, b: f32, relative_error: f32) -> bool {
    (a - b).abs() / (0.5 * (a + b).abs() + EPSILON) < relative_error
}

pub fn is_non_uniform_scale(scale: Vec3) -> bool {
    (scale.x - scale.y).abs() > EPSILON || (scale.y - scale.z).abs() > EPSILON
}

const QUAT_PART_CONVERSION_RATIO: f32 = u16::MAX as f32 / 2.0;
const ANGLE_CONVERSION_RATIO: f32 = u16::MAX as f32 / 360.0;

/// Packs a rotation into 8 bytes, one 16-bit fixed point value per component
/// mapped across [-1, 1]. Component error after a round trip stays under
/// 2 / 65535.
pub fn pack_quat_64(rotation: Quat) -> [u8; 8] {
    let q = rotation.normalize();
    let mut bytes = [0u8; 8];
    for (i, component) in [q.x, q.y, q.z, q.w].into_iter().enumerate() {
        let part = ((component + 1.0) * QUAT_PART_CONVERSION_RATIO).floor() as u16;
        bytes[i * 2..i * 2 + 2].copy_from_slice(&part.to_le_bytes());
    }
    bytes
}

pub fn unpack_quat_64(bytes: [u8; 8]) -> Quat {
    let mut components = [0.0f32; 4];
    for (i, component) in components.iter_mut().enumerate() {
        let part = u16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]]);
        *component = part as f32 / QUAT_PART_CONVERSION_RATIO - 1.0;
    }
    Quat::from_xyzw(components[0], components[1], components[2], components[3]).normalize()
}

/// Fixed point with a caller-chosen radix, for scalars with known range.
pub fn pack_float_fixed(value: f32, radix: u32) -> i16 {
    (value * (1 << radix) as f32) as i16
}

pub fn unpack_float_fixed(raw: i16, radix: u32) -> f32 {
    raw as f32 / (1 << radix) as f32
}

/// Degrees in [-180, 180] mapped across the u16 range.
pub fn pack_angle_16(degrees: f32) -> u16 {
    ((degrees + 180.0) * ANGLE_CONVERSION_RATIO).floor() as u16
}

pub fn unpack_angle_16(raw: u16) -> f32 {
    raw as f32 / ANGLE_CONVERSION_RATIO - 180.0
}
