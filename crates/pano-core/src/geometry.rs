use crate::constants::MARKER_SPIN_RAD_PER_SEC;
use crate::tour::Rotation;
use glam::Vec3;

/// Position of a link marker placed `distance` units from the viewer along
/// the direction described by `rotation`.
///
/// The canonical forward vector (+Z) is rotated by the quaternion using the
/// expanded matrix form, so non-unit quaternions from the authoring tool
/// produce the same result as they did there. X and Z are negated afterwards:
/// the authoring tool and the renderer disagree on handedness.
pub fn marker_offset(rotation: Rotation, distance: f32) -> Vec3 {
    let forward = Vec3::Z * distance;
    let Rotation { x, y, z, w } = rotation;

    let x2 = x * 2.0;
    let y2 = y * 2.0;
    let z2 = z * 2.0;
    let xx = x * x2;
    let yy = y * y2;
    let zz = z * z2;
    let xy = x * y2;
    let xz = x * z2;
    let yz = y * z2;
    let wx = w * x2;
    let wy = w * y2;
    let wz = w * z2;

    let rx = (1.0 - (yy + zz)) * forward.x + (xy - wz) * forward.y + (xz + wy) * forward.z;
    let ry = (xy + wz) * forward.x + (1.0 - (xx + zz)) * forward.y + (yz - wx) * forward.z;
    let rz = (xz - wy) * forward.x + (yz + wx) * forward.y + (1.0 - (xx + yy)) * forward.z;

    Vec3::new(-rx, ry, -rz)
}

/// Accumulated decorative spin (radians about the up axis) after `elapsed_sec`.
#[inline]
pub fn marker_spin(elapsed_sec: f32) -> f32 {
    (elapsed_sec * MARKER_SPIN_RAD_PER_SEC) % std::f32::consts::TAU
}
