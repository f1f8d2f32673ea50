/// Column-major 3x3 matrix, laid out the way the shader uniform expects it.
pub type Mat3 = [f32; 9];

pub const MAT3_IDENTITY: Mat3 = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// Builds a rotation matrix from yaw (Y), pitch (X), and roll (Z) angles in
/// radians, applied in that order.
pub fn mat3_from_euler(yaw: f32, pitch: f32, roll: f32) -> Mat3 {
    let (sy, cy) = yaw.sin_cos();
    let (sx, cx) = pitch.sin_cos();
    let (sz, cz) = roll.sin_cos();

    let r00 = cy * cz + sy * sx * sz;
    let r01 = -cy * sz + sy * sx * cz;
    let r02 = sy * cx;
    let r10 = cx * sz;
    let r11 = cx * cz;
    let r12 = -sx;
    let r20 = -sy * cz + cy * sx * sz;
    let r21 = sy * sz + cy * sx * cz;
    let r22 = cy * cx;

    [r00, r10, r20, r01, r11, r21, r02, r12, r22]
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
