/// Homogeneous 4x4 transformation matrix constructors
///
/// The pipeline's matrix conventions follow the column-vector form with
/// translation in the last column. They intentionally differ from
/// nalgebra's `look_at_rh` / `new_perspective` builders; the entries are
/// written out explicitly so the conventions stay fixed end-to-end.
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::RenderError;

/// Norm below which a vector counts as zero-length.
const NORMALIZE_EPS: f32 = 1e-6;

/// Convert an angle in degrees to radians.
pub fn to_radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Create the translation matrix for a given translation vector.
pub fn translation(t: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, t.x, //
        0.0, 1.0, 0.0, t.y, //
        0.0, 0.0, 1.0, t.z, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Create the scaling matrix for a given scaling vector.
pub fn scaling(s: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new(
        s.x, 0.0, 0.0, 0.0, //
        0.0, s.y, 0.0, 0.0, //
        0.0, 0.0, s.z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Create the x-axis rotation matrix for an angle in degrees.
///
/// A zero angle yields the exact identity, bypassing trigonometry so no
/// round-off can leak into the matrix.
pub fn rotation_x(degrees: f32) -> Matrix4<f32> {
    if degrees == 0.0 {
        return Matrix4::identity();
    }
    let (sin, cos) = to_radians(degrees).sin_cos();
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, cos, -sin, 0.0, //
        0.0, sin, cos, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Create the y-axis rotation matrix for an angle in degrees.
pub fn rotation_y(degrees: f32) -> Matrix4<f32> {
    if degrees == 0.0 {
        return Matrix4::identity();
    }
    let (sin, cos) = to_radians(degrees).sin_cos();
    Matrix4::new(
        cos, 0.0, sin, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        -sin, 0.0, cos, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Create the z-axis rotation matrix for an angle in degrees.
pub fn rotation_z(degrees: f32) -> Matrix4<f32> {
    if degrees == 0.0 {
        return Matrix4::identity();
    }
    let (sin, cos) = to_radians(degrees).sin_cos();
    Matrix4::new(
        cos, -sin, 0.0, 0.0, //
        sin, cos, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Create the combined rotation matrix for per-axis angles in degrees,
/// applied in Z, then Y, then X order.
pub fn rotation_zyx(rotation: &Vector3<f32>) -> Matrix4<f32> {
    rotation_z(rotation.z) * rotation_y(rotation.y) * rotation_x(rotation.x)
}

/// Create the look-at view matrix for a camera at `eye` looking towards
/// `target` with the given up vector.
///
/// Rows of the upper-left 3x3 block are the camera right, true-up and
/// forward axes; the last column translates the eye to the origin. A
/// camera looking at its own position, or an up vector parallel to the
/// viewing direction, cannot be normalized and is rejected.
pub fn look_at(
    eye: &Point3<f32>,
    target: &Point3<f32>,
    up: &Vector3<f32>,
) -> Result<Matrix4<f32>, RenderError> {
    let forward = (target - eye)
        .try_normalize(NORMALIZE_EPS)
        .ok_or(RenderError::DegenerateVector("view direction"))?;
    let right = up
        .cross(&forward)
        .try_normalize(NORMALIZE_EPS)
        .ok_or(RenderError::DegenerateVector("camera right axis"))?;
    let true_up = forward
        .cross(&right)
        .try_normalize(NORMALIZE_EPS)
        .ok_or(RenderError::DegenerateVector("camera up axis"))?;

    let eye = eye.coords;
    Ok(Matrix4::new(
        right.x, right.y, right.z, -right.dot(&eye), //
        true_up.x, true_up.y, true_up.z, -true_up.dot(&eye), //
        forward.x, forward.y, forward.z, -forward.dot(&eye), //
        0.0, 0.0, 0.0, 1.0,
    ))
}

/// Create the perspective projection matrix for a field of view in
/// degrees, screen dimensions and near/far clip distances.
///
/// The aspect ratio is height over width and the homogeneous w picks up
/// the unflipped view-space z (`m32 = 1`); both conventions are load
/// bearing for the rest of the pipeline.
pub fn perspective(
    fov_degrees: f32,
    screen_width: f32,
    screen_height: f32,
    near: f32,
    far: f32,
) -> Result<Matrix4<f32>, RenderError> {
    let tan_half = (to_radians(fov_degrees) * 0.5).tan();
    if tan_half == 0.0 {
        return Err(RenderError::DivideByZero("tan(foV / 2)"));
    }
    if screen_width == 0.0 {
        return Err(RenderError::DivideByZero("screen width"));
    }
    let depth = far - near;
    if depth == 0.0 {
        return Err(RenderError::DivideByZero("far - near"));
    }

    let cotan = 1.0 / tan_half;
    let aspect = screen_height / screen_width;
    Ok(Matrix4::new(
        cotan * aspect, 0.0, 0.0, 0.0, //
        0.0, cotan, 0.0, 0.0, //
        0.0, 0.0, far / depth, -(far * near) / depth, //
        0.0, 0.0, 1.0, 0.0,
    ))
}
