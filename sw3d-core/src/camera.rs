/// Virtual camera and its navigation commands
use nalgebra::{Point3, Vector3};

use crate::transform;

/// Step for one move command, in world units.
const MOVE_STEP: f32 = 0.1;
/// Step for one rotate command, in degrees.
const ROTATE_STEP: f32 = 10.0;
/// Step for one zoom command, in degrees of field of view.
const ZOOM_STEP: f32 = 1.0;

/// A coordinate axis, used to address camera commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Virtual camera as the viewer of a scene
///
/// The single source of truth for view parameters; navigation commands
/// mutate it directly and the caller re-runs the pipeline afterwards.
#[derive(Debug, Clone)]
pub struct Camera {
    /// The viewer's eye.
    pub position: Point3<f32>,
    /// Point the viewing direction passes through.
    pub target: Point3<f32>,
    /// Up vector.
    pub up: Vector3<f32>,
    /// Field of view angle in degrees.
    pub fov: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Camera {
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            near,
            far,
        }
    }

    /// Translate position and target along an axis by one step.
    ///
    /// Both points move together, so the viewing direction is kept.
    pub fn move_axis(&mut self, axis: Axis, positive: bool) {
        let step = if positive { MOVE_STEP } else { -MOVE_STEP };
        let delta = match axis {
            Axis::X => Vector3::new(step, 0.0, 0.0),
            Axis::Y => Vector3::new(0.0, step, 0.0),
            Axis::Z => Vector3::new(0.0, 0.0, step),
        };
        self.position += delta;
        self.target += delta;
    }

    /// Rotate the view target about an axis by one step.
    pub fn rotate_axis(&mut self, axis: Axis, positive: bool) {
        let angle = if positive { ROTATE_STEP } else { -ROTATE_STEP };
        let rotation = match axis {
            Axis::X => transform::rotation_x(angle),
            Axis::Y => transform::rotation_y(angle),
            Axis::Z => transform::rotation_z(angle),
        };
        self.target = rotation.transform_point(&self.target);
    }

    /// Narrow or widen the field of view by one step.
    pub fn zoom(&mut self, zoom_in: bool) {
        self.fov += if zoom_in { ZOOM_STEP } else { -ZOOM_STEP };
    }
}

impl Default for Camera {
    /// Camera one unit behind the origin, looking down the positive z
    /// axis with a 45 degree field of view.
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 1.0, 0.0),
            45.0,
            0.2,
            0.3,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_keeps_direction() {
        let mut camera = Camera::default();
        let direction = camera.target - camera.position;
        camera.move_axis(Axis::X, true);
        camera.move_axis(Axis::Z, false);
        assert!((camera.position.x - 0.1).abs() < 1e-6);
        assert!((camera.position.z + 1.1).abs() < 1e-6);
        let moved_direction = camera.target - camera.position;
        assert!((moved_direction - direction).norm() < 1e-6);
    }

    #[test]
    fn test_rotate_changes_target_only() {
        let mut camera = Camera::default();
        let position = camera.position;
        camera.rotate_axis(Axis::Y, true);
        assert_eq!(camera.position, position);
        // Ten degrees about y moves the target off the z axis
        assert!(camera.target.x.abs() > 1e-3);
    }

    #[test]
    fn test_rotate_round_trip() {
        let mut camera = Camera::default();
        let target = camera.target;
        camera.rotate_axis(Axis::X, true);
        camera.rotate_axis(Axis::X, false);
        assert!((camera.target - target).norm() < 1e-5);
    }

    #[test]
    fn test_zoom_steps_fov() {
        let mut camera = Camera::default();
        camera.zoom(true);
        assert!((camera.fov - 46.0).abs() < 1e-6);
        camera.zoom(false);
        camera.zoom(false);
        assert!((camera.fov - 44.0).abs() < 1e-6);
    }
}
