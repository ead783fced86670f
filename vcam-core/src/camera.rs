/// Camera state and the controller operations that mutate it
use log::debug;
use nalgebra::{Matrix3, Point3, Vector3};

use crate::input::LogicalAction;
use crate::transform::{Orientation, RotationPolicy};

/// World units moved per unit of move input
pub const MOVE_SPEED: f32 = 0.25;

/// Focal length never drops below this
pub const MIN_FOCAL_LENGTH: f32 = 1.0;

/// Focal length change per zoom action
pub const ZOOM_STEP: f32 = 0.1;

/// Where the camera starts and where reset puts it back
pub const DEFAULT_POSITION: [f32; 3] = [0.0, 0.0, -5.0];

/// Virtual camera: pose plus zoom.
///
/// Fields are private so every mutation goes through the controller methods,
/// which keep the focal length at or above [`MIN_FOCAL_LENGTH`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3<f32>,
    orientation: Orientation,
    focal_length: f32,
}

impl Camera {
    pub fn new(policy: RotationPolicy) -> Self {
        Self {
            position: Point3::from(DEFAULT_POSITION),
            orientation: Orientation::identity(policy),
            focal_length: MIN_FOCAL_LENGTH,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    pub fn policy(&self) -> RotationPolicy {
        self.orientation.policy()
    }

    /// The current world-to-camera rotation
    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        self.orientation.rotation_matrix()
    }

    /// Move along the camera's own axes (+Z is forward)
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        let direction = Vector3::new(dx, dy, dz) * MOVE_SPEED;
        // The transpose of a rotation is its inverse: camera axes to world axes
        self.position += self.rotation_matrix().transpose() * direction;
    }

    /// Rotate by per-axis inputs, scaled by the policy's rotation speed
    pub fn rotate(&mut self, dpitch: f32, dyaw: f32, droll: f32) {
        let speed = self.policy().rotation_speed();
        self.orientation
            .rotate(dpitch * speed, dyaw * speed, droll * speed);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.focal_length += delta;
        if self.focal_length < MIN_FOCAL_LENGTH {
            debug!("focal length {} clamped to {}", self.focal_length, MIN_FOCAL_LENGTH);
            self.focal_length = MIN_FOCAL_LENGTH;
        }
    }

    /// Return to the session defaults, keeping the rotation policy
    pub fn reset(&mut self) {
        debug!("camera reset");
        *self = Self::new(self.policy());
    }

    /// Apply one logical action.
    ///
    /// `Quit` is not a camera operation and is ignored here.
    pub fn apply(&mut self, action: LogicalAction) {
        match action {
            LogicalAction::MoveForward => self.move_by(0.0, 0.0, 1.0),
            LogicalAction::MoveBack => self.move_by(0.0, 0.0, -1.0),
            LogicalAction::MoveLeft => self.move_by(-1.0, 0.0, 0.0),
            LogicalAction::MoveRight => self.move_by(1.0, 0.0, 0.0),
            LogicalAction::MoveUp => self.move_by(0.0, 1.0, 0.0),
            LogicalAction::MoveDown => self.move_by(0.0, -1.0, 0.0),
            LogicalAction::RotateUp => self.rotate(1.0, 0.0, 0.0),
            LogicalAction::RotateDown => self.rotate(-1.0, 0.0, 0.0),
            LogicalAction::RotateRight => self.rotate(0.0, -1.0, 0.0),
            LogicalAction::RotateLeft => self.rotate(0.0, 1.0, 0.0),
            LogicalAction::RollCW => self.rotate(0.0, 0.0, 1.0),
            LogicalAction::RollCCW => self.rotate(0.0, 0.0, -1.0),
            LogicalAction::ZoomIn => self.zoom(ZOOM_STEP),
            LogicalAction::ZoomOut => self.zoom(-ZOOM_STEP),
            LogicalAction::Reset => self.reset(),
            LogicalAction::Quit => {}
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(RotationPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::EulerAngles;

    fn assert_point_eq(a: Point3<f32>, b: Point3<f32>) {
        assert!((a - b).norm() < 1e-5, "{} != {}", a, b);
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.position(), Point3::new(0.0, 0.0, -5.0));
        assert_eq!(camera.focal_length(), 1.0);
        assert_eq!(camera.policy(), RotationPolicy::Incremental);
        assert_eq!(camera.rotation_matrix(), Matrix3::identity());
    }

    #[test]
    fn test_move_forward_at_default_pose() {
        let mut camera = Camera::default();
        camera.move_by(0.0, 0.0, 1.0);
        assert_point_eq(camera.position(), Point3::new(0.0, 0.0, -4.75));

        camera.move_by(-1.0, 1.0, 0.0);
        assert_point_eq(camera.position(), Point3::new(-0.25, 0.25, -4.75));
    }

    #[test]
    fn test_move_follows_current_heading() {
        for policy in [RotationPolicy::Incremental, RotationPolicy::Euler] {
            let mut camera = Camera::new(policy);
            let steps = (90.0 / policy.rotation_speed()) as usize;
            for _ in 0..steps {
                camera.rotate(0.0, 1.0, 0.0);
            }

            // After a quarter turn, forward points along world -X
            camera.move_by(0.0, 0.0, 1.0);
            assert_point_eq(camera.position(), Point3::new(-0.25, 0.0, -5.0));
        }
    }

    #[test]
    fn test_rotation_speed_per_policy() {
        let mut euler = Camera::new(RotationPolicy::Euler);
        euler.rotate(1.0, 2.0, -4.0);
        euler.rotate(1.0, 0.0, 0.0);
        assert_eq!(
            *euler.orientation(),
            Orientation::Euler(EulerAngles::new(1.0, 1.0, -2.0))
        );

        let mut incremental = Camera::new(RotationPolicy::Incremental);
        incremental.rotate(0.0, 10.0, 0.0);
        let expected = crate::transform::Transform::yaw_matrix(10.0);
        assert!((incremental.rotation_matrix() - expected).norm() < 1e-6);
    }

    #[test]
    fn test_rotate_then_reversed_rotate_is_not_identity() {
        let mut camera = Camera::default();
        camera.rotate(15.0, 40.0, 25.0);
        camera.rotate(-25.0, -40.0, -15.0);
        assert!((camera.rotation_matrix() - Matrix3::identity()).norm() > 1e-3);
    }

    #[test]
    fn test_zoom_floor() {
        let mut camera = Camera::default();
        for _ in 0..10 {
            camera.zoom(-0.1);
        }
        assert_eq!(camera.focal_length(), 1.0);

        camera.zoom(0.5);
        assert!((camera.focal_length() - 1.5).abs() < 1e-6);

        camera.zoom(-100.0);
        assert_eq!(camera.focal_length(), MIN_FOCAL_LENGTH);
    }

    #[test]
    fn test_reset_is_idempotent() {
        for policy in [RotationPolicy::Incremental, RotationPolicy::Euler] {
            let mut camera = Camera::new(policy);
            camera.move_by(1.0, -2.0, 3.0);
            camera.rotate(12.0, -7.0, 33.0);
            camera.zoom(2.3);

            camera.reset();
            assert_eq!(camera, Camera::new(policy));

            camera.reset();
            assert_eq!(camera, Camera::new(policy));
        }
    }

    #[test]
    fn test_apply_actions() {
        let mut camera = Camera::default();
        camera.apply(LogicalAction::MoveRight);
        camera.apply(LogicalAction::MoveUp);
        assert_point_eq(camera.position(), Point3::new(0.25, 0.25, -5.0));

        camera.apply(LogicalAction::ZoomIn);
        camera.apply(LogicalAction::ZoomIn);
        assert!((camera.focal_length() - 1.2).abs() < 1e-6);
        camera.apply(LogicalAction::ZoomOut);
        assert!((camera.focal_length() - 1.1).abs() < 1e-6);

        camera.apply(LogicalAction::RotateLeft);
        let expected = crate::transform::Transform::yaw_matrix(1.0);
        assert!((camera.rotation_matrix() - expected).norm() < 1e-6);

        let before = camera.clone();
        camera.apply(LogicalAction::Quit);
        assert_eq!(camera, before);

        camera.apply(LogicalAction::Reset);
        assert_eq!(camera, Camera::default());
    }

    #[test]
    fn test_opposite_actions_cancel() {
        let mut camera = Camera::default();
        camera.apply(LogicalAction::RollCW);
        camera.apply(LogicalAction::RollCCW);
        assert!((camera.rotation_matrix() - Matrix3::identity()).norm() < 1e-6);

        camera.apply(LogicalAction::MoveForward);
        camera.apply(LogicalAction::MoveBack);
        assert_point_eq(camera.position(), Point3::from(DEFAULT_POSITION));
    }
}
