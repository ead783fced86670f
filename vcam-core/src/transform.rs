/// Camera orientation strategies and the world-to-camera transform
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, Point3, Rotation3, Vector3};

use crate::camera::Camera;
use crate::error::ConfigError;

/// How rotate calls accumulate into the camera orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Each delta is applied in the camera's current local frame (`R ← ΔR · R`)
    #[default]
    Incremental,
    /// Deltas add to pitch/yaw/roll; the matrix is rebuilt from world axes
    Euler,
}

impl RotationPolicy {
    /// Degrees of rotation per unit of rotate input
    pub fn rotation_speed(self) -> f32 {
        match self {
            RotationPolicy::Incremental => 1.0,
            RotationPolicy::Euler => 0.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RotationPolicy::Incremental => "incremental",
            RotationPolicy::Euler => "euler",
        }
    }
}

impl fmt::Display for RotationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incremental" | "matrix" => Ok(RotationPolicy::Incremental),
            "euler" => Ok(RotationPolicy::Euler),
            _ => Err(ConfigError::UnknownRotationPolicy(s.to_string())),
        }
    }
}

/// Rotation state around three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl EulerAngles {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dpitch: f32, dyaw: f32, droll: f32) {
        self.pitch += dpitch;
        self.yaw += dyaw;
        self.roll += droll;
    }
}

/// Current camera orientation, in one of two interchangeable representations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Incremental(Matrix3<f32>),
    Euler(EulerAngles),
}

impl Orientation {
    /// The unrotated orientation for a policy
    pub fn identity(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Incremental => Orientation::Incremental(Matrix3::identity()),
            RotationPolicy::Euler => Orientation::Euler(EulerAngles::zero()),
        }
    }

    pub fn policy(&self) -> RotationPolicy {
        match self {
            Orientation::Incremental(_) => RotationPolicy::Incremental,
            Orientation::Euler(_) => RotationPolicy::Euler,
        }
    }

    /// Accumulate a rotation given in degrees (already speed-scaled)
    pub fn rotate(&mut self, dpitch: f32, dyaw: f32, droll: f32) {
        match self {
            Orientation::Incremental(matrix) => {
                let delta = Transform::euler_matrix(dpitch, dyaw, droll);
                *matrix = delta * *matrix;
            }
            Orientation::Euler(angles) => angles.rotate(dpitch, dyaw, droll),
        }
    }

    /// The world-to-camera rotation matrix
    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        match self {
            Orientation::Incremental(matrix) => *matrix,
            Orientation::Euler(angles) => {
                Transform::euler_matrix(angles.pitch, angles.yaw, angles.roll)
            }
        }
    }
}

/// Transform builder for camera-space conversion
pub struct Transform;

impl Transform {
    /// Rotation about the X axis
    pub fn pitch_matrix(degrees: f32) -> Matrix3<f32> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), degrees.to_radians()).into_inner()
    }

    /// Rotation about the Y axis
    pub fn yaw_matrix(degrees: f32) -> Matrix3<f32> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.to_radians()).into_inner()
    }

    /// Rotation about the Z axis
    pub fn roll_matrix(degrees: f32) -> Matrix3<f32> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.to_radians()).into_inner()
    }

    /// Combine per-axis rotations (in degrees).
    ///
    /// Applied in order: yaw, pitch, roll.
    pub fn euler_matrix(pitch: f32, yaw: f32, roll: f32) -> Matrix3<f32> {
        Self::roll_matrix(roll) * Self::pitch_matrix(pitch) * Self::yaw_matrix(yaw)
    }

    /// Convert one mesh's world-space vertices into camera space.
    ///
    /// The rotation matrix is derived once for the whole batch.
    pub fn to_camera_space(camera: &Camera, vertices: &[Point3<f32>]) -> Vec<Point3<f32>> {
        let mut out = Vec::with_capacity(vertices.len());
        Self::to_camera_space_into(camera, vertices, &mut out);
        out
    }

    /// Like [`Transform::to_camera_space`], reusing `out`'s allocation
    pub fn to_camera_space_into(
        camera: &Camera,
        vertices: &[Point3<f32>],
        out: &mut Vec<Point3<f32>>,
    ) {
        let rotation = camera.rotation_matrix();
        let position = camera.position();

        out.clear();
        out.extend(
            vertices
                .iter()
                .map(|vertex| Point3::from(rotation * (*vertex - position))),
        );
    }
}
