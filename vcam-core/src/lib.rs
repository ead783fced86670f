//! VCam Core Library - Virtual camera math and frame orchestration
//!
//! This library provides the camera transform and perspective-projection
//! pipeline for a wireframe viewer: camera pose and control, world-to-camera
//! transforms, projection, edge visibility and the per-tick frame loop that
//! drives an external render/input backend.

pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod projection;
pub mod transform;
pub mod visibility;

// Re-export commonly used types
pub use camera::Camera;
pub use config::ViewerConfig;
pub use error::{ConfigError, SceneError, ViewerError};
pub use frame::{Backend, Color, FrameLoop, FrameStats, LoopState};
pub use geometry::{Edge, Mesh, Scene};
pub use input::{ActionSet, LogicalAction};
pub use projection::{project_to_2d, Viewport};
pub use transform::{EulerAngles, Orientation, RotationPolicy, Transform};
pub use visibility::is_edge_visible;
