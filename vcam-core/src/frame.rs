/// Per-tick orchestration of input, camera, projection and drawing
use std::io;
use std::time::Duration;

use log::{debug, info, trace};
use nalgebra::{Point2, Point3};

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::geometry::Scene;
use crate::input::ActionSet;
use crate::projection::{project_to_2d, Viewport};
use crate::transform::Transform;
use crate::visibility::is_edge_visible;

/// 24-bit line color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The render/input collaborator driven by the frame loop
pub trait Backend {
    /// True once the environment asked the viewer to close
    fn poll_quit_signal(&mut self) -> io::Result<bool>;

    /// Logical actions held during this tick
    fn pressed_actions(&mut self) -> io::Result<ActionSet>;

    fn clear_frame(&mut self) -> io::Result<()>;

    /// Draw a line between two points given in pixel coordinates
    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) -> io::Result<()>;

    fn present_frame(&mut self) -> io::Result<()>;

    /// Block until the next tick is due
    fn wait(&mut self, interval: Duration) -> io::Result<()> {
        std::thread::sleep(interval);
        Ok(())
    }

    /// Release whatever the backend acquired; called once the loop stops
    fn teardown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Frame loop state; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Edge counts for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub edges_drawn: usize,
    pub edges_culled: usize,
}

/// Owns the camera and scene and runs them against a [`Backend`]
pub struct FrameLoop {
    camera: Camera,
    scene: Scene,
    config: ViewerConfig,
    viewport: Viewport,
    state: LoopState,
    frames: u64,
    // Scratch buffers reused across meshes and frames
    camera_space: Vec<Point3<f32>>,
    projected: Vec<Point2<f32>>,
}

impl FrameLoop {
    pub fn new(scene: Scene, config: ViewerConfig) -> Self {
        Self {
            camera: Camera::new(config.rotation_policy),
            scene,
            viewport: config.viewport(),
            config,
            state: LoopState::Running,
            frames: 0,
            camera_space: Vec::new(),
            projected: Vec::new(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Tick until stopped, then tear the backend down.
    ///
    /// Teardown runs even when a tick fails; the tick error takes precedence.
    pub fn run<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<(), ViewerError> {
        info!(
            "frame loop starting: {} meshes, {} edges, {} rotation",
            self.scene.meshes().len(),
            self.scene.edge_count(),
            self.camera.policy()
        );

        let result = self.main_loop(backend);
        if result.is_err() {
            self.state = LoopState::Stopped;
        }

        info!("frame loop stopped after {} frames, tearing down backend", self.frames);
        let teardown = backend.teardown();

        result?;
        teardown?;
        Ok(())
    }

    fn main_loop<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<(), ViewerError> {
        while self.tick(backend)? == LoopState::Running {}
        Ok(())
    }

    /// Run one tick: input, camera update, render, present, wait
    pub fn tick<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<LoopState, ViewerError> {
        if self.state == LoopState::Stopped {
            return Ok(self.state);
        }

        if backend.poll_quit_signal()? {
            self.stop("quit signal");
            return Ok(self.state);
        }

        let actions = backend.pressed_actions()?;
        if self.apply_actions(&actions) == LoopState::Stopped {
            return Ok(self.state);
        }

        let stats = self.render_scene(backend)?;
        trace!(
            "frame {}: {} edges drawn, {} culled",
            self.frames,
            stats.edges_drawn,
            stats.edges_culled
        );

        backend.wait(self.config.tick_interval)?;
        Ok(self.state)
    }

    /// Apply every held action once, in declaration order.
    ///
    /// `Quit` sorts last, so the camera actions of the same tick still land.
    pub fn apply_actions(&mut self, actions: &ActionSet) -> LoopState {
        for &action in actions {
            if !action.is_camera_action() {
                self.stop("quit action");
                break;
            }
            self.camera.apply(action);
        }
        self.state
    }

    /// Clear, draw every visible edge of the scene and present
    pub fn render_scene<B: Backend + ?Sized>(&mut self, backend: &mut B) -> io::Result<FrameStats> {
        let focal_length = self.camera.focal_length();
        let mut stats = FrameStats::default();

        backend.clear_frame()?;

        for mesh in self.scene.meshes() {
            Transform::to_camera_space_into(&self.camera, mesh.vertices(), &mut self.camera_space);

            self.projected.clear();
            self.projected.extend(
                self.camera_space
                    .iter()
                    .map(|point| project_to_2d(point, focal_length)),
            );

            for edge in mesh.edges() {
                let start_depth = self.camera_space[edge.0].z;
                let end_depth = self.camera_space[edge.1].z;

                if !is_edge_visible(start_depth, end_depth) {
                    stats.edges_culled += 1;
                    continue;
                }

                let from = self.viewport.to_screen(&self.projected[edge.0]);
                let to = self.viewport.to_screen(&self.projected[edge.1]);
                backend.draw_line(from, to, self.config.line_color)?;
                stats.edges_drawn += 1;
            }
        }

        backend.present_frame()?;
        self.frames += 1;
        Ok(stats)
    }

    fn stop(&mut self, reason: &str) {
        debug!("stopping frame loop: {}", reason);
        self.state = LoopState::Stopped;
    }
}
