use crate::camera::{CameraState, ControlSource, ControlState, MotionConfig};
use crate::grid::Grid;
use crate::projector::{Column, Projector};

/// Owns the grid and the camera, and turns controls into frames.
pub struct Session {
    grid: Grid,
    camera: CameraState,
    projector: Projector,
    motion: MotionConfig,
    columns: Vec<Column>,
}

impl Session {
    pub fn new(grid: Grid, camera: CameraState, projector: Projector, motion: MotionConfig) -> Self {
        log::info!(
            "starting session on {}x{} grid at ({:.2}, {:.2})",
            grid.width(),
            grid.height(),
            camera.position.x,
            camera.position.y
        );
        Self {
            columns: Vec::with_capacity(projector.config.screen_width + 1),
            grid,
            camera,
            projector,
            motion,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Columns of the most recent frame.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Apply `dt` seconds of `controls`, then project a frame from the new pose.
    pub fn step(&mut self, controls: &ControlState, dt: f64) -> &[Column] {
        self.camera = self.camera.update(controls, &self.motion, dt);

        // every column of this frame sees the same pose
        let pose = self.camera;
        log::debug!(
            "frame at ({:.3}, {:.3}) heading {:.3}",
            pose.position.x,
            pose.position.y,
            pose.heading
        );
        self.projector.project_into(&self.grid, &pose, &mut self.columns);

        &self.columns
    }

    /// Poll `source` once and step with what it reports.
    pub fn run_frame(&mut self, source: &mut impl ControlSource, dt: f64) -> &[Column] {
        let controls = source.poll();
        self.step(&controls, dt)
    }
}
