use crate::camera::CameraState;
use crate::grid::Grid;
use crate::ray::{cast, normalize_angle, Cardinal};
use std::f64::consts::FRAC_PI_3;

/// Brightest shade a wall at zero distance gets.
pub const MAX_SHADE: f64 = 192.;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ProjectorConfig {
    pub screen_width: usize,
    pub screen_height: usize,
    pub fov: f64,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 320,
            fov: FRAC_PI_3,
        }
    }
}

/// One vertical screen slice.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Column {
    pub angle: f64,
    /// raw ray length
    pub distance: f64,
    /// distance projected onto the heading (fish-eye corrected)
    pub corrected: f64,
    pub wall_height: f64,
    pub shade: u8,
    pub face: Option<Cardinal>,
}

impl Column {
    /// Vertical extent `(top, height)` of the wall on a screen of `screen_height`
    /// pixels, clipped to the screen. `None` for an empty column.
    pub fn span(&self, screen_height: u32) -> Option<(u32, u32)> {
        if !self.wall_height.is_finite() || self.wall_height < 1. {
            return None;
        }

        let screen = screen_height as f64;
        let wall = self.wall_height.min(screen);
        let top = ((screen - wall) / 2.) as u32;
        Some((top, wall as u32))
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Projector {
    pub config: ProjectorConfig,
}

impl Projector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    fn ray_delta(&self) -> f64 {
        self.config.fov / self.config.screen_width.max(1) as f64
    }

    /// Angle of the ray through column `idx`, left edge of the view first.
    pub fn column_angle(&self, heading: f64, idx: usize) -> f64 {
        normalize_angle(heading - self.config.fov / 2. + idx as f64 * self.ray_delta())
    }

    /// Cast `screen_width + 1` rays across the field of view.
    pub fn project(&self, grid: &Grid, camera: &CameraState) -> Vec<Column> {
        let mut columns = Vec::with_capacity(self.config.screen_width + 1);
        self.project_into(grid, camera, &mut columns);
        columns
    }

    /// Same as [`Projector::project`], reusing `columns`' allocation.
    pub fn project_into(&self, grid: &Grid, camera: &CameraState, columns: &mut Vec<Column>) {
        columns.clear();
        columns.extend(
            (0..=self.config.screen_width).map(|idx| {
                self.column(grid, camera, self.column_angle(camera.heading, idx))
            }),
        );
    }

    fn column(&self, grid: &Grid, camera: &CameraState, angle: f64) -> Column {
        let hit = cast(grid, camera.position, angle);

        if !hit.is_hit() {
            return Column {
                angle,
                distance: f64::INFINITY,
                corrected: f64::INFINITY,
                wall_height: 0.,
                shade: 0,
                face: None,
            };
        }

        let corrected = hit.distance * (camera.heading - angle).cos();
        let wall_height = self.config.screen_height as f64 / corrected;
        let shade = ((1. - corrected / grid.width() as f64) * MAX_SHADE).clamp(0., MAX_SHADE) as u8;

        Column {
            angle,
            distance: hit.distance,
            corrected,
            wall_height,
            shade,
            face: hit.face,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn room() -> Grid {
        Grid::bordered(5, 5).expect("grid should build")
    }

    #[test]
    fn column_count_and_span_of_angles() {
        let projector = Projector::new(ProjectorConfig {
            screen_width: 8,
            screen_height: 100,
            fov: FRAC_PI_2,
        });
        let camera = CameraState::new(DVec2::new(2.5, 2.5), 0.);
        let columns = projector.project(&room(), &camera);

        assert_eq!(columns.len(), 9);
        assert!((columns[0].angle - (TAU - FRAC_PI_2 / 2.)).abs() < 1e-9);
        assert!(columns[4].angle.abs() < 1e-9);
        assert!((columns[8].angle - FRAC_PI_2 / 2.).abs() < 1e-9);
    }

    #[test]
    fn flat_wall_renders_flat() {
        let projector = Projector::new(ProjectorConfig {
            screen_width: 16,
            screen_height: 300,
            fov: FRAC_PI_3,
        });
        let camera = CameraState::new(DVec2::new(2.5, 2.5), 0.);
        let columns = projector.project(&room(), &camera);

        // whole view lands on the x = 4 wall, 1.5 cells ahead
        for column in &columns {
            assert!((column.corrected - 1.5).abs() < 1e-9);
            assert!((column.wall_height - 200.).abs() < 1e-6);
            assert_eq!(column.face, Some(Cardinal::West));
            assert!(column.distance >= column.corrected);
        }
        let centre = columns[8];
        assert!((centre.distance - 1.5).abs() < 1e-9);
        // (1 - 1.5 / 5) * 192
        assert_eq!(centre.shade, 134);
    }

    #[test]
    fn empty_grid_gives_blank_columns() {
        let grid = Grid::from_bits(&[[0u8; 3]; 3]).expect("grid should build");
        let camera = CameraState::new(DVec2::new(1.5, 1.5), 2.);
        let columns = Projector::default().project(&grid, &camera);
        assert_eq!(columns.len(), 641);
        for column in columns {
            assert_eq!(column.distance, f64::INFINITY);
            assert_eq!(column.wall_height, 0.);
            assert_eq!(column.shade, 0);
            assert_eq!(column.span(320), None);
        }
    }

    #[test]
    fn span_is_centred_and_clipped() {
        let column = Column {
            angle: 0.,
            distance: 2.,
            corrected: 2.,
            wall_height: 100.,
            shade: 0,
            face: Some(Cardinal::North),
        };
        assert_eq!(column.span(300), Some((100, 100)));

        let close = Column {
            wall_height: 1000.,
            ..column
        };
        assert_eq!(close.span(300), Some((0, 300)));
    }

    #[test]
    fn project_into_reuses_buffer() {
        let projector = Projector::default();
        let camera = CameraState::new(DVec2::new(2.5, 2.5), 1.);
        let mut columns = Vec::new();
        projector.project_into(&room(), &camera, &mut columns);
        projector.project_into(&room(), &camera, &mut columns);
        assert_eq!(columns, projector.project(&room(), &camera));
    }
}
