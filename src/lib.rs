//! Grid raycasting for a first-person pseudo-3D view.
//!
//! A [`Grid`] of solid and empty cells is walked one gridline crossing at a
//! time by [`cast`]; a [`Projector`] sweeps that across the camera's field of
//! view to get one fish-eye corrected [`Column`] per screen slice.

pub mod camera;
mod error;
pub mod grid;
pub mod map;
pub mod projector;
pub mod ray;
pub mod session;

pub use camera::{CameraState, ControlSource, ControlState, MotionConfig};
pub use error::GridError;
pub use grid::{Cell, Grid};
pub use map::MapFile;
pub use projector::{Column, Projector, ProjectorConfig};
pub use ray::{cast, cast_ray, normalize_angle, Cardinal, RayHit, BOUNDARY_NUDGE};
pub use session::Session;
