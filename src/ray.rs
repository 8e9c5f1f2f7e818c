use crate::grid::Grid;
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Offset applied to the sampled row/column when stepping towards decreasing
/// coordinates, so a point lying exactly on a gridline samples the cell ahead
/// of the ray rather than the one it just left.
pub const BOUNDARY_NUDGE: f64 = 0.01;

/// Face of a solid cell that a ray struck.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    /// Faces struck on horizontal gridlines.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Cardinal::North | Cardinal::South)
    }
}

/// Outcome of a single cast. `distance` is `f64::INFINITY` when nothing was hit.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayHit {
    pub distance: f64,
    pub point: Option<DVec2>,
    pub face: Option<Cardinal>,
}

impl RayHit {
    pub const MISS: RayHit = RayHit {
        distance: f64::INFINITY,
        point: None,
        face: None,
    };

    pub fn is_hit(&self) -> bool {
        self.point.is_some()
    }
}

/// Wrap any finite angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let angle = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if angle >= TAU {
        0.
    } else {
        angle
    }
}

/// Distance from `(x, y)` to the first solid cell boundary along `angle`,
/// or `f64::INFINITY` if the ray leaves the grid first.
pub fn cast_ray(grid: &Grid, x: f64, y: f64, angle: f64) -> f64 {
    cast(grid, DVec2::new(x, y), angle).distance
}

/// Cast a ray and report where and on which face it hit.
///
/// Crossings with horizontal gridlines and with vertical gridlines are walked
/// separately, and the closer of the two hits wins. A ray parallel to one
/// family of gridlines (angle exactly `0`, `π/2`, `π` or `3π/2`) skips that
/// family entirely; rays merely close to an axis take huge steps that leave
/// the grid after one sample.
pub fn cast(grid: &Grid, origin: DVec2, angle: f64) -> RayHit {
    let angle = normalize_angle(angle);
    let tan = angle.tan();

    let facing_up = angle > PI;
    let facing_left = angle > FRAC_PI_2 && angle < 3. * FRAC_PI_2;

    // walk the horizontal gridlines
    let horizontal = 'h: {
        if angle == 0. || angle == PI {
            break 'h None;
        }

        let (start_y, step, face) = if facing_up {
            (
                origin.y.floor(),
                DVec2::new(-1. / tan, -1.),
                Cardinal::South,
            )
        } else {
            (
                origin.y.floor() + 1.,
                DVec2::new(1. / tan, 1.),
                Cardinal::North,
            )
        };
        let start = DVec2::new(origin.x + (origin.y - start_y) / -tan, start_y);
        let nudge = DVec2::new(0., if facing_up { -BOUNDARY_NUDGE } else { 0. });

        walk(grid, start, step, nudge).map(|point| (point, face))
    };

    // walk the vertical gridlines
    let vertical = 'v: {
        if angle == FRAC_PI_2 || angle == 3. * FRAC_PI_2 {
            break 'v None;
        }

        let (start_x, step, face) = if facing_left {
            (origin.x.floor(), DVec2::new(-1., -tan), Cardinal::East)
        } else {
            (origin.x.floor() + 1., DVec2::new(1., tan), Cardinal::West)
        };
        let start = DVec2::new(start_x, origin.y + (origin.x - start_x) * -tan);
        let nudge = DVec2::new(if facing_left { -BOUNDARY_NUDGE } else { 0. }, 0.);

        walk(grid, start, step, nudge).map(|point| (point, face))
    };

    // closest hit; exact ties cannot be told apart and go to the horizontal branch
    let to_hit = |(point, face): (DVec2, Cardinal)| RayHit {
        distance: point.distance(origin),
        point: Some(point),
        face: Some(face),
    };
    match (horizontal.map(to_hit), vertical.map(to_hit)) {
        (Some(h), Some(v)) => {
            if v.distance < h.distance {
                v
            } else {
                h
            }
        }
        (Some(hit), None) | (None, Some(hit)) => hit,
        (None, None) => RayHit::MISS,
    }
}

/// Step from gridline crossing to gridline crossing until a solid cell is
/// sampled (returning the crossing) or the sample leaves the grid.
fn walk(grid: &Grid, mut point: DVec2, step: DVec2, nudge: DVec2) -> Option<DVec2> {
    let sample = point + nudge;
    let mut cell = grid.cell_at(sample.x, sample.y);
    while let Some((x, y)) = cell {
        if grid.is_solid(x, y) {
            return Some(point);
        }
        point += step;
        let sample = point + nudge;
        cell = grid.cell_at(sample.x, sample.y);
    }
    None
}
