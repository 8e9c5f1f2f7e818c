use crate::ray::normalize_angle;
use glam::DVec2;
use std::f64::consts::FRAC_PI_4;

/// Camera pose in grid-cell units. `heading` is kept in `[0, 2π)`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CameraState {
    pub position: DVec2,
    pub heading: f64,
}

impl CameraState {
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self {
            position,
            heading: normalize_angle(heading),
        }
    }

    /// Advance the pose by `dt` seconds of held controls.
    ///
    /// Turning happens before moving, so a frame that both turns and walks
    /// walks along the new heading. Opposing controls cancel out.
    pub fn update(&self, controls: &ControlState, motion: &MotionConfig, dt: f64) -> CameraState {
        let turn = axis(controls.turn_right, controls.turn_left);
        let walk = axis(controls.forward, controls.backward);

        let heading = normalize_angle(self.heading + turn * motion.turn_speed * dt);
        let position = self.position + DVec2::from_angle(heading) * walk * motion.move_speed * dt;

        CameraState { position, heading }
    }
}

fn axis(positive: bool, negative: bool) -> f64 {
    match (positive, negative) {
        (true, false) => 1.,
        (false, true) => -1.,
        _ => 0.,
    }
}

/// Snapshot of which movement controls are held.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl ControlState {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Anything that can report the current controls once per frame.
pub trait ControlSource {
    fn poll(&mut self) -> ControlState;
}

impl ControlSource for ControlState {
    fn poll(&mut self) -> ControlState {
        *self
    }
}

/// Replays a fixed script of controls, then stays idle.
impl<I: Iterator<Item = ControlState>> ControlSource for std::iter::Fuse<I> {
    fn poll(&mut self) -> ControlState {
        self.next().unwrap_or_default()
    }
}

/// Movement rates: cells per second and radians per second.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MotionConfig {
    pub move_speed: f64,
    pub turn_speed: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.,
            turn_speed: FRAC_PI_4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn new_normalizes_heading() {
        let camera = CameraState::new(DVec2::new(1., 1.), -FRAC_PI_2);
        assert_close(camera.heading, 3. * FRAC_PI_2);
    }

    #[test]
    fn idle_controls_keep_pose() {
        let camera = CameraState::new(DVec2::new(2.5, 2.5), 1.);
        let next = camera.update(&ControlState::default(), &MotionConfig::default(), 0.5);
        assert_eq!(next, camera);
        assert!(ControlState::default().is_idle());
    }

    #[test]
    fn forward_moves_along_heading() {
        let camera = CameraState::new(DVec2::new(2.5, 2.5), FRAC_PI_2);
        let controls = ControlState {
            forward: true,
            ..Default::default()
        };
        let next = camera.update(&controls, &MotionConfig::default(), 0.25);
        assert_close(next.position.x, 2.5);
        assert_close(next.position.y, 3.);

        let controls = ControlState {
            backward: true,
            ..Default::default()
        };
        let back = next.update(&controls, &MotionConfig::default(), 0.25);
        assert_close(back.position.y, 2.5);
    }

    #[test]
    fn turning_wraps_heading() {
        let motion = MotionConfig {
            move_speed: 1.,
            turn_speed: PI,
        };
        let camera = CameraState::new(DVec2::ZERO, 0.);
        let left = ControlState {
            turn_left: true,
            ..Default::default()
        };
        let turned = camera.update(&left, &motion, 0.5);
        assert_close(turned.heading, 3. * FRAC_PI_2);

        let right = ControlState {
            turn_right: true,
            ..Default::default()
        };
        let turned = turned.update(&right, &motion, 1.);
        assert_close(turned.heading, PI / 2.);
        assert!(turned.heading >= 0. && turned.heading < TAU);
    }

    #[test]
    fn opposing_controls_cancel() {
        let camera = CameraState::new(DVec2::new(1., 1.), 0.5);
        let controls = ControlState {
            forward: true,
            backward: true,
            turn_left: true,
            turn_right: true,
        };
        assert_eq!(camera.update(&controls, &MotionConfig::default(), 1.), camera);
    }

    #[test]
    fn turn_then_walk() {
        let motion = MotionConfig {
            move_speed: 1.,
            turn_speed: FRAC_PI_2,
        };
        let camera = CameraState::new(DVec2::ZERO, 0.);
        let controls = ControlState {
            forward: true,
            turn_right: true,
            ..Default::default()
        };
        let next = camera.update(&controls, &motion, 1.);
        assert_close(next.heading, FRAC_PI_2);
        assert_close(next.position.x, 0.);
        assert_close(next.position.y, 1.);
    }

    #[test]
    fn scripted_source_goes_idle() {
        let forward = ControlState {
            forward: true,
            ..Default::default()
        };
        let mut source = vec![forward, forward].into_iter().fuse();
        assert_eq!(source.poll(), forward);
        assert_eq!(source.poll(), forward);
        assert!(source.poll().is_idle());
    }
}
