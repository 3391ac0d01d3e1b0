use glam::{Mat4, Vec3};
use serde::Serialize;
use std::f32::consts::FRAC_PI_2;

use crate::core::{Action, Controller};
use crate::math::from_spherical;
use crate::types::CameraUniform;

pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 18.0, 0.0);
pub const INITIAL_POSITION: Vec3 = Vec3::new(40.0, 20.0, 60.0);
pub const FOV_Y_DEGREES: f32 = 45.0;

pub const MIN_DISTANCE: f32 = 10.0;
pub const MAX_DISTANCE: f32 = 150.0;
/// Just off the pole; straight overhead leaves look_at without a horizon
pub const MIN_POLAR: f32 = 1e-4;
pub const MAX_POLAR: f32 = FRAC_PI_2 - 0.05;

/// Radians per pixel of mouse drag
pub const ORBIT_SPEED: f32 = 0.005;
/// World units per pixel of drag, per unit of distance to the target
pub const PAN_SPEED: f32 = 0.0015;
/// Distance multiplier per scroll line
pub const ZOOM_STEP: f32 = 0.9;
pub const KEY_ORBIT_SPEED: f32 = 0.02;
pub const KEY_ZOOM_SPEED: f32 = 0.5;

const NEAR: f32 = 0.1;
const FAR: f32 = 2000.0;

#[derive(Default, Clone, Copy)]
pub struct MovementState {
    pub orbit_left: bool,
    pub orbit_right: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl MovementState {
    const fn to_direction(&self, positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn orbit_velocity(&self) -> f32 {
        self.to_direction(self.orbit_right, self.orbit_left)
    }

    const fn zoom_velocity(&self) -> f32 {
        self.to_direction(self.zoom_in, self.zoom_out)
    }

    fn from_controller(controller: &dyn Controller) -> Self {
        Self {
            orbit_left: controller.is_active(Action::OrbitLeft),
            orbit_right: controller.is_active(Action::OrbitRight),
            zoom_in: controller.is_active(Action::ZoomIn),
            zoom_out: controller.is_active(Action::ZoomOut),
        }
    }
}

/// Snapshot of the camera carried by a composed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
}

/// Orbit controls around a target point.
///
/// The eye sits on a sphere around `target`; `polar` is measured from +Y
/// and `azimuth` from +Z towards +X.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub fov_y: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::looking_at(INITIAL_POSITION, ORBIT_TARGET)
    }

    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let polar = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(MIN_POLAR, MAX_POLAR);
        let azimuth = offset.x.atan2(offset.z);

        Self {
            target,
            distance,
            polar,
            azimuth,
            fov_y: FOV_Y_DEGREES.to_radians(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.target + from_spherical(self.distance, self.polar, self.azimuth)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Rotate around the target by a mouse drag in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * ORBIT_SPEED;
        self.polar = (self.polar - dy * ORBIT_SPEED).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// Slide target and eye together in the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let scale = self.distance * PAN_SPEED;
        self.target += (-self.right() * dx + self.up() * dy) * scale;
    }

    /// Positive `lines` moves closer
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * ZOOM_STEP.powf(lines)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Restore the initial eye position and target
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply held keys for one frame (Q/E orbit, W/S zoom)
    pub fn update(&mut self, controller: &dyn Controller) {
        let movement = MovementState::from_controller(controller);
        let orbit = movement.orbit_velocity();
        let zoom = movement.zoom_velocity();

        if orbit != 0.0 {
            self.azimuth += orbit * KEY_ORBIT_SPEED;
        }
        if zoom != 0.0 {
            self.zoom(zoom * KEY_ZOOM_SPEED);
        }
    }

    pub fn view(&self) -> Mat4 {
        let up = if self.forward().cross(Vec3::Y).length_squared() < 1e-12 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(self.position(), self.target, up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-6), NEAR, FAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position(),
            target: self.target,
            fov_y: self.fov_y,
        }
    }

    pub fn to_uniform(&self, aspect: f32, time: f32) -> CameraUniform {
        let view_proj = self.view_proj(aspect);
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            position: self.position().to_array(),
            time,
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
