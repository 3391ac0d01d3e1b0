use glam::{Mat4, Vec3};
use serde::Serialize;

use crate::math::{from_spherical, hex_rgb};

/// Radius of the sphere the sun travels on
pub const SUN_DISTANCE: f32 = 100.0;

pub const SUN_INTENSITY: f32 = 1.5;
pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const AMBIENT_COLOR: u32 = 0xB0C4DE;

pub const SHADOW_MAP_SIZE: u32 = 2048;
pub const SHADOW_BIAS: f32 = -0.0001;
pub const SHADOW_EXTENT: f32 = 50.0;
const SHADOW_NEAR: f32 = 0.5;
const SHADOW_FAR: f32 = 500.0;

/// Elevation (degrees) under which the stars start showing
const STAR_FADE_ELEVATION: f32 = 15.0;

/// Sun position on a sphere of radius [`SUN_DISTANCE`].
///
/// The polar angle is `90 - elevation` and the azimuthal angle is the
/// azimuth, measured from +Z towards +X. No clamping: any finite input is
/// accepted and azimuth wraps through the trig functions.
pub fn sun_position(azimuth_deg: f32, elevation_deg: f32) -> Vec3 {
    let phi = (90.0 - elevation_deg).to_radians();
    let theta = azimuth_deg.to_radians();
    from_spherical(SUN_DISTANCE, phi, theta)
}

/// Atmospheric scattering parameters for the sky dome
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkyParams {
    pub sun_position: Vec3,
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
}

impl SkyParams {
    pub fn new(sun_position: Vec3) -> Self {
        Self {
            sun_position,
            turbidity: 8.0,
            rayleigh: 6.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub cast_shadow: bool,
}

impl DirectionalLight {
    /// Unit vector pointing from the target towards the light
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).normalize_or(Vec3::Y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Orthographic frustum used to render the shadow map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
    pub map_size: u32,
    pub bias: f32,
}

impl ShadowCamera {
    pub fn view_proj(&self) -> Mat4 {
        // Sun straight overhead makes Y degenerate as the up vector
        let forward = (self.target - self.eye).normalize_or(Vec3::NEG_Y);
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.eye, self.target, up);
        let proj = Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        );
        proj * view
    }
}

/// Background star dome
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarField {
    pub radius: f32,
    pub depth: f32,
    pub count: u32,
    pub factor: f32,
    /// 0 in full daylight, 1 with the sun on the horizon
    pub visibility: f32,
}

/// Everything derived from the sun angles, shared by sky, light and shadows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lighting {
    pub sky: SkyParams,
    pub sun: DirectionalLight,
    pub ambient: AmbientLight,
    pub shadow: ShadowCamera,
    pub stars: StarField,
}

impl Lighting {
    pub fn from_angles(azimuth_deg: f32, elevation_deg: f32) -> Self {
        let position = sun_position(azimuth_deg, elevation_deg);

        let sun = DirectionalLight {
            position,
            target: Vec3::ZERO,
            color: [1.0, 1.0, 1.0],
            intensity: SUN_INTENSITY,
            cast_shadow: true,
        };

        let shadow = ShadowCamera {
            eye: position,
            target: Vec3::ZERO,
            left: -SHADOW_EXTENT,
            right: SHADOW_EXTENT,
            bottom: -SHADOW_EXTENT,
            top: SHADOW_EXTENT,
            near: SHADOW_NEAR,
            far: SHADOW_FAR,
            map_size: SHADOW_MAP_SIZE,
            bias: SHADOW_BIAS,
        };

        let visibility = (1.0 - elevation_deg / STAR_FADE_ELEVATION).clamp(0.0, 1.0);

        Self {
            sky: SkyParams::new(position),
            sun,
            ambient: AmbientLight {
                color: hex_rgb(AMBIENT_COLOR),
                intensity: AMBIENT_INTENSITY,
            },
            shadow,
            stars: StarField {
                radius: 300.0,
                depth: 50.0,
                count: 2000,
                factor: 4.0,
                visibility,
            },
        }
    }
}
