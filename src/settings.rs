use serde::{Deserialize, Serialize};

pub const AZIMUTH_RANGE: (f32, f32) = (0.0, 360.0);
pub const ELEVATION_RANGE: (f32, f32) = (0.0, 90.0);
pub const WIND_RANGE: (f32, f32) = (0.0, 1.0);
pub const WIND_STEP: f64 = 0.01;

/// Snapshot of every user-adjustable scene parameter.
///
/// Replaced wholesale on each edit. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    pub sun_azimuth: f32,
    pub sun_elevation: f32,
    pub wind_intensity: f32,
    pub show_tourists: bool,
}

impl SceneSettings {
    /// Morning light from the south-east, light breeze, crowd visible
    pub const DEFAULT: Self = Self {
        sun_azimuth: 135.0,
        sun_elevation: 45.0,
        wind_intensity: 0.3,
        show_tourists: true,
    };

    /// Build settings with every numeric value pulled into its control range
    pub fn clamped(sun_azimuth: f32, sun_elevation: f32, wind_intensity: f32, show_tourists: bool) -> Self {
        Self {
            sun_azimuth: sun_azimuth.clamp(AZIMUTH_RANGE.0, AZIMUTH_RANGE.1),
            sun_elevation: sun_elevation.clamp(ELEVATION_RANGE.0, ELEVATION_RANGE.1),
            wind_intensity: wind_intensity.clamp(WIND_RANGE.0, WIND_RANGE.1),
            show_tourists,
        }
    }

    pub fn with_sun(self, sun_azimuth: f32, sun_elevation: f32) -> Self {
        Self { sun_azimuth, sun_elevation, ..self }
    }

    pub fn with_wind(self, wind_intensity: f32) -> Self {
        Self { wind_intensity, ..self }
    }

    pub fn with_tourists(self, show_tourists: bool) -> Self {
        Self { show_tourists, ..self }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
