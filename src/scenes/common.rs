use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::math::hex_rgb;
use crate::types::Material;

pub const PATINA: u32 = 0x2C8C85;
pub const GRANITE: u32 = 0x8C8C8C;
pub const PEDESTAL_STONE: u32 = 0xA89F91;
pub const WATER: u32 = 0x1A3C40;
pub const TORCH_GOLD: u32 = 0xB8860B;
pub const FLAME: u32 = 0xFFAA00;
pub const FLAME_GLOW: u32 = 0xFF4400;
pub const SPARKLE: u32 = 0xFFCC00;
pub const INSCRIPTION: u32 = 0x1F5C57;
pub const TOURIST: u32 = 0x333333;
pub const SKYLINE: u32 = 0x1A253A;

/// Oxidized copper skin of the statue
pub fn patina(roughness: f32) -> Material {
    Material::standard(hex_rgb(PATINA))
        .with_roughness(roughness)
        .with_metalness(0.2)
}

/// Translation, then XYZ Euler rotation, then uniform scale
pub fn trs(position: Vec3, rotation: Vec3, scale: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z),
        position,
    )
}

pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

pub fn place(x: f32, y: f32, z: f32, rx: f32, ry: f32, rz: f32) -> Mat4 {
    trs(Vec3::new(x, y, z), Vec3::new(rx, ry, rz), 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trs_translation_only() {
        let m = translate(1.0, 2.0, 3.0);
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_trs_applies_scale_before_translation() {
        let m = trs(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 2.0);
        assert_eq!(m.transform_point3(Vec3::X), Vec3::new(2.0, 5.0, 0.0));
    }

    #[test]
    fn test_place_rotates_about_z() {
        let m = place(0.0, 0.0, 0.0, 0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let p = m.transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-6);
    }
}
