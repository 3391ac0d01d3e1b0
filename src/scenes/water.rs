use std::f32::consts::FRAC_PI_2;

use crate::math::hex_rgb;
use crate::types::{Material, MeshNode, NodeGroup, Primitive};

use super::common::{place, WATER};

pub const WATER_LEVEL: f32 = -1.0;
pub const WATER_SIZE: f32 = 1000.0;

/// Harbor surface: a large, glossy plane laid flat just below the island
pub fn build_water() -> MeshNode {
    MeshNode::new(
        "water",
        NodeGroup::Water,
        Primitive::Plane {
            width: WATER_SIZE,
            height: WATER_SIZE,
        },
        Material::standard(hex_rgb(WATER))
            .with_roughness(0.0)
            .with_metalness(0.8),
    )
    .at(place(0.0, WATER_LEVEL, 0.0, -FRAC_PI_2, 0.0, 0.0))
    .shadows(false, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_water_faces_up() {
        let water = build_water();
        let normal = water.transform.transform_vector3(Vec3::Z);
        assert!((normal - Vec3::Y).length() < 1e-6);
        assert_eq!(water.position().y, WATER_LEVEL);
    }
}
