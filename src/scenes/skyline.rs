use glam::Vec3;
use rand::Rng;

use crate::math::hex_rgb;
use crate::types::{Material, MeshNode, NodeGroup, Primitive};

use super::common::{translate, SKYLINE};

pub const SKYLINE_TOWERS: usize = 15;
const SKYLINE_ORIGIN: Vec3 = Vec3::new(-100.0, 0.0, -200.0);
const TOWER_SPACING: f32 = 15.0;
const TOWER_FOOTPRINT: f32 = 10.0;

/// Abstract Manhattan silhouette far behind the statue.
///
/// Heights and vertical offsets are random; callers keep the result for the
/// whole session so the skyline does not flicker between frames.
pub fn build_skyline(rng: &mut impl Rng) -> Vec<MeshNode> {
    let material = Material::unlit(hex_rgb(SKYLINE), 0.8);

    (0..SKYLINE_TOWERS)
        .map(|i| {
            let x = i as f32 * TOWER_SPACING - 100.0;
            let y = 20.0 + rng.random::<f32>() * 30.0;
            let height = 40.0 + rng.random::<f32>() * 60.0;
            MeshNode::new(
                "tower",
                NodeGroup::Skyline,
                Primitive::Cuboid {
                    width: TOWER_FOOTPRINT,
                    height,
                    depth: TOWER_FOOTPRINT,
                },
                material,
            )
            .at(translate(
                SKYLINE_ORIGIN.x + x,
                SKYLINE_ORIGIN.y + y,
                SKYLINE_ORIGIN.z,
            ))
        })
        .collect()
}
