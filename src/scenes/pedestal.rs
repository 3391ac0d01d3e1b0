use crate::math::hex_rgb;
use crate::types::{Material, MeshNode, NodeGroup, Primitive};

use super::common::{translate, GRANITE, PEDESTAL_STONE};

/// Top surface of the pedestal, where the statue group stands
pub const PEDESTAL_TOP: f32 = 18.0;

/// Star-fort base, second tier, main pedestal block and its ridge
pub fn build_pedestal() -> Vec<MeshNode> {
    let granite = Material::standard(hex_rgb(GRANITE)).with_roughness(0.9);
    let stone = Material::standard(hex_rgb(PEDESTAL_STONE)).with_roughness(0.6);

    vec![
        MeshNode::new(
            "star_base",
            NodeGroup::Pedestal,
            Primitive::Cylinder {
                radius_top: 16.0,
                radius_bottom: 18.0,
                height: 2.0,
                radial_segments: 11,
            },
            granite,
        )
        .at(translate(0.0, 1.0, 0.0))
        .shadows(false, true),
        MeshNode::new(
            "fort_tier",
            NodeGroup::Pedestal,
            Primitive::Cylinder {
                radius_top: 12.0,
                radius_bottom: 14.0,
                height: 4.0,
                radial_segments: 4,
            },
            granite,
        )
        .at(translate(0.0, 4.0, 0.0))
        .shadows(false, true),
        MeshNode::new(
            "pedestal_block",
            NodeGroup::Pedestal,
            Primitive::Cuboid {
                width: 8.0,
                height: 12.0,
                depth: 8.0,
            },
            stone,
        )
        .at(translate(0.0, 11.0, 0.0))
        .shadows(true, true),
        MeshNode::new(
            "pedestal_ridge",
            NodeGroup::Pedestal,
            Primitive::Cuboid {
                width: 8.5,
                height: 1.0,
                depth: 8.5,
            },
            Material::standard(hex_rgb(PEDESTAL_STONE)),
        )
        .at(translate(0.0, 16.5, 0.0))
        .shadows(true, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pedestal_layers_stack_upwards() {
        let nodes = build_pedestal();
        assert_eq!(nodes.len(), 4);
        let heights: Vec<f32> = nodes.iter().map(|n| n.position().y).collect();
        assert!(heights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ridge_reaches_statue_base() {
        let nodes = build_pedestal();
        let ridge = nodes.iter().find(|n| n.name == "pedestal_ridge").unwrap();
        assert_eq!(ridge.position().y + 0.5, 17.0);
        assert!(ridge.position().y < PEDESTAL_TOP);
    }

    #[test]
    fn test_all_nodes_tagged_pedestal() {
        assert!(build_pedestal().iter().all(|n| n.group == NodeGroup::Pedestal));
    }
}
