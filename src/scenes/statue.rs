use glam::{Mat4, Vec3};
use std::f32::consts::PI;

use crate::animation::TorchSway;
use crate::math::hex_rgb;
use crate::types::{Label, Material, MeshNode, NodeGroup, PointLight, Primitive};

use super::common::{
    patina, place, translate, FLAME, FLAME_GLOW, INSCRIPTION, TORCH_GOLD,
};
use super::pedestal::PEDESTAL_TOP;

const ROBE_FOLDS: u32 = 5;
const CROWN_SPIKES: u32 = 7;

/// Torch arm pivot, relative to the statue group
pub const TORCH_PIVOT: Vec3 = Vec3::new(2.0, 15.0, 0.0);
/// Torch point light, relative to the torch arm group
const TORCH_LIGHT_OFFSET: Vec3 = Vec3::new(1.2, 8.5, 0.0);
/// Sparkle emitter, relative to the torch arm group
const SPARKLE_OFFSET: Vec3 = Vec3::new(1.2, 9.0, 0.0);

/// Statue geometry for one frame plus the pieces that hang off the torch
#[derive(Debug, Clone)]
pub struct Statue {
    pub nodes: Vec<MeshNode>,
    pub inscription: Label,
    pub torch_light: PointLight,
    /// World-space origin of the flame sparkles
    pub sparkle_origin: Vec3,
}

fn root() -> Mat4 {
    translate(0.0, PEDESTAL_TOP, 0.0)
}

/// World transform of the torch arm group for a given sway
pub fn torch_arm_transform(sway: TorchSway) -> Mat4 {
    root()
        * Mat4::from_translation(TORCH_PIVOT)
        * place(0.0, 0.0, 0.0, sway.rot_x, 0.0, sway.rot_z)
}

fn lower_body(root: Mat4, nodes: &mut Vec<MeshNode>) {
    nodes.push(
        MeshNode::new(
            "robe_base",
            NodeGroup::Statue,
            Primitive::Cylinder {
                radius_top: 3.5,
                radius_bottom: 4.5,
                height: 4.0,
                radial_segments: 16,
            },
            patina(0.8),
        )
        .at(root * translate(0.0, 2.0, 0.0))
        .shadows(true, true),
    );

    let body = root * translate(0.0, 8.0, 0.0);
    nodes.push(
        MeshNode::new(
            "robe",
            NodeGroup::Statue,
            Primitive::Cylinder {
                radius_top: 2.8,
                radius_bottom: 3.4,
                height: 10.0,
                radial_segments: 12,
            },
            patina(0.8),
        )
        .at(body)
        .shadows(true, true),
    );

    // Folds are partial tori, each turned a further radian around the body
    for i in 0..ROBE_FOLDS {
        let fi = i as f32;
        nodes.push(
            MeshNode::new(
                "robe_fold",
                NodeGroup::Statue,
                Primitive::Torus {
                    radius: 3.2 - fi * 0.1,
                    tube: 0.4,
                    radial_segments: 8,
                    tubular_segments: 24,
                    arc: PI * 1.2,
                },
                patina(0.9),
            )
            .at(body * place(0.0, -3.0 + fi * 1.5, 0.0, PI / 12.0, fi, 0.0))
            .shadows(true, false),
        );
    }

    nodes.push(
        MeshNode::new(
            "chest",
            NodeGroup::Statue,
            Primitive::Cylinder {
                radius_top: 2.5,
                radius_bottom: 2.8,
                height: 4.0,
                radial_segments: 12,
            },
            patina(1.0),
        )
        .at(root * translate(0.0, 14.0, 0.0))
        .shadows(true, true),
    );
}

fn tablet_arm(root: Mat4, nodes: &mut Vec<MeshNode>) -> Label {
    let arm = root * place(-1.8, 14.0, 1.5, 0.0, -0.5, 0.0);

    nodes.push(
        MeshNode::new(
            "tablet_arm",
            NodeGroup::Statue,
            Primitive::Capsule {
                radius: 0.7,
                length: 4.0,
                cap_segments: 4,
                radial_segments: 8,
            },
            patina(1.0),
        )
        .at(arm * place(0.0, -2.0, 0.5, 0.5, 0.0, 0.0))
        .shadows(true, false),
    );

    nodes.push(
        MeshNode::new(
            "tablet",
            NodeGroup::Statue,
            Primitive::Cuboid {
                width: 2.5,
                height: 3.5,
                depth: 0.4,
            },
            patina(0.6),
        )
        .at(arm * place(0.2, -2.5, 1.5, 0.3, 0.0, -0.2))
        .shadows(true, false),
    );

    Label {
        text: "MDCCLXXVI",
        transform: arm * place(0.2, -2.5, 1.72, 0.3, 0.0, -0.2),
        font_size: 0.4,
        color: hex_rgb(INSCRIPTION),
    }
}

fn head(root: Mat4, nodes: &mut Vec<MeshNode>) {
    let head = root * translate(0.0, 17.0, 0.0);

    nodes.push(
        MeshNode::new(
            "head",
            NodeGroup::Statue,
            Primitive::Sphere {
                radius: 2.0,
                width_segments: 32,
                height_segments: 32,
            },
            patina(1.0),
        )
        .at(head)
        .shadows(true, true),
    );

    // Seven rays fanned symmetrically around the vertical
    for i in 0..CROWN_SPIKES {
        let tilt = (i as f32 - (CROWN_SPIKES / 2) as f32) * 0.3;
        nodes.push(
            MeshNode::new(
                "crown_spike",
                NodeGroup::Statue,
                Primitive::Cone {
                    radius: 0.15,
                    height: 2.5,
                    radial_segments: 8,
                },
                patina(1.0),
            )
            .at(head * place(0.0, 1.5, 0.0, 0.0, 0.0, tilt)),
        );
    }
}

fn torch_arm(sway: TorchSway, nodes: &mut Vec<MeshNode>) -> (PointLight, Vec3) {
    let group = torch_arm_transform(sway);

    nodes.push(
        MeshNode::new(
            "torch_arm",
            NodeGroup::TorchArm,
            Primitive::Cylinder {
                radius_top: 0.7,
                radius_bottom: 0.8,
                height: 8.0,
                radial_segments: 8,
            },
            patina(1.0),
        )
        .at(group * place(0.5, 3.0, 0.0, 0.0, 0.0, -0.2))
        .shadows(true, false),
    );

    nodes.push(
        MeshNode::new(
            "torch_base",
            NodeGroup::TorchArm,
            Primitive::Cylinder {
                radius_top: 0.8,
                radius_bottom: 0.4,
                height: 1.5,
                radial_segments: 8,
            },
            Material::standard(hex_rgb(TORCH_GOLD))
                .with_metalness(0.6)
                .with_roughness(0.3),
        )
        .at(group * translate(1.2, 7.0, 0.0))
        .shadows(true, false),
    );

    nodes.push(
        MeshNode::new(
            "flame",
            NodeGroup::TorchArm,
            Primitive::Cone {
                radius: 0.6,
                height: 2.5,
                radial_segments: 8,
            },
            Material::standard(hex_rgb(FLAME))
                .with_emissive(hex_rgb(FLAME_GLOW), 2.0)
                .with_opacity(0.9),
        )
        .at(group * translate(1.2, 8.2, 0.0)),
    );

    let light = PointLight {
        position: group.transform_point3(TORCH_LIGHT_OFFSET),
        color: hex_rgb(FLAME),
        intensity: 2.0,
        distance: 10.0,
        decay: 2.0,
    };

    (light, group.transform_point3(SPARKLE_OFFSET))
}

/// Statue standing on the pedestal, torch arm posed by `sway`
pub fn build_statue(sway: TorchSway) -> Statue {
    let root = root();
    let mut nodes = Vec::with_capacity(32);

    lower_body(root, &mut nodes);
    let inscription = tablet_arm(root, &mut nodes);
    head(root, &mut nodes);
    let (torch_light, sparkle_origin) = torch_arm(sway, &mut nodes);

    Statue {
        nodes,
        inscription,
        torch_light,
        sparkle_origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(statue: &Statue, name: &str) -> usize {
        statue.nodes.iter().filter(|n| n.name == name).count()
    }

    #[test]
    fn test_statue_parts() {
        let statue = build_statue(TorchSway::default());
        assert_eq!(count(&statue, "robe_fold"), 5);
        assert_eq!(count(&statue, "crown_spike"), 7);
        assert_eq!(count(&statue, "head"), 1);
        assert_eq!(count(&statue, "flame"), 1);
        assert_eq!(statue.inscription.text, "MDCCLXXVI");
    }

    #[test]
    fn test_statue_stands_on_pedestal() {
        let statue = build_statue(TorchSway::default());
        let base = statue.nodes.iter().find(|n| n.name == "robe_base").unwrap();
        assert_eq!(base.position(), Vec3::new(0.0, 20.0, 0.0));
        let head = statue.nodes.iter().find(|n| n.name == "head").unwrap();
        assert_eq!(head.position(), Vec3::new(0.0, 35.0, 0.0));
    }

    #[test]
    fn test_rest_pose_torch_light_position() {
        let statue = build_statue(TorchSway::default());
        let expected = Vec3::new(2.0 + 1.2, 18.0 + 15.0 + 8.5, 0.0);
        assert!(statue.torch_light.position.distance(expected) < 1e-4);
        assert_eq!(statue.torch_light.distance, 10.0);
    }

    #[test]
    fn test_sway_moves_only_torch_arm() {
        let rest = build_statue(TorchSway::default());
        let swayed = build_statue(TorchSway { rot_x: 0.01, rot_z: 0.02 });

        for (a, b) in rest.nodes.iter().zip(swayed.nodes.iter()) {
            if a.group == NodeGroup::TorchArm {
                assert_ne!(a.transform, b.transform, "{} should sway", a.name);
            } else {
                assert_eq!(a.transform, b.transform, "{} should stay put", a.name);
            }
        }
        assert_ne!(rest.sparkle_origin, swayed.sparkle_origin);
    }

    #[test]
    fn test_crown_is_symmetric() {
        let statue = build_statue(TorchSway::default());
        let tips: Vec<Vec3> = statue
            .nodes
            .iter()
            .filter(|n| n.name == "crown_spike")
            .map(|n| n.transform.transform_point3(Vec3::Y))
            .collect();
        let mean_x = tips.iter().map(|p| p.x).sum::<f32>() / tips.len() as f32;
        assert!(mean_x.abs() < 1e-4);
    }
}
