use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::f32::consts::TAU;

use crate::math::hex_rgb;
use crate::types::{Material, MeshNode, NodeGroup, Primitive};

use super::common::{trs, TOURIST};

pub const DEFAULT_TOURIST_COUNT: usize = 80;
pub const CROWD_INNER_RADIUS: f32 = 10.0;
pub const CROWD_OUTER_RADIUS: f32 = 15.0;
pub const CROWD_HEIGHT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TouristInstance {
    pub position: Vec3,
    pub scale: f32,
}

impl TouristInstance {
    pub fn to_node(self) -> MeshNode {
        MeshNode::new(
            "tourist",
            NodeGroup::Tourist,
            Primitive::Capsule {
                radius: 0.3,
                length: 0.9,
                cap_segments: 4,
                radial_segments: 8,
            },
            Material::standard(hex_rgb(TOURIST)),
        )
        .at(trs(self.position, Vec3::ZERO, self.scale))
    }
}

/// Scatter `count` visitors over the star-fort annulus
pub fn scatter_tourists(count: usize, rng: &mut impl Rng) -> Vec<TouristInstance> {
    (0..count)
        .map(|_| {
            let angle = rng.random::<f32>() * TAU;
            let radius = CROWD_INNER_RADIUS
                + rng.random::<f32>() * (CROWD_OUTER_RADIUS - CROWD_INNER_RADIUS);
            TouristInstance {
                position: Vec3::new(angle.cos() * radius, CROWD_HEIGHT, angle.sin() * radius),
                scale: 0.5 + rng.random::<f32>() * 0.2,
            }
        })
        .collect()
}

/// Tourist layout cache.
///
/// The crowd is only re-sampled when the requested count changes. With a
/// seed every regeneration is reproducible; without one each regeneration
/// draws fresh entropy.
#[derive(Debug, Clone)]
pub struct TouristCrowd {
    seed: Option<u64>,
    instances: Vec<TouristInstance>,
    count: Option<usize>,
    generations: u64,
}

impl TouristCrowd {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            instances: Vec::new(),
            count: None,
            generations: 0,
        }
    }

    pub fn layout(&mut self, count: usize) -> &[TouristInstance] {
        if self.count != Some(count) {
            let seed = self.seed.unwrap_or_else(rand::random::<u64>);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            self.instances = scatter_tourists(count, &mut rng);
            self.count = Some(count);
            self.generations += 1;
            log::debug!("Scattered {} tourists (generation {})", count, self.generations);
        }
        &self.instances
    }

    /// How many times the layout has been sampled
    pub fn generations(&self) -> u64 {
        self.generations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tourists_inside_annulus() {
        let mut crowd = TouristCrowd::new(Some(42));
        let layout = crowd.layout(500);
        assert_eq!(layout.len(), 500);
        for t in layout {
            let r = Vec3::new(t.position.x, 0.0, t.position.z).length();
            assert!(r >= CROWD_INNER_RADIUS - 1e-4 && r <= CROWD_OUTER_RADIUS + 1e-4, "r = {}", r);
            assert_eq!(t.position.y, CROWD_HEIGHT);
            assert!(t.scale >= 0.5 && t.scale < 0.7);
        }
    }

    #[test]
    fn test_cached_until_count_changes() {
        let mut crowd = TouristCrowd::new(None);
        let first = crowd.layout(10).to_vec();
        let second = crowd.layout(10).to_vec();
        assert_eq!(first, second);
        assert_eq!(crowd.generations(), 1);

        crowd.layout(12);
        assert_eq!(crowd.generations(), 2);
        assert_eq!(crowd.layout(12).len(), 12);
    }

    #[test]
    fn test_seeded_layouts_repeat() {
        let a = TouristCrowd::new(Some(9)).layout(30).to_vec();
        let b = TouristCrowd::new(Some(9)).layout(30).to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_tourists() {
        let mut crowd = TouristCrowd::new(Some(1));
        assert!(crowd.layout(0).is_empty());
    }

    #[test]
    fn test_instance_node_scaled_capsule() {
        let node = TouristInstance {
            position: Vec3::new(11.0, 2.0, 0.0),
            scale: 0.6,
        }
        .to_node();
        assert_eq!(node.group, NodeGroup::Tourist);
        assert_eq!(node.position(), Vec3::new(11.0, 2.0, 0.0));
        assert!((node.transform.x_axis.length() - 0.6).abs() < 1e-6);
    }
}
