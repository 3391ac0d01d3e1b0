use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::animation::{flame_sparkles, torch_sway, TorchSway};
use crate::camera::{CameraState, OrbitCamera};
use crate::scenes::{
    build_pedestal, build_skyline, build_statue, build_water, TouristCrowd, TouristInstance,
    DEFAULT_TOURIST_COUNT,
};
use crate::settings::SceneSettings;
use crate::sun::Lighting;
use crate::types::{Label, MeshNode, NodeGroup, PointLight};

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameDescription {
    pub time: f32,
    pub settings: SceneSettings,
    pub lighting: Lighting,
    pub sway: TorchSway,
    pub nodes: Vec<MeshNode>,
    pub inscription: Label,
    pub torch_light: PointLight,
    /// World-space sparkle positions around the flame
    pub sparkles: Vec<Vec3>,
    pub camera: CameraState,
}

impl FrameDescription {
    pub fn nodes_in(&self, group: NodeGroup) -> impl Iterator<Item = &MeshNode> {
        self.nodes.iter().filter(move |n| n.group == group)
    }
}

/// Assemble a frame from settings and elapsed time.
///
/// Pure: the same inputs always give the same frame.
pub fn compose_frame(
    settings: &SceneSettings,
    elapsed: f32,
    crowd: &[TouristInstance],
    camera: &OrbitCamera,
    skyline: &[MeshNode],
) -> FrameDescription {
    let lighting = Lighting::from_angles(settings.sun_azimuth, settings.sun_elevation);
    let sway = torch_sway(elapsed, settings.wind_intensity);
    let statue = build_statue(sway);

    let tourists = if settings.show_tourists { crowd.len() } else { 0 };
    let mut nodes = Vec::with_capacity(statue.nodes.len() + skyline.len() + tourists + 8);
    nodes.extend(build_pedestal());
    nodes.extend(statue.nodes);
    nodes.push(build_water());
    nodes.extend_from_slice(skyline);
    if settings.show_tourists {
        nodes.extend(crowd.iter().map(|t| t.to_node()));
    }

    let sparkles = flame_sparkles(elapsed, settings.wind_intensity)
        .into_iter()
        .map(|offset| statue.sparkle_origin + offset)
        .collect();

    FrameDescription {
        time: elapsed,
        settings: *settings,
        lighting,
        sway,
        nodes,
        inscription: statue.inscription,
        torch_light: statue.torch_light,
        sparkles,
        camera: camera.state(),
    }
}

/// Owns the state that outlives a frame: camera, tourist cache and skyline
pub struct SceneComposer {
    camera: OrbitCamera,
    crowd: TouristCrowd,
    skyline: Vec<MeshNode>,
    tourist_count: usize,
}

impl SceneComposer {
    /// A seed makes both the crowd and the skyline reproducible
    pub fn new(seed: Option<u64>, tourist_count: usize) -> Self {
        let skyline_seed = seed.map_or_else(rand::random::<u64>, |s| s.wrapping_add(1));
        let mut rng = ChaCha8Rng::seed_from_u64(skyline_seed);
        let skyline = build_skyline(&mut rng);

        log::debug!(
            "Scene composer ready: {} skyline towers, {} tourists, seed {:?}",
            skyline.len(),
            tourist_count,
            seed
        );

        Self {
            camera: OrbitCamera::new(),
            crowd: TouristCrowd::new(seed),
            skyline,
            tourist_count,
        }
    }

    pub fn render(&mut self, settings: &SceneSettings, elapsed: f32) -> FrameDescription {
        let crowd: &[TouristInstance] = if settings.show_tourists {
            self.crowd.layout(self.tourist_count)
        } else {
            &[]
        };
        compose_frame(settings, elapsed, crowd, &self.camera, &self.skyline)
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// Restore the camera and hand back the default settings
    pub fn reset(&mut self) -> SceneSettings {
        self.reset_view();
        SceneSettings::default()
    }

    pub fn crowd_generations(&self) -> u64 {
        self.crowd.generations()
    }
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new(None, DEFAULT_TOURIST_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(frame: &FrameDescription, group: NodeGroup) -> usize {
        frame.nodes_in(group).count()
    }

    #[test]
    fn test_tourist_toggle_removes_only_tourists() {
        let mut composer = SceneComposer::new(Some(3), 25);
        let with = composer.render(&SceneSettings::default(), 1.0);
        let without = composer.render(&SceneSettings::default().with_tourists(false), 1.0);

        assert_eq!(names(&with, NodeGroup::Tourist), 25);
        assert_eq!(names(&without, NodeGroup::Tourist), 0);

        let rest = |f: &FrameDescription| -> Vec<MeshNode> {
            f.nodes
                .iter()
                .filter(|n| n.group != NodeGroup::Tourist)
                .cloned()
                .collect()
        };
        assert_eq!(rest(&with), rest(&without));
    }

    #[test]
    fn test_hidden_crowd_is_not_sampled() {
        let mut composer = SceneComposer::new(Some(3), 25);
        composer.render(&SceneSettings::default().with_tourists(false), 0.0);
        assert_eq!(composer.crowd_generations(), 0);

        composer.render(&SceneSettings::default(), 0.0);
        composer.render(&SceneSettings::default(), 5.0);
        assert_eq!(composer.crowd_generations(), 1);
    }

    #[test]
    fn test_frame_follows_settings() {
        let mut composer = SceneComposer::new(Some(1), 5);
        let settings = SceneSettings::default().with_sun(270.0, 10.0).with_wind(0.0);
        let frame = composer.render(&settings, 12.0);

        assert_eq!(frame.settings, settings);
        assert_eq!(frame.sway, TorchSway::default());
        assert_eq!(frame.lighting, Lighting::from_angles(270.0, 10.0));
        assert_eq!(frame.sparkles.len(), crate::animation::SPARKLE_COUNT);
        assert_eq!(frame.camera, OrbitCamera::new().state());
    }

    #[test]
    fn test_compose_frame_is_pure() {
        let camera = OrbitCamera::new();
        let a = compose_frame(&SceneSettings::default(), 4.2, &[], &camera, &[]);
        let b = compose_frame(&SceneSettings::default(), 4.2, &[], &camera, &[]);
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.sparkles, b.sparkles);
        assert_eq!(a.torch_light, b.torch_light);
    }

    #[test]
    fn test_reset_restores_defaults_and_camera() {
        let mut composer = SceneComposer::new(None, 10);
        composer.camera_mut().orbit(120.0, 30.0);
        composer.camera_mut().zoom(4.0);

        let settings = composer.reset();
        assert_eq!(settings, SceneSettings::default());
        assert_eq!(composer.camera(), &OrbitCamera::new());
    }

    #[test]
    fn test_skyline_is_stable_across_frames() {
        let mut composer = SceneComposer::new(None, 0);
        let a = composer.render(&SceneSettings::default(), 0.0);
        let b = composer.render(&SceneSettings::default(), 9.0);
        let towers = |f: &FrameDescription| f.nodes_in(NodeGroup::Skyline).cloned().collect::<Vec<_>>();
        assert_eq!(towers(&a), towers(&b));
        assert_eq!(towers(&a).len(), crate::scenes::SKYLINE_TOWERS);
    }
}
