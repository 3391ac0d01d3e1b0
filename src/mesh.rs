use glam::{Mat3, Mat4, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::composer::FrameDescription;
use crate::math::{hex_rgb, srgb_to_linear};
use crate::scenes::SPARKLE;
use crate::types::{Material, MeshNode, Primitive, Vertex};

const SPARKLE_SIZE: f32 = 0.08;

/// Object-space vertex before material and transform are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// A point on a lathe profile: radius, height and the (radial, vertical) normal
#[derive(Debug, Clone, Copy)]
struct ProfilePoint {
    radius: f32,
    y: f32,
    normal: Vec2,
}

fn revolve(point: ProfilePoint, theta: f32) -> LocalVertex {
    let (sin, cos) = theta.sin_cos();
    LocalVertex {
        position: Vec3::new(point.radius * sin, point.y, point.radius * cos),
        normal: Vec3::new(point.normal.x * sin, point.normal.y, point.normal.x * cos).normalize_or(Vec3::Y),
    }
}

/// Counter-clockwise quad as two triangles
fn push_quad(out: &mut Vec<LocalVertex>, a: LocalVertex, b: LocalVertex, c: LocalVertex, d: LocalVertex) {
    out.extend_from_slice(&[a, b, c, a, c, d]);
}

/// Sweep a bottom-to-top profile around +Y
fn lathe(out: &mut Vec<LocalVertex>, profile: &[ProfilePoint], segments: u32) {
    let segments = segments.max(3);
    for s in 0..segments {
        let t0 = s as f32 / segments as f32 * TAU;
        let t1 = (s + 1) as f32 / segments as f32 * TAU;
        for pair in profile.windows(2) {
            push_quad(
                out,
                revolve(pair[0], t0),
                revolve(pair[0], t1),
                revolve(pair[1], t1),
                revolve(pair[1], t0),
            );
        }
    }
}

fn disc(out: &mut Vec<LocalVertex>, radius: f32, y: f32, up: bool, segments: u32) {
    let segments = segments.max(3);
    let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
    let centre = LocalVertex {
        position: Vec3::new(0.0, y, 0.0),
        normal,
    };
    for s in 0..segments {
        let t0 = s as f32 / segments as f32 * TAU;
        let t1 = (s + 1) as f32 / segments as f32 * TAU;
        let rim = |t: f32| LocalVertex {
            position: Vec3::new(radius * t.sin(), y, radius * t.cos()),
            normal,
        };
        if up {
            out.extend_from_slice(&[centre, rim(t0), rim(t1)]);
        } else {
            out.extend_from_slice(&[centre, rim(t1), rim(t0)]);
        }
    }
}

fn cylinder(out: &mut Vec<LocalVertex>, radius_top: f32, radius_bottom: f32, height: f32, segments: u32) {
    let half = height * 0.5;
    let normal = Vec2::new(height, radius_bottom - radius_top).normalize_or(Vec2::X);
    lathe(
        out,
        &[
            ProfilePoint { radius: radius_bottom, y: -half, normal },
            ProfilePoint { radius: radius_top, y: half, normal },
        ],
        segments,
    );
    if radius_top > 0.0 {
        disc(out, radius_top, half, true, segments);
    }
    if radius_bottom > 0.0 {
        disc(out, radius_bottom, -half, false, segments);
    }
}

/// Point on a sphere of `radius` centred at height `centre`, polar angle from +Y
fn sphere_point(radius: f32, centre: f32, polar: f32) -> ProfilePoint {
    let (sin, cos) = polar.sin_cos();
    ProfilePoint {
        radius: radius * sin,
        y: centre + radius * cos,
        normal: Vec2::new(sin, cos),
    }
}

fn sphere(out: &mut Vec<LocalVertex>, radius: f32, width_segments: u32, height_segments: u32) {
    let rings = height_segments.max(2);
    let profile: Vec<ProfilePoint> = (0..=rings)
        .map(|i| sphere_point(radius, 0.0, PI - i as f32 / rings as f32 * PI))
        .collect();
    lathe(out, &profile, width_segments);
}

fn capsule(out: &mut Vec<LocalVertex>, radius: f32, length: f32, cap_segments: u32, radial_segments: u32) {
    let half = length * 0.5;
    let caps = cap_segments.max(1);
    let step = |i: u32| i as f32 / caps as f32 * FRAC_PI_2;

    let mut profile: Vec<ProfilePoint> = (0..=caps)
        .map(|i| sphere_point(radius, -half, PI - step(i)))
        .collect();
    profile.extend((0..=caps).map(|i| sphere_point(radius, half, FRAC_PI_2 - step(i))));

    lathe(out, &profile, radial_segments);
}

fn torus(out: &mut Vec<LocalVertex>, radius: f32, tube: f32, radial: u32, tubular: u32, arc: f32) {
    let radial = radial.max(3);
    let tubular = tubular.max(3);

    let vertex = |i: u32, j: u32| {
        let u = i as f32 / tubular as f32 * arc;
        let v = j as f32 / radial as f32 * TAU;
        let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
        let position = Vec3::new(
            (radius + tube * v.cos()) * u.cos(),
            (radius + tube * v.cos()) * u.sin(),
            tube * v.sin(),
        );
        LocalVertex {
            position,
            normal: (position - centre).normalize_or(Vec3::Z),
        }
    };

    for j in 0..radial {
        for i in 0..tubular {
            push_quad(out, vertex(i, j), vertex(i + 1, j), vertex(i + 1, j + 1), vertex(i, j + 1));
        }
    }
}

/// Rectangle at `centre`, spanned by half-axes `u` and `v`
fn face(out: &mut Vec<LocalVertex>, normal: Vec3, centre: Vec3, u: Vec3, v: Vec3) {
    let corner = |p: Vec3| LocalVertex { position: p, normal };
    push_quad(
        out,
        corner(centre - u - v),
        corner(centre + u - v),
        corner(centre + u + v),
        corner(centre - u + v),
    );
}

fn cuboid(out: &mut Vec<LocalVertex>, width: f32, height: f32, depth: f32) {
    let half = Vec3::new(width, height, depth) * 0.5;
    // (normal, u, v) with u x v = normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (normal, u, v) in faces {
        let extent = |axis: Vec3| axis * axis.abs().dot(half);
        face(out, normal, extent(normal), extent(u), extent(v));
    }
}

/// Triangle list for a primitive in its own space
pub fn tessellate(primitive: &Primitive) -> Vec<LocalVertex> {
    let mut out = Vec::new();
    match *primitive {
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => cylinder(&mut out, radius_top, radius_bottom, height, radial_segments),
        Primitive::Cone {
            radius,
            height,
            radial_segments,
        } => cylinder(&mut out, 0.0, radius, height, radial_segments),
        Primitive::Cuboid { width, height, depth } => cuboid(&mut out, width, height, depth),
        Primitive::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(&mut out, radius, width_segments, height_segments),
        Primitive::Capsule {
            radius,
            length,
            cap_segments,
            radial_segments,
        } => capsule(&mut out, radius, length, cap_segments, radial_segments),
        Primitive::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            arc,
        } => torus(&mut out, radius, tube, radial_segments, tubular_segments, arc),
        Primitive::Plane { width, height } => face(
            &mut out,
            Vec3::Z,
            Vec3::ZERO,
            Vec3::X * width * 0.5,
            Vec3::Y * height * 0.5,
        ),
    }
    out
}

fn shade(material: &Material, receive_shadow: bool) -> ([f32; 4], [f32; 4], [f32; 4]) {
    let [r, g, b] = srgb_to_linear(material.color);
    let [er, eg, eb] = srgb_to_linear(material.emissive);
    let k = material.emissive_intensity;
    (
        [r, g, b, material.opacity],
        [er * k, eg * k, eb * k, if material.unlit { 1.0 } else { 0.0 }],
        [
            if receive_shadow { 1.0 } else { 0.0 },
            material.roughness,
            material.metalness,
            0.0,
        ],
    )
}

fn append(out: &mut Vec<Vertex>, local: &[LocalVertex], transform: Mat4, material: &Material, receive_shadow: bool) {
    let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
    let (color, emissive, surface) = shade(material, receive_shadow);
    out.extend(local.iter().map(|v| Vertex {
        position: transform.transform_point3(v.position).to_array(),
        normal: (normal_matrix * v.normal).normalize_or(Vec3::Y).to_array(),
        color,
        emissive,
        surface,
    }));
}

/// World-space vertices for one node
pub fn node_vertices(node: &MeshNode) -> Vec<Vertex> {
    let mut out = Vec::new();
    append(&mut out, &tessellate(&node.primitive), node.transform, &node.material, node.receive_shadow);
    out
}

/// Vertex streams for the three geometry passes
#[derive(Debug, Default, Clone)]
pub struct SceneMesh {
    /// Geometry rendered into the shadow map
    pub casters: Vec<Vertex>,
    pub opaque: Vec<Vertex>,
    /// Drawn after the opaque pass with depth writes off
    pub transparent: Vec<Vertex>,
}

impl SceneMesh {
    pub fn triangle_count(&self) -> usize {
        (self.opaque.len() + self.transparent.len()) / 3
    }
}

/// Tessellate every node of a frame, plus the flame sparkles
pub fn build_scene_mesh(frame: &FrameDescription) -> SceneMesh {
    let mut mesh = SceneMesh::default();

    for node in &frame.nodes {
        let local = tessellate(&node.primitive);
        if node.material.is_transparent() {
            append(&mut mesh.transparent, &local, node.transform, &node.material, node.receive_shadow);
        } else {
            append(&mut mesh.opaque, &local, node.transform, &node.material, node.receive_shadow);
        }
        if node.cast_shadow {
            append(&mut mesh.casters, &local, node.transform, &node.material, false);
        }
    }

    let sparkle = tessellate(&Primitive::Cuboid {
        width: SPARKLE_SIZE,
        height: SPARKLE_SIZE,
        depth: SPARKLE_SIZE,
    });
    let material = Material::unlit(hex_rgb(SPARKLE), 1.0).with_emissive(hex_rgb(SPARKLE), 1.0);
    for &position in &frame.sparkles {
        append(&mut mesh.opaque, &sparkle, Mat4::from_translation(position), &material, false);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_primitives() -> Vec<Primitive> {
        vec![
            Primitive::Cylinder {
                radius_top: 2.0,
                radius_bottom: 3.0,
                height: 4.0,
                radial_segments: 11,
            },
            Primitive::Cone {
                radius: 0.6,
                height: 2.5,
                radial_segments: 8,
            },
            Primitive::Cuboid {
                width: 8.0,
                height: 12.0,
                depth: 8.0,
            },
            Primitive::Sphere {
                radius: 2.0,
                width_segments: 16,
                height_segments: 8,
            },
            Primitive::Capsule {
                radius: 0.3,
                length: 0.9,
                cap_segments: 4,
                radial_segments: 8,
            },
            Primitive::Torus {
                radius: 3.0,
                tube: 0.4,
                radial_segments: 8,
                tubular_segments: 24,
                arc: PI * 1.2,
            },
            Primitive::Plane {
                width: 10.0,
                height: 10.0,
            },
        ]
    }

    #[test]
    fn test_normals_are_unit() {
        for primitive in all_primitives() {
            for v in tessellate(&primitive) {
                assert!(
                    (v.normal.length() - 1.0).abs() < 1e-4,
                    "{:?} normal {:?}",
                    primitive,
                    v.normal
                );
            }
        }
    }

    #[test]
    fn test_triangle_counts() {
        let count = |p: Primitive| tessellate(&p).len();
        assert_eq!(count(Primitive::Cuboid { width: 1.0, height: 1.0, depth: 1.0 }), 36);
        assert_eq!(count(Primitive::Plane { width: 1.0, height: 1.0 }), 6);
        // side band plus both caps
        assert_eq!(
            count(Primitive::Cylinder {
                radius_top: 1.0,
                radius_bottom: 1.0,
                height: 1.0,
                radial_segments: 8
            }),
            8 * 12
        );
        // apex has no cap
        assert_eq!(
            count(Primitive::Cone {
                radius: 1.0,
                height: 1.0,
                radial_segments: 8
            }),
            8 * 9
        );
        assert_eq!(
            count(Primitive::Sphere {
                radius: 1.0,
                width_segments: 8,
                height_segments: 4
            }),
            8 * 4 * 6
        );
    }

    #[test]
    fn test_sphere_points_lie_on_surface() {
        let verts = tessellate(&Primitive::Sphere {
            radius: 2.0,
            width_segments: 12,
            height_segments: 6,
        });
        for v in verts {
            assert!((v.position.length() - 2.0).abs() < 1e-4);
            assert!(v.position.normalize().dot(v.normal) > 0.999);
        }
    }

    #[test]
    fn test_cuboid_extents() {
        let verts = tessellate(&Primitive::Cuboid {
            width: 8.0,
            height: 12.0,
            depth: 2.0,
        });
        let max = verts.iter().fold(Vec3::splat(f32::MIN), |m, v| m.max(v.position));
        let min = verts.iter().fold(Vec3::splat(f32::MAX), |m, v| m.min(v.position));
        assert_eq!(max, Vec3::new(4.0, 6.0, 1.0));
        assert_eq!(min, Vec3::new(-4.0, -6.0, -1.0));
        for v in &verts {
            // every normal points away from the centre
            assert!(v.position.dot(v.normal) > 0.0);
        }
    }

    #[test]
    fn test_capsule_height() {
        let verts = tessellate(&Primitive::Capsule {
            radius: 0.3,
            length: 0.9,
            cap_segments: 4,
            radial_segments: 8,
        });
        let top = verts.iter().map(|v| v.position.y).fold(f32::MIN, f32::max);
        let bottom = verts.iter().map(|v| v.position.y).fold(f32::MAX, f32::min);
        assert!((top - 0.75).abs() < 1e-5);
        assert!((bottom + 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_world_normals_follow_rotation() {
        let node = crate::scenes::build_water();
        let verts = node_vertices(&node);
        assert_eq!(verts.len(), 6);
        for v in verts {
            assert!((v.normal[1] - 1.0).abs() < 1e-5, "water faces up: {:?}", v.normal);
            assert!((v.position[1] - crate::scenes::WATER_LEVEL).abs() < 1e-3);
        }
    }

    #[test]
    fn test_scene_mesh_splits_passes() {
        let mut composer = crate::composer::SceneComposer::new(Some(5), 4);
        let frame = composer.render(&crate::settings::SceneSettings::default(), 0.0);
        let mesh = build_scene_mesh(&frame);

        assert!(!mesh.casters.is_empty());
        assert!(!mesh.opaque.is_empty());
        // flame and skyline towers are translucent
        assert!(!mesh.transparent.is_empty());
        assert!(mesh.transparent.iter().all(|v| v.color[3] < 1.0));
        assert!(mesh.triangle_count() > 0);
    }
}
