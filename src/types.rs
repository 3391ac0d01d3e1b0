use glam::{Mat4, Vec3};
use serde::Serialize;

/// Primitive shapes the scene is built from.
///
/// Dimensions follow the usual real-time conventions: cylinders, cones and
/// capsules stand along +Y centred on the origin, tori lie in the XY plane
/// around +Z, planes lie in the XY plane facing +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Capsule {
        radius: f32,
        length: f32,
        cap_segments: u32,
        radial_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f32,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

/// Surface description, colours in sRGB
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub opacity: f32,
    /// Skip lighting entirely (background silhouettes)
    pub unlit: bool,
}

impl Material {
    pub fn standard(color: [f32; 3]) -> Self {
        Self {
            color,
            roughness: 1.0,
            metalness: 0.0,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            opacity: 1.0,
            unlit: false,
        }
    }

    pub fn unlit(color: [f32; 3], opacity: f32) -> Self {
        Self {
            opacity,
            unlit: true,
            ..Self::standard(color)
        }
    }

    pub fn with_roughness(self, roughness: f32) -> Self {
        Self { roughness, ..self }
    }

    pub fn with_metalness(self, metalness: f32) -> Self {
        Self { metalness, ..self }
    }

    pub fn with_emissive(self, emissive: [f32; 3], emissive_intensity: f32) -> Self {
        Self {
            emissive,
            emissive_intensity,
            ..self
        }
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { opacity, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Which part of the composition a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeGroup {
    Pedestal,
    Statue,
    TorchArm,
    Water,
    Skyline,
    Tourist,
}

/// One positioned primitive in world space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshNode {
    pub name: &'static str,
    pub group: NodeGroup,
    pub primitive: Primitive,
    pub material: Material,
    pub transform: Mat4,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshNode {
    pub fn new(name: &'static str, group: NodeGroup, primitive: Primitive, material: Material) -> Self {
        Self {
            name,
            group,
            primitive,
            material,
            transform: Mat4::IDENTITY,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn at(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    /// World-space origin of the node
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

/// Text placed on a surface in the scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: &'static str,
    pub transform: Mat4,
    pub font_size: f32,
    pub color: [f32; 3],
}

impl Label {
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
}

/// Interleaved vertex consumed by the mesh pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Linear colour, alpha = opacity
    pub color: [f32; 4],
    /// Linear emissive radiance, w = 1.0 for unlit surfaces
    pub emissive: [f32; 4],
    /// x = receives shadow, y = roughness, z = metalness
    pub surface: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub time: f32,
}

/// Lighting uniform buffer data for GPU, colours linear
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub light_view_proj: [[f32; 4]; 4],
    /// xyz = normalized direction towards the sun, w = intensity
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    /// rgb = colour, w = intensity
    pub ambient: [f32; 4],
    /// xyz = position, w = intensity
    pub torch_position: [f32; 4],
    /// rgb = colour, w = cutoff distance
    pub torch_color: [f32; 4],
    /// x = turbidity, y = rayleigh, z = mie coefficient, w = mie directional g
    pub sky: [f32; 4],
    /// x = star count, y = star size factor, z = visibility, w = dome radius
    pub stars: [f32; 4],
    /// x = shadow bias, y = shadow texel size, z = torch decay, w = elapsed seconds
    pub params: [f32; 4],
}
