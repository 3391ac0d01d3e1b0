use glam::Vec3;
use serde::Serialize;

const SWAY_Z_FREQUENCY: f32 = 0.5;
const SWAY_Z_AMPLITUDE: f32 = 0.02;
const SWAY_X_FREQUENCY: f32 = 0.3;
const SWAY_X_AMPLITUDE: f32 = 0.01;

pub const SPARKLE_COUNT: usize = 20;
pub const SPARKLE_SCALE: f32 = 2.0;
const SPARKLE_BASE_SPEED: f32 = 0.4;

/// Rotation offsets (radians) added to the torch arm's rest orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TorchSway {
    pub rot_x: f32,
    pub rot_z: f32,
}

/// Wind sway of the torch arm at elapsed time `t` seconds.
///
/// Pure function of `(t, wind)`: nothing accumulates between frames, so an
/// abrupt wind change jumps the amplitude on the next frame.
pub fn torch_sway(t: f32, wind: f32) -> TorchSway {
    TorchSway {
        rot_x: (t * SWAY_X_FREQUENCY).sin() * SWAY_X_AMPLITUDE * wind,
        rot_z: (t * SWAY_Z_FREQUENCY).sin() * SWAY_Z_AMPLITUDE * wind,
    }
}

fn hash(n: u32) -> f32 {
    let mut x = n.wrapping_mul(0x9E37_79B9) ^ 0x85EB_CA6B;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846C_A68B);
    x ^= x >> 16;
    x as f32 / u32::MAX as f32
}

/// Offsets of the flame sparkles relative to their emitter.
///
/// Each sparkle rises through a cube of side [`SPARKLE_SCALE`] and wraps
/// back to the bottom. Wind makes them drift faster.
pub fn flame_sparkles(t: f32, wind: f32) -> Vec<Vec3> {
    let speed = SPARKLE_BASE_SPEED + wind;
    let half = SPARKLE_SCALE * 0.5;

    (0..SPARKLE_COUNT as u32)
        .map(|i| {
            let x = hash(i * 3) * SPARKLE_SCALE - half;
            let z = hash(i * 3 + 2) * SPARKLE_SCALE - half;
            let phase = hash(i * 3 + 1);
            let y = (phase + t * speed * 0.25).fract() * SPARKLE_SCALE - half;
            let wobble = (t * speed * 2.0 + phase * std::f32::consts::TAU).sin() * 0.05;
            Vec3::new(x + wobble, y, z)
        })
        .collect()
}
