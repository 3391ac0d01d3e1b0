use glam::Vec3;

/// Spherical to Cartesian with Y up.
///
/// `phi` is the polar angle measured from +Y, `theta` the azimuthal angle
/// measured from +Z towards +X. Both in radians.
pub fn from_spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi = phi.sin();
    Vec3::new(
        radius * sin_phi * theta.sin(),
        radius * phi.cos(),
        radius * sin_phi * theta.cos(),
    )
}
