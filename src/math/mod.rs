mod color;
mod spherical;

pub use color::{hex_rgb, srgb_to_linear};
pub use spherical::from_spherical;
