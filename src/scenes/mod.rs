mod common;
mod pedestal;
mod skyline;
mod statue;
mod tourists;
mod water;

pub use common::{patina, place, translate, trs, SPARKLE};
pub use pedestal::{build_pedestal, PEDESTAL_TOP};
pub use skyline::{build_skyline, SKYLINE_TOWERS};
pub use statue::{build_statue, torch_arm_transform, Statue, TORCH_PIVOT};
pub use tourists::{
    scatter_tourists, TouristCrowd, TouristInstance, CROWD_HEIGHT, CROWD_INNER_RADIUS,
    CROWD_OUTER_RADIUS, DEFAULT_TOURIST_COUNT,
};
pub use water::{build_water, WATER_LEVEL, WATER_SIZE};
