pub mod animation;
pub mod camera;
pub mod chat;
pub mod cli;
pub mod composer;
pub mod config;
pub mod core;
pub mod frame;
pub mod math;
pub mod mesh;
pub mod renderer;
pub mod scenes;
pub mod settings;
pub mod sun;
pub mod types;
pub mod ui;

pub use composer::{compose_frame, FrameDescription, SceneComposer};
pub use settings::SceneSettings;
