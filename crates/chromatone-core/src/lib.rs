pub mod animator;
pub mod backdrop;
pub mod color;
pub mod constants;
pub mod controls;
pub mod curve;
pub mod dataset;
pub mod gpu;
pub mod input;
pub mod mapper;
pub mod panels;
pub mod picking;
pub mod scene;
pub mod state;
pub mod view;

#[cfg(feature = "gpu")]
pub mod render;

pub use animator::*;
pub use constants::*;
pub use controls::*;
pub use dataset::{EmotionNode, EMOTIONS};
pub use scene::*;
pub use state::*;
pub use view::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");
