// Native window defaults
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 800;

// Frame time clamp so a stalled window does not jump animations
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
