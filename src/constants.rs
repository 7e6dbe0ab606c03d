/// DOM wiring and overlay tuning for the web front-end.
///
/// Element ids must match `index.html`.
pub const CANVAS_ID: &str = "app-canvas";
pub const RESET_BUTTON_ID: &str = "reset-camera";
pub const INFO_PANEL_ID: &str = "info-panel";
pub const INFO_TOGGLE_ID: &str = "info-toggle";
pub const INFO_CLOSE_ID: &str = "info-close";
pub const INFO_CONTENT_ID: &str = "info-content";
pub const NODE_PANEL_ID: &str = "node-panel";
pub const NODE_CLOSE_ID: &str = "node-close";
pub const BACKDROP_ID: &str = "backdrop";
pub const LABEL_LAYER_ID: &str = "labels";

// Class toggled to hide overlay elements
pub const HIDDEN_CLASS: &str = "hidden";
pub const EXPANDED_CLASS: &str = "expanded";
pub const NODE_LABEL_CLASS: &str = "node-label";
pub const RATIO_LABEL_CLASS: &str = "ratio-label";

// Labels past this view depth fade out completely
pub const LABEL_FADE_START: f32 = 20.0;
pub const LABEL_FADE_END: f32 = 60.0;

// Frame time clamp (seconds); background tabs resume without a jump
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
