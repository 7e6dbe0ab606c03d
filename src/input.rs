// Pure helpers for mapping browser coordinates; no web-sys types so the host
// tests can include this file directly.

use glam::Vec2;

/// Pointer position relative to the canvas, in CSS pixels.
#[inline]
pub fn canvas_point(client_x: f32, client_y: f32, rect_left: f32, rect_top: f32) -> Vec2 {
    Vec2::new(client_x - rect_left, client_y - rect_top)
}

/// Backing-store size for a canvas of `css_w` x `css_h` at `dpr`.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let w = (css_w * dpr).round().max(1.0) as u32;
    let h = (css_h * dpr).round().max(1.0) as u32;
    (w, h)
}

/// CSS transform that anchors a label's bottom-center at `at`.
pub fn label_transform(at: Vec2) -> String {
    format!(
        "translate({:.1}px, {:.1}px) translate(-50%, -100%)",
        at.x, at.y
    )
}

/// Label opacity from its view depth: 1 up close, fading to 0 far away.
#[inline]
pub fn label_opacity(depth: f32, fade_start: f32, fade_end: f32) -> f32 {
    if depth <= 0.0 {
        return 0.0;
    }
    if fade_end <= fade_start {
        return if depth <= fade_start { 1.0 } else { 0.0 };
    }
    1.0 - ((depth - fade_start) / (fade_end - fade_start)).clamp(0.0, 1.0)
}

/// Wheel delta to lines: DOM `deltaMode` 0 is pixels, 1 lines, 2 pages.
#[inline]
pub fn wheel_lines(delta_y: f64, delta_mode: u32, pixels_per_line: f32) -> f32 {
    match delta_mode {
        0 => delta_y as f32 / pixels_per_line,
        1 => delta_y as f32,
        _ => delta_y as f32 * 10.0,
    }
}
