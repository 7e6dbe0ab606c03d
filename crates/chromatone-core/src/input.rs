//! Platform-neutral pointer and keyboard interpretation shared by the
//! front-ends.

use glam::Vec2;

/// Pointer travel (pixels) beyond which a press becomes a drag.
pub const CLICK_SLOP_PX: f32 = 4.0;
/// Dolly factor per wheel "line"; pixel deltas are scaled to lines first.
pub const WHEEL_DOLLY_PER_LINE: f32 = 0.95;
pub const WHEEL_PIXELS_PER_LINE: f32 = 50.0;

/// Tracks one primary-button press to tell clicks from orbit drags.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerGesture {
    pressed: bool,
    last: Vec2,
    travelled: f32,
}

impl PointerGesture {
    pub fn press(&mut self, at: Vec2) {
        self.pressed = true;
        self.last = at;
        self.travelled = 0.0;
    }

    /// Returns the drag delta while the button is held.
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        let delta = at - self.last;
        self.last = at;
        if !self.pressed {
            return None;
        }
        self.travelled += delta.length();
        Some(delta)
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.last
    }

    /// Ends the press. `true` when it counts as a click.
    pub fn release(&mut self) -> bool {
        let was_pressed = std::mem::take(&mut self.pressed);
        was_pressed && self.travelled <= CLICK_SLOP_PX
    }
}

/// Wheel delta in lines to a dolly scale; positive deltas move away.
#[inline]
pub fn wheel_dolly_scale(lines: f32) -> f32 {
    WHEEL_DOLLY_PER_LINE.powf(-lines)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    ResetCamera,
    ToggleInfo,
    Dismiss,
}

impl KeyCommand {
    /// Map a key name as reported by DOM `KeyboardEvent.key` or winit.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "r" | "R" => Some(Self::ResetCamera),
            "i" | "I" => Some(Self::ToggleInfo),
            "Escape" => Some(Self::Dismiss),
            _ => None,
        }
    }
}
