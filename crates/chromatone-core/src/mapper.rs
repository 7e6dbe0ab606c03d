//! Pure (angle, bpm, hz) -> world-space mappings.

use crate::constants::*;
use crate::dataset::EmotionNode;
use glam::Vec3;

/// Place a node on the tilted ring: polar angle around the Y axis at
/// `RING_RADIUS`, lifted by tempo.
#[inline]
pub fn position(angle_deg: f32, bpm: f32) -> Vec3 {
    let rad = angle_deg.to_radians();
    Vec3::new(
        RING_RADIUS * rad.cos(),
        (bpm - BPM_HEIGHT_ORIGIN) * HEIGHT_PER_BPM,
        RING_RADIUS * rad.sin(),
    )
}

/// Size multiplier from pitch: low notes are large, high notes small.
/// Clamped outside `MIN_HZ..=MAX_HZ`.
#[inline]
pub fn scale_from_hz(hz: f32) -> f32 {
    let t = ((hz - MIN_HZ) / (MAX_HZ - MIN_HZ)).clamp(0.0, 1.0);
    SCALE_AT_MIN_HZ + (SCALE_AT_MAX_HZ - SCALE_AT_MIN_HZ) * t
}

/// Rendered sphere radius for a node of the given pitch.
#[inline]
pub fn node_radius(hz: f32) -> f32 {
    SPHERE_BASE_RADIUS * scale_from_hz(hz)
}

/// Height of the billboard label above the node center.
#[inline]
pub fn label_height(hz: f32) -> f32 {
    LABEL_BASE_OFFSET + SPHERE_BASE_RADIUS * scale_from_hz(hz)
}

#[inline]
pub fn node_position(node: &EmotionNode) -> Vec3 {
    position(node.angle, node.bpm as f32)
}
