//! The static emotion dataset: twelve chromatic notes C4..B4 laid around the
//! ring at 30° per semitone.

use crate::color::{self, ColorError};
use fnv::FnvHashSet;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionNode {
    pub id: u32,
    pub label: &'static str,
    pub note: &'static str,
    pub hz: f32,
    pub bpm: u32,
    /// Degrees in \[0, 360).
    pub angle: f32,
    pub color_hex: &'static str,
    /// Dominant wavelength of the hue; `None` for non-spectral colors.
    pub wavelength_nm: Option<f32>,
    pub description: &'static str,
    /// Harmonic ratio relative to Joy, shown for the triad members.
    pub radius_scale: Option<&'static str>,
}

pub static EMOTIONS: [EmotionNode; 12] = [
    EmotionNode {
        id: 1,
        label: "Joy (환희)",
        note: "C",
        hz: 261.63,
        bpm: 150,
        angle: 0.0,
        color_hex: "#FF0000",
        wavelength_nm: Some(700.0),
        description: "Bright, open elation; the tonic everything resolves to.",
        radius_scale: Some("1"),
    },
    EmotionNode {
        id: 2,
        label: "Excitement (설렘)",
        note: "C#",
        hz: 277.18,
        bpm: 135,
        angle: 30.0,
        color_hex: "#FF4000",
        wavelength_nm: Some(640.0),
        description: "A quickened pulse just before something begins.",
        radius_scale: None,
    },
    EmotionNode {
        id: 3,
        label: "Hope (희망)",
        note: "D",
        hz: 293.66,
        bpm: 120,
        angle: 60.0,
        color_hex: "#FF8000",
        wavelength_nm: Some(610.0),
        description: "Warm anticipation leaning toward the light.",
        radius_scale: None,
    },
    EmotionNode {
        id: 4,
        label: "Contentment (만족)",
        note: "D#",
        hz: 311.13,
        bpm: 100,
        angle: 90.0,
        color_hex: "#FFBF00",
        wavelength_nm: Some(580.0),
        description: "Settled warmth; nothing is missing.",
        radius_scale: None,
    },
    EmotionNode {
        id: 5,
        label: "Calm (평온)",
        note: "E",
        hz: 329.63,
        bpm: 50,
        angle: 120.0,
        color_hex: "#00FF00",
        wavelength_nm: Some(530.0),
        description: "Still water; a slow, even breath.",
        radius_scale: Some("4/5"),
    },
    EmotionNode {
        id: 6,
        label: "Serenity (고요)",
        note: "F",
        hz: 349.23,
        bpm: 60,
        angle: 150.0,
        color_hex: "#00FF80",
        wavelength_nm: Some(510.0),
        description: "Quiet clarity after the noise has passed.",
        radius_scale: None,
    },
    EmotionNode {
        id: 7,
        label: "Nostalgia (그리움)",
        note: "F#",
        hz: 369.99,
        bpm: 70,
        angle: 180.0,
        color_hex: "#00FFFF",
        wavelength_nm: Some(490.0),
        description: "Longing for a place that only exists in memory.",
        radius_scale: None,
    },
    EmotionNode {
        id: 8,
        label: "Sadness (슬픔)",
        note: "G",
        hz: 392.0,
        bpm: 88,
        angle: 210.0,
        color_hex: "#0080FF",
        wavelength_nm: Some(475.0),
        description: "Cool, heavy depth; the weight of something lost.",
        radius_scale: Some("2/3"),
    },
    EmotionNode {
        id: 9,
        label: "Loneliness (외로움)",
        note: "G#",
        hz: 415.3,
        bpm: 76,
        angle: 240.0,
        color_hex: "#0000FF",
        wavelength_nm: Some(450.0),
        description: "A single voice in a wide, empty room.",
        radius_scale: None,
    },
    EmotionNode {
        id: 10,
        label: "Anxiety (불안)",
        note: "A",
        hz: 440.0,
        bpm: 110,
        angle: 270.0,
        color_hex: "#8000FF",
        wavelength_nm: Some(420.0),
        description: "Restless tension that will not resolve.",
        radius_scale: None,
    },
    EmotionNode {
        id: 11,
        label: "Anger (분노)",
        note: "A#",
        hz: 466.16,
        bpm: 140,
        angle: 300.0,
        color_hex: "#BF00FF",
        wavelength_nm: None,
        description: "Hot pressure pushing outward.",
        radius_scale: None,
    },
    EmotionNode {
        id: 12,
        label: "Passion (열정)",
        note: "B",
        hz: 493.88,
        bpm: 145,
        angle: 330.0,
        color_hex: "#FF0080",
        wavelength_nm: None,
        description: "The leading tone, straining back toward joy.",
        radius_scale: None,
    },
];

#[inline]
pub fn emotions() -> &'static [EmotionNode] {
    &EMOTIONS
}

/// Look up a node by id. Unknown ids yield `None`, never a fault.
pub fn find(nodes: &[EmotionNode], id: u32) -> Option<&EmotionNode> {
    nodes.iter().find(|n| n.id == id)
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DatasetError {
    #[error("duplicate node id {0}")]
    DuplicateId(u32),
    #[error("node {id} has non-positive frequency {hz}")]
    NonPositiveHz { id: u32, hz: f32 },
    #[error("node {id} angle {angle} is outside [0, 360)")]
    AngleOutOfRange { id: u32, angle: f32 },
    #[error("node {id}: {source}")]
    Color {
        id: u32,
        #[source]
        source: ColorError,
    },
}

/// Check the invariants the mapper and scene rely on.
pub fn validate(nodes: &[EmotionNode]) -> Result<(), DatasetError> {
    let mut seen = FnvHashSet::default();
    for n in nodes {
        if !seen.insert(n.id) {
            return Err(DatasetError::DuplicateId(n.id));
        }
        if !(n.hz > 0.0) {
            return Err(DatasetError::NonPositiveHz { id: n.id, hz: n.hz });
        }
        if !(0.0..360.0).contains(&n.angle) {
            return Err(DatasetError::AngleOutOfRange {
                id: n.id,
                angle: n.angle,
            });
        }
        color::parse_hex(n.color_hex).map_err(|source| DatasetError::Color { id: n.id, source })?;
    }
    Ok(())
}
