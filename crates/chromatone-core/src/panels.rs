//! Text content of the overlay panels, independent of how they are drawn.

use crate::dataset::EmotionNode;

pub const APP_TITLE: &str = "Chromatone Sphere";
pub const APP_SUBTITLE: &str = "Synesthetic Emotion Interface";

const COLOR_NAMES: &[(&str, &str)] = &[
    ("#FF0000", "Red"),
    ("#FF4000", "Red Orange"),
    ("#FF8000", "Orange"),
    ("#FFBF00", "Yellow"),
    ("#00FF00", "Green"),
    ("#00FF80", "Spring Green"),
    ("#00FFFF", "Cyan"),
    ("#0080FF", "Sky Blue"),
    ("#0000FF", "Blue"),
    ("#8000FF", "Violet"),
    ("#BF00FF", "Magenta"),
    ("#FF0080", "Rose"),
    ("#888888", "Gray"),
];

/// Human color name for a palette hex, `"Unknown"` otherwise.
pub fn color_name(hex: &str) -> &'static str {
    COLOR_NAMES
        .iter()
        .find(|(h, _)| h.eq_ignore_ascii_case(hex))
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

/// Formatted fields of the selected-node panel.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInfo {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub note: String,
    pub frequency: String,
    pub bpm: String,
    pub angle: String,
    pub color_hex: String,
    pub color_name: &'static str,
    pub radius_scale: Option<String>,
}

impl NodeInfo {
    pub fn from_node(node: &EmotionNode) -> Self {
        Self {
            id: node.id,
            title: node.label.to_string(),
            description: node.description.to_string(),
            note: node.note.to_string(),
            frequency: format!("{:.2} Hz", node.hz),
            bpm: node.bpm.to_string(),
            angle: format!("{}°", node.angle),
            color_hex: node.color_hex.to_string(),
            color_name: color_name(node.color_hex),
            radius_scale: node.radius_scale.map(str::to_string),
        }
    }

    /// `(label, value)` rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Note", self.note.clone()),
            ("Frequency", self.frequency.clone()),
            ("BPM", self.bpm.clone()),
            ("Angle", self.angle.clone()),
            ("Color", format!("{} {}", self.color_name, self.color_hex)),
        ];
        if let Some(r) = &self.radius_scale {
            rows.push(("Radius Scale", r.clone()));
        }
        rows
    }
}

pub struct InfoSection {
    pub heading: &'static str,
    pub body: &'static str,
}

pub const INFO_PANEL_TITLE: &str = "Synesthetic Relations";
pub const INFO_PANEL_INTRO: &str = "This chart expresses each emotion through five elements.";
pub const INFO_PANEL_SECTIONS: &[InfoSection] = &[
    InfoSection {
        heading: "Circular position",
        body: "Each emotion sits at a fixed angle on the ring, so the emotional cycle reads like a clock face.",
    },
    InfoSection {
        heading: "Color",
        body: "Color carries the temperature of the emotion: red (joy) is hot passion, green (calm) is quiet stability, blue (sadness) is cold depth.",
    },
    InfoSection {
        heading: "Pitch (Hz)",
        body: "Pitch sets the tone. Each emotion owns one note of the chromatic scale, like a key on a piano; lower notes are drawn larger.",
    },
    InfoSection {
        heading: "Heart rate (BPM)",
        body: "Heart rate sets the height. Fast beats float high and slow beats sink low, and every sphere pulses at its own tempo.",
    },
];
pub const INFO_PANEL_OUTRO: &str =
    "Together these elements let you experience emotion visually in three dimensions.";

/// Lines of a node's floating label. The description is shown on hover.
pub fn label_lines(node: &EmotionNode, hovered: bool) -> Vec<String> {
    let mut lines = vec![
        node.label.to_string(),
        format!("{} | {} Hz", node.note, node.hz),
        format!("{} BPM", node.bpm),
    ];
    if hovered {
        lines.push(node.description.to_string());
    }
    lines
}
