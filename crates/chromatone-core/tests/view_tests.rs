// Dataset validation, colors, panel text, view state and input helpers.

use chromatone_core::color::{self, ColorError};
use chromatone_core::dataset::{self, DatasetError, EMOTIONS};
use chromatone_core::input::{wheel_dolly_scale, KeyCommand, PointerGesture, CLICK_SLOP_PX};
use chromatone_core::panels::{self, color_name, NodeInfo};
use chromatone_core::picking::{pick_nearest, ray_sphere};
use chromatone_core::view::{SceneCommand, ViewState};
use glam::{Vec2, Vec3};

#[test]
fn bundled_dataset_is_valid() {
    assert_eq!(dataset::validate(&EMOTIONS), Ok(()));
    assert_eq!(dataset::emotions().len(), 12);
    for (i, n) in EMOTIONS.iter().enumerate() {
        assert_eq!(n.id, i as u32 + 1);
        assert!((n.angle - 30.0 * i as f32).abs() < 1e-6);
    }
}

#[test]
fn validation_reports_broken_records() {
    let mut nodes = EMOTIONS.to_vec();
    nodes[3].id = 1;
    assert_eq!(dataset::validate(&nodes), Err(DatasetError::DuplicateId(1)));

    let mut nodes = EMOTIONS.to_vec();
    nodes[0].hz = 0.0;
    assert!(matches!(
        dataset::validate(&nodes),
        Err(DatasetError::NonPositiveHz { id: 1, .. })
    ));

    let mut nodes = EMOTIONS.to_vec();
    nodes[2].angle = 360.0;
    assert!(matches!(
        dataset::validate(&nodes),
        Err(DatasetError::AngleOutOfRange { id: 3, .. })
    ));

    let mut nodes = EMOTIONS.to_vec();
    nodes[6].color_hex = "#+0+F+F";
    assert!(matches!(
        dataset::validate(&nodes),
        Err(DatasetError::Color { id: 7, .. })
    ));

    let mut nodes = EMOTIONS.to_vec();
    nodes[4].color_hex = "green";
    assert!(matches!(
        dataset::validate(&nodes),
        Err(DatasetError::Color { id: 5, .. })
    ));
}

#[test]
fn find_degrades_to_none() {
    assert_eq!(dataset::find(&EMOTIONS, 8).map(|n| n.note), Some("G"));
    assert!(dataset::find(&EMOTIONS, 0).is_none());
}

#[test]
fn hex_colors_parse_and_reject() {
    assert_eq!(color::parse_hex("#FF8000"), Ok([255, 128, 0]));
    assert_eq!(color::parse_hex("#ff8000"), Ok([255, 128, 0]));
    assert!(matches!(color::parse_hex("FF8000"), Err(ColorError::Format(_))));
    assert!(matches!(color::parse_hex("#FF80"), Err(ColorError::Format(_))));
    assert!(matches!(color::parse_hex("#GG8000"), Err(ColorError::Digits(_))));
    assert!(matches!(color::parse_hex("#+F+F+F"), Err(ColorError::Digits(_))));
    assert!(matches!(color::parse_hex("#-1FF00"), Err(ColorError::Digits(_))));
    let lin = color::hex_to_linear("#808080").unwrap();
    assert!((lin[0] - 0.2159).abs() < 1e-3);
}

#[test]
fn node_info_formats_fields() {
    let joy = dataset::find(&EMOTIONS, 1).unwrap();
    let info = NodeInfo::from_node(joy);
    assert_eq!(info.frequency, "261.63 Hz");
    assert_eq!(info.bpm, "150");
    assert_eq!(info.angle, "0°");
    assert_eq!(info.color_name, "Red");
    assert_eq!(info.radius_scale.as_deref(), Some("1"));
    assert_eq!(info.rows().len(), 6);

    let hope = dataset::find(&EMOTIONS, 3).unwrap();
    let info = NodeInfo::from_node(hope);
    assert_eq!(info.angle, "60°");
    assert_eq!(info.radius_scale, None);
    assert_eq!(info.rows().len(), 5);
}

#[test]
fn color_names_fall_back_to_unknown() {
    assert_eq!(color_name("#0080FF"), "Sky Blue");
    assert_eq!(color_name("#0080ff"), "Sky Blue");
    assert_eq!(color_name("#888888"), "Gray");
    assert_eq!(color_name("#123456"), "Unknown");
    for n in &EMOTIONS {
        assert_ne!(color_name(n.color_hex), "Unknown", "{}", n.color_hex);
    }
}

#[test]
fn label_description_only_when_hovered() {
    let calm = dataset::find(&EMOTIONS, 5).unwrap();
    let idle = panels::label_lines(calm, false);
    let hovered = panels::label_lines(calm, true);
    assert_eq!(idle.len() + 1, hovered.len());
    assert_eq!(hovered.last().map(String::as_str), Some(calm.description));
    assert_eq!(idle[2], "50 BPM");
}

#[test]
fn view_selection_and_panels() {
    let mut view = ViewState::new();
    assert!(!view.backdrop_visible());
    assert!(!view.backdrop_clicked());

    assert_eq!(view.select_node(5), SceneCommand::Focus(5));
    assert_eq!(view.selected_node(&EMOTIONS).map(|n| n.id), Some(5));
    assert!(view.backdrop_visible());

    view.toggle_info_panel();
    assert!(view.info_panel_open());
    assert!(view.backdrop_clicked());
    assert_eq!(view.selected(), None);
    assert!(!view.info_panel_open());
    assert!(!view.backdrop_visible());
}

#[test]
fn reset_button_clears_selection() {
    let mut view = ViewState::new();
    view.select_node(1);
    view.set_info_panel_open(true);
    assert_eq!(view.reset_clicked(), SceneCommand::Reset);
    assert_eq!(view.selected(), None);
    // the info panel is independent of the camera
    assert!(view.info_panel_open());
}

#[test]
fn unknown_selection_shows_no_panel() {
    let mut view = ViewState::new();
    view.select_node(404);
    assert!(view.selected_node(&EMOTIONS).is_none());
}

#[test]
fn gesture_tells_clicks_from_drags() {
    let mut g = PointerGesture::default();
    assert_eq!(g.move_to(Vec2::new(10.0, 10.0)), None);
    g.press(Vec2::new(10.0, 10.0));
    assert_eq!(g.move_to(Vec2::new(11.0, 11.0)), Some(Vec2::new(1.0, 1.0)));
    assert!(g.release());

    g.press(Vec2::ZERO);
    g.move_to(Vec2::new(CLICK_SLOP_PX * 2.0, 0.0));
    assert!(!g.release());
    // release without press
    assert!(!g.release());
}

#[test]
fn wheel_and_keys() {
    assert!(wheel_dolly_scale(1.0) > 1.0);
    assert!(wheel_dolly_scale(-1.0) < 1.0);
    assert!((wheel_dolly_scale(0.0) - 1.0).abs() < 1e-6);
    assert_eq!(KeyCommand::from_key("R"), Some(KeyCommand::ResetCamera));
    assert_eq!(KeyCommand::from_key("i"), Some(KeyCommand::ToggleInfo));
    assert_eq!(KeyCommand::from_key("Escape"), Some(KeyCommand::Dismiss));
    assert_eq!(KeyCommand::from_key("x"), None);
}

#[test]
fn nearest_sphere_wins() {
    let ro = Vec3::ZERO;
    let rd = Vec3::Z;
    assert!(ray_sphere(ro, rd, Vec3::new(0.0, 0.0, 5.0), 1.0).is_some());
    assert!(ray_sphere(ro, rd, Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
    let hit = pick_nearest(
        ro,
        rd,
        [
            (1, Vec3::new(0.0, 0.0, 9.0), 1.0),
            (2, Vec3::new(0.0, 0.0, 4.0), 0.5),
            (3, Vec3::new(3.0, 0.0, 2.0), 0.5),
        ],
    );
    assert_eq!(hit, Some(2));
}
