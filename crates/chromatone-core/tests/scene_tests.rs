// Scene composer: layout, event resolution, reset triggers, lifecycle and the
// per-frame visuals.

use chromatone_core::animator::AnimationMode;
use chromatone_core::constants::*;
use chromatone_core::dataset::EMOTIONS;
use chromatone_core::gpu;
use chromatone_core::scene::{pulse_scale, spin_angle, EmotionScene, SceneLayout, SceneParams};
use glam::{Quat, Vec3};

const DT: f32 = 1.0 / 60.0;
const EPS: f32 = 1e-3;

fn settle(scene: &mut EmotionScene) {
    for _ in 0..240 {
        scene.tick(DT);
    }
}

#[test]
fn layout_is_built_once_from_the_dataset() {
    let layout = SceneLayout::build(&EMOTIONS);
    assert_eq!(layout.nodes.len(), 12);
    assert_eq!(layout.ring.len(), RING_SAMPLES + 1);
    assert_eq!(layout.drop_lines.len(), 12);
    assert!(layout.triad.is_some());
    assert_eq!(layout.node(8).map(|n| n.node.label), Some(EMOTIONS[7].label));
    assert!(layout.node(42).is_none());
    assert!((layout.fog.near - FOG_NEAR).abs() < f32::EPSILON);
    assert_eq!(layout.fog.color, layout.background);
}

#[test]
fn scene_without_triad_member_still_builds() {
    let nodes: Vec<_> = EMOTIONS.iter().copied().filter(|n| n.id != 8).collect();
    let scene = EmotionScene::new(&nodes, SceneParams::default());
    assert!(scene.layout().triad.is_none());
    assert_eq!(scene.layout().nodes.len(), 11);
}

#[test]
fn focus_on_node_moves_target_there() {
    let mut scene = EmotionScene::with_defaults();
    assert!(scene.focus_node(1));
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Focusing);
    assert_eq!(scene.focused(), Some(1));
    settle(&mut scene);
    let target = scene.controls().target;
    assert!((target - Vec3::new(6.0, 10.0, 0.0)).length() < EPS, "{target:?}");
}

#[test]
fn unknown_node_is_ignored() {
    let mut scene = EmotionScene::with_defaults();
    assert!(!scene.focus_node(99));
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Idle);
    assert_eq!(scene.focused(), None);
}

#[test]
fn reset_handle_is_edge_triggered() {
    let mut scene = EmotionScene::with_defaults();
    let handle = scene.reset_handle();
    assert!(handle.is_attached());

    scene.focus_node(5);
    settle(&mut scene);
    assert!(handle.trigger());
    assert!(handle.trigger());
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Resetting);
    settle(&mut scene);
    assert_eq!(scene.animator().mode(), AnimationMode::Idle);
    assert!((scene.controls().position - HOME_CAMERA_POSITION).length() < EPS);

    // no new trigger, no new reset
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Idle);
}

#[test]
fn observed_counter_resets_only_on_change() {
    let mut scene = EmotionScene::with_defaults();
    scene.observe_reset_counter(3);
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Idle);

    scene.observe_reset_counter(3);
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Idle);

    scene.observe_reset_counter(4);
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Resetting);
}

#[test]
fn focus_and_reset_in_one_frame_end_at_home() {
    let mut scene = EmotionScene::with_defaults();
    scene.orbit_drag(120.0, -40.0, 800.0);
    scene.focus_node(8);
    scene.request_reset();
    settle(&mut scene);
    assert!((scene.controls().position - HOME_CAMERA_POSITION).length() < EPS);
    assert!((scene.controls().target - HOME_CAMERA_TARGET).length() < EPS);
    assert_eq!(scene.focused(), None);
}

#[test]
fn focus_during_reset_is_dropped() {
    let mut scene = EmotionScene::with_defaults();
    scene.orbit_drag(200.0, 0.0, 800.0);
    scene.request_reset();
    scene.tick(DT);
    assert!(scene.focus_node(1));
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Resetting);
    assert_eq!(scene.focused(), None);
    settle(&mut scene);
    assert!((scene.controls().target - HOME_CAMERA_TARGET).length() < EPS);
}

#[test]
fn unmount_detaches_handles_and_freezes() {
    let mut scene = EmotionScene::with_defaults();
    let handle = scene.reset_handle();
    scene.focus_node(1);
    scene.unmount();
    assert!(!scene.is_mounted());
    assert!(!handle.is_attached());
    assert!(!handle.trigger());
    assert!(!scene.focus_node(1));
    scene.tick(DT);
    assert_eq!(scene.animator().mode(), AnimationMode::Idle);
    assert_eq!(scene.elapsed(), 0.0);
}

#[test]
fn dropping_the_scene_detaches_handles() {
    let scene = EmotionScene::with_defaults();
    let handle = scene.reset_handle();
    drop(scene);
    assert!(!handle.trigger());
}

#[test]
fn hover_raises_emissive() {
    let mut scene = EmotionScene::with_defaults();
    scene.set_hovered(Some(3));
    let frame = scene.compose();
    for n in &frame.nodes {
        let expected = if n.id == 3 { EMISSIVE_HOVERED } else { EMISSIVE_IDLE };
        assert_eq!(n.emissive, expected);
        assert_eq!(n.hovered, n.id == 3);
    }
    scene.set_hovered(Some(77));
    assert_eq!(scene.hovered(), None);
}

#[test]
fn pulse_follows_tempo() {
    // 60 BPM: one pulse per second, peak at a quarter beat
    assert!((pulse_scale(1.0, 60.0, 0.0, PULSE_AMOUNT) - 1.0).abs() < 1e-6);
    assert!((pulse_scale(1.0, 60.0, 0.25, PULSE_AMOUNT) - 1.05).abs() < 1e-5);
    assert!((pulse_scale(2.0, 60.0, 0.75, PULSE_AMOUNT) - 1.9).abs() < 1e-5);
    assert!(spin_angle(150.0, 2.0, SPIN_PER_BEAT) > spin_angle(50.0, 2.0, SPIN_PER_BEAT));
}

#[test]
fn composed_nodes_carry_labels_and_radius() {
    let mut scene = EmotionScene::with_defaults();
    scene.tick(0.4);
    let frame = scene.compose();
    assert_eq!(frame.nodes.len(), 12);
    for (visual, laid) in frame.nodes.iter().zip(&scene.layout().nodes) {
        assert!((visual.radius - SPHERE_BASE_RADIUS * visual.scale).abs() < 1e-6);
        let lift = visual.label_anchor.y - visual.position.y;
        assert!((lift - laid.label_height).abs() < 1e-5);
    }
}

#[test]
fn scene_rotation_moves_nodes_and_focus_targets() {
    let params = SceneParams {
        scene_rotation_speed: 0.5,
        ..SceneParams::default()
    };
    let mut scene = EmotionScene::new(&EMOTIONS, params);
    scene.tick(1.0);
    let rot = Quat::from_rotation_y(0.5);
    let expected = rot * Vec3::new(6.0, 10.0, 0.0);
    let world = scene.world_position(1).unwrap();
    assert!((world - expected).length() < EPS);
    let frame = scene.compose();
    assert!((frame.nodes[0].position - expected).length() < EPS);
}

#[test]
fn picking_hits_the_node_under_the_cursor() {
    let scene = EmotionScene::with_defaults();
    let (w, h) = (1280.0, 800.0);
    let camera = scene.camera(w / h);
    for id in [1, 5, 8] {
        let center = scene.world_position(id).unwrap();
        let px = camera.project(center, w, h).expect("node in front of camera");
        assert_eq!(scene.pick(&camera, px.x, px.y, w, h), Some(id));
    }
    assert_eq!(scene.pick(&camera, 2.0, 2.0, w, h), None);
}

#[test]
fn gpu_packing_covers_every_visual() {
    let mut scene = EmotionScene::with_defaults();
    scene.tick(0.5);
    let frame = scene.compose();
    let camera = scene.camera(1.6);

    let mut lines = Vec::new();
    gpu::build_line_vertices(scene.layout(), frame.rotation, &mut lines);
    let grid = (GRID_DIVISIONS + 1) * 2 * 2;
    let drops = 12 * 2;
    let ring = RING_SAMPLES * 2;
    let triad = 3 * 2;
    assert_eq!(lines.len(), grid + drops + ring + triad);

    let mut spheres = Vec::new();
    gpu::build_sphere_instances(&frame, scene.backdrop(), &camera, &mut spheres);
    assert!(spheres.len() >= STAR_COUNT + SPARKLE_COUNT + 12);
    // back to front
    let depth = |s: &gpu::SphereInstance| camera.view_depth(Vec3::from(s.center));
    assert!(spheres.windows(2).all(|w| depth(&w[0]) >= depth(&w[1])));
}

#[test]
fn backdrop_is_deterministic_per_seed() {
    let a = EmotionScene::with_defaults();
    let b = EmotionScene::with_defaults();
    assert_eq!(a.backdrop().stars.len(), STAR_COUNT);
    assert_eq!(a.backdrop().stars[17].position, b.backdrop().stars[17].position);
    for s in &a.backdrop().stars {
        let r = s.position.length();
        assert!(r >= STAR_RADIUS - 1e-2 && r <= STAR_RADIUS + STAR_DEPTH + 1e-2);
    }
    let pose = a.backdrop().ship_pose(3.0);
    assert!((pose.forward.length() - 1.0).abs() < 1e-4);
    assert!(pose.engine_pulse >= 1.0 - SHIP_ENGINE_PULSE_AMOUNT - 1e-6);
}

#[test]
fn refocus_after_dolly_in_leaves_camera_in_place() {
    let mut scene = EmotionScene::with_defaults();
    scene.focus_node(1);
    settle(&mut scene);
    for _ in 0..40 {
        scene.dolly(0.8);
    }
    scene.orbit_drag(-60.0, 0.0, 800.0);
    scene.tick(DT);
    let before = scene.controls().position;

    scene.focus_node(2);
    settle(&mut scene);
    let target = scene.world_position(2).unwrap();
    assert!((scene.controls().target - target).length() < EPS);
    assert!((scene.controls().position - before).length() < 1e-4);
}
