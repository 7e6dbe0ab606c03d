// Camera animator state machine driven against the orbit controls and a bare
// rig without azimuth tracking.

use chromatone_core::animator::{ease_in_out, AnimationMode, AnimatorParams, CameraAnimator};
use chromatone_core::controls::{OrbitControls, OrbitRig};
use chromatone_core::constants::*;
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;
const EPS: f32 = 1e-3;

struct BareRig {
    position: Vec3,
    target: Vec3,
}

impl OrbitRig for BareRig {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn target(&self) -> Vec3 {
        self.target
    }
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }
}

fn run_until_idle<R: OrbitRig>(a: &mut CameraAnimator, rig: &mut R, max_frames: usize) -> usize {
    for frame in 1..=max_frames {
        a.tick(DT, rig);
        if !a.is_animating() && !a.has_pending_focus() {
            return frame;
        }
    }
    panic!("animation did not settle in {max_frames} frames");
}

fn off_home_controls() -> OrbitControls {
    OrbitControls::new(Vec3::new(10.0, 5.0, 3.0), Vec3::new(1.0, 1.0, 1.0))
}

#[test]
fn ease_curve_shape() {
    assert_eq!(ease_in_out(0.0), 0.0);
    assert!((ease_in_out(0.25) - 0.125).abs() < 1e-6);
    assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    assert!((ease_in_out(0.75) - 0.875).abs() < 1e-6);
    assert!((ease_in_out(1.0) - 1.0).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_in_out(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn focus_waits_for_the_delay_then_moves_only_the_target() {
    let mut rig = OrbitControls::default();
    let mut a = CameraAnimator::default();
    let node = Vec3::new(6.0, 10.0, 0.0);

    assert!(a.request_focus(node));
    assert_eq!(a.mode(), AnimationMode::Idle);
    a.tick(FOCUS_DELAY_SEC * 0.5, &mut rig);
    assert_eq!(a.mode(), AnimationMode::Idle);
    assert!(a.has_pending_focus());

    a.tick(FOCUS_DELAY_SEC, &mut rig);
    assert_eq!(a.mode(), AnimationMode::Focusing);

    let position_before = rig.position;
    run_until_idle(&mut a, &mut rig, 120);
    assert!((rig.target - node).length() < EPS);
    assert!((rig.position - position_before).length() < EPS);
    assert_eq!(a.mode(), AnimationMode::Idle);
}

#[test]
fn reset_returns_home_from_anywhere() {
    let mut rig = off_home_controls();
    let mut a = CameraAnimator::default();
    a.request_reset(&rig);
    assert!(a.is_resetting());
    assert_eq!(a.mode(), AnimationMode::Resetting);

    let frames = run_until_idle(&mut a, &mut rig, 120);
    // 1 / 1.5 seconds at 60 fps
    assert!((39..=42).contains(&frames), "took {frames} frames");
    assert!((rig.position - HOME_CAMERA_POSITION).length() < EPS);
    assert!((rig.target - HOME_CAMERA_TARGET).length() < EPS);
    assert!(!a.is_resetting());
}

#[test]
fn reset_eases_through_the_midpoint() {
    let mut rig = BareRig {
        position: Vec3::new(0.0, 0.0, 20.0),
        target: Vec3::new(4.0, 0.0, 0.0),
    };
    let params = AnimatorParams::default();
    let mut a = CameraAnimator::new(params);
    a.request_reset(&rig);
    // half of the 1/1.5 s duration
    a.tick(1.0 / 3.0, &mut rig);
    let expected = Vec3::new(0.0, 0.0, 20.0).lerp(params.home_position, 0.5);
    assert!((rig.position - expected).length() < EPS);
    assert!((rig.target - Vec3::new(2.0, 0.0, 0.0)).length() < EPS);
}

#[test]
fn focus_then_immediate_reset_ends_at_home() {
    let mut rig = off_home_controls();
    let mut a = CameraAnimator::default();
    assert!(a.request_focus(Vec3::new(-6.0, 3.8, 0.0)));
    a.request_reset(&rig);
    assert!(!a.has_pending_focus());

    run_until_idle(&mut a, &mut rig, 120);
    assert!((rig.position - HOME_CAMERA_POSITION).length() < EPS);
    assert!((rig.target - HOME_CAMERA_TARGET).length() < EPS);
    // the cancelled focus never fires afterwards
    for _ in 0..30 {
        a.tick(DT, &mut rig);
    }
    assert!((rig.target - HOME_CAMERA_TARGET).length() < EPS);
}

#[test]
fn second_rapid_focus_wins() {
    let mut rig = OrbitControls::default();
    let mut a = CameraAnimator::default();
    let first = Vec3::new(6.0, 10.0, 0.0);
    let second = Vec3::new(-3.0, 0.0, 5.2);

    a.request_focus(first);
    a.tick(FOCUS_DELAY_SEC * 0.5, &mut rig);
    a.request_focus(second);
    a.tick(FOCUS_DELAY_SEC * 0.6, &mut rig);
    // the superseding request restarted the delay
    assert_eq!(a.mode(), AnimationMode::Idle);

    a.tick(FOCUS_DELAY_SEC, &mut rig);
    assert_eq!(a.mode(), AnimationMode::Focusing);
    assert_eq!(a.state().start_target, HOME_CAMERA_TARGET);
    assert_eq!(a.state().end_target, second);

    run_until_idle(&mut a, &mut rig, 120);
    assert!((rig.target - second).length() < EPS);
}

#[test]
fn refocus_mid_flight_starts_from_current_target() {
    let mut rig = OrbitControls::default();
    let mut a = CameraAnimator::default();
    a.request_focus(Vec3::new(6.0, 0.0, 0.0));
    for _ in 0..15 {
        a.tick(DT, &mut rig);
    }
    assert_eq!(a.mode(), AnimationMode::Focusing);
    let mid = rig.target;
    a.request_focus(Vec3::new(0.0, 0.0, 6.0));
    assert_eq!(a.mode(), AnimationMode::Idle);
    a.tick(DT, &mut rig);
    assert_eq!(a.state().start_target, mid);
}

#[test]
fn reset_request_is_idempotent_without_ticks() {
    let rig = off_home_controls();
    let mut a = CameraAnimator::default();
    a.request_reset(&rig);
    let once = a.state().clone();
    a.request_reset(&rig);
    assert_eq!(a.state(), &once);
}

#[test]
fn focus_is_dropped_while_resetting() {
    let mut rig = off_home_controls();
    let mut a = CameraAnimator::default();
    a.request_reset(&rig);
    // guard holds before the first tick too
    assert!(!a.request_focus(Vec3::X));
    a.tick(DT, &mut rig);
    assert!(!a.request_focus(Vec3::X));
    assert!(!a.has_pending_focus());
    assert_eq!(a.mode(), AnimationMode::Resetting);

    run_until_idle(&mut a, &mut rig, 120);
    assert!(a.request_focus(Vec3::X));
}

#[test]
fn reset_overrides_running_focus() {
    let mut rig = OrbitControls::default();
    let mut a = CameraAnimator::default();
    a.request_focus(Vec3::new(6.0, 10.0, 0.0));
    for _ in 0..10 {
        a.tick(DT, &mut rig);
    }
    assert_eq!(a.mode(), AnimationMode::Focusing);
    let snapshot = rig.target;
    a.request_reset(&rig);
    assert_eq!(a.mode(), AnimationMode::Resetting);
    assert_eq!(a.state().start_target, snapshot);
    run_until_idle(&mut a, &mut rig, 120);
    assert!((rig.target - HOME_CAMERA_TARGET).length() < EPS);
}

#[test]
fn rig_without_azimuth_still_resets() {
    let mut rig = BareRig {
        position: Vec3::new(-5.0, 2.0, -5.0),
        target: Vec3::new(0.0, 1.0, 0.0),
    };
    let mut a = CameraAnimator::default();
    a.request_reset(&rig);
    assert_eq!(a.state().start_azimuth, None);
    run_until_idle(&mut a, &mut rig, 120);
    assert!((rig.position - HOME_CAMERA_POSITION).length() < EPS);
}

#[test]
fn clear_focus_cancels_pending_and_stops_in_place() {
    let mut rig = OrbitControls::default();
    let mut a = CameraAnimator::default();
    a.request_focus(Vec3::new(6.0, 0.0, 0.0));
    a.clear_focus();
    assert!(!a.has_pending_focus());
    for _ in 0..5 {
        a.tick(DT, &mut rig);
    }
    assert_eq!(rig.target, HOME_CAMERA_TARGET);

    a.request_focus(Vec3::new(6.0, 0.0, 0.0));
    for _ in 0..10 {
        a.tick(DT, &mut rig);
    }
    let stopped = rig.target;
    a.clear_focus();
    a.tick(DT, &mut rig);
    assert_eq!(a.mode(), AnimationMode::Idle);
    assert!((rig.target - stopped).length() < 1e-6);
}

#[test]
fn idle_ticks_follow_user_orbit() {
    let mut rig = OrbitControls::default();
    let mut a = CameraAnimator::default();
    rig.rotate(0.5, 0.0);
    a.tick(DT, &mut rig);
    assert_eq!(a.state().position, rig.position);
}

#[test]
fn focus_near_the_camera_keeps_position() {
    let mut rig = OrbitControls::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
    let mut a = CameraAnimator::default();
    let start = rig.position;
    // ends well inside the dolly limit
    let node = Vec3::new(0.0, 0.5, 4.0);
    assert!((node - start).length() < ORBIT_MIN_DISTANCE);

    assert!(a.request_focus(node));
    for _ in 0..120 {
        a.tick(DT, &mut rig);
    }
    assert_eq!(a.mode(), AnimationMode::Idle);
    assert!((rig.target - node).length() < EPS);
    assert!((rig.position - start).length() < 1e-5, "moved to {:?}", rig.position);
}

#[test]
fn dolly_still_respects_the_distance_limit() {
    let mut rig = OrbitControls::default();
    for _ in 0..200 {
        rig.dolly(0.5);
    }
    assert!((rig.distance() - ORBIT_MIN_DISTANCE).abs() < 1e-4);
}
