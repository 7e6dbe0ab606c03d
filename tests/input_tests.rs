// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn canvas_point_is_relative_to_rect() {
    let p = canvas_point(110.0, 60.0, 100.0, 50.0);
    assert_eq!(p, Vec2::new(10.0, 10.0));
}

#[test]
fn backing_size_scales_by_dpr_and_never_zero() {
    assert_eq!(backing_size(800.0, 600.0, 2.0), (1600, 1200));
    assert_eq!(backing_size(333.3, 100.0, 1.5), (500, 150));
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
}

#[test]
fn label_transform_anchors_bottom_center() {
    let css = label_transform(Vec2::new(12.0, 34.5));
    assert!(css.starts_with("translate(12.0px, 34.5px)"));
    assert!(css.ends_with("translate(-50%, -100%)"));
}

#[test]
fn label_opacity_fades_with_depth() {
    assert_eq!(label_opacity(5.0, 20.0, 60.0), 1.0);
    assert!((label_opacity(40.0, 20.0, 60.0) - 0.5).abs() < 1e-6);
    assert_eq!(label_opacity(80.0, 20.0, 60.0), 0.0);
    // behind the camera
    assert_eq!(label_opacity(-1.0, 20.0, 60.0), 0.0);
    // degenerate fade range
    assert_eq!(label_opacity(10.0, 20.0, 20.0), 1.0);
}

#[test]
fn wheel_lines_by_delta_mode() {
    assert!((wheel_lines(100.0, 0, 50.0) - 2.0).abs() < 1e-6);
    assert!((wheel_lines(3.0, 1, 50.0) - 3.0).abs() < 1e-6);
    assert!((wheel_lines(1.0, 2, 50.0) - 10.0).abs() < 1e-6);
    assert!(wheel_lines(-100.0, 0, 50.0) < 0.0);
}
