//! GPU-facing data layout and the CPU packing of a composed frame.
//!
//! Kept free of `wgpu` so the packing can be exercised without a device; the
//! pipelines live in `render` behind the `gpu` feature.

use crate::backdrop::Backdrop;
use crate::color;
use crate::constants::*;
use crate::scene::{LineStyle, SceneFrame, SceneLayout};
use crate::state::Camera;
use glam::{Quat, Vec3};

pub const SHADE_LIT: f32 = 0.0;
pub const SHADE_GLOW: f32 = 1.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub camera_pos: [f32; 4],
    /// xyz position, w intensity
    pub light: [f32; 4],
    /// ambient, fog near, fog far, elapsed seconds
    pub ambient_fog: [f32; 4],
    pub background: [f32; 4],
    /// x: 1.0 when the target needs manual sRGB encoding
    pub flags: [f32; 4],
}

impl Globals {
    pub fn new(camera: &Camera, layout: &SceneLayout, elapsed: f32, encode_srgb: bool) -> Self {
        let (right, up, _) = camera.basis();
        let l = &layout.lighting;
        let bg = layout.background;
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            light: l.point_position.extend(l.point_intensity).to_array(),
            ambient_fog: [l.ambient, layout.fog.near, layout.fog.far, elapsed],
            background: [bg[0], bg[1], bg[2], 1.0],
            flags: [if encode_srgb { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// One billboarded sphere impostor.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
    /// emissive, spin angle, shade mode, unused
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    fn new(p: Vec3, rgb: [f32; 3], alpha: f32) -> Self {
        Self {
            position: p.to_array(),
            color: [rgb[0], rgb[1], rgb[2], alpha],
        }
    }
}

fn push_segment(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, style: LineStyle) {
    out.push(LineVertex::new(a, style.color, style.opacity));
    out.push(LineVertex::new(b, style.color, style.opacity));
}

/// Line-list vertices for grid, drop lines, ring and triad. Everything but
/// the grid follows the scene rotation.
pub fn build_line_vertices(layout: &SceneLayout, rotation: Quat, out: &mut Vec<LineVertex>) {
    out.clear();
    for g in &layout.grid {
        let rgb = if g.center {
            layout.grid_center_color
        } else {
            layout.grid_color
        };
        out.push(LineVertex::new(g.segment.start, rgb, 1.0));
        out.push(LineVertex::new(g.segment.end, rgb, 1.0));
    }
    for d in &layout.drop_lines {
        push_segment(out, rotation * d.start, rotation * d.end, layout.drop_style);
    }
    for w in layout.ring.windows(2) {
        push_segment(out, rotation * w[0], rotation * w[1], layout.ring_style);
    }
    if let Some(triad) = &layout.triad {
        for s in &triad.segments {
            push_segment(out, rotation * s.start, rotation * s.end, layout.triad_style);
        }
    }
}

fn rgba(hex: &str, alpha: f32) -> [f32; 4] {
    let [r, g, b] = color::hex_to_linear(hex).unwrap_or([0.5, 0.5, 0.5]);
    [r, g, b, alpha]
}

/// Sphere instances for stars, sparkles, emotion nodes and the spaceship,
/// sorted back to front for alpha blending.
pub fn build_sphere_instances(
    frame: &SceneFrame,
    backdrop: &Backdrop,
    camera: &Camera,
    out: &mut Vec<SphereInstance>,
) {
    out.clear();
    for s in &backdrop.stars {
        out.push(SphereInstance {
            center: s.position.to_array(),
            radius: s.size,
            color: [s.brightness, s.brightness, s.brightness, 1.0],
            params: [1.0, 0.0, SHADE_GLOW, 0.0],
        });
    }
    for sp in &backdrop.sparkles {
        out.push(SphereInstance {
            center: backdrop.sparkle_position(sp, frame.elapsed).to_array(),
            radius: sp.size,
            color: [1.0, 1.0, 1.0, backdrop.sparkle_opacity(sp, frame.elapsed)],
            params: [1.0, 0.0, SHADE_GLOW, 0.0],
        });
    }
    for n in &frame.nodes {
        out.push(SphereInstance {
            center: n.position.to_array(),
            radius: n.radius,
            color: [n.color[0], n.color[1], n.color[2], 1.0],
            params: [n.emissive, n.spin, SHADE_LIT, 0.0],
        });
    }
    push_ship(frame, out);

    out.sort_by(|a, b| {
        let da = camera.view_depth(Vec3::from(a.center));
        let db = camera.view_depth(Vec3::from(b.center));
        db.total_cmp(&da)
    });
}

fn push_ship(frame: &SceneFrame, out: &mut Vec<SphereInstance>) {
    let ship = &frame.ship;
    let fwd = ship.forward;
    let up = ship.up();
    let side = fwd.cross(up).normalize_or_zero();
    let hull = rgba(SHIP_HULL_HEX, 1.0);
    let lit = [0.0, 0.0, SHADE_LIT, 0.0];

    // capsule hull as three overlapping spheres
    let half = SHIP_HULL_LENGTH * 0.35;
    for k in [-1.0, 0.0, 1.0] {
        out.push(SphereInstance {
            center: (ship.position + fwd * half * k).to_array(),
            radius: SHIP_HULL_RADIUS,
            color: hull,
            params: lit,
        });
    }
    let wing = rgba(SHIP_WING_HEX, 1.0);
    for k in [-1.0, 1.0] {
        out.push(SphereInstance {
            center: (ship.position + side * SHIP_WING_SPAN * k).to_array(),
            radius: SHIP_HULL_RADIUS * 0.75,
            color: wing,
            params: lit,
        });
    }
    let engine_len = SHIP_HULL_LENGTH * 0.5 + 0.2 * ship.engine_pulse;
    out.push(SphereInstance {
        center: (ship.position - fwd * engine_len).to_array(),
        radius: SHIP_ENGINE_RADIUS * ship.engine_pulse,
        color: rgba(SHIP_ENGINE_HEX, 0.8),
        params: [1.0, 0.0, SHADE_GLOW, 0.0],
    });
    out.push(SphereInstance {
        center: (ship.position + up * 0.2 + fwd * 0.3).to_array(),
        radius: SHIP_COCKPIT_RADIUS,
        color: rgba(SHIP_COCKPIT_HEX, 1.0),
        params: [1.0, 0.0, SHADE_GLOW, 0.0],
    });
}
