//! Procedural line geometry: the closed ring spline, triad connectors, drop
//! lines and the ground grid.

use crate::constants::*;
use crate::dataset::{self, EmotionNode};
use crate::mapper;
use glam::Vec3;

/// Closed centripetal Catmull-Rom spline through a set of control points.
#[derive(Clone, Debug)]
pub struct ClosedCatmullRom {
    points: Vec<Vec3>,
}

impl ClosedCatmullRom {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Evaluate the curve at `t` in \[0, 1\]; `t = 0` and `t = 1` both land on
    /// the first control point.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let l = self.points.len();
        match l {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }
        let p = l as f32 * t;
        let mut seg = p.floor() as isize;
        let weight = p - seg as f32;
        if seg <= 0 {
            seg += (seg.unsigned_abs() / l + 1) as isize * l as isize;
        }
        let at = |i: isize| self.points[i.rem_euclid(l as isize) as usize];
        let (p0, p1, p2, p3) = (at(seg - 1), at(seg), at(seg + 1), at(seg + 2));

        // centripetal parameterization: knot spacing = |Δp|^0.5
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }
        Vec3::new(
            nonuniform_segment(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2, weight),
            nonuniform_segment(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2, weight),
            nonuniform_segment(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2, weight),
        )
    }

    /// `divisions + 1` evenly parameterized samples, both ends included.
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        if self.points.is_empty() {
            return Vec::new();
        }
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point_at(d as f32 / divisions as f32))
            .collect()
    }
}

// Hermite segment between x1 and x2 with tangents from non-uniform knot spacing.
#[allow(clippy::too_many_arguments)]
#[inline]
fn nonuniform_segment(
    x0: f32,
    x1: f32,
    x2: f32,
    x3: f32,
    dt0: f32,
    dt1: f32,
    dt2: f32,
    t: f32,
) -> f32 {
    let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
    let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;
    let c0 = x1;
    let c1 = t1;
    let c2 = -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2;
    let c3 = 2.0 * x1 - 2.0 * x2 + t1 + t2;
    c0 + t * (c1 + t * (c2 + t * c3))
}

/// Sample the closed ring through every node's world position.
pub fn build_ring(nodes: &[EmotionNode]) -> Vec<Vec3> {
    let points = nodes.iter().map(mapper::node_position).collect();
    ClosedCatmullRom::new(points).sample(RING_SAMPLES)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    #[inline]
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeLabel {
    pub position: Vec3,
    pub text: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Triad {
    pub segments: [Segment; 3],
    pub labels: [EdgeLabel; 3],
}

/// Point on the rendered sphere of a node (center + radius toward `toward`).
#[inline]
pub fn surface_point(center: Vec3, toward: Vec3, hz: f32) -> Vec3 {
    center + (toward - center).normalize_or_zero() * mapper::node_radius(hz)
}

/// Connect three nodes edge to edge: (a, b), (b, c), (c, a). Segment
/// endpoints sit on the sphere surfaces; labels sit on the raw center
/// midpoints.
pub fn build_triad(a: &EmotionNode, b: &EmotionNode, c: &EmotionNode) -> Triad {
    let centers = [
        mapper::node_position(a),
        mapper::node_position(b),
        mapper::node_position(c),
    ];
    let hz = [a.hz, b.hz, c.hz];
    let edge = |i: usize| {
        let j = (i + 1) % 3;
        let segment = Segment::new(
            surface_point(centers[i], centers[j], hz[i]),
            surface_point(centers[j], centers[i], hz[j]),
        );
        let label = EdgeLabel {
            position: (centers[i] + centers[j]) * 0.5,
            text: TRIAD_RATIO_LABELS[i],
        };
        (segment, label)
    };
    let (s0, l0) = edge(0);
    let (s1, l1) = edge(1);
    let (s2, l2) = edge(2);
    Triad {
        segments: [s0, s1, s2],
        labels: [l0, l1, l2],
    }
}

/// Triad over the distinguished ids; `None` when any of them is missing.
pub fn triad_for(nodes: &[EmotionNode]) -> Option<Triad> {
    let [a, b, c] = TRIAD_IDS;
    let a = dataset::find(nodes, a)?;
    let b = dataset::find(nodes, b)?;
    let c = dataset::find(nodes, c)?;
    Some(build_triad(a, b, c))
}

/// Vertical line from a node down to the ground plane.
#[inline]
pub fn drop_line(position: Vec3) -> Segment {
    Segment::new(position, Vec3::new(position.x, 0.0, position.z))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub segment: Segment,
    pub center: bool,
}

/// Square grid on the XZ plane: `divisions + 1` lines per axis, the middle
/// pair flagged as center lines.
pub fn build_grid(size: f32, divisions: usize) -> Vec<GridLine> {
    let divisions = divisions.max(1);
    let half = size / 2.0;
    let step = size / divisions as f32;
    let mut lines = Vec::with_capacity((divisions + 1) * 2);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let center = i == divisions / 2;
        lines.push(GridLine {
            segment: Segment::new(Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k)),
            center,
        });
        lines.push(GridLine {
            segment: Segment::new(Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half)),
            center,
        });
    }
    lines
}
