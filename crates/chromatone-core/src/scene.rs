//! Scene composition: static layout built once from the dataset, plus the
//! per-frame state (camera animation, hover, pulses, decoration).

use crate::animator::{AnimationMode, AnimatorParams, CameraAnimator};
use crate::backdrop::{Backdrop, ShipPose};
use crate::color;
use crate::constants::*;
use crate::controls::OrbitControls;
use crate::curve::{self, GridLine, Segment, Triad};
use crate::dataset::{EmotionNode, EMOTIONS};
use crate::mapper;
use crate::picking;
use crate::state::Camera;
use fnv::FnvHashMap;
use glam::{Quat, Vec3};
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::{Rc, Weak};

const FALLBACK_RGB: [f32; 3] = [0.5, 0.5, 0.5];

#[derive(Clone, Copy, Debug)]
pub struct SceneParams {
    /// Radians per second of slow whole-scene rotation; 0 disables it.
    pub scene_rotation_speed: f32,
    pub pulse_amount: f32,
    pub spin_per_beat: f32,
    pub backdrop_seed: u64,
    pub animator: AnimatorParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            scene_rotation_speed: 0.0,
            pulse_amount: PULSE_AMOUNT,
            spin_per_beat: SPIN_PER_BEAT,
            backdrop_seed: BACKDROP_SEED,
            animator: AnimatorParams::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub point_position: Vec3,
    pub point_intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub near: f32,
    pub far: f32,
}

/// Linear-light color plus opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: [f32; 3],
    pub opacity: f32,
}

impl LineStyle {
    fn from_hex((hex, opacity): (&str, f32)) -> Self {
        Self {
            color: linear_or_fallback(hex),
            opacity,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LaidOutNode {
    pub node: EmotionNode,
    pub position: Vec3,
    pub base_scale: f32,
    pub radius: f32,
    pub label_height: f32,
    /// Linear-light color.
    pub color: [f32; 3],
}

/// Derived geometry, computed once per dataset.
#[derive(Clone, Debug)]
pub struct SceneLayout {
    pub nodes: Vec<LaidOutNode>,
    pub ring: Vec<Vec3>,
    pub triad: Option<Triad>,
    pub drop_lines: Vec<Segment>,
    pub grid: Vec<GridLine>,
    pub lighting: Lighting,
    pub background: [f32; 3],
    pub fog: Fog,
    pub ring_style: LineStyle,
    pub triad_style: LineStyle,
    pub drop_style: LineStyle,
    pub grid_center_color: [f32; 3],
    pub grid_color: [f32; 3],
    index: FnvHashMap<u32, usize>,
}

impl SceneLayout {
    pub fn build(nodes: &[EmotionNode]) -> Self {
        let laid_out: Vec<LaidOutNode> = nodes
            .iter()
            .map(|n| {
                let position = mapper::node_position(n);
                LaidOutNode {
                    node: *n,
                    position,
                    base_scale: mapper::scale_from_hz(n.hz),
                    radius: mapper::node_radius(n.hz),
                    label_height: mapper::label_height(n.hz),
                    color: linear_or_fallback(n.color_hex),
                }
            })
            .collect();
        let index = laid_out
            .iter()
            .enumerate()
            .map(|(i, n)| (n.node.id, i))
            .collect();
        let triad = curve::triad_for(nodes);
        if triad.is_none() {
            log::warn!("[scene] triad nodes {:?} not all present; triad omitted", TRIAD_IDS);
        }
        let background = linear_or_fallback(BACKGROUND_HEX);
        Self {
            ring: curve::build_ring(nodes),
            triad,
            drop_lines: laid_out.iter().map(|n| curve::drop_line(n.position)).collect(),
            grid: curve::build_grid(GRID_SIZE, GRID_DIVISIONS),
            nodes: laid_out,
            lighting: Lighting {
                ambient: AMBIENT_INTENSITY,
                point_position: POINT_LIGHT_POSITION,
                point_intensity: POINT_LIGHT_INTENSITY,
            },
            background,
            fog: Fog {
                color: background,
                near: FOG_NEAR,
                far: FOG_FAR,
            },
            ring_style: LineStyle::from_hex(RING_LINE_STYLE),
            triad_style: LineStyle::from_hex(TRIAD_LINE_STYLE),
            drop_style: LineStyle::from_hex(DROP_LINE_STYLE),
            grid_center_color: linear_or_fallback(GRID_CENTER_HEX),
            grid_color: linear_or_fallback(GRID_LINE_HEX),
            index,
        }
    }

    pub fn node(&self, id: u32) -> Option<&LaidOutNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }
}

fn linear_or_fallback(hex: &str) -> [f32; 3] {
    color::hex_to_linear(hex).unwrap_or_else(|e| {
        log::warn!("[scene] {e}; using gray");
        FALLBACK_RGB
    })
}

/// Scale oscillation at the node's tempo: one pulse per beat.
#[inline]
pub fn pulse_scale(base_scale: f32, bpm: f32, elapsed: f32, amount: f32) -> f32 {
    let speed = bpm / 60.0 * std::f32::consts::TAU;
    base_scale + (elapsed * speed).sin() * amount * base_scale
}

/// Self rotation angle; faster tempos spin faster.
#[inline]
pub fn spin_angle(bpm: f32, elapsed: f32, per_beat: f32) -> f32 {
    elapsed * bpm / 60.0 * per_beat
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeVisual {
    pub id: u32,
    pub position: Vec3,
    pub scale: f32,
    pub radius: f32,
    pub spin: f32,
    pub emissive: f32,
    pub color: [f32; 3],
    pub hovered: bool,
    pub focused: bool,
    pub label_anchor: Vec3,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct SceneFrame {
    pub elapsed: f32,
    pub rotation: Quat,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub mode: AnimationMode,
    pub nodes: Vec<NodeVisual>,
    pub ship: ShipPose,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum SceneEvent {
    Focus(u32),
    ClearFocus,
    Reset,
}

/// Explicit reset trigger handed to whatever UI owns the reset button.
///
/// Each `trigger` bumps a counter the scene compares against the last value
/// it acted on, so a reset fires once per trigger no matter how often the
/// scene looks. Once the scene is unmounted the handle is detached.
#[derive(Clone, Debug)]
pub struct ResetHandle {
    counter: Weak<Cell<u64>>,
}

impl ResetHandle {
    /// Returns `false` when the scene behind the handle is gone.
    pub fn trigger(&self) -> bool {
        match self.counter.upgrade() {
            Some(c) => {
                c.set(c.get().wrapping_add(1));
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.counter.strong_count() > 0
    }
}

pub struct EmotionScene {
    layout: SceneLayout,
    backdrop: Backdrop,
    params: SceneParams,
    animator: CameraAnimator,
    controls: OrbitControls,
    events: SmallVec<[SceneEvent; 4]>,
    reset_counter: Rc<Cell<u64>>,
    reset_seen: u64,
    reset_prop_seen: Option<u64>,
    hovered: Option<u32>,
    focused: Option<u32>,
    elapsed: f32,
    mounted: bool,
}

impl EmotionScene {
    pub fn new(nodes: &[EmotionNode], params: SceneParams) -> Self {
        let layout = SceneLayout::build(nodes);
        let animator = CameraAnimator::new(params.animator);
        let controls = OrbitControls::new(params.animator.home_position, params.animator.home_target);
        log::info!(
            "[scene] mounted: nodes={} ring_points={} triad={}",
            layout.nodes.len(),
            layout.ring.len(),
            layout.triad.is_some()
        );
        Self {
            layout,
            backdrop: Backdrop::generate(params.backdrop_seed),
            params,
            animator,
            controls,
            events: SmallVec::new(),
            reset_counter: Rc::new(Cell::new(0)),
            reset_seen: 0,
            reset_prop_seen: None,
            hovered: None,
            focused: None,
            elapsed: 0.0,
            mounted: true,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&EMOTIONS, SceneParams::default())
    }

    #[inline]
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    #[inline]
    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    #[inline]
    pub fn animator(&self) -> &CameraAnimator {
        &self.animator
    }

    #[inline]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn hovered(&self) -> Option<u32> {
        self.hovered
    }

    #[inline]
    pub fn focused(&self) -> Option<u32> {
        self.focused
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn reset_handle(&self) -> ResetHandle {
        ResetHandle {
            counter: Rc::downgrade(&self.reset_counter),
        }
    }

    /// Current slow rotation of the whole scene.
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.elapsed * self.params.scene_rotation_speed)
    }

    /// World position of a node including the scene rotation.
    pub fn world_position(&self, id: u32) -> Option<Vec3> {
        self.layout.node(id).map(|n| self.rotation() * n.position)
    }

    /// Queue a focus on node `id`. Unknown ids are ignored (returns `false`).
    pub fn focus_node(&mut self, id: u32) -> bool {
        if !self.mounted || self.layout.node(id).is_none() {
            log::debug!("[scene] focus on unknown node {id} ignored");
            return false;
        }
        self.events.push(SceneEvent::Focus(id));
        true
    }

    pub fn clear_focus(&mut self) {
        if self.mounted {
            self.events.push(SceneEvent::ClearFocus);
        }
    }

    pub fn request_reset(&mut self) {
        if self.mounted {
            self.events.push(SceneEvent::Reset);
        }
    }

    /// Edge-triggered reset from an externally owned counter: a reset is
    /// queued only when `value` differs from the last value observed. The
    /// first observation only records the baseline.
    pub fn observe_reset_counter(&mut self, value: u64) {
        match self.reset_prop_seen.replace(value) {
            Some(prev) if prev != value => self.request_reset(),
            _ => {}
        }
    }

    pub fn set_hovered(&mut self, id: Option<u32>) {
        self.hovered = id.filter(|id| self.layout.node(*id).is_some());
    }

    pub fn orbit_drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        self.controls.rotate_by_drag(dx, dy, viewport_height);
    }

    pub fn dolly(&mut self, scale: f32) {
        self.controls.dolly(scale);
    }

    /// Advance one frame: resolve queued events, then animate the camera.
    pub fn tick(&mut self, dt_sec: f32) {
        if !self.mounted {
            return;
        }
        let counter = self.reset_counter.get();
        if counter != self.reset_seen {
            self.reset_seen = counter;
            self.events.push(SceneEvent::Reset);
        }
        let events = std::mem::take(&mut self.events);
        for ev in events {
            self.resolve(ev);
        }
        self.animator.tick(dt_sec, &mut self.controls);
        self.elapsed += dt_sec.max(0.0);
    }

    fn resolve(&mut self, ev: SceneEvent) {
        match ev {
            SceneEvent::Focus(id) => {
                let Some(target) = self.world_position(id) else {
                    return;
                };
                if self.animator.request_focus(target) {
                    self.focused = Some(id);
                }
            }
            SceneEvent::ClearFocus => {
                if !self.animator.is_resetting() {
                    self.focused = None;
                }
                self.animator.clear_focus();
            }
            SceneEvent::Reset => {
                self.focused = None;
                self.animator.request_reset(&self.controls);
                log::info!("[scene] camera reset");
            }
        }
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::new(self.controls.position, self.controls.target, aspect)
    }

    pub fn compose(&self) -> SceneFrame {
        let rotation = self.rotation();
        let t = self.elapsed;
        let nodes = self
            .layout
            .nodes
            .iter()
            .map(|n| {
                let bpm = n.node.bpm as f32;
                let scale = pulse_scale(n.base_scale, bpm, t, self.params.pulse_amount);
                let hovered = self.hovered == Some(n.node.id);
                let position = rotation * n.position;
                NodeVisual {
                    id: n.node.id,
                    position,
                    scale,
                    radius: SPHERE_BASE_RADIUS * scale,
                    spin: spin_angle(bpm, t, self.params.spin_per_beat),
                    emissive: if hovered { EMISSIVE_HOVERED } else { EMISSIVE_IDLE },
                    color: n.color,
                    hovered,
                    focused: self.focused == Some(n.node.id),
                    label_anchor: position + Vec3::Y * n.label_height,
                }
            })
            .collect();
        SceneFrame {
            elapsed: t,
            rotation,
            camera_position: self.controls.position,
            camera_target: self.controls.target,
            mode: self.animator.mode(),
            nodes,
            ship: self.backdrop.ship_pose(t),
        }
    }

    /// Node under a viewport pixel, if any.
    pub fn pick(&self, camera: &Camera, sx: f32, sy: f32, width: f32, height: f32) -> Option<u32> {
        let (ro, rd) = camera.screen_ray(sx, sy, width, height);
        let rotation = self.rotation();
        picking::pick_nearest(
            ro,
            rd,
            self.layout
                .nodes
                .iter()
                .map(|n| (n.node.id, rotation * n.position, n.radius)),
        )
    }

    /// Tear down: cancel a pending focus and detach every reset handle.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.events.clear();
        self.animator.cancel_pending();
        self.reset_counter = Rc::new(Cell::new(0));
        self.reset_seen = 0;
        log::info!("[scene] unmounted");
    }
}
