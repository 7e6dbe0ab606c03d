//! Input handling and view bookkeeping for the desktop window.

use chromatone_core::input::{wheel_dolly_scale, KeyCommand, PointerGesture};
use chromatone_core::panels::{self, NodeInfo};
use chromatone_core::{EmotionScene, SceneCommand, ViewState, EMOTIONS};
use glam::Vec2;

pub struct App {
    pub scene: EmotionScene,
    pub view: ViewState,
    gesture: PointerGesture,
    width: f32,
    height: f32,
}

impl App {
    pub fn new(scene: EmotionScene, width: u32, height: u32) -> Self {
        Self {
            scene,
            view: ViewState::new(),
            gesture: PointerGesture::default(),
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    fn pick(&self, at: Vec2) -> Option<u32> {
        let camera = self.scene.camera(self.aspect());
        self.scene.pick(&camera, at.x, at.y, self.width, self.height)
    }

    fn apply(&mut self, cmd: SceneCommand) {
        match cmd {
            SceneCommand::Focus(id) => {
                self.scene.focus_node(id);
            }
            SceneCommand::Reset => self.scene.request_reset(),
        }
    }

    pub fn pointer_moved(&mut self, at: Vec2) {
        match self.gesture.move_to(at) {
            Some(delta) => self.scene.orbit_drag(delta.x, delta.y, self.height),
            None => {
                let hit = self.pick(at);
                self.scene.set_hovered(hit);
            }
        }
    }

    pub fn pointer_pressed(&mut self) {
        let at = self.gesture.position();
        self.gesture.press(at);
    }

    pub fn pointer_released(&mut self) {
        if !self.gesture.release() {
            return;
        }
        // an open panel puts a backdrop over the scene
        if self.view.backdrop_clicked() {
            log::info!("[click] backdrop");
            return;
        }
        if let Some(id) = self.pick(self.gesture.position()) {
            let cmd = self.view.select_node(id);
            self.apply(cmd);
            self.log_node_panel();
        }
    }

    pub fn wheel(&mut self, lines: f32) {
        self.scene.dolly(wheel_dolly_scale(lines));
    }

    pub fn key(&mut self, name: &str) {
        match KeyCommand::from_key(name) {
            Some(KeyCommand::ResetCamera) => {
                let cmd = self.view.reset_clicked();
                self.apply(cmd);
            }
            Some(KeyCommand::ToggleInfo) => {
                self.view.toggle_info_panel();
                if self.view.info_panel_open() {
                    log_info_panel();
                }
            }
            Some(KeyCommand::Dismiss) => {
                self.view.backdrop_clicked();
            }
            None => {}
        }
    }

    pub fn title(&self) -> String {
        match self.view.selected_node(&EMOTIONS) {
            Some(n) => format!("{} - {} ({}, {} BPM)", panels::APP_TITLE, n.label, n.note, n.bpm),
            None => format!("{} - {}", panels::APP_TITLE, panels::APP_SUBTITLE),
        }
    }

    fn log_node_panel(&self) {
        let Some(node) = self.view.selected_node(&EMOTIONS) else {
            return;
        };
        let info = NodeInfo::from_node(node);
        log::info!("[panel] {}: {}", info.title, info.description);
        for (label, value) in info.rows() {
            log::info!("[panel]   {label:<12} {value}");
        }
    }
}

fn log_info_panel() {
    log::info!("[panel] {}", panels::INFO_PANEL_TITLE);
    log::info!("[panel] {}", panels::INFO_PANEL_INTRO);
    for s in panels::INFO_PANEL_SECTIONS {
        log::info!("[panel] {}: {}", s.heading, s.body);
    }
    log::info!("[panel] {}", panels::INFO_PANEL_OUTRO);
}
