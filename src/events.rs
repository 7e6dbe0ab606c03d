use crate::constants::*;
use crate::dom;
use crate::input;
use chromatone_core::input::{wheel_dolly_scale, KeyCommand, PointerGesture, WHEEL_PIXELS_PER_LINE};
use chromatone_core::{EmotionScene, ResetHandle, SceneCommand, ViewState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<EmotionScene>>,
    pub view: Rc<RefCell<ViewState>>,
    pub reset: ResetHandle,
    pub gesture: Rc<RefCell<PointerGesture>>,
}

impl InputWiring {
    fn apply(&self, cmd: SceneCommand) {
        match cmd {
            SceneCommand::Focus(id) => {
                self.scene.borrow_mut().focus_node(id);
            }
            SceneCommand::Reset => {
                if !self.reset.trigger() {
                    log::warn!("[scene] reset ignored: scene unmounted");
                }
            }
        }
    }

    fn pointer_point(&self, ev: &web::MouseEvent) -> glam::Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        input::canvas_point(
            ev.client_x() as f32,
            ev.client_y() as f32,
            rect.left() as f32,
            rect.top() as f32,
        )
    }

    fn pick(&self, at: glam::Vec2) -> Option<u32> {
        let rect = self.canvas.get_bounding_client_rect();
        let (w, h) = (rect.width().max(1.0) as f32, rect.height().max(1.0) as f32);
        let scene = self.scene.borrow();
        let camera = scene.camera(w / h);
        scene.pick(&camera, at.x, at.y, w, h)
    }

    fn on_pointer_move(&self, ev: &web::PointerEvent) {
        let at = self.pointer_point(ev);
        let delta = self.gesture.borrow_mut().move_to(at);
        match delta {
            Some(d) => {
                let h = self.canvas.get_bounding_client_rect().height() as f32;
                self.scene.borrow_mut().orbit_drag(d.x, d.y, h);
            }
            None => {
                let hit = self.pick(at);
                self.scene.borrow_mut().set_hovered(hit);
                let cursor = if hit.is_some() { "pointer" } else { "grab" };
                _ = self.canvas.style().set_property("cursor", cursor);
            }
        }
    }

    fn on_pointer_down(&self, ev: &web::PointerEvent) {
        if ev.button() != 0 {
            return;
        }
        let at = self.pointer_point(ev);
        self.gesture.borrow_mut().press(at);
        _ = self.canvas.set_pointer_capture(ev.pointer_id());
    }

    fn on_pointer_up(&self, ev: &web::PointerEvent) {
        let at = self.pointer_point(ev);
        _ = self.canvas.release_pointer_capture(ev.pointer_id());
        if !self.gesture.borrow_mut().release() {
            return;
        }
        if let Some(id) = self.pick(at) {
            let cmd = self.view.borrow_mut().select_node(id);
            self.apply(cmd);
        }
    }

    fn on_wheel(&self, ev: &web::WheelEvent) {
        ev.prevent_default();
        let lines = input::wheel_lines(ev.delta_y(), ev.delta_mode(), WHEEL_PIXELS_PER_LINE);
        self.scene.borrow_mut().dolly(wheel_dolly_scale(lines));
    }

    fn on_key(&self, ev: &web::KeyboardEvent) {
        match KeyCommand::from_key(&ev.key()) {
            Some(KeyCommand::ResetCamera) => {
                let cmd = self.view.borrow_mut().reset_clicked();
                self.apply(cmd);
            }
            Some(KeyCommand::ToggleInfo) => self.view.borrow_mut().toggle_info_panel(),
            Some(KeyCommand::Dismiss) => {
                self.view.borrow_mut().backdrop_clicked();
            }
            None => {}
        }
    }
}

fn listen<E, F>(target: &web::EventTarget, name: &str, handler: F)
where
    E: JsCast + 'static,
    F: Fn(&E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(&ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_input_handlers(w: InputWiring) {
    let canvas: &web::EventTarget = w.canvas.as_ref();
    {
        let w = w.clone();
        listen::<web::PointerEvent, _>(canvas, "pointermove", move |ev| w.on_pointer_move(ev));
    }
    {
        let w = w.clone();
        listen::<web::PointerEvent, _>(canvas, "pointerdown", move |ev| w.on_pointer_down(ev));
    }
    {
        let w = w.clone();
        listen::<web::PointerEvent, _>(canvas, "pointerup", move |ev| w.on_pointer_up(ev));
    }
    {
        let w = w.clone();
        listen::<web::PointerEvent, _>(canvas, "pointerleave", move |_| {
            w.scene.borrow_mut().set_hovered(None);
        });
    }
    {
        let w = w.clone();
        listen::<web::WheelEvent, _>(canvas, "wheel", move |ev| w.on_wheel(ev));
    }
    if let Some(window) = web::window() {
        let w = w.clone();
        listen::<web::KeyboardEvent, _>(window.as_ref(), "keydown", move |ev| w.on_key(ev));
    }
}

/// Reset, info and node panel buttons plus the click-catching backdrop.
pub fn wire_overlay_buttons(document: &web::Document, w: &InputWiring) {
    {
        let w = w.clone();
        dom::add_click_listener(document, RESET_BUTTON_ID, move || {
            let cmd = w.view.borrow_mut().reset_clicked();
            w.apply(cmd);
        });
    }
    {
        let view = w.view.clone();
        dom::add_click_listener(document, INFO_TOGGLE_ID, move || {
            view.borrow_mut().set_info_panel_open(true)
        });
    }
    {
        let view = w.view.clone();
        dom::add_click_listener(document, INFO_CLOSE_ID, move || {
            view.borrow_mut().set_info_panel_open(false)
        });
    }
    {
        let view = w.view.clone();
        dom::add_click_listener(document, NODE_CLOSE_ID, move || {
            view.borrow_mut().clear_selection()
        });
    }
    {
        let view = w.view.clone();
        dom::add_click_listener(document, BACKDROP_ID, move || {
            if view.borrow_mut().backdrop_clicked() {
                log::info!("[click] backdrop");
            }
        });
    }
}
