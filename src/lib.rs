#![cfg(target_arch = "wasm32")]
use chromatone_core::input::PointerGesture;
use chromatone_core::{dataset, panels as text, EmotionScene, SceneParams, ViewState, EMOTIONS};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod labels;
mod panels;
mod render;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("{} starting", text::APP_TITLE);

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    dataset::validate(&EMOTIONS)?;
    let scene = EmotionScene::new(&EMOTIONS, SceneParams::default());
    let reset = scene.reset_handle();
    let background = scene.layout().background;

    dom::set_text(&document, "app-title", text::APP_TITLE);
    dom::set_text(&document, "app-subtitle", text::APP_SUBTITLE);
    panels::render_info_content(&document)?;
    let labels = match labels::LabelLayer::new(&document, &scene) {
        Ok(l) => Some(l),
        Err(e) => {
            log::warn!("[labels] disabled: {e}");
            None
        }
    };

    let scene = Rc::new(RefCell::new(scene));
    let view = Rc::new(RefCell::new(ViewState::new()));
    let wiring = events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        view: view.clone(),
        reset,
        gesture: Rc::new(RefCell::new(PointerGesture::default())),
    };
    events::wire_overlay_buttons(&document, &wiring);
    events::wire_input_handlers(wiring);

    let gpu = frame::init_gpu(&canvas, background).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        view,
        document,
        canvas,
        gpu,
        labels,
        panels: panels::PanelSync::default(),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
