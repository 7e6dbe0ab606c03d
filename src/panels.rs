//! Info and node panels as plain DOM, driven by `ViewState`.

use crate::constants::*;
use crate::dom;
use chromatone_core::panels::{self, NodeInfo};
use chromatone_core::ViewState;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fill the static explanatory text once.
pub fn render_info_content(document: &web::Document) -> anyhow::Result<()> {
    let content = document
        .get_element_by_id(INFO_CONTENT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{INFO_CONTENT_ID}"))?;
    content.set_inner_html("");
    let append = |tag: &str, class: &str, text: &str| -> anyhow::Result<()> {
        let el = document
            .create_element(tag)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        el.set_class_name(class);
        el.set_text_content(Some(text));
        content
            .append_child(&el)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(())
    };
    append("h2", "info-title", panels::INFO_PANEL_TITLE)?;
    append("p", "info-intro", panels::INFO_PANEL_INTRO)?;
    for s in panels::INFO_PANEL_SECTIONS {
        append("h3", "info-heading", s.heading)?;
        append("p", "info-body", s.body)?;
    }
    append("p", "info-outro", panels::INFO_PANEL_OUTRO)?;
    Ok(())
}

/// Tracks what the DOM currently shows so `sync` only touches changes.
#[derive(Default)]
pub struct PanelSync {
    shown_node: Option<u32>,
    info_open: Option<bool>,
    backdrop: Option<bool>,
}

impl PanelSync {
    pub fn sync(&mut self, document: &web::Document, view: &ViewState) {
        let info_open = view.info_panel_open();
        if self.info_open != Some(info_open) {
            self.info_open = Some(info_open);
            if let Some(panel) = document.get_element_by_id(INFO_PANEL_ID) {
                _ = panel
                    .class_list()
                    .toggle_with_force(EXPANDED_CLASS, info_open);
            }
            dom::set_visible_by_id(document, INFO_CONTENT_ID, info_open);
            dom::set_visible_by_id(document, INFO_CLOSE_ID, info_open);
            dom::set_visible_by_id(document, INFO_TOGGLE_ID, !info_open);
        }

        let selected = view.selected();
        if self.shown_node != selected {
            self.shown_node = selected;
            match view.selected_node(&chromatone_core::EMOTIONS) {
                Some(node) => {
                    let info = NodeInfo::from_node(node);
                    if let Err(e) = fill_node_panel(document, &info) {
                        log::warn!("[panel] {e}");
                    }
                    dom::set_visible_by_id(document, NODE_PANEL_ID, true);
                    log::info!("[panel] showing {}", info.title);
                }
                None => dom::set_visible_by_id(document, NODE_PANEL_ID, false),
            }
        }

        let backdrop = view.backdrop_visible();
        if self.backdrop != Some(backdrop) {
            self.backdrop = Some(backdrop);
            dom::set_visible_by_id(document, BACKDROP_ID, backdrop);
        }
    }
}

fn fill_node_panel(document: &web::Document, info: &NodeInfo) -> anyhow::Result<()> {
    dom::set_text(document, "node-title", &info.title);
    dom::set_text(document, "node-description", &info.description);
    dom::set_text(document, "node-note", &info.note);
    dom::set_text(document, "node-frequency", &info.frequency);
    dom::set_text(document, "node-bpm", &info.bpm);
    dom::set_text(document, "node-angle", &info.angle);
    dom::set_text(document, "node-color-name", info.color_name);
    dom::set_text(document, "node-color-hex", &info.color_hex);

    let swatch = document
        .get_element_by_id("node-color-swatch")
        .ok_or_else(|| anyhow::anyhow!("missing #node-color-swatch"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    swatch
        .style()
        .set_property("background-color", &info.color_hex)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    match &info.radius_scale {
        Some(r) => {
            dom::set_text(document, "node-radius-scale", r);
            dom::set_visible_by_id(document, "node-radius-row", true);
        }
        None => dom::set_visible_by_id(document, "node-radius-row", false),
    }
    Ok(())
}
