//! HTML billboard labels for nodes and triad ratios, re-projected each frame.

use crate::constants::*;
use crate::dom;
use crate::input;
use chromatone_core::panels::label_lines;
use chromatone_core::{Camera, EmotionScene, SceneFrame};
use glam::Vec3;
use web_sys as web;

struct NodeLabel {
    id: u32,
    root: web::HtmlElement,
    description: web::HtmlElement,
    hovered: bool,
}

pub struct LabelLayer {
    nodes: Vec<NodeLabel>,
    ratios: Vec<(Vec3, web::HtmlElement)>,
}

fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

impl LabelLayer {
    pub fn new(document: &web::Document, scene: &EmotionScene) -> anyhow::Result<Self> {
        let layer = document
            .get_element_by_id(LABEL_LAYER_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{LABEL_LAYER_ID}"))?;
        layer.set_inner_html("");

        let mut nodes = Vec::with_capacity(scene.layout().nodes.len());
        for n in &scene.layout().nodes {
            let root = dom::create_div(document, NODE_LABEL_CLASS)?;
            let lines = label_lines(&n.node, true);
            let mut description = None;
            for (i, line) in lines.iter().enumerate() {
                let el = dom::create_div(document, if i == 0 { "label-title" } else { "label-line" })?;
                el.set_text_content(Some(line.as_str()));
                append(&root, &el)?;
                if i == lines.len() - 1 {
                    description = Some(el);
                }
            }
            let description =
                description.ok_or_else(|| anyhow::anyhow!("label for {} has no lines", n.node.id))?;
            dom::set_visible(&description, false);
            append(&layer, &root)?;
            nodes.push(NodeLabel {
                id: n.node.id,
                root,
                description,
                hovered: false,
            });
        }

        let mut ratios = Vec::new();
        if let Some(triad) = &scene.layout().triad {
            for l in &triad.labels {
                let el = dom::create_div(document, RATIO_LABEL_CLASS)?;
                el.set_text_content(Some(l.text));
                append(&layer, &el)?;
                ratios.push((l.position, el));
            }
        }
        Ok(Self { nodes, ratios })
    }

    /// Project every label with the current camera; `css_w`/`css_h` are the
    /// canvas size in CSS pixels.
    pub fn update(&mut self, frame: &SceneFrame, camera: &Camera, css_w: f32, css_h: f32) {
        for (label, visual) in self.nodes.iter_mut().zip(&frame.nodes) {
            debug_assert_eq!(label.id, visual.id);
            place(&label.root, camera, visual.label_anchor, css_w, css_h);
            if label.hovered != visual.hovered {
                label.hovered = visual.hovered;
                dom::set_visible(&label.description, visual.hovered);
            }
        }
        for (position, el) in &self.ratios {
            place(el, camera, frame.rotation * *position, css_w, css_h);
        }
    }
}

fn place(el: &web::HtmlElement, camera: &Camera, world: Vec3, css_w: f32, css_h: f32) {
    let style = el.style();
    match camera.project(world, css_w, css_h) {
        Some(at) => {
            let opacity =
                input::label_opacity(camera.view_depth(world), LABEL_FADE_START, LABEL_FADE_END);
            _ = style.set_property("transform", &input::label_transform(at));
            _ = style.set_property("opacity", &format!("{opacity:.2}"));
        }
        None => {
            _ = style.set_property("opacity", "0");
        }
    }
}

