//! Top-level view state: which node is selected and which panels are open.
//!
//! Pure bookkeeping. Front-ends translate the returned [`SceneCommand`]s into
//! calls on the scene so the two never drift apart.

use crate::dataset::{self, EmotionNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneCommand {
    Focus(u32),
    Reset,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    selected: Option<u32>,
    info_panel_open: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn selected_node<'a>(&self, nodes: &'a [EmotionNode]) -> Option<&'a EmotionNode> {
        self.selected.and_then(|id| dataset::find(nodes, id))
    }

    /// Node clicked in the scene.
    pub fn select_node(&mut self, id: u32) -> SceneCommand {
        log::info!("[click] node {id}");
        self.selected = Some(id);
        SceneCommand::Focus(id)
    }

    /// Close the node panel; the camera stays where it is.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[inline]
    pub fn info_panel_open(&self) -> bool {
        self.info_panel_open
    }

    pub fn set_info_panel_open(&mut self, open: bool) {
        if self.info_panel_open != open {
            log::debug!("[panel] info {}", if open { "opened" } else { "closed" });
        }
        self.info_panel_open = open;
    }

    pub fn toggle_info_panel(&mut self) {
        self.set_info_panel_open(!self.info_panel_open);
    }

    /// Reset button: deselect immediately, camera returns home.
    pub fn reset_clicked(&mut self) -> SceneCommand {
        self.selected = None;
        SceneCommand::Reset
    }

    /// The backdrop catches clicks only while a panel is showing.
    #[inline]
    pub fn backdrop_visible(&self) -> bool {
        self.info_panel_open || self.selected.is_some()
    }

    /// Click outside every panel. Returns `true` if it closed anything, in
    /// which case the click must not also reach the scene.
    pub fn backdrop_clicked(&mut self) -> bool {
        if !self.backdrop_visible() {
            return false;
        }
        self.set_info_panel_open(false);
        self.selected = None;
        true
    }
}
