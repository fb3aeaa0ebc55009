use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId};

/// The layer stack plus document-wide state (canvas bounds, selection).
///
/// Exactly one layer is active at any time; the active layer is the target
/// of tool edits and mask-mode switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    layers: Vec<Layer>,
    active: usize,
    canvas: Rect,
    selection: Option<Rect>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new("Background")],
            active: 0,
            canvas: Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0)),
            selection: None,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = layer.id();
        self.layers.push(layer);
        self.active = self.layers.len() - 1;
        id
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn set_active_index(&mut self, index: usize) {
        if index < self.layers.len() {
            self.active = index;
        }
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layers.get(self.active)
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layers.get_mut(self.active)
    }

    pub fn find_layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn find_layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn set_canvas(&mut self, rect: Rect) {
        self.canvas = rect;
    }

    pub fn selection(&self) -> Option<Rect> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Rect>) {
        self.selection = selection;
    }
}
