use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::mask_view_mode::MaskViewMode;

pub const MIN_ZOOM: f32 = 0.125;
pub const MAX_ZOOM: f32 = 32.0;

/// The on-screen presentation of a document: pan/zoom and the current
/// mask view mode.
///
/// Mock views stand in for a real canvas in headless tests; interactive
/// side effects (active-tool reconfiguration) are skipped for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pan: Vec2,
    zoom: f32,
    mask_view_mode: MaskViewMode,
    #[serde(skip)]
    mock: bool,
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            mask_view_mode: MaskViewMode::Normal,
            mock: false,
        }
    }

    pub fn new_mock() -> Self {
        Self {
            mock: true,
            ..Self::new()
        }
    }

    pub fn is_mock(&self) -> bool {
        self.mock
    }

    pub fn mask_view_mode(&self) -> MaskViewMode {
        self.mask_view_mode
    }

    /// Installs `mode` and reports whether this actually changed the view.
    pub fn set_mask_view_mode(&mut self, mode: MaskViewMode) -> bool {
        let changed = self.mask_view_mode != mode;
        self.mask_view_mode = mode;
        changed
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Zooms by `factor`, keeping the canvas point `anchor` fixed on screen.
    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan += anchor.to_vec2() * (old_zoom - self.zoom);
    }

    pub fn screen_to_canvas(&self, pos: Pos2, canvas_rect: Rect) -> Pos2 {
        (((pos - canvas_rect.min) - self.pan) / self.zoom).to_pos2()
    }

    pub fn canvas_to_screen(&self, pos: Pos2, canvas_rect: Rect) -> Pos2 {
        canvas_rect.min + (pos.to_vec2() * self.zoom + self.pan)
    }
}
