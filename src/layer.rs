use egui::{Color32, Pos2, TextureHandle, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stroke::Stroke;

/// A unique identifier for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single paint edit stored on a layer or mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaintElement {
    Stroke(Stroke),
    Fill(Fill),
}

/// A fill covering the whole canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid(Color32),
    Linear {
        start: Pos2,
        end: Pos2,
        from: Color32,
        to: Color32,
    },
}

#[derive(Clone, Serialize, Deserialize)]
pub enum LayerContent {
    /// A paintable layer built from accumulated edits.
    Paint(Vec<PaintElement>),
    /// An imported raster image.
    Image {
        #[serde(skip)]
        texture: Option<TextureHandle>,
        size: [usize; 2],
    },
}

// `TextureHandle` has no `Debug` impl, so only the handle's presence is shown.
impl std::fmt::Debug for LayerContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paint(elements) => f.debug_tuple("Paint").field(elements).finish(),
            Self::Image { texture, size } => f
                .debug_struct("Image")
                .field("texture", &texture.is_some())
                .field("size", size)
                .finish(),
        }
    }
}

/// A grayscale mask attached to a layer. Painted with the same element
/// vocabulary as layers; white reveals, black hides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerMask {
    elements: Vec<PaintElement>,
}

impl LayerMask {
    pub fn elements(&self) -> &[PaintElement] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Vec<PaintElement> {
        &mut self.elements
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    id: LayerId,
    pub name: String,
    pub visible: bool,
    pub content: LayerContent,
    /// Translation applied by the move tool.
    pub offset: Vec2,
    mask: Option<LayerMask>,
    /// True while edits on this layer are routed to its mask.
    mask_editing: bool,
}

impl Layer {
    pub fn new(name: &str) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_owned(),
            visible: true,
            content: LayerContent::Paint(Vec::new()),
            offset: Vec2::ZERO,
            mask: None,
            mask_editing: false,
        }
    }

    pub fn new_image(name: &str, texture: TextureHandle, size: [usize; 2]) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_owned(),
            visible: true,
            content: LayerContent::Image {
                texture: Some(texture),
                size,
            },
            offset: Vec2::ZERO,
            mask: None,
            mask_editing: false,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// True for layers whose content can receive paint edits.
    pub fn is_paintable(&self) -> bool {
        matches!(self.content, LayerContent::Paint(_))
    }

    pub fn elements(&self) -> Option<&[PaintElement]> {
        match &self.content {
            LayerContent::Paint(elements) => Some(elements),
            LayerContent::Image { .. } => None,
        }
    }

    pub fn elements_mut(&mut self) -> Option<&mut Vec<PaintElement>> {
        match &mut self.content {
            LayerContent::Paint(elements) => Some(elements),
            LayerContent::Image { .. } => None,
        }
    }

    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    pub fn mask(&self) -> Option<&LayerMask> {
        self.mask.as_ref()
    }

    pub fn mask_mut(&mut self) -> Option<&mut LayerMask> {
        self.mask.as_mut()
    }

    /// Attaches an empty mask. Keeps an existing mask untouched.
    pub fn add_mask(&mut self) {
        if self.mask.is_none() {
            self.mask = Some(LayerMask::default());
        }
    }

    pub fn remove_mask(&mut self) {
        self.mask = None;
        self.mask_editing = false;
    }

    pub fn is_mask_editing(&self) -> bool {
        self.mask_editing
    }

    pub fn set_mask_editing(&mut self, editing: bool) {
        self.mask_editing = editing;
    }

    /// Topmost element color under `pos`, used by the color picker.
    pub fn sample_color(&self, pos: Pos2) -> Option<Color32> {
        let local = pos - self.offset;
        self.elements()?.iter().rev().find_map(|element| match element {
            PaintElement::Stroke(stroke) if stroke.hit_test(local) => Some(stroke.color()),
            PaintElement::Fill(Fill::Solid(color)) => Some(*color),
            PaintElement::Fill(Fill::Linear { from, .. }) => Some(*from),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_mask_is_idempotent() {
        let mut layer = Layer::new("test");
        layer.add_mask();
        layer
            .mask_mut()
            .unwrap()
            .elements_mut()
            .push(PaintElement::Fill(Fill::Solid(Color32::WHITE)));
        layer.add_mask();
        assert_eq!(layer.mask().unwrap().elements().len(), 1);
    }

    #[test]
    fn removing_the_mask_clears_mask_editing() {
        let mut layer = Layer::new("test");
        layer.add_mask();
        layer.set_mask_editing(true);
        layer.remove_mask();
        assert!(!layer.is_mask_editing());
        assert!(!layer.has_mask());
    }

    #[test]
    fn sample_color_prefers_topmost_hit() {
        let mut layer = Layer::new("test");
        let elements = layer.elements_mut().unwrap();
        elements.push(PaintElement::Stroke(Stroke::new(
            Color32::RED,
            4.0,
            vec![Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)],
        )));
        elements.push(PaintElement::Stroke(Stroke::new(
            Color32::BLUE,
            4.0,
            vec![Pos2::new(0.0, 0.0), Pos2::new(0.0, 10.0)],
        )));
        assert_eq!(layer.sample_color(Pos2::new(0.0, 0.0)), Some(Color32::BLUE));
        assert_eq!(layer.sample_color(Pos2::new(8.0, 0.0)), Some(Color32::RED));
    }
}
