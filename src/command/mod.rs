mod history;

pub use history::CommandHistory;

use egui::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;
use crate::layer::{Fill, LayerId, PaintElement};
use crate::stroke::Stroke;

/// Errors from executing or undoing a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("layer not found")]
    LayerNotFound,
    #[error("layer has no mask")]
    NoMask,
    #[error("layer content is not paintable")]
    NotPaintable,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

pub type CommandResult = Result<(), CommandError>;

/// The surface a paint edit applies to: a layer's own content or its mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawableTarget {
    Layer(LayerId),
    Mask(LayerId),
}

impl DrawableTarget {
    pub fn layer_id(self) -> LayerId {
        match self {
            Self::Layer(id) | Self::Mask(id) => id,
        }
    }
}

/// An undoable document edit produced by a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    AddStroke {
        target: DrawableTarget,
        stroke: Stroke,
    },
    AddFill {
        target: DrawableTarget,
        fill: Fill,
    },
    RemoveLastElement {
        target: DrawableTarget,
    },
    MoveLayer {
        layer: LayerId,
        delta: Vec2,
    },
    SetSelection {
        old: Option<Rect>,
        new: Option<Rect>,
    },
    Crop {
        old: Rect,
        new: Rect,
    },
}

impl Command {
    pub fn execute(&self, doc: &mut Document) -> CommandResult {
        match self {
            Self::AddStroke { target, stroke } => {
                drawable_elements(doc, *target)?.push(PaintElement::Stroke(stroke.clone()));
                Ok(())
            }
            Self::AddFill { target, fill } => {
                drawable_elements(doc, *target)?.push(PaintElement::Fill(*fill));
                Ok(())
            }
            Self::RemoveLastElement { target } => {
                drawable_elements(doc, *target)?.pop();
                Ok(())
            }
            Self::MoveLayer { layer, delta } => {
                let layer = doc.find_layer_mut(*layer).ok_or(CommandError::LayerNotFound)?;
                layer.offset += *delta;
                Ok(())
            }
            Self::SetSelection { new, .. } => {
                doc.set_selection(*new);
                Ok(())
            }
            Self::Crop { new, .. } => {
                doc.set_canvas(*new);
                doc.set_selection(None);
                Ok(())
            }
        }
    }

    /// The command that undoes this one, or `None` when it cannot be
    /// reconstructed (only commands never produced by tools lack one).
    pub fn inverse(&self) -> Option<Command> {
        match self {
            Self::AddStroke { target, .. } | Self::AddFill { target, .. } => {
                Some(Self::RemoveLastElement { target: *target })
            }
            Self::RemoveLastElement { .. } => None,
            Self::MoveLayer { layer, delta } => Some(Self::MoveLayer {
                layer: *layer,
                delta: -*delta,
            }),
            Self::SetSelection { old, new } => Some(Self::SetSelection {
                old: *new,
                new: *old,
            }),
            Self::Crop { old, new } => Some(Self::Crop {
                old: *new,
                new: *old,
            }),
        }
    }

    /// Paint edits can be faded; structural edits cannot.
    pub fn is_fadable(&self) -> bool {
        matches!(self, Self::AddStroke { .. } | Self::AddFill { .. })
    }

    /// The drawable this command painted on, if any.
    pub fn target(&self) -> Option<DrawableTarget> {
        match self {
            Self::AddStroke { target, .. }
            | Self::AddFill { target, .. }
            | Self::RemoveLastElement { target } => Some(*target),
            _ => None,
        }
    }
}

fn drawable_elements(
    doc: &mut Document,
    target: DrawableTarget,
) -> Result<&mut Vec<PaintElement>, CommandError> {
    let layer = doc
        .find_layer_mut(target.layer_id())
        .ok_or(CommandError::LayerNotFound)?;
    match target {
        DrawableTarget::Layer(_) => layer.elements_mut().ok_or(CommandError::NotPaintable),
        DrawableTarget::Mask(_) => Ok(layer
            .mask_mut()
            .ok_or(CommandError::NoMask)?
            .elements_mut()),
    }
}
