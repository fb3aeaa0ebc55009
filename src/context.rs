use crate::color::FgBgColors;
use crate::command::{Command, CommandHistory, CommandResult, DrawableTarget};
use crate::document::Document;
use crate::message::{Messenger, RecordingMessenger};
use crate::stroke::Stroke;
use crate::view::View;

/// Everything the tools operate on, injected explicitly at startup instead
/// of living in process-wide statics.
pub struct EditorContext {
    pub document: Document,
    pub view: View,
    pub colors: FgBgColors,
    pub history: CommandHistory,
    pub messenger: Box<dyn Messenger>,
    /// Whether a "fade last edit" action would currently apply. Recomputed
    /// after every executed command and on mask-mode switches.
    fade_available: bool,
    preview_stroke: Option<Stroke>,
}

impl EditorContext {
    pub fn new(messenger: Box<dyn Messenger>) -> Self {
        Self {
            document: Document::new(),
            view: View::new(),
            colors: FgBgColors::default(),
            history: CommandHistory::new(),
            messenger,
            fade_available: false,
            preview_stroke: None,
        }
    }

    /// A context with a mock view and a recording messenger, for headless
    /// tests. Returns the messenger handle for assertions.
    pub fn new_headless() -> (Self, RecordingMessenger) {
        let messenger = RecordingMessenger::new();
        let mut ctx = Self::new(Box::new(messenger.clone()));
        ctx.view = View::new_mock();
        (ctx, messenger)
    }

    /// Executes an undoable command and refreshes fade availability.
    pub fn execute(&mut self, command: Command) -> CommandResult {
        let result = self.history.execute(command, &mut self.document);
        self.refresh_fade_availability();
        result
    }

    pub fn undo(&mut self) -> CommandResult {
        let result = self.history.undo(&mut self.document);
        self.refresh_fade_availability();
        result
    }

    pub fn redo(&mut self) -> CommandResult {
        let result = self.history.redo(&mut self.document);
        self.refresh_fade_availability();
        result
    }

    /// The drawable that paint tools currently edit: the active layer's
    /// mask while mask editing is on, otherwise the layer itself (if it is
    /// paintable at all).
    pub fn active_drawable(&self) -> Option<DrawableTarget> {
        let layer = self.document.active_layer()?;
        if layer.is_mask_editing() && layer.has_mask() {
            Some(DrawableTarget::Mask(layer.id()))
        } else if layer.is_paintable() {
            Some(DrawableTarget::Layer(layer.id()))
        } else {
            None
        }
    }

    pub fn fade_available(&self) -> bool {
        self.fade_available
    }

    /// Recomputes whether the last history entry could be faded, based on
    /// which drawable the current mask view mode targets.
    pub fn refresh_fade_availability(&mut self) {
        let edit_mask = self.view.mask_view_mode().edit_mask();
        self.fade_available = match self.document.active_layer() {
            Some(layer) if edit_mask => {
                layer.has_mask() && self.history.can_fade(DrawableTarget::Mask(layer.id()))
            }
            Some(layer) if layer.is_paintable() => {
                self.history.can_fade(DrawableTarget::Layer(layer.id()))
            }
            _ => false,
        };
    }

    pub fn preview_stroke(&self) -> Option<&Stroke> {
        self.preview_stroke.as_ref()
    }

    /// Installs or clears the in-progress stroke shown by the renderer.
    pub fn set_preview_stroke(&mut self, stroke: Option<Stroke>) {
        self.preview_stroke = stroke;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Pos2};

    fn stroke() -> Stroke {
        Stroke::new(Color32::BLACK, 2.0, vec![Pos2::ZERO, Pos2::new(1.0, 1.0)])
    }

    #[test]
    fn execute_refreshes_fade_availability() {
        let (mut ctx, _) = EditorContext::new_headless();
        assert!(!ctx.fade_available());

        let target = ctx.active_drawable().unwrap();
        ctx.execute(Command::AddStroke {
            target,
            stroke: stroke(),
        })
        .unwrap();
        assert!(ctx.fade_available());

        ctx.undo().unwrap();
        assert!(!ctx.fade_available());
    }

    #[test]
    fn active_drawable_follows_mask_editing() {
        let (mut ctx, _) = EditorContext::new_headless();
        let id = ctx.document.active_layer().unwrap().id();
        assert_eq!(ctx.active_drawable(), Some(DrawableTarget::Layer(id)));

        let layer = ctx.document.active_layer_mut().unwrap();
        layer.add_mask();
        layer.set_mask_editing(true);
        assert_eq!(ctx.active_drawable(), Some(DrawableTarget::Mask(id)));
    }
}
