use egui::{Color32, Pos2, Rect};

use crate::command::Command;
use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::SpacePanHandler;
use crate::tools::types::rect_outline_stroke;
use crate::tools::{Tool, ToolId};

/// Drags out a rectangular selection; a plain click clears it.
pub struct SelectionTool {
    chain: HandlerChain,
    start: Option<Pos2>,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::with_handlers(vec![Box::new(SpacePanHandler::new())]),
            start: None,
        }
    }
}

impl Default for SelectionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for SelectionTool {
    fn handle_pressed(&mut self, event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        self.start = Some(event.canvas_pos);
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(start) = self.start {
            let rect = Rect::from_two_pos(start, event.canvas_pos);
            ctx.set_preview_stroke(Some(rect_outline_stroke(rect, Color32::LIGHT_BLUE, 1.0)));
        }
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(start) = self.start.take() {
            ctx.set_preview_stroke(None);
            let rect = Rect::from_two_pos(start, event.canvas_pos);
            let new = (rect.width() >= 1.0 && rect.height() >= 1.0).then_some(rect);
            let old = ctx.document.selection();
            if old != new {
                if let Err(err) = ctx.execute(Command::SetSelection { old, new }) {
                    ctx.messenger.show_error("Select failed", &err.to_string());
                }
            }
        }
        HandlerResult::Consumed
    }
}

impl Tool for SelectionTool {
    fn id(&self) -> ToolId {
        ToolId::Selection
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }

    fn tool_ended(&mut self, ctx: &mut EditorContext) {
        self.start = None;
        ctx.set_preview_stroke(None);
    }
}
