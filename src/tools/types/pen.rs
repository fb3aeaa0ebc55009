use egui::Pos2;

use crate::command::Command;
use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::stroke::Stroke;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::{ColorPickOverrideHandler, SpacePanHandler};
use crate::tools::{Tool, ToolId};

/// Places anchor points one click at a time; the path is committed as a
/// stroke when the tool is deactivated.
pub struct PenTool {
    chain: HandlerChain,
    anchors: Vec<Pos2>,
    thickness: f32,
}

impl PenTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::with_handlers(vec![
                Box::new(SpacePanHandler::new()),
                Box::new(ColorPickOverrideHandler::new()),
            ]),
            anchors: Vec::new(),
            thickness: 2.0,
        }
    }

    fn add_anchor(&mut self, pos: Pos2, ctx: &mut EditorContext) {
        self.anchors.push(pos);
        self.refresh_preview(ctx);
    }

    fn refresh_preview(&self, ctx: &mut EditorContext) {
        if self.anchors.len() >= 2 {
            ctx.set_preview_stroke(Some(Stroke::new(
                ctx.colors.fg(),
                self.thickness,
                self.anchors.clone(),
            )));
        }
    }

    fn commit(&mut self, ctx: &mut EditorContext) {
        let anchors = std::mem::take(&mut self.anchors);
        ctx.set_preview_stroke(None);
        if anchors.len() < 2 {
            return;
        }
        let Some(target) = ctx.active_drawable() else {
            ctx.messenger
                .show_error("No paintable target", "the active layer is not paintable");
            return;
        };
        let stroke = Stroke::new(ctx.colors.fg(), self.thickness, anchors);
        if let Err(err) = ctx.execute(Command::AddStroke { target, stroke }) {
            ctx.messenger.show_error("Path failed", &err.to_string());
        }
    }
}

impl Default for PenTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for PenTool {
    fn handle_pressed(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        self.add_anchor(event.canvas_pos, ctx);
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        // Dragging adjusts the anchor that the press just placed.
        if let Some(last) = self.anchors.last_mut() {
            *last = event.canvas_pos;
        }
        self.refresh_preview(ctx);
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        HandlerResult::Consumed
    }
}

impl Tool for PenTool {
    fn id(&self) -> ToolId {
        ToolId::Pen
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }

    fn tool_ended(&mut self, ctx: &mut EditorContext) {
        self.commit(ctx);
    }
}
