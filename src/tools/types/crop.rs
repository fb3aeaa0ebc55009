use egui::{Color32, Pos2, Rect};

use crate::command::Command;
use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::SpacePanHandler;
use crate::tools::types::rect_outline_stroke;
use crate::tools::{Tool, ToolId};

/// Minimum crop rectangle edge, in canvas units.
const MIN_CROP_SIZE: f32 = 4.0;

/// Drags out new canvas bounds.
pub struct CropTool {
    chain: HandlerChain,
    start: Option<Pos2>,
}

impl CropTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::with_handlers(vec![Box::new(SpacePanHandler::new())]),
            start: None,
        }
    }
}

impl Default for CropTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for CropTool {
    fn handle_pressed(&mut self, event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        self.start = Some(event.canvas_pos);
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(start) = self.start {
            let rect = Rect::from_two_pos(start, event.canvas_pos);
            ctx.set_preview_stroke(Some(rect_outline_stroke(rect, Color32::GOLD, 1.5)));
        }
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(start) = self.start.take() {
            ctx.set_preview_stroke(None);
            let rect = Rect::from_two_pos(start, event.canvas_pos);
            if rect.width() >= MIN_CROP_SIZE && rect.height() >= MIN_CROP_SIZE {
                if let Err(err) = ctx.execute(Command::Crop {
                    old: ctx.document.canvas(),
                    new: rect,
                }) {
                    ctx.messenger.show_error("Crop failed", &err.to_string());
                }
            }
        }
        HandlerResult::Consumed
    }
}

impl Tool for CropTool {
    fn id(&self) -> ToolId {
        ToolId::Crop
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }

    fn tool_ended(&mut self, ctx: &mut EditorContext) {
        self.start = None;
        ctx.set_preview_stroke(None);
    }
}
