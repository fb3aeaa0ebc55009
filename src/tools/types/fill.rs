use crate::command::Command;
use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::layer::Fill;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::{ColorPickOverrideHandler, SpacePanHandler};
use crate::tools::{Tool, ToolId};

/// Fills the active drawable with the foreground color on press.
pub struct PaintBucketTool {
    chain: HandlerChain,
}

impl PaintBucketTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::with_handlers(vec![
                Box::new(SpacePanHandler::new()),
                Box::new(ColorPickOverrideHandler::new()),
            ]),
        }
    }
}

impl Default for PaintBucketTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for PaintBucketTool {
    fn handle_pressed(&mut self, _event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        let Some(target) = ctx.active_drawable() else {
            ctx.messenger
                .show_error("No paintable target", "the active layer is not paintable");
            return HandlerResult::Consumed;
        };
        let fill = Fill::Solid(ctx.colors.fg());
        if let Err(err) = ctx.execute(Command::AddFill { target, fill }) {
            ctx.messenger.show_error("Fill failed", &err.to_string());
        }
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        HandlerResult::Consumed
    }
}

impl Tool for PaintBucketTool {
    fn id(&self) -> ToolId {
        ToolId::PaintBucket
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }
}
