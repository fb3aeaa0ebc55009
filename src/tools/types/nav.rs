//! Navigation tools: hand panning and click zooming.

use egui::Pos2;

use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::{Tool, ToolId};

/// Pans the view by dragging anywhere on the canvas.
pub struct HandTool {
    chain: HandlerChain,
    last_pos: Option<Pos2>,
}

impl HandTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::new(),
            last_pos: None,
        }
    }
}

impl Default for HandTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for HandTool {
    fn handle_pressed(&mut self, event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        self.last_pos = Some(event.pos);
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(last) = self.last_pos {
            ctx.view.pan_by(event.pos - last);
            self.last_pos = Some(event.pos);
        }
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        self.last_pos = None;
        HandlerResult::Consumed
    }
}

impl Tool for HandTool {
    fn id(&self) -> ToolId {
        ToolId::Hand
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }

    fn tool_ended(&mut self, _ctx: &mut EditorContext) {
        self.last_pos = None;
    }
}

/// Zooms in on click, out on alt-click, anchored at the clicked point.
pub struct ZoomTool {
    chain: HandlerChain,
}

impl ZoomTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::new(),
        }
    }
}

impl Default for ZoomTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for ZoomTool {
    fn handle_pressed(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        HandlerResult::Consumed
    }
}

impl Tool for ZoomTool {
    fn id(&self) -> ToolId {
        ToolId::Zoom
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }

    fn mouse_clicked(&mut self, event: &ToolEvent, ctx: &mut EditorContext) {
        let factor = if event.modifiers.alt { 0.5 } else { 2.0 };
        ctx.view.zoom_at(event.canvas_pos, factor);
    }
}
