use egui::{Pos2, Vec2};

use crate::command::Command;
use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::layer::LayerId;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::SpacePanHandler;
use crate::tools::{Tool, ToolId};

/// Drags the active layer. The layer is offset live during the drag; on
/// release the offset is rolled back and re-applied through an undoable
/// command.
pub struct MoveTool {
    chain: HandlerChain,
    drag: Option<DragState>,
}

struct DragState {
    layer: LayerId,
    start: Pos2,
    original_offset: Vec2,
}

impl MoveTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::with_handlers(vec![Box::new(SpacePanHandler::new())]),
            drag: None,
        }
    }
}

impl Default for MoveTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for MoveTool {
    fn handle_pressed(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(layer) = ctx.document.active_layer() {
            self.drag = Some(DragState {
                layer: layer.id(),
                start: event.canvas_pos,
                original_offset: layer.offset,
            });
        }
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(drag) = &self.drag {
            if let Some(layer) = ctx.document.find_layer_mut(drag.layer) {
                layer.offset = drag.original_offset + (event.canvas_pos - drag.start);
            }
        }
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(drag) = self.drag.take() {
            let delta = event.canvas_pos - drag.start;
            if let Some(layer) = ctx.document.find_layer_mut(drag.layer) {
                // Roll back the live offset so the command's execution is
                // the single source of the change.
                layer.offset = drag.original_offset;
            }
            if delta != Vec2::ZERO {
                if let Err(err) = ctx.execute(Command::MoveLayer {
                    layer: drag.layer,
                    delta,
                }) {
                    ctx.messenger.show_error("Move failed", &err.to_string());
                }
            }
        }
        HandlerResult::Consumed
    }
}

impl Tool for MoveTool {
    fn id(&self) -> ToolId {
        ToolId::Move
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }

    fn tool_ended(&mut self, ctx: &mut EditorContext) {
        // Abandon a half-finished drag without committing it.
        if let Some(drag) = self.drag.take() {
            if let Some(layer) = ctx.document.find_layer_mut(drag.layer) {
                layer.offset = drag.original_offset;
            }
        }
    }
}
