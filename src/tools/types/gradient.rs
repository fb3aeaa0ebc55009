use egui::Pos2;

use crate::command::Command;
use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::layer::Fill;
use crate::stroke::Stroke;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::{ColorPickOverrideHandler, SpacePanHandler};
use crate::tools::{Tool, ToolId};

/// Drags a linear gradient from the foreground to the background color.
pub struct GradientTool {
    chain: HandlerChain,
    start: Option<Pos2>,
}

impl GradientTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::with_handlers(vec![
                Box::new(SpacePanHandler::new()),
                Box::new(ColorPickOverrideHandler::new()),
            ]),
            start: None,
        }
    }
}

impl Default for GradientTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for GradientTool {
    fn handle_pressed(&mut self, event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        self.start = Some(event.canvas_pos);
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(start) = self.start {
            // Preview the gradient axis as a thin line.
            ctx.set_preview_stroke(Some(Stroke::new(
                ctx.colors.fg(),
                1.0,
                vec![start, event.canvas_pos],
            )));
        }
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(start) = self.start.take() {
            ctx.set_preview_stroke(None);
            if start == event.canvas_pos {
                return HandlerResult::Consumed;
            }
            let Some(target) = ctx.active_drawable() else {
                ctx.messenger
                    .show_error("No paintable target", "the active layer is not paintable");
                return HandlerResult::Consumed;
            };
            let fill = Fill::Linear {
                start,
                end: event.canvas_pos,
                from: ctx.colors.fg(),
                to: ctx.colors.bg(),
            };
            if let Err(err) = ctx.execute(Command::AddFill { target, fill }) {
                ctx.messenger.show_error("Gradient failed", &err.to_string());
            }
        }
        HandlerResult::Consumed
    }
}

impl Tool for GradientTool {
    fn id(&self) -> ToolId {
        ToolId::Gradient
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }

    fn tool_ended(&mut self, ctx: &mut EditorContext) {
        self.start = None;
        ctx.set_preview_stroke(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::PaintElement;

    #[test]
    fn drag_adds_a_linear_fill() {
        let mut tool = GradientTool::new();
        let (mut ctx, _) = EditorContext::new_headless();

        tool.handle_pressed(&ToolEvent::at(Pos2::ZERO), &mut ctx);
        tool.handle_released(&ToolEvent::at(Pos2::new(100.0, 0.0)), &mut ctx);

        let elements = ctx.document.active_layer().unwrap().elements().unwrap();
        assert!(matches!(
            elements[0],
            PaintElement::Fill(Fill::Linear { .. })
        ));
    }

    #[test]
    fn zero_length_drag_adds_nothing() {
        let mut tool = GradientTool::new();
        let (mut ctx, _) = EditorContext::new_headless();

        tool.handle_pressed(&ToolEvent::at(Pos2::ZERO), &mut ctx);
        tool.handle_released(&ToolEvent::at(Pos2::ZERO), &mut ctx);
        assert!(!ctx.history.can_undo());
    }
}
