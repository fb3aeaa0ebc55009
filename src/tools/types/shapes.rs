use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::{ColorPickOverrideHandler, SpacePanHandler};
use crate::tools::types::{ellipse_outline_stroke, rect_outline_stroke};
use crate::tools::{Tool, ToolId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
}

/// Drags out a rectangle or ellipse outline.
pub struct ShapesTool {
    chain: HandlerChain,
    pub kind: ShapeKind,
    pub thickness: f32,
    start: Option<Pos2>,
}

impl ShapesTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::with_handlers(vec![
                Box::new(SpacePanHandler::new()),
                Box::new(ColorPickOverrideHandler::new()),
            ]),
            kind: ShapeKind::Rectangle,
            thickness: 2.0,
            start: None,
        }
    }

    fn outline(&self, rect: Rect, ctx: &EditorContext) -> crate::stroke::Stroke {
        match self.kind {
            ShapeKind::Rectangle => rect_outline_stroke(rect, ctx.colors.fg(), self.thickness),
            ShapeKind::Ellipse => ellipse_outline_stroke(rect, ctx.colors.fg(), self.thickness),
        }
    }
}

impl Default for ShapesTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for ShapesTool {
    fn handle_pressed(&mut self, event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        self.start = Some(event.canvas_pos);
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(start) = self.start {
            let rect = Rect::from_two_pos(start, event.canvas_pos);
            let outline = self.outline(rect, ctx);
            ctx.set_preview_stroke(Some(outline));
        }
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some(start) = self.start.take() {
            ctx.set_preview_stroke(None);
            let rect = Rect::from_two_pos(start, event.canvas_pos);
            if rect.width() < 1.0 && rect.height() < 1.0 {
                return HandlerResult::Consumed;
            }
            let Some(target) = ctx.active_drawable() else {
                ctx.messenger
                    .show_error("No paintable target", "the active layer is not paintable");
                return HandlerResult::Consumed;
            };
            let stroke = self.outline(rect, ctx);
            if let Err(err) = ctx.execute(Command::AddStroke { target, stroke }) {
                ctx.messenger.show_error("Shape failed", &err.to_string());
            }
        }
        HandlerResult::Consumed
    }
}

impl Tool for ShapesTool {
    fn id(&self) -> ToolId {
        ToolId::Shapes
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
    fn rectangle_drag_commits_a_closed_outline() {
        let mut tool = ShapesTool::new();
        let (mut ctx, _) = EditorContext::new_headless();

        tool.handle_pressed(&ToolEvent::at(Pos2::new(10.0, 10.0)), &mut ctx);
        tool.handle_released(&ToolEvent::at(Pos2::new(60.0, 50.0)), &mut ctx);

        let elements = ctx.document.active_layer().unwrap().elements().unwrap();
        match &elements[0] {
            PaintElement::Stroke(stroke) => {
                assert_eq!(stroke.points().first(), stroke.points().last());
                assert_eq!(stroke.points().len(), 5);
            }
            other => panic!("expected a stroke, got {other:?}"),
        }
    }

    #[test]
    fn ellipse_drag_commits_a_polyline() {
        let mut tool = ShapesTool::new();
        tool.kind = ShapeKind::Ellipse;
        let (mut ctx, _) = EditorContext::new_headless();

        tool.handle_pressed(&ToolEvent::at(Pos2::ZERO), &mut ctx);
        tool.handle_released(&ToolEvent::at(Pos2::new(100.0, 60.0)), &mut ctx);

        let elements = ctx.document.active_layer().unwrap().elements().unwrap();
        assert!(matches!(&elements[0], PaintElement::Stroke(s) if s.points().len() > 16));
    }
}
