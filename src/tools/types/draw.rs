use egui::Color32;

use crate::command::{Command, DrawableTarget};
use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::stroke::MutableStroke;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::{ColorPickOverrideHandler, SpacePanHandler};
use crate::tools::{Tool, ToolId};

pub const MIN_BRUSH_SIZE: f32 = 1.0;
pub const MAX_BRUSH_SIZE: f32 = 200.0;

/// How a freehand paint tool puts pigment down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushKind {
    Brush,
    Clone,
    Eraser,
    Smudge,
}

/// The freehand paint family: brush, clone, eraser and smudge share the
/// stroke lifecycle and differ in how they derive color and weight.
pub struct DrawTool {
    id: ToolId,
    kind: BrushKind,
    chain: HandlerChain,
    brush_size: f32,
    mask_editing: bool,
    in_progress: Option<(DrawableTarget, MutableStroke)>,
}

impl DrawTool {
    pub fn new(id: ToolId, kind: BrushKind) -> Self {
        Self {
            id,
            kind,
            chain: HandlerChain::with_handlers(vec![
                Box::new(SpacePanHandler::new()),
                Box::new(ColorPickOverrideHandler::new()),
            ]),
            brush_size: 10.0,
            mask_editing: false,
            in_progress: None,
        }
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    fn paint_color(&self, ctx: &EditorContext) -> Color32 {
        let color = match self.kind {
            BrushKind::Brush | BrushKind::Clone => ctx.colors.fg(),
            BrushKind::Eraser => ctx.colors.bg(),
            // Smudge drags thinned-out pigment around.
            BrushKind::Smudge => ctx.colors.fg().gamma_multiply(0.4),
        };
        if self.mask_editing {
            // Masks are grayscale surfaces.
            let gray = ((color.r() as u16 + color.g() as u16 + color.b() as u16) / 3) as u8;
            Color32::from_gray(gray)
        } else {
            color
        }
    }

    fn abort(&mut self, ctx: &mut EditorContext) {
        self.in_progress = None;
        ctx.set_preview_stroke(None);
    }

    fn commit(&mut self, ctx: &mut EditorContext) {
        if let Some((target, stroke)) = self.in_progress.take() {
            ctx.set_preview_stroke(None);
            let command = Command::AddStroke {
                target,
                stroke: stroke.to_stroke(),
            };
            if let Err(err) = ctx.execute(command) {
                ctx.messenger.show_error("Paint failed", &err.to_string());
            }
        }
    }
}

impl ToolHandler for DrawTool {
    fn handle_pressed(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        let Some(target) = ctx.active_drawable() else {
            ctx.messenger
                .show_error("No paintable target", "the active layer is not paintable");
            return HandlerResult::Consumed;
        };
        let mut stroke = MutableStroke::new(self.paint_color(ctx), self.brush_size);
        stroke.add_point(event.canvas_pos);
        ctx.set_preview_stroke(Some(stroke.to_stroke()));
        self.in_progress = Some((target, stroke));
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if let Some((_, stroke)) = &mut self.in_progress {
            stroke.add_point(event.canvas_pos);
            ctx.set_preview_stroke(Some(stroke.to_stroke()));
        }
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, _event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        self.commit(ctx);
        HandlerResult::Consumed
    }
}

impl Tool for DrawTool {
    fn id(&self) -> ToolId {
        self.id
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }

    fn tool_ended(&mut self, ctx: &mut EditorContext) {
        // Switching away mid-stroke keeps what was already painted.
        self.commit(ctx);
    }

    fn comp_activated(&mut self, ctx: &mut EditorContext) {
        // The gesture belonged to the previous document.
        self.abort(ctx);
    }

    fn all_comps_closed(&mut self) {
        self.in_progress = None;
    }

    fn setup_mask_editing(&mut self, mask_editing: bool, ctx: &mut EditorContext) {
        self.mask_editing = mask_editing;
        // A half-finished stroke would straddle two drawables.
        self.abort(ctx);
    }

    fn nudge_brush_size(&mut self, delta: f32) {
        self.brush_size = (self.brush_size + delta).clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }
}
