//! Chain interceptors shared by the paint tools: temporary overrides that
//! take a whole gesture away from the tool's own behavior.

use egui::Pos2;

use crate::context::EditorContext;
use crate::input::ToolEvent;

use super::chain::{HandlerResult, ToolHandler};

/// Space-bar panning: while space is held at press time, the gesture pans
/// the view instead of reaching the tool.
#[derive(Debug, Default)]
pub struct SpacePanHandler {
    last_pos: Option<Pos2>,
}

impl SpacePanHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToolHandler for SpacePanHandler {
    fn handle_pressed(&mut self, event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        if event.space_down {
            self.last_pos = Some(event.pos);
            HandlerResult::Consumed
        } else {
            HandlerResult::Pass
        }
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        let Some(last) = self.last_pos else {
            return HandlerResult::Pass;
        };
        ctx.view.pan_by(event.pos - last);
        self.last_pos = Some(event.pos);
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        if self.last_pos.take().is_some() {
            HandlerResult::Consumed
        } else {
            HandlerResult::Pass
        }
    }
}

/// Alt-click color sampling: while alt is held at press time, the gesture
/// picks the foreground color from the layer stack instead of painting.
#[derive(Debug, Default)]
pub struct ColorPickOverrideHandler {
    active: bool,
}

impl ColorPickOverrideHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn sample(&self, event: &ToolEvent, ctx: &mut EditorContext) {
        if let Some(color) = ctx
            .document
            .layers()
            .iter()
            .rev()
            .filter(|l| l.visible)
            .find_map(|l| l.sample_color(event.canvas_pos))
        {
            ctx.colors.set_fg(color);
        }
    }
}

impl ToolHandler for ColorPickOverrideHandler {
    fn handle_pressed(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if event.modifiers.alt {
            self.active = true;
            self.sample(event, ctx);
            HandlerResult::Consumed
        } else {
            HandlerResult::Pass
        }
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        if self.active {
            self.sample(event, ctx);
            HandlerResult::Consumed
        } else {
            HandlerResult::Pass
        }
    }

    fn handle_released(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        if self.active {
            self.active = false;
            HandlerResult::Consumed
        } else {
            HandlerResult::Pass
        }
    }
}
