use crate::context::EditorContext;
use crate::input::ToolEvent;
use crate::tools::chain::{HandlerChain, HandlerResult, ToolHandler};
use crate::tools::overrides::SpacePanHandler;
use crate::tools::{Tool, ToolId};

/// Samples a color from the layer stack into the foreground color
/// (background with alt held).
pub struct ColorPickerTool {
    chain: HandlerChain,
}

impl ColorPickerTool {
    pub fn new() -> Self {
        Self {
            chain: HandlerChain::with_handlers(vec![Box::new(SpacePanHandler::new())]),
        }
    }

    fn pick(&self, event: &ToolEvent, ctx: &mut EditorContext) {
        let sampled = ctx
            .document
            .layers()
            .iter()
            .rev()
            .filter(|l| l.visible)
            .find_map(|l| l.sample_color(event.canvas_pos));
        if let Some(color) = sampled {
            if event.modifiers.alt {
                ctx.colors.set_bg(color);
            } else {
                ctx.colors.set_fg(color);
            }
        }
    }
}

impl Default for ColorPickerTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for ColorPickerTool {
    fn handle_pressed(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        self.pick(event, ctx);
        HandlerResult::Consumed
    }

    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        self.pick(event, ctx);
        HandlerResult::Consumed
    }

    fn handle_released(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
        HandlerResult::Consumed
    }
}

impl Tool for ColorPickerTool {
    fn id(&self) -> ToolId {
        ToolId::ColorPicker
    }

    fn chain_mut(&mut self) -> &mut HandlerChain {
        &mut self.chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Stroke;
    use egui::{Color32, Modifiers, Pos2};

    fn ctx_with_red_stroke() -> EditorContext {
        let (mut ctx, _) = EditorContext::new_headless();
        ctx.document
            .active_layer_mut()
            .unwrap()
            .elements_mut()
            .unwrap()
            .push(crate::layer::PaintElement::Stroke(Stroke::new(
                Color32::RED,
                6.0,
                vec![Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)],
            )));
        ctx
    }

    #[test]
    fn press_samples_into_the_foreground() {
        let mut tool = ColorPickerTool::new();
        let mut ctx = ctx_with_red_stroke();
        tool.handle_pressed(&ToolEvent::at(Pos2::new(5.0, 0.0)), &mut ctx);
        assert_eq!(ctx.colors.fg(), Color32::RED);
    }

    #[test]
    fn alt_press_samples_into_the_background() {
        let mut tool = ColorPickerTool::new();
        let mut ctx = ctx_with_red_stroke();
        let event = ToolEvent::at(Pos2::new(5.0, 0.0)).with_modifiers(Modifiers::ALT);
        tool.handle_pressed(&event, &mut ctx);
        assert_eq!(ctx.colors.bg(), Color32::RED);
        assert_eq!(ctx.colors.fg(), Color32::BLACK);
    }

    #[test]
    fn miss_keeps_the_current_colors() {
        let mut tool = ColorPickerTool::new();
        let mut ctx = ctx_with_red_stroke();
        tool.handle_pressed(&ToolEvent::at(Pos2::new(500.0, 500.0)), &mut ctx);
        assert_eq!(ctx.colors.fg(), Color32::BLACK);
    }
}
