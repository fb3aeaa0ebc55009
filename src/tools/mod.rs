//! The active-tool registry and everything tools are made of.

pub mod chain;
pub mod dispatcher;
pub mod overrides;
pub mod trait_def;
pub mod types;

pub use chain::{HandlerChain, HandlerResult, ToolHandler};
pub use dispatcher::EventDispatcher;
pub use trait_def::Tool;
pub use types::{
    BrushKind, ColorPickerTool, CropTool, DrawTool, GradientTool, HandTool, MoveTool,
    PaintBucketTool, PenTool, SelectionTool, ShapeKind, ShapesTool, ZoomTool,
};

use egui::Key;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::context::EditorContext;
use crate::input::PointerEvent;

/// Identity of every tool the editor offers, in toolbar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolId {
    Move,
    Crop,
    Selection,
    Brush,
    Clone,
    Eraser,
    Smudge,
    Gradient,
    PaintBucket,
    ColorPicker,
    Pen,
    Shapes,
    Hand,
    Zoom,
}

impl ToolId {
    pub const ALL: [ToolId; 14] = [
        ToolId::Move,
        ToolId::Crop,
        ToolId::Selection,
        ToolId::Brush,
        ToolId::Clone,
        ToolId::Eraser,
        ToolId::Smudge,
        ToolId::Gradient,
        ToolId::PaintBucket,
        ToolId::ColorPicker,
        ToolId::Pen,
        ToolId::Shapes,
        ToolId::Hand,
        ToolId::Zoom,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ToolId::Move => "Move",
            ToolId::Crop => "Crop",
            ToolId::Selection => "Selection",
            ToolId::Brush => "Brush",
            ToolId::Clone => "Clone Stamp",
            ToolId::Eraser => "Eraser",
            ToolId::Smudge => "Smudge",
            ToolId::Gradient => "Gradient",
            ToolId::PaintBucket => "Paint Bucket",
            ToolId::ColorPicker => "Color Picker",
            ToolId::Pen => "Pen",
            ToolId::Shapes => "Shapes",
            ToolId::Hand => "Hand",
            ToolId::Zoom => "Zoom",
        }
    }

    /// Single-key accelerator, matching the toolbar tooltips.
    pub fn shortcut(self) -> Key {
        match self {
            ToolId::Move => Key::V,
            ToolId::Crop => Key::C,
            ToolId::Selection => Key::M,
            ToolId::Brush => Key::B,
            ToolId::Clone => Key::S,
            ToolId::Eraser => Key::E,
            ToolId::Smudge => Key::K,
            ToolId::Gradient => Key::G,
            ToolId::PaintBucket => Key::N,
            ToolId::ColorPicker => Key::I,
            ToolId::Pen => Key::P,
            ToolId::Shapes => Key::U,
            ToolId::Hand => Key::H,
            ToolId::Zoom => Key::Z,
        }
    }

    /// The status-bar hint shown whenever this tool is selected.
    pub fn status_message(self) -> &'static str {
        match self {
            ToolId::Move => "Move Tool: drag to move the active layer.",
            ToolId::Crop => "Crop Tool: drag to select the new canvas bounds.",
            ToolId::Selection => "Selection Tool: drag to select a rectangle, click to deselect.",
            ToolId::Brush => "Brush Tool: drag to paint with the foreground color.",
            ToolId::Clone => "Clone Stamp Tool: drag to paint with the sampled color.",
            ToolId::Eraser => "Eraser Tool: drag to paint with the background color.",
            ToolId::Smudge => "Smudge Tool: drag to smear the foreground color.",
            ToolId::Gradient => "Gradient Tool: drag to fill with a gradient.",
            ToolId::PaintBucket => "Paint Bucket Tool: click to fill with the foreground color.",
            ToolId::ColorPicker => "Color Picker Tool: click to sample a color, Alt-click for the background.",
            ToolId::Pen => "Pen Tool: click to place path points.",
            ToolId::Shapes => "Shapes Tool: drag to draw a shape outline.",
            ToolId::Hand => "Hand Tool: drag to move the view.",
            ToolId::Zoom => "Zoom Tool: click to zoom in, Alt-click to zoom out.",
        }
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn make_tool(id: ToolId) -> Box<dyn Tool> {
    match id {
        ToolId::Move => Box::new(MoveTool::new()),
        ToolId::Crop => Box::new(CropTool::new()),
        ToolId::Selection => Box::new(SelectionTool::new()),
        ToolId::Brush => Box::new(DrawTool::new(ToolId::Brush, BrushKind::Brush)),
        ToolId::Clone => Box::new(DrawTool::new(ToolId::Clone, BrushKind::Clone)),
        ToolId::Eraser => Box::new(DrawTool::new(ToolId::Eraser, BrushKind::Eraser)),
        ToolId::Smudge => Box::new(DrawTool::new(ToolId::Smudge, BrushKind::Smudge)),
        ToolId::Gradient => Box::new(GradientTool::new()),
        ToolId::PaintBucket => Box::new(PaintBucketTool::new()),
        ToolId::ColorPicker => Box::new(ColorPickerTool::new()),
        ToolId::Pen => Box::new(PenTool::new()),
        ToolId::Shapes => Box::new(ShapesTool::new()),
        ToolId::Hand => Box::new(HandTool::new()),
        ToolId::Zoom => Box::new(ZoomTool::new()),
    }
}

/// Owns every tool instance plus the dispatcher, and tracks which tool is
/// active. Tools are created once at startup and keep their settings while
/// inactive.
pub struct Tools {
    tools: Vec<Box<dyn Tool>>,
    current: usize,
    dispatcher: EventDispatcher,
}

impl Default for Tools {
    fn default() -> Self {
        Self::new()
    }
}

impl Tools {
    pub fn new() -> Self {
        Self {
            tools: ToolId::ALL.iter().copied().map(make_tool).collect(),
            current: Self::index_of(ToolId::Brush),
            dispatcher: EventDispatcher::new(),
        }
    }

    fn index_of(id: ToolId) -> usize {
        // ALL is the construction order, so the position is the index.
        ToolId::ALL
            .iter()
            .position(|t| *t == id)
            .unwrap_or_default()
    }

    pub fn current(&self) -> ToolId {
        ToolId::ALL[self.current]
    }

    pub fn current_is(&self, id: ToolId) -> bool {
        self.current() == id
    }

    pub fn current_tool_mut(&mut self) -> &mut dyn Tool {
        self.tools[self.current].as_mut()
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Resolves a saved tool name back to an id. Unknown names resolve to
    /// `None` so stale session data degrades to the default tool.
    pub fn by_name(name: &str) -> Option<ToolId> {
        ToolId::ALL.iter().copied().find(|t| t.display_name() == name)
    }

    pub fn by_shortcut(key: Key) -> Option<ToolId> {
        ToolId::ALL.iter().copied().find(|t| t.shortcut() == key)
    }

    /// Makes `id` the active tool.
    ///
    /// The status-bar hint is shown even when `id` is already active, so
    /// re-clicking a toolbar button re-surfaces the usage hint. Everything
    /// else only happens on an actual switch: the outgoing tool's
    /// `tool_ended`, the dispatcher's mid-drag handover, the incoming
    /// tool's `tool_started`.
    pub fn change_to(&mut self, id: ToolId, ctx: &mut EditorContext) {
        ctx.messenger.show_status(id.status_message());

        let new = Self::index_of(id);
        let old = self.current;
        if new == old {
            return;
        }
        debug!("tool change: {} -> {}", self.current(), id);

        self.tools[old].tool_ended(ctx);

        let (a, b) = self.tools.split_at_mut(old.max(new));
        let (outgoing, incoming) = if old < new {
            (a[old].as_mut(), b[0].as_mut())
        } else {
            (b[0].as_mut(), a[new].as_mut())
        };
        self.dispatcher.tool_changed(outgoing, incoming, ctx);

        self.current = new;
        self.tools[new].tool_started(ctx);
    }

    /// Feeds one classified pointer event through the dispatcher to the
    /// active tool.
    pub fn dispatch(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        let tool = self.tools[self.current].as_mut();
        match event {
            PointerEvent::Pressed(e) => self.dispatcher.mouse_pressed(e, tool, ctx),
            PointerEvent::Released(e) => self.dispatcher.mouse_released(e, tool, ctx),
            PointerEvent::Dragged(e) => self.dispatcher.mouse_dragged(e, tool, ctx),
            PointerEvent::Clicked(e) => self.dispatcher.mouse_clicked(e, tool, ctx),
            PointerEvent::Moved(e) => self.dispatcher.mouse_moved(e, tool, ctx),
            PointerEvent::Entered(e) => self.dispatcher.mouse_entered(e, tool, ctx),
            PointerEvent::Exited(e) => self.dispatcher.mouse_exited(e, tool, ctx),
        }
    }

    /// A different document became the active one.
    pub fn comp_activated(&mut self, ctx: &mut EditorContext) {
        self.tools[self.current].comp_activated(ctx);
    }

    /// Every document was closed.
    pub fn all_comps_closed(&mut self) {
        self.tools[self.current].all_comps_closed();
    }

    /// Tells the active tool that mask editing was toggled.
    pub fn setup_mask_editing(&mut self, mask_editing: bool, ctx: &mut EditorContext) {
        self.tools[self.current].setup_mask_editing(mask_editing, ctx);
    }

    pub fn nudge_brush_size(&mut self, delta: f32) {
        self.tools[self.current].nudge_brush_size(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_is_the_default_tool() {
        let tools = Tools::new();
        assert!(tools.current_is(ToolId::Brush));
    }

    #[test]
    fn every_tool_reports_its_own_id() {
        let mut tools = Tools::new();
        let (mut ctx, _) = EditorContext::new_headless();
        for id in ToolId::ALL {
            tools.change_to(id, &mut ctx);
            assert_eq!(tools.current_tool_mut().id(), id);
        }
    }

    #[test]
    fn by_name_resolves_display_names_and_nothing_else() {
        assert_eq!(Tools::by_name("Paint Bucket"), Some(ToolId::PaintBucket));
        assert_eq!(Tools::by_name("Zoom"), Some(ToolId::Zoom));
        assert_eq!(Tools::by_name("Airbrush"), None);
        assert_eq!(Tools::by_name(""), None);
    }

    #[test]
    fn by_shortcut_resolves_every_tool_key() {
        for id in ToolId::ALL {
            assert_eq!(Tools::by_shortcut(id.shortcut()), Some(id));
        }
        assert_eq!(Tools::by_shortcut(Key::F1), None);
    }

    #[test]
    fn comp_activated_reaches_the_active_tool() {
        use crate::input::ToolEvent;
        use egui::Pos2;

        let mut tools = Tools::new();
        let (mut ctx, _) = EditorContext::new_headless();
        tools.dispatch(PointerEvent::Pressed(ToolEvent::at(Pos2::ZERO)), &mut ctx);
        assert!(ctx.preview_stroke().is_some());

        // A document switch invalidates the in-progress gesture.
        tools.comp_activated(&mut ctx);
        assert!(ctx.preview_stroke().is_none());

        tools.dispatch(PointerEvent::Released(ToolEvent::at(Pos2::ZERO)), &mut ctx);
        assert!(!ctx.history.can_undo());
    }

    #[test]
    fn all_comps_closed_discards_tool_state() {
        use crate::input::ToolEvent;
        use egui::Pos2;

        let mut tools = Tools::new();
        let (mut ctx, _) = EditorContext::new_headless();
        tools.dispatch(PointerEvent::Pressed(ToolEvent::at(Pos2::ZERO)), &mut ctx);

        tools.all_comps_closed();

        tools.dispatch(PointerEvent::Released(ToolEvent::at(Pos2::ZERO)), &mut ctx);
        assert!(!ctx.history.can_undo());
    }

    #[test]
    fn shortcuts_are_unique() {
        for (i, a) in ToolId::ALL.iter().enumerate() {
            for b in &ToolId::ALL[i + 1..] {
                assert_ne!(a.shortcut(), b.shortcut(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn change_to_always_shows_the_status_hint() {
        let mut tools = Tools::new();
        let (mut ctx, messenger) = EditorContext::new_headless();

        tools.change_to(ToolId::Brush, &mut ctx);
        tools.change_to(ToolId::Brush, &mut ctx);

        assert_eq!(
            messenger.statuses(),
            vec![
                ToolId::Brush.status_message().to_owned(),
                ToolId::Brush.status_message().to_owned(),
            ]
        );
        assert!(tools.current_is(ToolId::Brush));
    }

    #[test]
    fn change_to_switches_in_both_index_directions() {
        let mut tools = Tools::new();
        let (mut ctx, _) = EditorContext::new_headless();

        tools.change_to(ToolId::Zoom, &mut ctx);
        assert!(tools.current_is(ToolId::Zoom));
        tools.change_to(ToolId::Move, &mut ctx);
        assert!(tools.current_is(ToolId::Move));
    }
}
