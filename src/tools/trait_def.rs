use crate::context::EditorContext;
use crate::input::ToolEvent;

use super::chain::{HandlerChain, ToolHandler};
use super::ToolId;

/// A user-selectable interaction mode. The tool doubles as the final
/// handler of its own chain (see `HandlerChain`): press/drag/release
/// arrive through `ToolHandler` after the chain's interceptors passed,
/// while clicks, moves and enter/exit are single-shot notifications that
/// bypass the chain entirely.
pub trait Tool: ToolHandler {
    fn id(&self) -> ToolId;

    /// The interceptors consulted ahead of this tool's own behavior.
    fn chain_mut(&mut self) -> &mut HandlerChain;

    /// Called when this tool becomes the active tool.
    fn tool_started(&mut self, _ctx: &mut EditorContext) {}

    /// Called on the outgoing tool before the active tool changes.
    fn tool_ended(&mut self, _ctx: &mut EditorContext) {}

    fn mouse_clicked(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) {}

    fn mouse_moved(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) {}

    fn mouse_entered(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) {}

    fn mouse_exited(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) {}

    /// A different composition/view became active.
    fn comp_activated(&mut self, _ctx: &mut EditorContext) {}

    /// Every composition was closed.
    fn all_comps_closed(&mut self) {}

    /// Reconfigures the tool when mask editing is toggled on the active
    /// layer. Paint tools adjust their target; most tools ignore it.
    fn setup_mask_editing(&mut self, _mask_editing: bool, _ctx: &mut EditorContext) {}

    /// Keyboard nudge of the brush size; only meaningful for paint tools.
    fn nudge_brush_size(&mut self, _delta: f32) {}
}
