use log::warn;

use crate::context::EditorContext;
use crate::input::ToolEvent;

use super::chain::HandlerResult;
use super::trait_def::Tool;

/// Routes raw pointer events to the active tool.
///
/// A tiny two-state machine: `mouse_down` is false (idle) or true (a drag
/// is in progress). The last observed event is retained so that a tool
/// switch in the middle of a drag can hand the gesture over with a
/// synthesized release/press pair.
///
/// Host toolkits can swallow a press (a popup or modal widget grabs it)
/// while still delivering the following drag and release, so the machine
/// recovers instead of trusting strict pairing: a drag while idle is
/// treated as the missing press, and a release while idle is dropped.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    mouse_down: bool,
    last_event: Option<ToolEvent>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub fn last_event(&self) -> Option<&ToolEvent> {
        self.last_event.as_ref()
    }

    pub fn mouse_pressed(&mut self, event: ToolEvent, tool: &mut dyn Tool, ctx: &mut EditorContext) {
        if self.mouse_down {
            // A second press without a release in between would un-pair the
            // gesture the handlers are tracking; drop it.
            warn!("press while a drag is in progress, ignoring");
            return;
        }
        self.last_event = Some(event);
        forward_pressed(tool, &event, ctx);
        self.mouse_down = true;
    }

    pub fn mouse_released(
        &mut self,
        event: ToolEvent,
        tool: &mut dyn Tool,
        ctx: &mut EditorContext,
    ) {
        if !self.mouse_down {
            // The matching press was lost (consumed by some other widget)
            // and no drag happened in between to recover it.
            return;
        }
        self.last_event = Some(event);
        forward_released(tool, &event, ctx);
        self.mouse_down = false;
    }

    pub fn mouse_dragged(&mut self, event: ToolEvent, tool: &mut dyn Tool, ctx: &mut EditorContext) {
        self.last_event = Some(event);
        if !self.mouse_down {
            // Recover from a lost press by simulating one.
            forward_pressed(tool, &event, ctx);
            self.mouse_down = true;
            return;
        }
        forward_dragged(tool, &event, ctx);
    }

    pub fn mouse_clicked(&mut self, event: ToolEvent, tool: &mut dyn Tool, ctx: &mut EditorContext) {
        self.last_event = Some(event);
        // Doesn't need to go through the handler chain.
        tool.mouse_clicked(&event, ctx);
        self.mouse_down = false;
    }

    pub fn mouse_moved(&mut self, event: ToolEvent, tool: &mut dyn Tool, ctx: &mut EditorContext) {
        tool.mouse_moved(&event, ctx);
    }

    pub fn mouse_entered(&mut self, event: ToolEvent, tool: &mut dyn Tool, ctx: &mut EditorContext) {
        tool.mouse_entered(&event, ctx);
    }

    pub fn mouse_exited(&mut self, event: ToolEvent, tool: &mut dyn Tool, ctx: &mut EditorContext) {
        tool.mouse_exited(&event, ctx);
    }

    /// Called while the active tool is being switched. If a drag is in
    /// progress the gesture is handed over: the outgoing tool sees a
    /// release and the incoming tool a press, both with the last observed
    /// event, so neither is left with a broken internal state.
    pub fn tool_changed(
        &mut self,
        outgoing: &mut dyn Tool,
        incoming: &mut dyn Tool,
        ctx: &mut EditorContext,
    ) {
        if !self.mouse_down {
            return;
        }
        if let Some(event) = self.last_event {
            forward_released(outgoing, &event, ctx);
            forward_pressed(incoming, &event, ctx);
        }
    }
}

// The chain's interceptors get the event first; the tool itself is the
// fixed tail and always consumes.

fn forward_pressed(tool: &mut dyn Tool, event: &ToolEvent, ctx: &mut EditorContext) {
    if tool.chain_mut().handle_pressed(event, ctx) == HandlerResult::Pass {
        tool.handle_pressed(event, ctx);
    }
}

fn forward_dragged(tool: &mut dyn Tool, event: &ToolEvent, ctx: &mut EditorContext) {
    if tool.chain_mut().handle_dragged(event, ctx) == HandlerResult::Pass {
        tool.handle_dragged(event, ctx);
    }
}

fn forward_released(tool: &mut dyn Tool, event: &ToolEvent, ctx: &mut EditorContext) {
    if tool.chain_mut().handle_released(event, ctx) == HandlerResult::Pass {
        tool.handle_released(event, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::chain::{HandlerChain, ToolHandler};
    use crate::tools::ToolId;
    use egui::Pos2;
    use std::sync::Arc;

    use parking_lot::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Pressed,
        Dragged,
        Released,
        Clicked,
        Moved,
    }

    struct ProbeTool {
        chain: HandlerChain,
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl ProbeTool {
        fn new() -> (Self, Arc<Mutex<Vec<Call>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    chain: HandlerChain::new(),
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl ToolHandler for ProbeTool {
        fn handle_pressed(&mut self, _e: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
            self.calls.lock().push(Call::Pressed);
            HandlerResult::Consumed
        }

        fn handle_dragged(&mut self, _e: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
            self.calls.lock().push(Call::Dragged);
            HandlerResult::Consumed
        }

        fn handle_released(&mut self, _e: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
            self.calls.lock().push(Call::Released);
            HandlerResult::Consumed
        }
    }

    impl Tool for ProbeTool {
        fn id(&self) -> ToolId {
            ToolId::Brush
        }

        fn chain_mut(&mut self) -> &mut HandlerChain {
            &mut self.chain
        }

        fn mouse_clicked(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) {
            self.calls.lock().push(Call::Clicked);
        }

        fn mouse_moved(&mut self, _event: &ToolEvent, _ctx: &mut EditorContext) {
            self.calls.lock().push(Call::Moved);
        }
    }

    fn event() -> ToolEvent {
        ToolEvent::at(Pos2::new(10.0, 10.0))
    }

    #[test]
    fn press_drag_release_runs_the_chain_in_order() {
        let (mut tool, calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        dispatcher.mouse_pressed(event(), &mut tool, &mut ctx);
        dispatcher.mouse_dragged(event(), &mut tool, &mut ctx);
        dispatcher.mouse_dragged(event(), &mut tool, &mut ctx);
        dispatcher.mouse_released(event(), &mut tool, &mut ctx);

        assert_eq!(
            *calls.lock(),
            vec![Call::Pressed, Call::Dragged, Call::Dragged, Call::Released]
        );
        assert!(!dispatcher.is_mouse_down());
    }

    #[test]
    fn release_while_idle_is_ignored() {
        let (mut tool, calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        dispatcher.mouse_released(event(), &mut tool, &mut ctx);

        assert!(calls.lock().is_empty());
        assert!(!dispatcher.is_mouse_down());
    }

    #[test]
    fn drag_while_idle_synthesizes_exactly_one_press() {
        let (mut tool, calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        dispatcher.mouse_dragged(event(), &mut tool, &mut ctx);

        // The recovering drag itself is not forwarded.
        assert_eq!(*calls.lock(), vec![Call::Pressed]);
        assert!(dispatcher.is_mouse_down());

        dispatcher.mouse_dragged(event(), &mut tool, &mut ctx);
        assert_eq!(*calls.lock(), vec![Call::Pressed, Call::Dragged]);
    }

    #[test]
    fn recovered_drag_then_release_pairs_up() {
        let (mut tool, calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        dispatcher.mouse_dragged(event(), &mut tool, &mut ctx);
        dispatcher.mouse_released(event(), &mut tool, &mut ctx);

        assert_eq!(*calls.lock(), vec![Call::Pressed, Call::Released]);
        assert!(!dispatcher.is_mouse_down());
    }

    #[test]
    fn second_press_while_dragging_is_dropped() {
        let (mut tool, calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        dispatcher.mouse_pressed(event(), &mut tool, &mut ctx);
        dispatcher.mouse_pressed(event(), &mut tool, &mut ctx);

        assert_eq!(*calls.lock(), vec![Call::Pressed]);
        assert!(dispatcher.is_mouse_down());
    }

    #[test]
    fn click_bypasses_the_chain_and_clears_mouse_down() {
        let (mut tool, calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        dispatcher.mouse_pressed(event(), &mut tool, &mut ctx);
        dispatcher.mouse_clicked(event(), &mut tool, &mut ctx);

        assert_eq!(*calls.lock(), vec![Call::Pressed, Call::Clicked]);
        assert!(!dispatcher.is_mouse_down());
    }

    #[test]
    fn move_does_not_change_state() {
        let (mut tool, calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        dispatcher.mouse_moved(event(), &mut tool, &mut ctx);
        assert_eq!(*calls.lock(), vec![Call::Moved]);
        assert!(!dispatcher.is_mouse_down());

        dispatcher.mouse_pressed(event(), &mut tool, &mut ctx);
        dispatcher.mouse_moved(event(), &mut tool, &mut ctx);
        assert!(dispatcher.is_mouse_down());
    }

    #[test]
    fn tool_changed_mid_drag_synthesizes_a_handover_pair() {
        let (mut old_tool, old_calls) = ProbeTool::new();
        let (mut new_tool, new_calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        let press = ToolEvent::at(Pos2::new(3.0, 4.0));
        dispatcher.mouse_pressed(press, &mut old_tool, &mut ctx);
        dispatcher.tool_changed(&mut old_tool, &mut new_tool, &mut ctx);

        assert_eq!(*old_calls.lock(), vec![Call::Pressed, Call::Released]);
        assert_eq!(*new_calls.lock(), vec![Call::Pressed]);
        assert!(dispatcher.is_mouse_down());
        assert_eq!(dispatcher.last_event(), Some(&press));
    }

    #[test]
    fn tool_changed_while_idle_synthesizes_nothing() {
        let (mut old_tool, old_calls) = ProbeTool::new();
        let (mut new_tool, new_calls) = ProbeTool::new();
        let (mut ctx, _) = EditorContext::new_headless();
        let mut dispatcher = EventDispatcher::new();

        dispatcher.tool_changed(&mut old_tool, &mut new_tool, &mut ctx);

        assert!(old_calls.lock().is_empty());
        assert!(new_calls.lock().is_empty());
        assert!(!dispatcher.is_mouse_down());
    }
}
