use crate::context::EditorContext;
use crate::input::ToolEvent;

/// Outcome of offering an event to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResult {
    /// The handler took the event; no later handler sees it.
    Consumed,
    /// The handler declined; the chain moves on.
    Pass,
}

/// One interceptor in a tool's handler chain.
///
/// A handler that consumes a press is expected to keep consuming the
/// matching drags and the release, so gestures stay paired from a single
/// handler's point of view.
pub trait ToolHandler {
    fn handle_pressed(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult;
    fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult;
    fn handle_released(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult;
}

/// An ordered list of interceptors consulted before the tool's own
/// behavior, first match consumes.
///
/// The active tool itself is the chain's fixed tail: the dispatcher offers
/// an event to the chain and falls back to the tool only when every
/// interceptor passed.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn ToolHandler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handlers(handlers: Vec<Box<dyn ToolHandler>>) -> Self {
        Self { handlers }
    }

    pub fn push(&mut self, handler: Box<dyn ToolHandler>) {
        self.handlers.push(handler);
    }

    pub fn handle_pressed(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        self.offer(event, ctx, |h, e, c| h.handle_pressed(e, c))
    }

    pub fn handle_dragged(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        self.offer(event, ctx, |h, e, c| h.handle_dragged(e, c))
    }

    pub fn handle_released(&mut self, event: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
        self.offer(event, ctx, |h, e, c| h.handle_released(e, c))
    }

    fn offer(
        &mut self,
        event: &ToolEvent,
        ctx: &mut EditorContext,
        mut call: impl FnMut(&mut dyn ToolHandler, &ToolEvent, &mut EditorContext) -> HandlerResult,
    ) -> HandlerResult {
        for handler in &mut self.handlers {
            if call(handler.as_mut(), event, ctx) == HandlerResult::Consumed {
                return HandlerResult::Consumed;
            }
        }
        HandlerResult::Pass
    }
}

impl std::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerChain")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;
    use std::sync::Arc;

    use parking_lot::Mutex;

    struct Probe {
        name: &'static str,
        consume: bool,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ToolHandler for Probe {
        fn handle_pressed(&mut self, _e: &ToolEvent, _ctx: &mut EditorContext) -> HandlerResult {
            self.seen.lock().push(self.name);
            if self.consume {
                HandlerResult::Consumed
            } else {
                HandlerResult::Pass
            }
        }

        fn handle_dragged(&mut self, e: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
            self.handle_pressed(e, ctx)
        }

        fn handle_released(&mut self, e: &ToolEvent, ctx: &mut EditorContext) -> HandlerResult {
            self.handle_pressed(e, ctx)
        }
    }

    #[test]
    fn first_match_consumes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = HandlerChain::with_handlers(vec![
            Box::new(Probe {
                name: "a",
                consume: false,
                seen: seen.clone(),
            }),
            Box::new(Probe {
                name: "b",
                consume: true,
                seen: seen.clone(),
            }),
            Box::new(Probe {
                name: "c",
                consume: true,
                seen: seen.clone(),
            }),
        ]);
        let (mut ctx, _) = EditorContext::new_headless();

        let result = chain.handle_pressed(&ToolEvent::at(Pos2::ZERO), &mut ctx);
        assert_eq!(result, HandlerResult::Consumed);
        assert_eq!(*seen.lock(), vec!["a", "b"]);
    }

    #[test]
    fn all_pass_falls_through() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = HandlerChain::with_handlers(vec![Box::new(Probe {
            name: "a",
            consume: false,
            seen: seen.clone(),
        })]);
        let (mut ctx, _) = EditorContext::new_headless();

        let result = chain.handle_released(&ToolEvent::at(Pos2::ZERO), &mut ctx);
        assert_eq!(result, HandlerResult::Pass);
    }
}
