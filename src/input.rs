use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

use crate::view::View;

/// Maximum press-to-release travel (in screen points) still counted as a click.
const CLICK_SLOP: f32 = 4.0;

/// A pointer event as the tools see it: raw screen position, the same
/// position mapped through the view into canvas space, and the keyboard
/// state at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolEvent {
    pub pos: Pos2,
    pub canvas_pos: Pos2,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub space_down: bool,
}

impl ToolEvent {
    /// A plain primary-button event with identical screen and canvas
    /// coordinates. Convenient for tests and synthetic input.
    pub fn at(pos: Pos2) -> Self {
        Self {
            pos,
            canvas_pos: pos,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
            space_down: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_space_down(mut self) -> Self {
        self.space_down = true;
        self
    }
}

/// A classified pointer notification, ready for the event dispatcher.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Pressed(ToolEvent),
    Released(ToolEvent),
    Dragged(ToolEvent),
    Clicked(ToolEvent),
    Moved(ToolEvent),
    Entered(ToolEvent),
    Exited(ToolEvent),
}

/// Turns raw egui input into the pointer events the dispatcher consumes.
///
/// Presses are only recognized inside the canvas rect: a press that lands
/// on some other widget never reaches the dispatcher, which is exactly the
/// lost-press case its drag recovery exists for. Drags are forwarded only
/// when the gesture belongs to the canvas (its press was seen here, or the
/// button went down inside the canvas rect), so a drag that started on a
/// side-panel widget can never trigger the recovery. Releases always pass
/// through; the dispatcher ignores the unmatched ones itself.
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    primary_down: bool,
    press_pos: Option<Pos2>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_pointer_pos: None,
            primary_down: false,
            press_pos: None,
        }
    }

    pub fn process(&mut self, ctx: &Context, view: &View, canvas_rect: Rect) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let modifiers = input.modifiers;
            let space_down = input.key_down(Key::Space);
            let make = |pos: Pos2| ToolEvent {
                pos,
                canvas_pos: view.screen_to_canvas(pos, canvas_rect),
                button: PointerButton::Primary,
                modifiers,
                space_down,
            };

            let hover = input.pointer.hover_pos();
            match (hover, self.last_pointer_pos) {
                (Some(pos), None) => events.push(PointerEvent::Entered(make(pos))),
                (None, Some(last)) => events.push(PointerEvent::Exited(make(last))),
                _ => {}
            }

            if let Some(pos) = hover {
                if input.pointer.button_pressed(PointerButton::Primary)
                    && canvas_rect.contains(pos)
                {
                    self.primary_down = true;
                    self.press_pos = Some(pos);
                    events.push(PointerEvent::Pressed(make(pos)));
                }

                if Some(pos) != self.last_pointer_pos {
                    if input.pointer.button_down(PointerButton::Primary) {
                        let canvas_gesture = self.primary_down
                            || input
                                .pointer
                                .press_origin()
                                .is_some_and(|origin| canvas_rect.contains(origin));
                        if canvas_gesture {
                            events.push(PointerEvent::Dragged(make(pos)));
                        }
                    } else {
                        events.push(PointerEvent::Moved(make(pos)));
                    }
                }

                if input.pointer.button_released(PointerButton::Primary) {
                    let had_press = self.primary_down;
                    self.primary_down = false;
                    events.push(PointerEvent::Released(make(pos)));
                    let was_click = had_press
                        && self
                            .press_pos
                            .take()
                            .is_some_and(|press| press.distance(pos) <= CLICK_SLOP);
                    if was_click {
                        events.push(PointerEvent::Clicked(make(pos)));
                    }
                }
            }

            self.last_pointer_pos = hover;
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{vec2, Event, RawInput};

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0))
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn frame(
        ctx: &egui::Context,
        handler: &mut InputHandler,
        raw_events: Vec<Event>,
    ) -> Vec<PointerEvent> {
        let mut out = Vec::new();
        let raw = RawInput {
            events: raw_events,
            ..Default::default()
        };
        let _ = ctx.run(raw, |ctx| {
            out = handler.process(ctx, &View::new(), canvas());
        });
        out
    }

    fn count(events: &[PointerEvent], f: impl Fn(&PointerEvent) -> bool) -> usize {
        events.iter().filter(|e| f(*e)).count()
    }

    #[test]
    fn canvas_gesture_classifies_press_drag_release() {
        let ctx = egui::Context::default();
        let mut handler = InputHandler::new();

        let a = frame(
            &ctx,
            &mut handler,
            vec![
                Event::PointerMoved(Pos2::new(100.0, 100.0)),
                button(Pos2::new(100.0, 100.0), true),
            ],
        );
        assert_eq!(count(&a, |e| matches!(e, PointerEvent::Pressed(_))), 1);

        let b = frame(
            &ctx,
            &mut handler,
            vec![Event::PointerMoved(Pos2::new(150.0, 100.0))],
        );
        assert_eq!(count(&b, |e| matches!(e, PointerEvent::Dragged(_))), 1);

        let c = frame(&ctx, &mut handler, vec![button(Pos2::new(150.0, 100.0), false)]);
        assert_eq!(count(&c, |e| matches!(e, PointerEvent::Released(_))), 1);
        // Too much travel for a click.
        assert_eq!(count(&c, |e| matches!(e, PointerEvent::Clicked(_))), 0);
    }

    #[test]
    fn short_canvas_gesture_is_also_a_click() {
        let ctx = egui::Context::default();
        let mut handler = InputHandler::new();

        frame(
            &ctx,
            &mut handler,
            vec![
                Event::PointerMoved(Pos2::new(50.0, 50.0)),
                button(Pos2::new(50.0, 50.0), true),
            ],
        );
        let release = frame(&ctx, &mut handler, vec![button(Pos2::new(51.0, 50.0), false)]);
        assert_eq!(count(&release, |e| matches!(e, PointerEvent::Clicked(_))), 1);
    }

    #[test]
    fn panel_gesture_produces_no_press_or_drag_and_one_release() {
        let ctx = egui::Context::default();
        let mut handler = InputHandler::new();
        let outside = Pos2::new(500.0, 150.0);

        let mut all = frame(
            &ctx,
            &mut handler,
            vec![Event::PointerMoved(outside), button(outside, true)],
        );
        // Held drag that crosses into the canvas rect.
        all.extend(frame(
            &ctx,
            &mut handler,
            vec![Event::PointerMoved(Pos2::new(300.0, 150.0))],
        ));
        all.extend(frame(
            &ctx,
            &mut handler,
            vec![button(Pos2::new(300.0, 150.0), false)],
        ));

        assert_eq!(count(&all, |e| matches!(e, PointerEvent::Pressed(_))), 0);
        assert_eq!(count(&all, |e| matches!(e, PointerEvent::Dragged(_))), 0);
        assert_eq!(count(&all, |e| matches!(e, PointerEvent::Released(_))), 1);
        assert_eq!(count(&all, |e| matches!(e, PointerEvent::Clicked(_))), 0);
    }

    #[test]
    fn panel_gesture_does_not_wedge_the_dispatcher() {
        use crate::context::EditorContext;
        use crate::tools::Tools;

        let ctx = egui::Context::default();
        let mut handler = InputHandler::new();
        let mut tools = Tools::new();
        let (mut editor, _) = EditorContext::new_headless();
        let outside = Pos2::new(500.0, 150.0);

        // A gesture that starts on a side panel and wanders over the canvas.
        let mut all = frame(
            &ctx,
            &mut handler,
            vec![Event::PointerMoved(outside), button(outside, true)],
        );
        all.extend(frame(
            &ctx,
            &mut handler,
            vec![Event::PointerMoved(Pos2::new(300.0, 150.0))],
        ));
        all.extend(frame(
            &ctx,
            &mut handler,
            vec![button(Pos2::new(300.0, 150.0), false)],
        ));

        // A genuine canvas gesture afterwards.
        all.extend(frame(
            &ctx,
            &mut handler,
            vec![
                Event::PointerMoved(Pos2::new(100.0, 100.0)),
                button(Pos2::new(100.0, 100.0), true),
            ],
        ));
        all.extend(frame(
            &ctx,
            &mut handler,
            vec![Event::PointerMoved(Pos2::new(150.0, 100.0))],
        ));
        all.extend(frame(
            &ctx,
            &mut handler,
            vec![button(Pos2::new(150.0, 100.0), false)],
        ));

        for event in all {
            tools.dispatch(event, &mut editor);
        }

        // The panel gesture left nothing behind; the canvas gesture painted.
        assert!(!tools.dispatcher().is_mouse_down());
        let elements = editor.document.active_layer().unwrap().elements().unwrap();
        assert_eq!(elements.len(), 1);
    }
}
