use egui::{Context, Key, LayerId, Pos2, Rect};

use crate::canvas::CanvasEngine;

/// Canvas-level events distilled from raw egui input.
///
/// Positions are in buffer pixel space (relative to the canvas origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    /// Primary button pressed on the canvas, with nothing drawn above it
    PointerDown { pos: Pos2, shift: bool },
    /// Pointer moved, with or without the primary button held
    PointerMove { pos: Pos2, primary_held: bool },
    /// Primary button released anywhere
    PointerUp,
    Undo,
    Redo,
}

impl CanvasInput {
    /// Forwards the event to the engine
    pub fn apply(self, engine: &mut CanvasEngine) {
        match self {
            Self::PointerDown { pos, shift } => engine.stroke_start(pos, shift),
            Self::PointerMove { pos, primary_held } => engine.stroke_move(pos, primary_held),
            Self::PointerUp => engine.stroke_end(),
            Self::Undo => engine.undo(),
            Self::Redo => engine.redo(),
        }
    }
}

/// Converts egui's per-frame input into [`CanvasInput`] events
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    /// Layer the canvas is painted on; presses over any other layer are not strokes
    canvas_layer: LayerId,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            canvas_layer: LayerId::background(),
        }
    }

    /// Update where the canvas is (e.g. if window is resized)
    pub fn set_canvas(&mut self, rect: Rect, layer: LayerId) {
        self.canvas_rect = rect;
        self.canvas_layer = layer;
    }

    /// Screen position to buffer pixel space
    pub fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Reads this frame's input, in press, move, release order
    pub fn process_input(&mut self, ctx: &Context) -> Vec<CanvasInput> {
        let mut events = Vec::new();
        let mut press = None;
        // must be read outside `ctx.input`, which holds the context lock
        let typing = ctx.wants_keyboard_input();

        ctx.input(|input| {
            let pointer = &input.pointer;

            if pointer.primary_pressed() {
                if let Some(pos) = pointer.interact_pos() {
                    if self.canvas_rect.contains(pos) {
                        press = Some((pos, input.modifiers.shift));
                    }
                }
            }

            if let Some(pos) = pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    events.push(CanvasInput::PointerMove {
                        pos: self.to_canvas(pos),
                        primary_held: pointer.primary_down(),
                    });
                }
                self.last_pointer_pos = Some(pos);
            }

            if pointer.primary_released() {
                events.push(CanvasInput::PointerUp);
            }

            if input.modifiers.command && !typing {
                if input.key_pressed(Key::Z) {
                    events.push(if input.modifiers.shift {
                        CanvasInput::Redo
                    } else {
                        CanvasInput::Undo
                    });
                } else if input.key_pressed(Key::Y) {
                    events.push(CanvasInput::Redo);
                }
            }
        });

        if let Some((pos, shift)) = press {
            if self.is_canvas_on_top(ctx, pos) {
                let pos = self.to_canvas(pos);
                events.insert(0, CanvasInput::PointerDown { pos, shift });
            } else {
                log::trace!("Press at {:?} landed on another layer", pos);
            }
        }

        events
    }

    /// False when a popup or window covers `pos`
    fn is_canvas_on_top(&self, ctx: &Context, pos: Pos2) -> bool {
        ctx.layer_id_at(pos).is_none_or(|layer| layer == self.canvas_layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{
        Area, CentralPanel, Color32, Event, Id, Modifiers, Order, PointerButton, RawInput, pos2,
        vec2,
    };

    fn run_frame(handler: &mut InputHandler, ctx: &Context, raw: RawInput) -> Vec<CanvasInput> {
        let mut events = Vec::new();
        let _ = ctx.run(raw, |ctx| events = handler.process_input(ctx));
        events
    }

    fn press_at(pos: Pos2) -> RawInput {
        RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(400.0, 400.0))),
            events: vec![
                Event::PointerMoved(pos),
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
            ],
            ..Default::default()
        }
    }

    fn ctrl_z() -> RawInput {
        RawInput {
            modifiers: Modifiers::COMMAND,
            events: vec![Event::Key {
                key: Key::Z,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: Modifiers::COMMAND,
            }],
            ..Default::default()
        }
    }

    // Runs a frame with the canvas in a central panel and a popup
    // covering (20, 20)..(120, 120) above it
    fn run_frame_with_popup(
        handler: &mut InputHandler,
        ctx: &Context,
        raw: RawInput,
    ) -> Vec<CanvasInput> {
        let mut events = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                handler.set_canvas(ui.max_rect(), ui.layer_id());
            });
            Area::new(Id::new("color_popup"))
                .order(Order::Foreground)
                .fixed_pos(pos2(20.0, 20.0))
                .show(ctx, |ui| {
                    ui.allocate_space(vec2(100.0, 100.0));
                });
            events = handler.process_input(ctx);
        });
        events
    }

    fn has_press(events: &[CanvasInput]) -> bool {
        events
            .iter()
            .any(|e| matches!(e, CanvasInput::PointerDown { .. }))
    }

    // Settles one frame with the popup shown, then presses at `pos`
    fn press_with_popup(pos: Pos2) -> Vec<CanvasInput> {
        let ctx = Context::default();
        let mut handler = InputHandler::new(Rect::NOTHING);
        let settle = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(400.0, 400.0))),
            ..Default::default()
        };
        run_frame_with_popup(&mut handler, &ctx, settle);
        run_frame_with_popup(&mut handler, &ctx, press_at(pos))
    }

    #[test]
    fn test_press_on_popup_is_not_a_stroke() {
        let events = press_with_popup(pos2(50.0, 50.0));
        assert!(!has_press(&events), "{events:?}");
    }

    #[test]
    fn test_press_beside_popup_is_a_stroke() {
        let events = press_with_popup(pos2(300.0, 300.0));
        assert!(has_press(&events), "{events:?}");
    }

    #[test]
    fn test_shortcuts_ignored_while_typing() {
        let ctx = Context::default();
        let mut handler = InputHandler::new(Rect::NOTHING);
        let mut text = String::new();
        let mut frame = |raw: RawInput| {
            let mut events = Vec::new();
            let _ = ctx.run(raw, |ctx| {
                CentralPanel::default().show(ctx, |ui| {
                    ui.text_edit_singleline(&mut text).request_focus();
                });
                events = handler.process_input(ctx);
            });
            events
        };

        frame(RawInput::default());
        let events = frame(ctrl_z());
        assert!(!events.contains(&CanvasInput::Undo), "{events:?}");
    }

    #[test]
    fn test_ctrl_z_undoes() {
        let ctx = Context::default();
        let mut handler = InputHandler::new(Rect::NOTHING);
        let events = run_frame(&mut handler, &ctx, ctrl_z());
        assert!(events.contains(&CanvasInput::Undo), "{events:?}");
    }

    #[test]
    fn test_to_canvas_offsets_by_origin() {
        let handler = InputHandler::new(Rect::from_min_size(pos2(10.0, 40.0), vec2(100.0, 100.0)));
        assert_eq!(handler.to_canvas(pos2(15.0, 42.0)), pos2(5.0, 2.0));
    }

    #[test]
    fn test_press_with_shift_inside_canvas() {
        let ctx = Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 20.0), vec2(200.0, 200.0));
        let mut handler = InputHandler::new(rect);
        let pos = pos2(50.0, 70.0);
        let raw = RawInput {
            modifiers: Modifiers::SHIFT,
            events: vec![
                Event::PointerMoved(pos),
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::SHIFT,
                },
            ],
            ..Default::default()
        };

        let events = run_frame(&mut handler, &ctx, raw);
        assert_eq!(
            events.first(),
            Some(&CanvasInput::PointerDown {
                pos: pos2(50.0, 50.0),
                shift: true
            })
        );
    }

    #[test]
    fn test_press_outside_canvas_is_dropped() {
        let ctx = Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 100.0), vec2(50.0, 50.0));
        let mut handler = InputHandler::new(rect);
        let pos = pos2(10.0, 10.0);
        let raw = RawInput {
            events: vec![
                Event::PointerMoved(pos),
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
            ],
            ..Default::default()
        };

        let events = run_frame(&mut handler, &ctx, raw);
        assert!(!has_press(&events));
    }

    #[test]
    fn test_apply_drives_engine() {
        let mut engine = CanvasEngine::new(40, 40);
        engine.set_tool(Color32::RED, 3);

        let down = CanvasInput::PointerDown {
            pos: pos2(5.0, 5.0),
            shift: false,
        };
        let drag = CanvasInput::PointerMove {
            pos: pos2(30.0, 5.0),
            primary_held: true,
        };
        down.apply(&mut engine);
        drag.apply(&mut engine);
        CanvasInput::PointerUp.apply(&mut engine);
        assert_eq!(engine.history_len(), 2);
        assert_eq!(engine.buffer().pixel(20, 5), Some([255, 0, 0, 255]));

        CanvasInput::Undo.apply(&mut engine);
        assert_eq!(engine.history_cursor(), 0);
        CanvasInput::Redo.apply(&mut engine);
        assert_eq!(engine.history_cursor(), 1);
    }
}
