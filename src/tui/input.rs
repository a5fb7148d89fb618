// Polls terminal input and resolves it into canvas intents.
// Mouse clicks are "taps", dragging re-rolls which sound lives under the
// pointer, and printable keys go through the pack's key mappings.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::shared::CanvasIntent;

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Intent(CanvasIntent),
    Quit,
}

/// Poll for one input event, mapping it against the current screen size
/// (in terminal cells).
pub fn poll_input(timeout: Duration, screen: (u16, u16)) -> anyhow::Result<Vec<UiEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    let (screen_w, screen_h) = (screen.0 as f32, screen.1 as f32);
    match event::read()? {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return Ok(vec![]);
            }
            Ok(match key.code {
                KeyCode::Esc => vec![UiEvent::Quit],
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    vec![UiEvent::Quit]
                }
                KeyCode::Char(c) if c.is_alphanumeric() => {
                    vec![UiEvent::Intent(CanvasIntent::KeyPress(c))]
                }
                _ => vec![],
            })
        }
        Event::Mouse(mouse) => Ok(match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                vec![UiEvent::Intent(CanvasIntent::TapPad {
                    x: mouse.column as f32,
                    y: mouse.row as f32,
                    screen_w,
                    screen_h,
                    pointer_id: 0,
                })]
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                vec![UiEvent::Intent(CanvasIntent::RotateSound {
                    x: mouse.column as f32,
                    y: mouse.row as f32,
                    screen_w,
                    screen_h,
                })]
            }
            _ => vec![],
        }),
        _ => Ok(vec![]),
    }
}
