use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use crate::news::Category;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Intents (translated into core::Action)
    Quit,
    ForceQuit,
    Category(Category),
    NextCategory,
    PreviousCategory,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    JumpToPage(u32),

    // TUI-local events (handled directly in TUI)
    CursorUp,
    CursorDown,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    Open,
    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event with timeout
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => translate(event),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('b')) => Some(TuiEvent::Category(Category::Business)),
                (_, KeyCode::Char('t')) => Some(TuiEvent::Category(Category::Technology)),
                (_, KeyCode::Char('e')) => Some(TuiEvent::Category(Category::Entertainment)),
                (_, KeyCode::Tab) => Some(TuiEvent::NextCategory),
                (_, KeyCode::BackTab) => Some(TuiEvent::PreviousCategory),
                (_, KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']')) => {
                    Some(TuiEvent::NextPage)
                }
                (_, KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[')) => {
                    Some(TuiEvent::PreviousPage)
                }
                (_, KeyCode::Home) => Some(TuiEvent::FirstPage),
                (_, KeyCode::End) => Some(TuiEvent::LastPage),
                (_, KeyCode::Char(c @ '1'..='9')) => c.to_digit(10).map(TuiEvent::JumpToPage),
                (_, KeyCode::Up | KeyCode::Char('k')) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down | KeyCode::Char('j')) => Some(TuiEvent::CursorDown),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                (_, KeyCode::Enter | KeyCode::Char('o')) => Some(TuiEvent::Open),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
