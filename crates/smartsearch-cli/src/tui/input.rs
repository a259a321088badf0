//! Input handling for the search box
//!
//! Maps crossterm key events to search box actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use smartsearch_core::NavKey;

/// Actions that can be performed from keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    InsertChar(char),
    DeleteChar,
    Clear,
    /// Published on the event bus rather than sent to the controller
    Navigate(NavKey),
    ToggleTheme,
    Exit,
    None,
}

/// Map a crossterm key event to a search box action
pub fn map_key_event(event: &KeyEvent) -> InputAction {
    if event.kind == KeyEventKind::Release {
        return InputAction::None;
    }

    match (event.code, event.modifiers) {
        (KeyCode::Char('c') | KeyCode::Char('q'), KeyModifiers::CONTROL) => InputAction::Exit,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => InputAction::Clear,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => InputAction::ToggleTheme,

        (KeyCode::Up, _) => InputAction::Navigate(NavKey::ArrowUp),
        (KeyCode::Down, _) => InputAction::Navigate(NavKey::ArrowDown),
        (KeyCode::Enter, _) => InputAction::Navigate(NavKey::Enter),
        (KeyCode::Esc, _) => InputAction::Navigate(NavKey::Escape),

        (KeyCode::Backspace, _) => InputAction::DeleteChar,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => InputAction::InsertChar(c),

        _ => InputAction::None,
    }
}
