//! Input Module - crossterm event conversion and routing
//!
//! Bridges crossterm's event system with the keyboard and focus modules.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `poll_event` / `read_event` - Read terminal events
//! - `route_event` - Send an event to the focused component, then fall back
//!   to Tab focus cycling
//! - `on_paste` - Receive bracketed paste while a component has focus
//!
//! # Example
//!
//! ```ignore
//! use spark_datefield::state::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! loop {
//!     if let Some(event) = poll_event(Duration::from_millis(16))? {
//!         route_event(event);
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEventKind, KeyModifiers,
    KeyEvent as CrosstermKeyEvent,
    poll, read,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::focus;
use super::keyboard::{self, KeyboardEvent, KeyState, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Terminal events the widgets care about
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key press, repeat or release
    Key(KeyboardEvent),
    /// Bracketed paste
    Paste(String),
    /// Anything else (mouse, resize, focus reports)
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let mut modifiers = convert_modifiers(event.modifiers);

    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => {
            modifiers.shift = true;
            "Tab".to_string()
        }
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Insert => "Insert".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent { key, modifiers, state }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.intersects(KeyModifiers::META | KeyModifiers::SUPER),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(match read()? {
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Paste(text) => InputEvent::Paste(text),
        _ => InputEvent::None,
    })
}

// =============================================================================
// PASTE HANDLERS
// =============================================================================

type PasteHandler = Rc<dyn Fn(&str)>;

thread_local! {
    static PASTE_HANDLERS: RefCell<HashMap<usize, PasteHandler>> = RefCell::new(HashMap::new());
}

/// Receive pasted text while component `index` has focus.
/// Returns cleanup function.
pub fn on_paste<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&str) + 'static,
{
    PASTE_HANDLERS.with(|reg| {
        reg.borrow_mut().insert(index, Rc::new(handler));
    });

    move || {
        PASTE_HANDLERS.with(|reg| {
            reg.borrow_mut().remove(&index);
        });
    }
}

/// Deliver pasted text to the focused component. Returns true if delivered.
pub fn dispatch_paste(text: &str) -> bool {
    let focused = focus::get_focused_index();
    if focused < 0 {
        return false;
    }
    // Cloned out so the handler may register or remove handlers itself
    let handler = PASTE_HANDLERS.with(|reg| reg.borrow().get(&(focused as usize)).cloned());
    match handler {
        Some(handler) => {
            handler(text);
            true
        }
        None => false,
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route an event. Returns true if something handled it.
///
/// Unconsumed Tab presses cycle focus (Shift+Tab backwards).
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => {
            let is_tab = key.key == "Tab" && key.state != KeyState::Release;
            let backwards = key.modifiers.shift;
            if keyboard::dispatch(key) {
                return true;
            }
            if is_tab {
                return if backwards {
                    focus::focus_previous()
                } else {
                    focus::focus_next()
                };
            }
            false
        }
        InputEvent::Paste(text) => dispatch_paste(&text),
        InputEvent::None => false,
    }
}

/// Reset paste handlers (for testing)
pub fn reset_input_state() {
    PASTE_HANDLERS.with(|reg| reg.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::focus::{get_focused_index, register_focusable, reset_focus_state};
    use crossterm::event::KeyEventState;
    use std::rc::Rc;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn setup() {
        keyboard::reset_keyboard_state();
        reset_focus_state();
        reset_input_state();
    }

    #[test]
    fn test_convert_key_digit() {
        let event = convert_key_event(key(KeyCode::Char('7'), KeyModifiers::empty()));
        assert_eq!(event.key, "7");
        assert_eq!(event.state, KeyState::Press);
        assert_eq!(event.modifiers, Modifiers::none());
    }

    #[test]
    fn test_convert_editing_keys() {
        let cases = [
            (KeyCode::Backspace, "Backspace"),
            (KeyCode::Delete, "Delete"),
            (KeyCode::Left, "ArrowLeft"),
            (KeyCode::Right, "ArrowRight"),
            (KeyCode::Up, "ArrowUp"),
            (KeyCode::Down, "ArrowDown"),
            (KeyCode::Home, "Home"),
            (KeyCode::End, "End"),
            (KeyCode::Tab, "Tab"),
            (KeyCode::Esc, "Escape"),
            (KeyCode::F(5), "F5"),
        ];
        for (code, expected) in cases {
            assert_eq!(convert_key_event(key(code, KeyModifiers::empty())).key, expected);
        }
    }

    #[test]
    fn test_convert_backtab_is_shift_tab() {
        let event = convert_key_event(key(KeyCode::BackTab, KeyModifiers::empty()));
        assert_eq!(event.key, "Tab");
        assert!(event.modifiers.shift);
    }

    #[test]
    fn test_convert_modifiers_and_kind() {
        let mut raw = key(KeyCode::Char('v'), KeyModifiers::CONTROL | KeyModifiers::ALT);
        raw.kind = KeyEventKind::Release;
        let event = convert_key_event(raw);
        assert!(event.modifiers.ctrl);
        assert!(event.modifiers.alt);
        assert!(!event.modifiers.meta);
        assert_eq!(event.state, KeyState::Release);

        let event = convert_key_event(key(KeyCode::Char('v'), KeyModifiers::SUPER));
        assert!(event.modifiers.meta);
    }

    #[test]
    fn test_unconsumed_tab_cycles_focus() {
        setup();
        let _a = register_focusable(0, 0);
        let _b = register_focusable(1, 0);
        focus::focus(0);

        assert!(route_event(InputEvent::Key(KeyboardEvent::new("Tab"))));
        assert_eq!(get_focused_index(), 1);

        let shift_tab = convert_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert!(route_event(InputEvent::Key(shift_tab)));
        assert_eq!(get_focused_index(), 0);
    }

    #[test]
    fn test_consumed_tab_does_not_cycle() {
        setup();
        let _a = register_focusable(0, 0);
        let _b = register_focusable(1, 0);
        focus::focus(0);
        let _c = keyboard::on_focused(0, |event| event.key == "Tab");

        assert!(route_event(InputEvent::Key(KeyboardEvent::new("Tab"))));
        assert_eq!(get_focused_index(), 0);
    }

    #[test]
    fn test_paste_goes_to_focused_component() {
        setup();
        let _a = register_focusable(3, 0);
        let received = Rc::new(RefCell::new(String::new()));
        let sink = received.clone();
        let cleanup = on_paste(3, move |text| sink.borrow_mut().push_str(text));

        assert!(!route_event(InputEvent::Paste("12".into())));
        focus::focus(3);
        assert!(route_event(InputEvent::Paste("12".into())));
        assert_eq!(received.borrow().as_str(), "12");

        cleanup();
        assert!(!route_event(InputEvent::Paste("34".into())));
        assert!(!route_event(InputEvent::None));
    }

    #[test]
    fn test_paste_handler_may_register_handlers() {
        setup();
        let _a = register_focusable(0, 0);
        focus::focus(0);

        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        let _cleanup = on_paste(0, move |_text| {
            let sink = sink.clone();
            let _replaced = on_paste(0, move |text| sink.borrow_mut().push(format!("second {text}")));
        });

        assert!(route_event(InputEvent::Paste("01".into())));
        assert!(route_event(InputEvent::Paste("02".into())));
        assert_eq!(*received.borrow(), vec!["second 02".to_string()]);
    }
}
