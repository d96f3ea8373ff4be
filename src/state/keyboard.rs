//! Keyboard Module - key event types and handler routing
//!
//! Events go to the handlers of the focused component first, then to global
//! handlers. A handler returns true to consume the event and stop routing.
//!
//! # API
//!
//! - `last_event` / `last_key` - Most recent event (reactive)
//! - `on(handler)` - Subscribe to every event not consumed by the focused component
//! - `on_focused(i, fn)` - Subscribe while component i has focus
//! - `dispatch(event)` - Route an event
//!
//! # Example
//!
//! ```ignore
//! use spark_datefield::state::keyboard;
//!
//! let cleanup = keyboard::on_focused(index, |event| {
//!     event.key == "Enter"
//! });
//!
//! keyboard::dispatch(KeyboardEvent::new("Enter"));
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use spark_signals::{signal, Signal};

use super::focus;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// Key name in DOM style: "a", "7", "Enter", "ArrowLeft", "Backspace"
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Rc<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

#[derive(Default)]
struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    focused_handlers: HashMap<usize, Vec<(usize, KeyHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::default());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Route a keyboard event: focused component first, then global handlers.
/// Returns true if any handler consumed the event.
///
/// Release events only update `last_event`. Repeats are routed so held
/// keys keep typing.
pub fn dispatch(event: KeyboardEvent) -> bool {
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    if event.state == KeyState::Release {
        return false;
    }

    dispatch_focused(focus::get_focused_index(), &event) || dispatch_global(&event)
}

/// Dispatch to the handlers of one component. Returns true if consumed.
pub fn dispatch_focused(focused_index: i32, event: &KeyboardEvent) -> bool {
    if focused_index < 0 || event.state == KeyState::Release {
        return false;
    }

    let handlers = REGISTRY.with(|reg| {
        reg.borrow()
            .focused_handlers
            .get(&(focused_index as usize))
            .map(|handlers| snapshot(handlers))
            .unwrap_or_default()
    });
    handlers.iter().any(|handler| handler(event))
}

fn dispatch_global(event: &KeyboardEvent) -> bool {
    let handlers = REGISTRY.with(|reg| snapshot(&reg.borrow().global_handlers));
    handlers.iter().any(|handler| handler(event))
}

/// Clone handlers out so they run without the registry borrowed.
fn snapshot(handlers: &[(usize, KeyHandler)]) -> Vec<KeyHandler> {
    handlers.iter().map(|(_, handler)| handler.clone()).collect()
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to events the focused component did not consume.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global_handlers.push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            reg.borrow_mut()
                .global_handlers
                .retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Subscribe to events while a specific component has focus.
/// Returns cleanup function.
pub fn on_focused<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.focused_handlers
            .entry(index)
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.focused_handlers.get_mut(&index) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.focused_handlers.remove(&index);
                }
            }
        });
    }
}

/// Drop all handlers of a released component.
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().focused_handlers.remove(&index);
    });
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| {
        *reg.borrow_mut() = HandlerRegistry::default();
    });
    LAST_EVENT.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::focus::{focus, register_focusable, reset_focus_state};
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_keyboard_state();
        reset_focus_state();
    }

    fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        (count.clone(), count)
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert!(last_event().is_none());
        assert_eq!(last_key(), "");
    }

    #[test]
    fn test_dispatch_updates_last_event() {
        setup();

        dispatch(KeyboardEvent::new("1"));
        assert_eq!(last_key(), "1");

        let mut release = KeyboardEvent::new("Backspace");
        release.state = KeyState::Release;
        dispatch(release);
        assert_eq!(last_key(), "Backspace");
    }

    #[test]
    fn test_focused_handler_only_when_focused() {
        setup();
        let _f3 = register_focusable(3, 0);
        let _f5 = register_focusable(5, 0);

        let (count, seen) = counter();
        let cleanup = on_focused(5, move |_| {
            count.set(count.get() + 1);
            true
        });

        focus(3);
        assert!(!dispatch(KeyboardEvent::new("a")));
        assert_eq!(seen.get(), 0);

        focus(5);
        assert!(dispatch(KeyboardEvent::new("a")));
        assert_eq!(seen.get(), 1);

        cleanup();
        assert!(!dispatch(KeyboardEvent::new("a")));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_focused_consumption_stops_global() {
        setup();
        let _f = register_focusable(0, 0);
        focus(0);

        let _c1 = on_focused(0, |event| event.key == "1");
        let (count, seen) = counter();
        let _c2 = on(move |_| {
            count.set(count.get() + 1);
            false
        });

        dispatch(KeyboardEvent::new("1"));
        assert_eq!(seen.get(), 0);

        dispatch(KeyboardEvent::new("Tab"));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_release_not_routed_repeat_routed() {
        setup();
        let _f = register_focusable(0, 0);
        focus(0);

        let (count, seen) = counter();
        let _cleanup = on_focused(0, move |_| {
            count.set(count.get() + 1);
            false
        });

        let mut event = KeyboardEvent::new("2");
        event.state = KeyState::Repeat;
        dispatch(event.clone());
        assert_eq!(seen.get(), 1);

        event.state = KeyState::Release;
        dispatch(event);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_cleanup_index() {
        setup();
        let _f = register_focusable(2, 0);
        focus(2);

        let _c = on_focused(2, |_| true);
        assert!(dispatch(KeyboardEvent::new("x")));

        cleanup_index(2);
        assert!(!dispatch(KeyboardEvent::new("x")));
    }

    #[test]
    fn test_modifiers() {
        setup();

        let (count, seen) = counter();
        let _cleanup = on(move |event| {
            if event.modifiers.ctrl && event.key == "c" {
                count.set(count.get() + 1);
            }
            false
        });

        dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
        dispatch(KeyboardEvent::new("c"));
        assert_eq!(seen.get(), 1);
        assert!(!KeyboardEvent::with_modifiers("c", Modifiers::none()).modifiers.ctrl);
    }

    #[test]
    fn test_handler_may_change_registry() {
        setup();
        let _f = register_focusable(0, 0);
        focus(0);

        let (count, seen) = counter();
        let _c = on_focused(0, move |_| {
            cleanup_index(0);
            let count = count.clone();
            let _global = on(move |_| {
                count.set(count.get() + 1);
                true
            });
            true
        });

        assert!(dispatch(KeyboardEvent::new("1")));
        assert_eq!(seen.get(), 0);

        // Focused handler removed itself; the global one it added now runs
        assert!(dispatch(KeyboardEvent::new("1")));
        assert_eq!(seen.get(), 1);
    }
}
