//! Focus System - which component receives keystrokes
//!
//! Manages focus state and navigation:
//! - `focused_index` signal (currently focused component)
//! - Focusable registry ordered by tab index
//! - Focus cycling (Tab/Shift+Tab)
//! - Focus callbacks (onFocus/onBlur)
//!
//! # Example
//!
//! ```ignore
//! use spark_datefield::state::focus;
//!
//! let unregister = focus::register_focusable(index, 0);
//! let cleanup = focus::register_callbacks(index, FocusCallbacks {
//!     on_focus: Some(Rc::new(|| println!("Focused!"))),
//!     on_blur: None,
//! });
//!
//! focus::focus(index);
//! focus::focus_next();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use spark_signals::{signal, Signal};

// =============================================================================
// FOCUSED INDEX SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_INDEX: Signal<i32> = signal(-1);
}

/// Get the currently focused component index (-1 if none)
pub fn get_focused_index() -> i32 {
    FOCUSED_INDEX.with(|s| s.get())
}

/// Check if any component is focused
pub fn has_focus() -> bool {
    get_focused_index() >= 0
}

/// Check if specific component is focused
pub fn is_focused(index: usize) -> bool {
    get_focused_index() == index as i32
}

// =============================================================================
// FOCUSABLE REGISTRY
// =============================================================================

thread_local! {
    /// (index, tab_index) of every focusable component.
    static FOCUSABLES: RefCell<Vec<(usize, i32)>> = const { RefCell::new(Vec::new()) };
}

/// Make a component focusable. Returns cleanup function.
///
/// Unregistering the focused component also clears focus.
pub fn register_focusable(index: usize, tab_index: i32) -> impl FnOnce() {
    FOCUSABLES.with(|list| {
        let mut list = list.borrow_mut();
        list.retain(|(i, _)| *i != index);
        list.push((index, tab_index));
    });

    move || {
        FOCUSABLES.with(|list| list.borrow_mut().retain(|(i, _)| *i != index));
        if is_focused(index) {
            set_focus_with_callbacks(-1);
        }
    }
}

/// Check whether a component is registered as focusable
pub fn is_focusable(index: usize) -> bool {
    FOCUSABLES.with(|list| list.borrow().iter().any(|(i, _)| *i == index))
}

/// Get all focusable component indices, sorted by tabIndex
pub fn get_focusable_indices() -> Vec<usize> {
    let mut entries = FOCUSABLES.with(|list| list.borrow().clone());
    // Same tabIndex keeps index order
    entries.sort_by_key(|&(index, tab)| (tab, index));
    entries.into_iter().map(|(index, _)| index).collect()
}

// =============================================================================
// FOCUS CALLBACKS
// =============================================================================

/// Callbacks fired when focus changes
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus: Option<Rc<dyn Fn()>>,
    pub on_blur: Option<Rc<dyn Fn()>>,
}

thread_local! {
    // Several callbacks per index (widget internals + user callback)
    static FOCUS_CALLBACK_REGISTRY: RefCell<HashMap<usize, Vec<(usize, FocusCallbacks)>>> =
        RefCell::new(HashMap::new());
    static NEXT_CALLBACK_ID: RefCell<usize> = const { RefCell::new(0) };
}

/// Register focus callbacks for a component.
/// Returns cleanup function to unregister.
pub fn register_callbacks(index: usize, callbacks: FocusCallbacks) -> impl FnOnce() {
    let id = NEXT_CALLBACK_ID.with(|next| {
        let mut next = next.borrow_mut();
        let id = *next;
        *next += 1;
        id
    });

    FOCUS_CALLBACK_REGISTRY.with(|reg| {
        reg.borrow_mut().entry(index).or_default().push((id, callbacks));
    });

    move || {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(list) = reg.get_mut(&index) {
                list.retain(|(cb_id, _)| *cb_id != id);
                if list.is_empty() {
                    reg.remove(&index);
                }
            }
        });
    }
}

/// Snapshot the callbacks so they run without the registry borrowed.
fn callbacks_for(index: usize, pick: fn(&FocusCallbacks) -> Option<Rc<dyn Fn()>>) -> Vec<Rc<dyn Fn()>> {
    FOCUS_CALLBACK_REGISTRY.with(|reg| {
        reg.borrow()
            .get(&index)
            .map(|list| list.iter().filter_map(|(_, cb)| pick(cb)).collect())
            .unwrap_or_default()
    })
}

/// Internal: Set focus and fire callbacks at the source
fn set_focus_with_callbacks(new_index: i32) {
    let old_index = get_focused_index();
    if old_index == new_index {
        return;
    }

    if old_index >= 0 {
        for on_blur in callbacks_for(old_index as usize, |cb| cb.on_blur.clone()) {
            on_blur();
        }
    }

    FOCUSED_INDEX.with(|s| s.set(new_index));

    if new_index >= 0 {
        for on_focus in callbacks_for(new_index as usize, |cb| cb.on_focus.clone()) {
            on_focus();
        }
    }
}

// =============================================================================
// FOCUS NAVIGATION
// =============================================================================

/// Find next focusable component, wrapping around
fn find_next_focusable(from_index: i32, direction: i32) -> i32 {
    let focusables = get_focusable_indices();
    if focusables.is_empty() {
        return -1;
    }

    let current_pos = if from_index >= 0 {
        focusables.iter().position(|&i| i == from_index as usize)
    } else {
        None
    };

    match current_pos {
        None if direction == 1 => focusables[0] as i32,
        None => focusables[focusables.len() - 1] as i32,
        Some(pos) => {
            let len = focusables.len() as i32;
            let next_pos = ((pos as i32 + direction) % len + len) % len;
            focusables[next_pos as usize] as i32
        }
    }
}

/// Move focus to next focusable component
pub fn focus_next() -> bool {
    let current = get_focused_index();
    let next = find_next_focusable(current, 1);
    if next != -1 && next != current {
        set_focus_with_callbacks(next);
        return true;
    }
    false
}

/// Move focus to previous focusable component
pub fn focus_previous() -> bool {
    let current = get_focused_index();
    let prev = find_next_focusable(current, -1);
    if prev != -1 && prev != current {
        set_focus_with_callbacks(prev);
        return true;
    }
    false
}

/// Focus a specific component by index
pub fn focus(index: usize) -> bool {
    if !is_focusable(index) {
        return false;
    }
    set_focus_with_callbacks(index as i32);
    true
}

/// Clear focus (no component focused)
pub fn blur() {
    set_focus_with_callbacks(-1);
}

// =============================================================================
// RESET (for testing)
// =============================================================================

/// Reset all focus state (for testing)
pub fn reset_focus_state() {
    FOCUS_CALLBACK_REGISTRY.with(|reg| reg.borrow_mut().clear());
    FOCUSABLES.with(|list| list.borrow_mut().clear());
    FOCUSED_INDEX.with(|s| s.set(-1));
}

// =============================================================================
// TESTS
// =============================================================================
