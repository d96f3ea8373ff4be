//! Component Registry - index allocation for widgets.
//!
//! Every widget is identified by a small integer index; keyboard, focus and
//! paste routing are keyed by it. The registry manages:
//! - ID ↔ Index bidirectional mapping
//! - Free index pool for O(1) reuse
//! - Destroy callbacks run when an index is released

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map component ID to index.
    static ID_TO_INDEX: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());

    /// Map index to component ID.
    static INDEX_TO_ID: RefCell<HashMap<usize, String>> = RefCell::new(HashMap::new());

    /// Currently allocated indices, in order.
    static ALLOCATED_INDICES: RefCell<BTreeSet<usize>> = const { RefCell::new(BTreeSet::new()) };

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Counter for generating unique IDs.
    static ID_COUNTER: RefCell<usize> = const { RefCell::new(0) };

    /// Destroy callbacks registered per index.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new component.
///
/// An ID that is already registered returns its existing index. Without an
/// ID, one of the form `c<n>` is generated.
pub fn allocate_index(id: Option<&str>) -> usize {
    let component_id = match id {
        Some(id) => id.to_string(),
        None => ID_COUNTER.with(|counter| {
            let mut counter = counter.borrow_mut();
            let id = format!("c{}", *counter);
            *counter += 1;
            id
        }),
    };

    if let Some(index) = get_index(&component_id) {
        return index;
    }

    let index = FREE_INDICES
        .with(|free| free.borrow_mut().pop())
        .unwrap_or_else(|| {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        });

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().insert(component_id.clone(), index);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().insert(index, component_id);
    });
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().insert(index);
    });

    index
}

/// Release an index back to the pool, running its destroy callbacks first.
pub fn release_index(index: usize) {
    let Some(id) = get_id(index) else { return };

    run_destroy_callbacks(index);

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().remove(&id);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().remove(&index);
    });
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().remove(&index);
    });
    FREE_INDICES.with(|free| {
        free.borrow_mut().push(index);
    });

    // Last component gone: start numbering from zero again
    if get_allocated_count() == 0 {
        FREE_INDICES.with(|free| free.borrow_mut().clear());
        NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the component at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    for callback in callbacks.into_iter().flatten() {
        callback();
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get index for a component ID.
pub fn get_index(id: &str) -> Option<usize> {
    ID_TO_INDEX.with(|map| map.borrow().get(id).copied())
}

/// Get ID for an index.
pub fn get_id(index: usize) -> Option<String> {
    INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned())
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.borrow().contains(&index))
}

/// Get the count of currently allocated components.
pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.borrow().len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state (for testing).
pub fn reset_registry() {
    ID_TO_INDEX.with(|map| map.borrow_mut().clear());
    INDEX_TO_ID.with(|map| map.borrow_mut().clear());
    ALLOCATED_INDICES.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    ID_COUNTER.with(|counter| *counter.borrow_mut() = 0);
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_allocate_index() {
        reset_registry();

        assert_eq!(allocate_index(None), 0);
        assert_eq!(allocate_index(None), 1);
        assert_eq!(allocate_index(Some("birthday")), 2);

        assert!(is_allocated(2));
        assert!(!is_allocated(3));
        assert_eq!(get_allocated_count(), 3);
    }

    #[test]
    fn test_same_id_same_index() {
        reset_registry();

        let a = allocate_index(Some("start_date"));
        let b = allocate_index(Some("start_date"));
        assert_eq!(a, b);
        assert_eq!(get_allocated_count(), 1);
    }

    #[test]
    fn test_release_and_reuse() {
        reset_registry();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);

        release_index(idx1);
        assert!(!is_allocated(idx1));
        assert!(is_allocated(idx2));

        assert_eq!(allocate_index(None), idx1);
    }

    #[test]
    fn test_numbering_restarts_when_empty() {
        reset_registry();

        let idx = allocate_index(None);
        let _ = allocate_index(None);
        release_index(idx);
        release_index(1);

        assert_eq!(get_allocated_count(), 0);
        assert_eq!(allocate_index(None), 0);
    }

    #[test]
    fn test_id_mapping() {
        reset_registry();

        let idx = allocate_index(Some("end_date"));
        assert_eq!(get_index("end_date"), Some(idx));
        assert_eq!(get_id(idx), Some("end_date".to_string()));

        release_index(idx);
        assert_eq!(get_index("end_date"), None);
    }

    #[test]
    fn test_destroy_callback() {
        reset_registry();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();

        let idx = allocate_index(None);
        on_destroy(idx, move || called_clone.set(true));

        assert!(!called.get());
        release_index(idx);
        assert!(called.get());
    }
}
