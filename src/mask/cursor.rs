//! Cursor Placement Policy - caret positions that skip separators.
//!
//! The caret lives in `0..=MASK_LEN`. Position `MASK_LEN` is the end of the
//! text. After any programmatic placement it never rests on a separator.

use super::format::{MASK_LEN, is_separator};

/// Direction of travel used to step off a separator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Typing, ArrowRight, clicks.
    Forward,
    /// Deletion, ArrowLeft.
    Backward,
}

/// Resolve a requested caret index to an allowed one.
///
/// Out-of-range requests clamp to the end. A separator is skipped in the
/// direction of travel; a backward skip from the first separator lands on
/// slot 1, and a forward skip can never run past the end because the last
/// position before the end is a digit slot.
pub fn place_cursor(requested: usize, direction: Direction) -> usize {
    let mut pos = requested.min(MASK_LEN);
    while is_separator(pos) {
        pos = match direction {
            Direction::Forward => pos + 1,
            Direction::Backward => pos - 1,
        };
    }
    pos
}

/// Caret position after writing into the slot at `slot`.
pub fn advance(slot: usize) -> usize {
    place_cursor(slot + 1, Direction::Forward)
}

/// Digit slot immediately before the caret, if any.
pub fn previous_slot(cursor: usize) -> Option<usize> {
    let cursor = cursor.min(MASK_LEN);
    if cursor == 0 {
        return None;
    }
    Some(place_cursor(cursor - 1, Direction::Backward))
}

/// Digit slot under the caret, if the caret is not at the end.
pub fn current_slot(cursor: usize) -> Option<usize> {
    let pos = place_cursor(cursor, Direction::Forward);
    (pos < MASK_LEN).then_some(pos)
}

/// One step left, skipping separators.
pub fn step_left(cursor: usize) -> usize {
    previous_slot(cursor).unwrap_or(0)
}

/// One step right, skipping separators.
pub fn step_right(cursor: usize) -> usize {
    place_cursor(cursor.saturating_add(1), Direction::Forward)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_on_digit_slot_is_identity() {
        for i in [0, 1, 3, 4, 6, 7, 8, 9, 10] {
            assert_eq!(place_cursor(i, Direction::Forward), i);
            assert_eq!(place_cursor(i, Direction::Backward), i);
        }
    }

    #[test]
    fn test_separator_skip_follows_direction() {
        assert_eq!(place_cursor(2, Direction::Forward), 3);
        assert_eq!(place_cursor(5, Direction::Forward), 6);
        assert_eq!(place_cursor(2, Direction::Backward), 1);
        assert_eq!(place_cursor(5, Direction::Backward), 4);
    }

    #[test]
    fn test_out_of_range_clamps_to_end() {
        assert_eq!(place_cursor(42, Direction::Forward), MASK_LEN);
        assert_eq!(place_cursor(usize::MAX, Direction::Backward), MASK_LEN);
    }

    #[test]
    fn test_advance_after_typing() {
        assert_eq!(advance(0), 1);
        assert_eq!(advance(1), 3);
        assert_eq!(advance(4), 6);
        assert_eq!(advance(9), 10);
    }

    #[test]
    fn test_previous_and_current_slot() {
        assert_eq!(previous_slot(0), None);
        assert_eq!(previous_slot(3), Some(1));
        assert_eq!(previous_slot(6), Some(4));
        assert_eq!(previous_slot(10), Some(9));

        assert_eq!(current_slot(0), Some(0));
        assert_eq!(current_slot(2), Some(3));
        assert_eq!(current_slot(10), None);
    }

    #[test]
    fn test_steps() {
        assert_eq!(step_left(0), 0);
        assert_eq!(step_left(3), 1);
        assert_eq!(step_right(1), 3);
        assert_eq!(step_right(10), 10);
    }
}
