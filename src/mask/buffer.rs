//! Mask Buffer - the fixed-width display string.
//!
//! Holds exactly [`MASK_LEN`] cells. Separator cells are written once at
//! construction and never touched again; every other cell is a digit or
//! [`UNFILLED`]. All mutators take a buffer index and refuse anything that is
//! not a digit slot, so the invariant cannot be broken from outside.

use std::fmt;

use super::format::{DIGIT_SLOTS, Group, MASK_LEN, SEPARATOR, UNFILLED, is_digit_slot, is_separator};

/// Fixed `__/__/____` display buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskBuffer {
    cells: [char; MASK_LEN],
}

impl MaskBuffer {
    /// All-unfilled buffer (`__/__/____`).
    pub fn new() -> Self {
        let mut cells = [UNFILLED; MASK_LEN];
        for (i, cell) in cells.iter_mut().enumerate() {
            if is_separator(i) {
                *cell = SEPARATOR;
            }
        }
        Self { cells }
    }

    /// Build a buffer from up to eight digits in slot order.
    ///
    /// Non-digit characters are skipped; digits past the eighth are dropped.
    /// Returns the buffer and the number of slots written.
    pub fn from_digits(digits: impl IntoIterator<Item = char>) -> (Self, usize) {
        let mut buffer = Self::new();
        let mut written = 0;
        for (slot, digit) in DIGIT_SLOTS
            .iter()
            .zip(digits.into_iter().filter(char::is_ascii_digit))
        {
            buffer.cells[*slot] = digit;
            written += 1;
        }
        (buffer, written)
    }

    /// Write `digit` at `index`.
    ///
    /// Overwrites whatever the slot held. Returns false (and leaves the buffer
    /// untouched) if `index` is not a digit slot or `digit` is not `0`-`9`.
    pub fn write_digit(&mut self, index: usize, digit: char) -> bool {
        if !is_digit_slot(index) || !digit.is_ascii_digit() {
            return false;
        }
        self.cells[index] = digit;
        true
    }

    /// Reset the slot at `index` to [`UNFILLED`].
    ///
    /// Returns true only if a digit was actually cleared.
    pub fn clear(&mut self, index: usize) -> bool {
        if !is_digit_slot(index) || self.cells[index] == UNFILLED {
            return false;
        }
        self.cells[index] = UNFILLED;
        true
    }

    /// Digit at `index`, if that slot is filled.
    pub fn digit_at(&self, index: usize) -> Option<char> {
        self.cells
            .get(index)
            .copied()
            .filter(|c| c.is_ascii_digit())
    }

    /// Characters at the given positions, or None if any is unfilled.
    pub fn digits_in(&self, group: Group) -> Option<String> {
        group.map(|i| self.digit_at(i)).collect()
    }

    /// Number of filled digit slots.
    pub fn filled_count(&self) -> usize {
        DIGIT_SLOTS
            .iter()
            .filter(|&&i| self.cells[i] != UNFILLED)
            .count()
    }

    /// True when every digit slot holds a digit.
    pub fn is_complete(&self) -> bool {
        self.filled_count() == DIGIT_SLOTS.len()
    }

    /// True when no digit slot holds a digit.
    pub fn is_blank(&self) -> bool {
        self.filled_count() == 0
    }
}

impl Default for MaskBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MaskBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.cells {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MaskBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaskBuffer({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::format::EMPTY_MASK;

    #[test]
    fn test_new_is_empty_mask() {
        let buffer = MaskBuffer::new();
        assert_eq!(buffer.to_string(), EMPTY_MASK);
        assert!(buffer.is_blank());
        assert!(!buffer.is_complete());
    }

    #[test]
    fn test_write_digit_slots_only() {
        let mut buffer = MaskBuffer::new();
        assert!(buffer.write_digit(0, '1'));
        assert!(!buffer.write_digit(2, '1'));
        assert!(!buffer.write_digit(5, '1'));
        assert!(!buffer.write_digit(10, '1'));
        assert!(!buffer.write_digit(1, 'x'));
        assert_eq!(buffer.to_string(), "1_/__/____");
    }

    #[test]
    fn test_write_overwrites() {
        let mut buffer = MaskBuffer::new();
        buffer.write_digit(3, '4');
        buffer.write_digit(3, '7');
        assert_eq!(buffer.digit_at(3), Some('7'));
        assert_eq!(buffer.filled_count(), 1);
    }

    #[test]
    fn test_clear() {
        let (mut buffer, _) = MaskBuffer::from_digits("12122023".chars());
        assert!(buffer.clear(9));
        assert!(!buffer.clear(9));
        assert!(!buffer.clear(2));
        assert_eq!(buffer.to_string(), "12/12/202_");
        assert!(!buffer.is_complete());
    }

    #[test]
    fn test_from_digits_skips_noise_and_truncates() {
        let (buffer, written) = MaskBuffer::from_digits("12/12/2023".chars());
        assert_eq!(written, 8);
        assert_eq!(buffer.to_string(), "12/12/2023");

        let (buffer, written) = MaskBuffer::from_digits("0a3".chars());
        assert_eq!(written, 2);
        assert_eq!(buffer.to_string(), "03/__/____");

        let (buffer, written) = MaskBuffer::from_digits("1234567890".chars());
        assert_eq!(written, 8);
        assert_eq!(buffer.to_string(), "12/34/5678");
    }

    #[test]
    fn test_digits_in_group() {
        let (buffer, _) = MaskBuffer::from_digits("1212".chars());
        assert_eq!(buffer.digits_in(0..2).as_deref(), Some("12"));
        assert_eq!(buffer.digits_in(6..10), None);
    }
}
