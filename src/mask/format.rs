//! Mask layout - the fixed `__/__/____` template and its group order.
//!
//! Both supported formats share one template. Only the meaning of the first
//! two groups changes:
//!
//! ```text
//! index   0 1 2 3 4 5 6 7 8 9
//! mask    _ _ / _ _ / _ _ _ _
//! MDY     M M / D D / Y Y Y Y
//! DMY     D D / M M / Y Y Y Y
//! ```

/// Number of characters in the display buffer.
pub const MASK_LEN: usize = 10;

/// Marker for a digit slot that has not been filled yet.
pub const UNFILLED: char = '_';

/// Literal separator character.
pub const SEPARATOR: char = '/';

/// Positions that always hold [`SEPARATOR`].
pub const SEPARATOR_POSITIONS: [usize; 2] = [2, 5];

/// Positions that hold a digit or [`UNFILLED`], in display order.
pub const DIGIT_SLOTS: [usize; 8] = [0, 1, 3, 4, 6, 7, 8, 9];

/// The all-unfilled template.
pub const EMPTY_MASK: &str = "__/__/____";

/// Check whether `index` is one of the fixed separator positions.
#[inline]
pub fn is_separator(index: usize) -> bool {
    SEPARATOR_POSITIONS.contains(&index)
}

/// Check whether `index` is an editable digit slot.
#[inline]
pub fn is_digit_slot(index: usize) -> bool {
    index < MASK_LEN && !is_separator(index)
}

/// A half-open range of buffer positions.
pub type Group = std::ops::Range<usize>;

/// Order of the day and month groups inside the mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `MM/DD/YYYY`
    #[default]
    MonthDayYear,
    /// `DD/MM/YYYY`
    DayMonthYear,
}

impl DateFormat {
    /// Pattern string, also used as the placeholder hint.
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::DayMonthYear => "DD/MM/YYYY",
        }
    }

    /// Buffer positions of the month digits.
    pub fn month(self) -> Group {
        match self {
            DateFormat::MonthDayYear => 0..2,
            DateFormat::DayMonthYear => 3..5,
        }
    }

    /// Buffer positions of the day digits.
    pub fn day(self) -> Group {
        match self {
            DateFormat::MonthDayYear => 3..5,
            DateFormat::DayMonthYear => 0..2,
        }
    }

    /// Buffer positions of the year digits.
    pub fn year(self) -> Group {
        6..10
    }
}
