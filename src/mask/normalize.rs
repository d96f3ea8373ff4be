//! Value Normalizer - between the display buffer and `YYYY-MM-DD`.
//!
//! Only digit-ness is checked in either direction. Month `13` or day `00`
//! pass through untouched.

use super::buffer::MaskBuffer;
use super::format::DateFormat;
use crate::error::ValueError;

const ISO_LEN: usize = 10;
const ISO_DASHES: [usize; 2] = [4, 7];

/// Build the external value from a complete buffer.
///
/// Returns None while any digit slot is unfilled.
pub fn normalize(buffer: &MaskBuffer, format: DateFormat) -> Option<String> {
    let year = buffer.digits_in(format.year())?;
    let month = buffer.digits_in(format.month())?;
    let day = buffer.digits_in(format.day())?;
    Some(format!("{year}-{month}-{day}"))
}

/// Rebuild a complete buffer from an external `YYYY-MM-DD` value.
pub fn denormalize(value: &str, format: DateFormat) -> Result<MaskBuffer, ValueError> {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() != ISO_LEN {
        return Err(ValueError::WrongLength(chars.len()));
    }

    for (position, &found) in chars.iter().enumerate() {
        if ISO_DASHES.contains(&position) {
            if found != '-' {
                return Err(ValueError::MissingDash { position, found });
            }
        } else if !found.is_ascii_digit() {
            return Err(ValueError::NotADigit { position, found });
        }
    }

    let mut buffer = MaskBuffer::new();
    let groups = [
        (format.year(), &chars[0..4]),
        (format.month(), &chars[5..7]),
        (format.day(), &chars[8..10]),
    ];
    for (slots, digits) in groups {
        for (slot, &digit) in slots.zip(digits) {
            buffer.write_digit(slot, digit);
        }
    }
    Ok(buffer)
}
