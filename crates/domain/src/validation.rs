// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length, in characters, of short labels such as tour names,
/// vehicles and weather descriptions.
pub const MAX_LABEL_LENGTH: usize = 64;

/// Maximum length, in characters, of descriptions and notes.
pub const MAX_NOTES_LENGTH: usize = 2048;

/// Checks that `value` holds at most `max` characters.
///
/// Length is counted in Unicode scalar values, not bytes.
///
/// # Arguments
///
/// * `field` - The field name reported on failure
/// * `value` - The candidate value
/// * `max` - The maximum number of characters
///
/// # Errors
///
/// Returns [`DomainError::FieldTooLong`] if the value is longer than `max`.
pub fn validate_length(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    let actual: usize = value.chars().count();
    if actual > max {
        return Err(DomainError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

/// Checks that `value` is not blank and fits in `max` characters.
///
/// # Errors
///
/// Returns [`DomainError::EmptyField`] if the value is empty or whitespace,
/// or [`DomainError::FieldTooLong`] if it is too long.
pub fn validate_required(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    validate_length(field, value, max)
}

/// Checks that a measured quantity is finite and not negative.
///
/// # Errors
///
/// Returns [`DomainError::ValueOutOfRange`] otherwise.
pub fn validate_non_negative(field: &'static str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::ValueOutOfRange {
            field,
            expected: "a finite, non-negative number",
        });
    }
    Ok(())
}

/// Checks that a rating lies within `0.0..=1.0`.
///
/// # Errors
///
/// Returns [`DomainError::ValueOutOfRange`] otherwise.
pub fn validate_rating(value: f32) -> Result<(), DomainError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DomainError::ValueOutOfRange {
            field: "rating",
            expected: "between 0 and 1",
        });
    }
    Ok(())
}
