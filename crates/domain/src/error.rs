// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by tracked entities and change-tracking containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identity that is already live was added or inserted again.
    DuplicateMembership {
        /// The identity that is already a live member.
        id: String,
    },
    /// A positional access was beyond the current public bounds.
    IndexOutOfRange {
        /// The requested public index.
        index: usize,
        /// The number of live items at the time of the access.
        len: usize,
    },
    /// A free-text field exceeds its declared maximum length.
    FieldTooLong {
        /// The name of the field.
        field: &'static str,
        /// The maximum number of characters allowed.
        max: usize,
        /// The number of characters supplied.
        actual: usize,
    },
    /// A required text field is empty.
    EmptyField(&'static str),
    /// A numeric field is outside its permitted range.
    ValueOutOfRange {
        /// The name of the field.
        field: &'static str,
        /// Description of the permitted range.
        expected: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateMembership { id } => {
                write!(f, "Item '{id}' is already a member of this collection")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} is out of range for {len} items")
            }
            Self::FieldTooLong { field, max, actual } => {
                write!(
                    f,
                    "Field '{field}' allows at most {max} characters, got {actual}"
                )
            }
            Self::EmptyField(field) => write!(f, "Field '{field}' cannot be empty"),
            Self::ValueOutOfRange { field, expected } => {
                write!(f, "Field '{field}' must be {expected}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
