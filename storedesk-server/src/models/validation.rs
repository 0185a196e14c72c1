//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field is shorter than its minimum length
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field must have exactly this many characters
    WrongLength { field: &'static str, expected: usize },

    /// Field must be strictly longer than `min` characters
    NotLongerThan { field: &'static str, min: usize },

    /// Numeric field outside its inclusive range
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Field should hold a whole number
    NotANumber { field: &'static str, value: String },
}

fn characters(n: usize) -> &'static str {
    if n == 1 {
        "character"
    } else {
        "characters"
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooShort { field, min } => {
                write!(f, "{} should be a minimum of {} {}", field, min, characters(*min))
            }
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::WrongLength { field, expected } => {
                write!(f, "{} should be {} {}", field, expected, characters(*expected))
            }
            Self::NotLongerThan { field, min } => {
                write!(f, "{} must be more than {} {}", field, min, characters(*min))
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::NotANumber { field, value } => {
                write!(f, "{} must be a whole number, got '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Character count as users see it, not UTF-8 bytes.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooShort {
            field: "location",
            min: 1,
        };
        assert_eq!(err.to_string(), "location should be a minimum of 1 character");

        let err = ValidationError::WrongLength {
            field: "manager ID",
            expected: 4,
        };
        assert_eq!(err.to_string(), "manager ID should be 4 characters");

        let err = ValidationError::OutOfRange {
            field: "salary",
            min: 30_000,
            max: 70_000,
        };
        assert_eq!(err.to_string(), "salary must be between 30000 and 70000");
    }

    #[test]
    fn char_len_counts_scalars() {
        assert_eq!(char_len("Zoë"), 3);
        assert_eq!(char_len(""), 0);
    }
}
