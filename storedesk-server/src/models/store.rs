//! Store field validation
//!
//! Store ids are natural keys typed in by the operator; locations are
//! free text. Both limits match the column sizes in the relational schema.

use super::validation::{char_len, ValidationError};

/// Maximum length for store ids (`store.sid VARCHAR(32)`)
const MAX_STORE_ID_LEN: usize = 32;

/// Minimum length for a store location
const MIN_LOCATION_LEN: usize = 1;

/// Maximum length for a store location (`store.location VARCHAR(64)`)
const MAX_LOCATION_LEN: usize = 64;

/// Validated store id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreId(String);

impl StoreId {
    /// Create a store id.
    ///
    /// # Example
    /// ```
    /// use storedesk_server::models::StoreId;
    ///
    /// assert!(StoreId::new("PP-111").is_ok());
    /// assert!(StoreId::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "store ID" });
        }

        if char_len(s) > MAX_STORE_ID_LEN {
            return Err(ValidationError::TooLong {
                field: "store ID",
                max: MAX_STORE_ID_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StoreId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated store location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let len = char_len(s);

        if len < MIN_LOCATION_LEN {
            return Err(ValidationError::TooShort {
                field: "location",
                min: MIN_LOCATION_LEN,
            });
        }

        if len > MAX_LOCATION_LEN {
            return Err(ValidationError::TooLong {
                field: "location",
                max: MAX_LOCATION_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_id_bounds() {
        assert!(StoreId::new("A").is_ok());
        assert!(StoreId::new(&"s".repeat(32)).is_ok());

        let err = StoreId::new(&"s".repeat(33)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 32, .. }));

        let err = StoreId::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn location_needs_one_character() {
        assert!(Location::new("X").is_ok());

        let err = Location::new("").unwrap_err();
        assert_eq!(err.to_string(), "location should be a minimum of 1 character");
    }

    #[test]
    fn location_max_length() {
        assert!(Location::new(&"l".repeat(64)).is_ok());
        let err = Location::new(&"l".repeat(65)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 64, .. }));
    }
}
