//! Manager field validation
//!
//! Manager ids are exactly four characters and double as the document key
//! in the managers collection, and as `store.mgrid` on the relational side.

use super::validation::{char_len, ValidationError};

/// Required length of a manager id
pub const MANAGER_ID_LEN: usize = 4;

/// Names must be strictly longer than this
pub const MIN_NAME_LEN: usize = 4;

/// Inclusive salary bounds
pub const MIN_SALARY: i64 = 30_000;
pub const MAX_SALARY: i64 = 70_000;

/// Validated manager id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManagerId(String);

impl ManagerId {
    /// Create a manager id, which must be exactly 4 characters.
    ///
    /// # Example
    /// ```
    /// use storedesk_server::models::ManagerId;
    ///
    /// assert!(ManagerId::new("M001").is_ok());
    /// assert!(ManagerId::new("M01").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if char_len(s) != MANAGER_ID_LEN {
            return Err(ValidationError::WrongLength {
                field: "manager ID",
                expected: MANAGER_ID_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ManagerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated manager name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerName(String);

impl ManagerName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if char_len(s) <= MIN_NAME_LEN {
            return Err(ValidationError::NotLongerThan {
                field: "name",
                min: MIN_NAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated salary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salary(i64);

impl Salary {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if !(MIN_SALARY..=MAX_SALARY).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: "salary",
                min: MIN_SALARY,
                max: MAX_SALARY,
            });
        }

        Ok(Self(value))
    }

    /// Parse a raw form value, then range-check it.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::new(parse_whole_number("salary", raw)?)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Parse a trimmed integer form field.
pub fn parse_whole_number(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_id_exactly_four() {
        assert!(ManagerId::new("M001").is_ok());
        assert!(ManagerId::new("ÄÖÜß").is_ok());

        for bad in ["", "M01", "M0001"] {
            let err = ManagerId::new(bad).unwrap_err();
            assert_eq!(err.to_string(), "manager ID should be 4 characters");
        }
    }

    #[test]
    fn name_must_exceed_four() {
        assert!(ManagerName::new("Alice").is_ok());

        let err = ManagerName::new("Anne").unwrap_err();
        assert_eq!(err.to_string(), "name must be more than 4 characters");
    }

    #[test]
    fn salary_bounds_are_inclusive() {
        assert_eq!(Salary::new(30_000).unwrap().get(), 30_000);
        assert_eq!(Salary::new(70_000).unwrap().get(), 70_000);
        assert!(Salary::new(29_999).is_err());
        assert!(Salary::new(70_001).is_err());
    }

    #[test]
    fn salary_parse_rejects_text() {
        assert_eq!(Salary::parse(" 45000 ").unwrap().get(), 45_000);

        let err = Salary::parse("lots").unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber { field: "salary", .. }));

        let err = Salary::parse("").unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber { .. }));
    }
}
