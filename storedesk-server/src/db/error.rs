//! Data-access error taxonomy shared by the relational and document layers.
//!
//! Vendor specifics (Postgres SQLSTATE, Mongo write-error codes) are
//! classified where the query runs; callers only see the semantic kind.

/// Key names carried by [`DbError::Conflict`]
pub const KEY_SID: &str = "sid";
pub const KEY_MGRID: &str = "mgrid";
pub const KEY_MGRID_LOCATION: &str = "mgrid+location";
pub const KEY_MANAGER_ID: &str = "_id";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("document store error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A uniqueness rule rejected the write
    #[error("conflict: {resource} with {key} '{value}' already exists")]
    Conflict {
        resource: &'static str,
        key: &'static str,
        value: String,
    },

    /// A delete was refused because other rows still point at the record
    #[error("{resource} '{id}' is still referenced by other records")]
    Referenced { resource: &'static str, id: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn conflict(resource: &'static str, key: &'static str, value: impl Into<String>) -> Self {
        Self::Conflict {
            resource,
            key,
            value: value.into(),
        }
    }

    pub fn referenced(resource: &'static str, id: impl Into<String>) -> Self {
        Self::Referenced {
            resource,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_record() {
        let err = DbError::conflict("store", KEY_MGRID, "M001");
        assert_eq!(
            err.to_string(),
            "conflict: store with mgrid 'M001' already exists"
        );

        let err = DbError::referenced("store", "PP-111");
        assert_eq!(
            err.to_string(),
            "store 'PP-111' is still referenced by other records"
        );
    }
}
