//! Domain models with validation at construction
//!
//! All form input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod manager;
pub mod store;
pub mod validation;

pub use manager::{parse_whole_number, ManagerId, ManagerName, Salary};
pub use store::{Location, StoreId};
pub use validation::ValidationError;
