//! Service layer providing the registration operations on top of models.
//! - Separates business rules (presence checks) from data access.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod records;
