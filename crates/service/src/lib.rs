//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Persistence goes through a swappable store abstraction.
//! - Provides clear error types and documented interfaces.

pub mod customer;
pub mod errors;
#[cfg(test)]
pub mod test_support;
