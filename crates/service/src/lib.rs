//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Storage is reached through a repository trait supplied at construction.
//! - Provides clear error types and documented interfaces.

pub mod user;
