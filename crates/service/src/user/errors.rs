use thiserror::Error;

/// Business errors for user workflows
#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("repository error: {0}")]
    Repository(String),
}
