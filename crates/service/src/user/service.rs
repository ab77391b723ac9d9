use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{User, UserDraft};
use super::errors::UserError;
use super::repository::UserRepository;

/// User business service independent of web framework
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All persisted users in the store's natural order.
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repo.find_all().await
    }

    /// Create a user. The draft is forwarded to the store's save; when it
    /// carries no id the store assigns one.
    ///
    /// # Examples
    /// ```
    /// use service::user::{UserService, repository::mock::MemoryUserRepository, domain::UserDraft};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MemoryUserRepository::default());
    /// let svc = UserService::new(repo);
    /// let draft = UserDraft { id: None, name: Some("Ana".into()), lastname: None, email: None };
    /// let user = tokio_test::block_on(svc.create_user(draft)).unwrap();
    /// assert_eq!(user.id, 1);
    /// ```
    #[instrument(skip(self, draft))]
    pub async fn create_user(&self, draft: UserDraft) -> Result<User, UserError> {
        let created = self.repo.save(draft).await?;
        info!(user_id = created.id, "user_created");
        Ok(created)
    }

    /// Get a user by id; `UserError::NotFound` when absent.
    pub async fn get_user(&self, id: i64) -> Result<User, UserError> {
        self.repo.find_by_id(id).await?.ok_or(UserError::NotFound)
    }

    /// Overwrite `name`, `lastname` and `email` of an existing user with the
    /// patch values (absent fields become null), keeping the id. The merged
    /// record is written back before it is returned.
    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: i64, patch: UserDraft) -> Result<User, UserError> {
        let existing = self.repo.find_by_id(id).await?.ok_or(UserError::NotFound)?;
        let merged = UserDraft {
            id: Some(existing.id),
            name: patch.name,
            lastname: patch.lastname,
            email: patch.email,
        };
        let updated = self.repo.save(merged).await?;
        info!(user_id = updated.id, "user_updated");
        Ok(updated)
    }

    /// Delete a user by id. Returns `true` on success and `false` on any
    /// failure, including a missing id; the cause is not distinguished.
    ///
    /// # Examples
    /// ```
    /// use service::user::{UserService, repository::mock::MemoryUserRepository};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(MemoryUserRepository::default()));
    /// assert!(!tokio_test::block_on(svc.delete_user(42)));
    /// ```
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> bool {
        match self.repo.delete_by_id(id).await {
            Ok(()) => {
                info!(user_id = id, "user_deleted");
                true
            }
            Err(e) => {
                debug!(user_id = id, error = %e, "delete_user failed");
                false
            }
        }
    }
}
