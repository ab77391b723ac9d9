use async_trait::async_trait;

use super::domain::{User, UserDraft};
use super::errors::UserError;

/// Repository abstraction for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All persisted users in natural (id) order.
    async fn find_all(&self) -> Result<Vec<User>, UserError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError>;
    /// Insert when the draft carries no id, otherwise upsert by id.
    async fn save(&self, draft: UserDraft) -> Result<User, UserError>;
    /// Fails with `UserError::NotFound` when the id does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), UserError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryUserRepository {
        rows: Mutex<BTreeMap<i64, User>>,
        last_id: Mutex<i64>, // highest id handed out; deleted ids are never reused
    }

    #[async_trait]
    impl UserRepository for MemoryUserRepository {
        async fn find_all(&self) -> Result<Vec<User>, UserError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.get(&id).cloned())
        }

        async fn save(&self, draft: UserDraft) -> Result<User, UserError> {
            let mut rows = self.rows.lock().unwrap();
            let mut last_id = self.last_id.lock().unwrap();
            let id = match draft.id {
                Some(id) => {
                    if id > *last_id {
                        *last_id = id;
                    }
                    id
                }
                None => {
                    *last_id += 1;
                    *last_id
                }
            };
            let user = User { id, name: draft.name, lastname: draft.lastname, email: draft.email };
            rows.insert(id, user.clone());
            Ok(user)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), UserError> {
            let mut rows = self.rows.lock().unwrap();
            rows.remove(&id).map(|_| ()).ok_or(UserError::NotFound)
        }
    }
}
