use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

use crate::user::domain::{User, UserDraft};
use crate::user::errors::UserError;
use crate::user::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: models::user::Model) -> User {
    User { id: m.id, name: m.name, lastname: m.lastname, email: m.email }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        let rows = models::user::Entity::find()
            .order_by_asc(models::user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| UserError::Repository(e.to_string()))?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserError> {
        let row = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Repository(e.to_string()))?;
        Ok(row.map(to_domain))
    }

    async fn save(&self, draft: UserDraft) -> Result<User, UserError> {
        let saved = match draft.id {
            None => {
                let am = models::user::ActiveModel {
                    id: NotSet,
                    name: Set(draft.name),
                    lastname: Set(draft.lastname),
                    email: Set(draft.email),
                };
                am.insert(&self.db)
                    .await
                    .map_err(|e| UserError::Repository(e.to_string()))?
            }
            Some(id) => {
                let existing = models::user::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(|e| UserError::Repository(e.to_string()))?;
                let am = models::user::ActiveModel {
                    id: Set(id),
                    name: Set(draft.name),
                    lastname: Set(draft.lastname),
                    email: Set(draft.email),
                };
                match existing {
                    Some(_) => am
                        .update(&self.db)
                        .await
                        .map_err(|e| UserError::Repository(e.to_string()))?,
                    None => am
                        .insert(&self.db)
                        .await
                        .map_err(|e| UserError::Repository(e.to_string()))?,
                }
            }
        };
        Ok(to_domain(saved))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), UserError> {
        let res = models::user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| UserError::Repository(e.to_string()))?;
        if res.rows_affected == 0 {
            return Err(UserError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::MigratorTrait;

    #[tokio::test]
    async fn seaorm_repository_crud() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match models::db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return Ok(());
        }
        let repo = SeaOrmUserRepository { db };

        let created = repo
            .save(UserDraft {
                id: None,
                name: Some("Bob".into()),
                lastname: Some("Stone".into()),
                email: Some("bob@example.com".into()),
            })
            .await?;
        assert!(created.id >= 1);

        let found = repo.find_by_id(created.id).await?.expect("created row");
        assert_eq!(found, created);

        let merged = repo
            .save(UserDraft { id: Some(created.id), name: Some("Bobby".into()), lastname: None, email: None })
            .await?;
        assert_eq!(merged.id, created.id);
        assert_eq!(merged.name.as_deref(), Some("Bobby"));
        assert_eq!(merged.lastname, None);

        repo.delete_by_id(created.id).await?;
        assert!(repo.find_by_id(created.id).await?.is_none());
        assert!(matches!(repo.delete_by_id(created.id).await, Err(UserError::NotFound)));
        Ok(())
    }
}
