use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Entry, EntryFields};
use crate::error::AppError;

/// Entry store. Every lookup, update and delete is filtered on the owner.
#[async_trait]
pub trait EntryRepo: Send + Sync {
    async fn insert(&self, user_id: i64, fields: &EntryFields) -> Result<Entry, AppError>;

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Entry>, AppError>;

    async fn find(&self, user_id: i64, entry_id: i64) -> Result<Option<Entry>, AppError>;

    /// `None` when no row matched both id and owner.
    async fn update(
        &self,
        user_id: i64,
        entry_id: i64,
        fields: &EntryFields,
    ) -> Result<Option<Entry>, AppError>;

    /// `false` when no row matched both id and owner.
    async fn delete(&self, user_id: i64, entry_id: i64) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgEntryRepo {
    db: PgPool,
}

impl PgEntryRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntryRepo for PgEntryRepo {
    async fn insert(&self, user_id: i64, fields: &EntryFields) -> Result<Entry, AppError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO "entries" ("userId", "title", "notes", "photoUrl")
            VALUES ($1, $2, $3, $4)
            RETURNING "entryId", "userId", "title", "notes", "photoUrl", "createdAt"
            "#,
        )
        .bind(user_id)
        .bind(&fields.title)
        .bind(&fields.notes)
        .bind(&fields.photo_url)
        .fetch_one(&self.db)
        .await?;
        Ok(entry)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Entry>, AppError> {
        let rows = sqlx::query_as::<_, Entry>(
            r#"
            SELECT "entryId", "userId", "title", "notes", "photoUrl", "createdAt"
            FROM "entries"
            WHERE "userId" = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, user_id: i64, entry_id: i64) -> Result<Option<Entry>, AppError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            SELECT "entryId", "userId", "title", "notes", "photoUrl", "createdAt"
            FROM "entries"
            WHERE "entryId" = $1 AND "userId" = $2
            "#,
        )
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(entry)
    }

    async fn update(
        &self,
        user_id: i64,
        entry_id: i64,
        fields: &EntryFields,
    ) -> Result<Option<Entry>, AppError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            UPDATE "entries"
               SET "title" = $1,
                   "notes" = $2,
                   "photoUrl" = $3
             WHERE "entryId" = $4 AND "userId" = $5
            RETURNING "entryId", "userId", "title", "notes", "photoUrl", "createdAt"
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.notes)
        .bind(&fields.photo_url)
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(entry)
    }

    async fn delete(&self, user_id: i64, entry_id: i64) -> Result<bool, AppError> {
        let res = sqlx::query(
            r#"
            DELETE FROM "entries"
             WHERE "entryId" = $1 AND "userId" = $2
            "#,
        )
        .bind(entry_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
pub(crate) mod mem {
    use std::sync::Mutex;

    use time::OffsetDateTime;

    use super::*;

    /// In-memory entry store for tests.
    #[derive(Default)]
    pub struct MemEntryRepo {
        inner: Mutex<(i64, Vec<Entry>)>,
    }

    #[async_trait]
    impl EntryRepo for MemEntryRepo {
        async fn insert(&self, user_id: i64, fields: &EntryFields) -> Result<Entry, AppError> {
            let mut guard = self.inner.lock().unwrap();
            guard.0 += 1;
            let entry = Entry {
                entry_id: guard.0,
                user_id,
                title: fields.title.clone(),
                notes: fields.notes.clone(),
                photo_url: fields.photo_url.clone(),
                created_at: OffsetDateTime::now_utc(),
            };
            guard.1.push(entry.clone());
            Ok(entry)
        }

        async fn list_by_user(&self, user_id: i64) -> Result<Vec<Entry>, AppError> {
            let guard = self.inner.lock().unwrap();
            Ok(guard.1.iter().filter(|e| e.user_id == user_id).cloned().collect())
        }

        async fn find(&self, user_id: i64, entry_id: i64) -> Result<Option<Entry>, AppError> {
            let guard = self.inner.lock().unwrap();
            Ok(guard
                .1
                .iter()
                .find(|e| e.entry_id == entry_id && e.user_id == user_id)
                .cloned())
        }

        async fn update(
            &self,
            user_id: i64,
            entry_id: i64,
            fields: &EntryFields,
        ) -> Result<Option<Entry>, AppError> {
            let mut guard = self.inner.lock().unwrap();
            let Some(entry) = guard
                .1
                .iter_mut()
                .find(|e| e.entry_id == entry_id && e.user_id == user_id)
            else {
                return Ok(None);
            };
            entry.title = fields.title.clone();
            entry.notes = fields.notes.clone();
            entry.photo_url = fields.photo_url.clone();
            Ok(Some(entry.clone()))
        }

        async fn delete(&self, user_id: i64, entry_id: i64) -> Result<bool, AppError> {
            let mut guard = self.inner.lock().unwrap();
            let before = guard.1.len();
            guard.1.retain(|e| !(e.entry_id == entry_id && e.user_id == user_id));
            Ok(guard.1.len() < before)
        }
    }
}
