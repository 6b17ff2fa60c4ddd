use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Journal entry as stored and as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Entry {
    pub entry_id: i64,
    pub user_id: i64,
    pub title: String,
    pub notes: String,
    pub photo_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated user-supplied fields for insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub title: String,
    pub notes: String,
    pub photo_url: String,
}
