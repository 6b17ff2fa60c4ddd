use tracing::{debug, info};

use super::dto::EntryPayload;
use super::repo::EntryRepo;
use super::repo_types::{Entry, EntryFields};
use crate::error::AppError;
use crate::validation::{non_empty, parse_positive_id};

fn fields(payload: EntryPayload) -> Result<EntryFields, AppError> {
    match (
        non_empty(payload.title),
        non_empty(payload.notes),
        non_empty(payload.photo_url),
    ) {
        (Some(title), Some(notes), Some(photo_url)) => Ok(EntryFields {
            title,
            notes,
            photo_url,
        }),
        _ => Err(AppError::InvalidInput(
            "Invalid input: title, notes, photoUrl are required".into(),
        )),
    }
}

fn entry_id(raw: &str) -> Result<i64, AppError> {
    parse_positive_id(raw, "entryId")
}

fn not_found(entry_id: i64) -> AppError {
    AppError::NotFound(format!("entry {entry_id} does not exist"))
}

pub async fn create(
    repo: &dyn EntryRepo,
    user_id: i64,
    payload: EntryPayload,
) -> Result<Entry, AppError> {
    let fields = fields(payload)?;
    let entry = repo.insert(user_id, &fields).await?;
    info!(user_id, entry_id = entry.entry_id, "entry created");
    Ok(entry)
}

pub async fn list_for_user(repo: &dyn EntryRepo, user_id: i64) -> Result<Vec<Entry>, AppError> {
    let entries = repo.list_by_user(user_id).await?;
    debug!(user_id, count = entries.len(), "entries listed");
    Ok(entries)
}

/// Entries owned by someone else are reported exactly like missing ones.
pub async fn get_one(repo: &dyn EntryRepo, user_id: i64, raw_id: &str) -> Result<Entry, AppError> {
    let entry_id = entry_id(raw_id)?;
    repo.find(user_id, entry_id)
        .await?
        .ok_or_else(|| not_found(entry_id))
}

pub async fn update(
    repo: &dyn EntryRepo,
    user_id: i64,
    raw_id: &str,
    payload: EntryPayload,
) -> Result<Entry, AppError> {
    let entry_id = entry_id(raw_id)?;
    let fields = fields(payload)?;
    let entry = repo
        .update(user_id, entry_id, &fields)
        .await?
        .ok_or_else(|| not_found(entry_id))?;
    info!(user_id, entry_id, "entry updated");
    Ok(entry)
}

pub async fn delete(repo: &dyn EntryRepo, user_id: i64, raw_id: &str) -> Result<(), AppError> {
    let entry_id = entry_id(raw_id)?;
    if !repo.delete(user_id, entry_id).await? {
        return Err(not_found(entry_id));
    }
    info!(user_id, entry_id, "entry deleted");
    Ok(())
}
