use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database. Deliberately not `Serialize`.
#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub hashed_password: String,    // Argon2 PHC string
    pub created_at: OffsetDateTime,
}
