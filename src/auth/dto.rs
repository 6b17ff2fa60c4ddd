use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::claims::AuthClaims;
use super::repo_types::User;

/// Request body for sign-up. Fields are optional so a missing one is a 400, not a parse failure.
#[derive(Deserialize)]
pub struct SignUpRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for sign-in.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub user_id: i64,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            username: u.username,
            created_at: u.created_at,
        }
    }
}

/// Response returned after sign-in.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub user: AuthClaims,
    pub token: String,
}
