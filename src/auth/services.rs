use tracing::{info, warn};

use super::claims::AuthClaims;
use super::dto::{PublicUser, SignInRequest, SignInResponse, SignUpRequest};
use super::jwt::JwtKeys;
use super::password::{hash_password_blocking, verify_password_blocking};
use super::repo::UserRepo;
use crate::error::AppError;
use crate::validation::non_empty;

pub const INVALID_LOGIN: &str = "invalid login";

pub fn invalid_login() -> AppError {
    AppError::Unauthorized(INVALID_LOGIN.into())
}

/// Creates a credential row. The returned user never carries the hash.
pub async fn sign_up(users: &dyn UserRepo, req: SignUpRequest) -> Result<PublicUser, AppError> {
    let (Some(username), Some(password)) = (non_empty(req.username), non_empty(req.password))
    else {
        return Err(AppError::InvalidInput(
            "username and password are required fields".into(),
        ));
    };

    let hashed = hash_password_blocking(password).await?;
    let user = users.create(&username, &hashed).await?;

    info!(user_id = user.user_id, username = %user.username, "user signed up");
    Ok(user.into())
}

/// Checks credentials and issues a token. Unknown user and wrong password
/// are indistinguishable to the caller.
pub async fn sign_in(
    users: &dyn UserRepo,
    keys: &JwtKeys,
    req: SignInRequest,
) -> Result<SignInResponse, AppError> {
    let (Some(username), Some(password)) = (non_empty(req.username), non_empty(req.password))
    else {
        return Err(invalid_login());
    };

    let user = users.find_by_username(&username).await?;
    let stored = user.as_ref().map(|u| u.hashed_password.clone());
    let verified = verify_password_blocking(password, stored).await?;

    let user = match user {
        Some(u) if verified => u,
        _ => {
            warn!(username = %username, "sign-in rejected");
            return Err(invalid_login());
        }
    };

    let claims = AuthClaims {
        username: user.username,
        user_id: user.user_id,
    };
    let token = keys.sign(&claims)?;

    info!(user_id = claims.user_id, "user signed in");
    Ok(SignInResponse {
        user: claims,
        token,
    })
}
