use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::models::User;
use crate::repositories::SessionRepository;
use crate::session::get_session_token;

#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
        }
    }
}

/// Resolves the session token against the `sessions` table. The repository
/// comes from an `Extension` layer on the router.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session_repo = parts
            .extensions
            .get::<SessionRepository>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Session repository not configured".to_string()))?;

        let token = get_session_token(&parts.headers).ok_or(AppError::Unauthorized)?;

        match session_repo.find_user(&token).await? {
            Some(user) => Ok(user.into()),
            None => {
                tracing::debug!("Rejected unknown or expired session");
                Err(AppError::Unauthorized)
            }
        }
    }
}
