use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};

use crate::{models::users::User, utils::errors::app_error::AppError, AppState};

/// Extractor for the authenticated user.
///
/// Reads HTTP Basic credentials (email + password) and verifies them against
/// the stored argon2 hash. Handlers taking this extractor reject
/// unauthenticated requests with a 401 JSON error before running.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(credentials)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Unauthorized(
                        "Please provide HTTP Basic credentials".to_string(),
                    )
                })?;

        let user = state
            .user_service
            .authenticate(credentials.username(), credentials.password())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        Ok(CurrentUser(user))
    }
}
