use crate::models::users::{User, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::app_error::AppError;
use crate::utils::password::{hash_password, verify_password};
use std::sync::Arc;
use tracing::warn;

const MAX_NAME_LENGTH: usize = 100;
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, AppError> {
        validate_registration(name, email, password)?;

        let password_hash =
            hash_password(password).map_err(|_| AppError::InternalServerError())?;
        let user = self
            .user_repository
            .insert_user(name, email, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::ValidationFailed("Email has already been taken".to_string())
                } else {
                    AppError::DatabaseError(e)
                }
            })?;

        Ok(UserResponse::from(user))
    }

    /// Check HTTP Basic credentials against the stored hash. Returns `None`
    /// for unknown emails and wrong passwords alike.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = self.user_repository.find_by_email(email).await? else {
            return Ok(None);
        };

        let valid = verify_password(password, &user.password_hash).map_err(|e| {
            warn!("Stored password hash for {} is malformed: {}", user.id, e);
            AppError::InternalServerError()
        })?;

        Ok(valid.then_some(user))
    }
}

fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationFailed("Name can't be blank".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::ValidationFailed(format!(
            "Name is too long (maximum is {} characters)",
            MAX_NAME_LENGTH
        )));
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::ValidationFailed("Email is invalid".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::ValidationFailed(format!(
            "Password is too short (minimum is {} characters)",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
