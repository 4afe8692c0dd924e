use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::error_payload::ErrorPayload;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("The user you want to follow does not exist")]
    FollowedUserNotFound,

    #[error("The user you want to unfollow does not exist")]
    UnfollowedUserNotFound,

    #[error("You are not following this user")]
    FollowNotFound,

    #[error("You cannot follow yourself")]
    SelfFollow,

    #[error("You are already following this user")]
    AlreadyFollowing,

    #[error("{0}")]
    ValidationFailed(String),

    #[error("An error occurred while accessing the database")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(),
}

impl AppError {
    pub fn code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::FollowedUserNotFound => StatusCode::NOT_FOUND,
            AppError::UnfollowedUserNotFound => StatusCode::NOT_FOUND,
            AppError::FollowNotFound => StatusCode::NOT_FOUND,
            AppError::SelfFollow => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AlreadyFollowing => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError() => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Category string rendered in the `error` field of the JSON body.
    pub fn category(&self) -> String {
        match self {
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::FollowedUserNotFound | AppError::UnfollowedUserNotFound => "User not found",
            AppError::FollowNotFound => "Follow relationship not found",
            AppError::SelfFollow | AppError::AlreadyFollowing => "Unable to follow user",
            AppError::ValidationFailed(_) => "Validation failed",
            AppError::DatabaseError(_) => "Database error",
            AppError::InternalServerError() => "Internal server error",
        }
        .to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code();
        let error_response = ErrorPayload {
            error: self.category(),
            message: self.to_string(),
        };

        if status == StatusCode::UNAUTHORIZED {
            // Prompt HTTP Basic credentials like the framework middleware would.
            return (
                status,
                [(WWW_AUTHENTICATE, "Basic realm=\"Application\"")],
                Json(error_response),
            )
                .into_response();
        }

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized("Invalid email or password".into()), StatusCode::UNAUTHORIZED)]
    #[case(AppError::FollowedUserNotFound, StatusCode::NOT_FOUND)]
    #[case(AppError::FollowNotFound, StatusCode::NOT_FOUND)]
    #[case(AppError::SelfFollow, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(AppError::AlreadyFollowing, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(AppError::ValidationFailed("Email has already been taken".into()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(AppError::InternalServerError(), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_codes(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.code(), expected);
    }

    #[test]
    fn follow_violations_share_a_category() {
        assert_eq!(AppError::SelfFollow.category(), "Unable to follow user");
        assert_eq!(AppError::AlreadyFollowing.category(), "Unable to follow user");
    }
}
