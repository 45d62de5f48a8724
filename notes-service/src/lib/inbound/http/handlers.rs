use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::note::errors::NoteError;
use crate::domain::user::errors::IdentityError;
use crate::domain::user::errors::UserError;

pub mod auth;
pub mod health;
pub mod notes;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// A single failed input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Detail is logged, never sent to the client.
    InternalServerError(String),
    BadRequest(String),
    Validation(Vec<FieldError>),
    NotFound(String),
    Unauthorized(String),
}

impl ApiError {
    /// Validation failure for a single field.
    pub fn invalid_field(field: &str, message: impl ToString) -> Self {
        ApiError::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!("Request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new(INTERNAL_ERROR_MESSAGE),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiErrorBody::new(msg)),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    message: "Validation failed".to_string(),
                    errors: Some(errors),
                },
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorBody::new(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiErrorBody::new(msg)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidName(e) => ApiError::invalid_field("name", e),
            UserError::InvalidEmail(e) => ApiError::invalid_field("email", e),
            UserError::InvalidPassword(e) => ApiError::invalid_field("password", e),
            UserError::InvalidUserId(_) | UserError::Unauthenticated(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists(_) => {
                ApiError::BadRequest("User already exists with this email".to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::BadRequest("Invalid credentials".to_string())
            }
            UserError::GoogleAccountMismatch => ApiError::BadRequest(
                "Account is linked to a different Google account".to_string(),
            ),
            UserError::GoogleAccountInUse(_) => ApiError::BadRequest(
                "Google account is already linked to another user".to_string(),
            ),
            UserError::Identity(IdentityError::NotConfigured) => {
                ApiError::BadRequest(IdentityError::NotConfigured.to_string())
            }
            UserError::Identity(IdentityError::InvalidToken(reason)) => {
                tracing::debug!("Google token rejected: {}", reason);
                ApiError::BadRequest("Invalid Google token".to_string())
            }
            UserError::Identity(IdentityError::Upstream(detail)) => {
                ApiError::InternalServerError(format!("Identity provider: {}", detail))
            }
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::InvalidTitle(e) => ApiError::invalid_field("title", e),
            NoteError::InvalidContent(e) => ApiError::invalid_field("content", e),
            NoteError::NotFound(_) => ApiError::NotFound("Note not found".to_string()),
            NoteError::DatabaseError(_) | NoteError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

/// Body carrying only a confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponseData {
    pub message: String,
}
