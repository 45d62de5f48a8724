use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::AuthResponseData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequestBody>, ApiError>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    // A malformed email cannot belong to an account
    let email = EmailAddress::new(body.email).map_err(|_| UserError::InvalidCredentials)?;

    let session = state
        .auth_service
        .login(LoginCommand {
            email,
            password: body.password,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData::new("Login successful", session),
    ))
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
