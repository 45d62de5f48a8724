use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::AuthResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn google_login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<GoogleLoginRequestBody>, ApiError>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    if body.token.trim().is_empty() {
        return Err(ApiError::invalid_field("token", "Google token is required"));
    }

    let session = state
        .auth_service
        .login_with_identity_token(body.token.trim())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData::new("Google authentication successful", session),
    ))
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleLoginRequestBody {
    token: String,
}
