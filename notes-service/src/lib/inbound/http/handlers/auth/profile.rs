use axum::http::StatusCode;
use serde::Serialize;

use super::UserData;
use crate::inbound::http::extractor::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;

pub async fn profile(
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProfileResponseData {
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub user: UserData,
}
