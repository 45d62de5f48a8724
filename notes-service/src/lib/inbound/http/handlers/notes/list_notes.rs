use axum::extract::State;
use axum::http::StatusCode;

use super::NoteData;
use crate::inbound::http::extractor::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_notes(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<ApiSuccess<Vec<NoteData>>, ApiError> {
    state
        .note_service
        .list_notes(&user.id)
        .await
        .map_err(ApiError::from)
        .map(|notes| ApiSuccess::new(StatusCode::OK, notes.iter().map(NoteData::from).collect()))
}
