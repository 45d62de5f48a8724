use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;

use super::NoteData;
use super::NoteRequestBody;
use crate::inbound::http::extractor::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_note(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(body), _): WithRejection<Json<NoteRequestBody>, ApiError>,
) -> Result<ApiSuccess<NoteData>, ApiError> {
    state
        .note_service
        .create_note(&user.id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::CREATED, note.into()))
}
