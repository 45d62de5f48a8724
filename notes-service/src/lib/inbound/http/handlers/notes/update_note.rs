use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;

use super::parse_note_id;
use super::NoteData;
use super::NoteRequestBody;
use crate::inbound::http::extractor::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_note(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(note_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<NoteRequestBody>, ApiError>,
) -> Result<ApiSuccess<NoteData>, ApiError> {
    let note_id = parse_note_id(&note_id)?;

    state
        .note_service
        .update_note(&user.id, &note_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::OK, note.into()))
}
