use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_note_id;
use crate::inbound::http::extractor::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponseData;
use crate::inbound::http::router::AppState;

pub async fn delete_note(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(note_id): Path<String>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let note_id = parse_note_id(&note_id)?;

    state.note_service.delete_note(&user.id, &note_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "Note deleted successfully".to_string(),
        },
    ))
}
