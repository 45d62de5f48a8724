use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::note::models::Note;
use crate::domain::note::models::NoteCommand;
use crate::domain::note::models::NoteContent;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::NoteTitle;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::FieldError;

pub mod create_note;
pub mod delete_note;
pub mod list_notes;
pub mod update_note;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteData {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    /// Owner id
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteData {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title.as_str().to_string(),
            content: note.content.as_str().to_string(),
            user: note.owner.to_string(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteRequestBody {
    title: String,
    content: String,
}

impl NoteRequestBody {
    fn try_into_command(self) -> Result<NoteCommand, ApiError> {
        let mut errors = Vec::new();

        let title = NoteTitle::new(self.title)
            .map_err(|e| errors.push(FieldError::new("title", e)))
            .ok();
        let content = NoteContent::new(self.content)
            .map_err(|e| errors.push(FieldError::new("content", e)))
            .ok();

        match (title, content) {
            (Some(title), Some(content)) => Ok(NoteCommand { title, content }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// A path segment that is not a UUID cannot name an existing note.
fn parse_note_id(raw: &str) -> Result<NoteId, ApiError> {
    NoteId::from_string(raw).map_err(|_| ApiError::NotFound("Note not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_body_validation() {
        let body = NoteRequestBody {
            title: "  ".to_string(),
            content: "x".repeat(1001),
        };

        let Err(ApiError::Validation(errors)) = body.try_into_command() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[1].field, "content");
    }

    #[test]
    fn test_note_wire_format() {
        let note = Note::new(
            crate::domain::user::models::UserId::new(),
            NoteCommand {
                title: NoteTitle::new("Title".to_string()).unwrap(),
                content: NoteContent::new("Body".to_string()).unwrap(),
            },
        );

        let body = serde_json::to_value(NoteData::from(&note)).unwrap();
        assert_eq!(body["_id"], note.id.to_string());
        assert_eq!(body["user"], note.owner.to_string());
        assert!(body.get("id").is_none());
        assert!(body.get("createdAt").is_some());
        assert!(body.get("updatedAt").is_some());
    }

    #[test]
    fn test_malformed_note_id_is_not_found() {
        assert_eq!(
            parse_note_id("123"),
            Err(ApiError::NotFound("Note not found".to_string()))
        );
    }
}
