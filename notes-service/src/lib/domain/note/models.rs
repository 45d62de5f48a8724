use std::fmt;

use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::note::errors::NoteContentError;
use crate::domain::note::errors::NoteIdError;
use crate::domain::note::errors::NoteTitleError;
use crate::domain::user::models::UserId;

/// Note aggregate root entity.
///
/// The owner is fixed at creation. `created_at` never changes and
/// `updated_at` advances on every update. Timestamps carry microsecond
/// precision, the resolution PostgreSQL stores.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub owner: UserId,
    pub title: NoteTitle,
    pub content: NoteContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note owned by `owner`.
    pub fn new(owner: UserId, command: NoteCommand) -> Self {
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: NoteId::new(),
            owner,
            title: command.title,
            content: command.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and content, keeping identity and creation time.
    pub fn apply(&mut self, command: NoteCommand) {
        self.title = command.title;
        self.content = command.content;
        self.updated_at = Utc::now().trunc_subsecs(6).max(self.created_at);
    }
}

/// Note unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Generate a new random note ID.
    ///
    /// # Returns
    /// NoteId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a note ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, NoteIdError> {
        Uuid::parse_str(s)
            .map(NoteId)
            .map_err(|e| NoteIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Note title value object.
///
/// Trimmed, 1 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTitle(String);

impl NoteTitle {
    const MAX_LENGTH: usize = 100;

    /// Create a new validated note title.
    ///
    /// # Arguments
    /// * `title` - Raw title, surrounding whitespace is dropped
    ///
    /// # Errors
    /// * `Empty` - Title is blank
    /// * `TooLong` - Title exceeds 100 characters
    pub fn new(title: String) -> Result<Self, NoteTitleError> {
        let trimmed = title.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(NoteTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NoteTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Note content value object.
///
/// Trimmed, 1 to 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent(String);

impl NoteContent {
    const MAX_LENGTH: usize = 1000;

    /// Create a new validated note content.
    ///
    /// # Errors
    /// * `Empty` - Content is blank
    /// * `TooLong` - Content exceeds 1000 characters
    pub fn new(content: String) -> Result<Self, NoteContentError> {
        let trimmed = content.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(NoteContentError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NoteContentError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated title and content, used for both create and update.
#[derive(Debug, Clone)]
pub struct NoteCommand {
    pub title: NoteTitle,
    pub content: NoteContent,
}
