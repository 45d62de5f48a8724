use thiserror::Error;

/// Error type for NoteId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for NoteTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteTitleError {
    #[error("Title is required")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for NoteContent validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteContentError {
    #[error("Content is required")]
    Empty,

    #[error("Content too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all note operations
#[derive(Debug, Clone, Error)]
pub enum NoteError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] NoteTitleError),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] NoteContentError),

    /// Absent and foreign notes are both reported as not found.
    #[error("Note not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
