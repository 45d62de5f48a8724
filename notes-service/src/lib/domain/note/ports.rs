use async_trait::async_trait;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteCommand;
use crate::domain::note::models::NoteId;
use crate::domain::user::models::UserId;

/// Port for note domain service operations.
///
/// Every operation is scoped to the owner: a note that exists but belongs to
/// someone else is reported exactly like a missing one.
#[async_trait]
pub trait NoteServicePort: Send + Sync + 'static {
    /// List the owner's notes, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_notes(&self, owner: &UserId) -> Result<Vec<Note>, NoteError>;

    /// Create a note for the owner.
    ///
    /// # Arguments
    /// * `owner` - Authenticated user
    /// * `command` - Validated title and content
    ///
    /// # Returns
    /// Created note
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_note(&self, owner: &UserId, command: NoteCommand) -> Result<Note, NoteError>;

    /// Replace title and content of an owned note.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist or is not owned by `owner`
    /// * `DatabaseError` - Database operation failed
    async fn update_note(
        &self,
        owner: &UserId,
        id: &NoteId,
        command: NoteCommand,
    ) -> Result<Note, NoteError>;

    /// Permanently delete an owned note.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist or is not owned by `owner`
    /// * `DatabaseError` - Database operation failed
    async fn delete_note(&self, owner: &UserId, id: &NoteId) -> Result<(), NoteError>;
}

/// Persistence operations for note aggregate.
///
/// Lookups, updates and deletes always filter by note id AND owner id.
#[async_trait]
pub trait NoteRepository: Send + Sync + 'static {
    /// Persist new note to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, note: Note) -> Result<Note, NoteError>;

    /// Retrieve the owner's notes ordered by creation time, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError>;

    /// Retrieve a note if it exists and belongs to `owner`.
    ///
    /// # Returns
    /// Optional note (None if absent or foreign)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_owned(&self, owner: &UserId, id: &NoteId) -> Result<Option<Note>, NoteError>;

    /// Write back title, content and `updated_at` of an owned note.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist or is not owned by its `owner`
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, note: Note) -> Result<Note, NoteError>;

    /// Remove an owned note.
    ///
    /// # Returns
    /// Whether a note was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_owned(&self, owner: &UserId, id: &NoteId) -> Result<bool, NoteError>;
}
