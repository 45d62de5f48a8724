use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteCommand;
use crate::domain::note::models::NoteId;
use crate::domain::note::ports::NoteRepository;
use crate::domain::note::ports::NoteServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for note operations.
pub struct NoteService<NR>
where
    NR: NoteRepository + ?Sized,
{
    repository: Arc<NR>,
}

impl<NR> NoteService<NR>
where
    NR: NoteRepository + ?Sized,
{
    /// Create a new note service.
    ///
    /// # Arguments
    /// * `repository` - Note persistence implementation
    pub fn new(repository: Arc<NR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<NR> NoteServicePort for NoteService<NR>
where
    NR: NoteRepository + ?Sized,
{
    async fn list_notes(&self, owner: &UserId) -> Result<Vec<Note>, NoteError> {
        self.repository.list_by_owner(owner).await
    }

    async fn create_note(&self, owner: &UserId, command: NoteCommand) -> Result<Note, NoteError> {
        let note = self.repository.create(Note::new(*owner, command)).await?;
        tracing::debug!(note_id = %note.id, user_id = %owner, "Note created");

        Ok(note)
    }

    async fn update_note(
        &self,
        owner: &UserId,
        id: &NoteId,
        command: NoteCommand,
    ) -> Result<Note, NoteError> {
        let mut note = self
            .repository
            .find_owned(owner, id)
            .await?
            .ok_or(NoteError::NotFound(id.to_string()))?;

        note.apply(command);

        self.repository.update(note).await
    }

    async fn delete_note(&self, owner: &UserId, id: &NoteId) -> Result<(), NoteError> {
        if !self.repository.delete_owned(owner, id).await? {
            return Err(NoteError::NotFound(id.to_string()));
        }

        tracing::debug!(note_id = %id, user_id = %owner, "Note deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::note::models::NoteContent;
    use crate::domain::note::models::NoteTitle;

    mock! {
        pub TestNoteRepository {}

        #[async_trait]
        impl NoteRepository for TestNoteRepository {
            async fn create(&self, note: Note) -> Result<Note, NoteError>;
            async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError>;
            async fn find_owned(&self, owner: &UserId, id: &NoteId) -> Result<Option<Note>, NoteError>;
            async fn update(&self, note: Note) -> Result<Note, NoteError>;
            async fn delete_owned(&self, owner: &UserId, id: &NoteId) -> Result<bool, NoteError>;
        }
    }

    fn command(title: &str, content: &str) -> NoteCommand {
        NoteCommand {
            title: NoteTitle::new(title.to_string()).unwrap(),
            content: NoteContent::new(content.to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_note_assigns_owner() {
        let mut repository = MockTestNoteRepository::new();
        let owner = UserId::new();

        repository
            .expect_create()
            .withf(move |note| {
                note.owner == owner
                    && note.title.as_str() == "Groceries"
                    && note.created_at == note.updated_at
            })
            .times(1)
            .returning(|note| Ok(note));

        let service = NoteService::new(Arc::new(repository));

        let note = service
            .create_note(&owner, command("Groceries", "Milk"))
            .await
            .unwrap();
        assert_eq!(note.owner, owner);
        assert_eq!(note.content.as_str(), "Milk");
    }

    #[tokio::test]
    async fn test_update_note_keeps_identity() {
        let mut repository = MockTestNoteRepository::new();
        let owner = UserId::new();

        let existing = Note::new(owner, command("Old", "Old body"));
        let (note_id, created_at) = (existing.id, existing.created_at);

        repository
            .expect_find_owned()
            .withf(move |o, id| *o == owner && *id == note_id)
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(move |note| {
                note.id == note_id
                    && note.created_at == created_at
                    && note.title.as_str() == "New"
            })
            .times(1)
            .returning(|note| Ok(note));

        let service = NoteService::new(Arc::new(repository));

        let note = service
            .update_note(&owner, &note_id, command("New", "New body"))
            .await
            .unwrap();
        assert_eq!(note.owner, owner);
        assert!(note.updated_at >= created_at);
    }

    #[tokio::test]
    async fn test_update_foreign_note_is_not_found() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_find_owned()
            .times(1)
            .returning(|_, _| Ok(None));
        repository.expect_update().times(0);

        let service = NoteService::new(Arc::new(repository));

        let result = service
            .update_note(&UserId::new(), &NoteId::new(), command("New", "Body"))
            .await;
        assert!(matches!(result, Err(NoteError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_note() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_delete_owned()
            .times(1)
            .returning(|_, _| Ok(true));

        let service = NoteService::new(Arc::new(repository));

        let result = service.delete_note(&UserId::new(), &NoteId::new()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_note_is_not_found() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_delete_owned()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = NoteService::new(Arc::new(repository));

        let result = service.delete_note(&UserId::new(), &NoteId::new()).await;
        assert!(matches!(result, Err(NoteError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_propagates_database_error() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_list_by_owner()
            .times(1)
            .returning(|_| Err(NoteError::DatabaseError("connection reset".to_string())));

        let service = NoteService::new(Arc::new(repository));

        let result = service.list_notes(&UserId::new()).await;
        assert!(matches!(result, Err(NoteError::DatabaseError(_))));
    }
}
