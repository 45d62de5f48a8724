//! In-memory repositories.
//!
//! Used when no database is configured or reachable, and by the integration
//! tests. Data lives only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteId;
use crate::domain::note::ports::NoteRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

/// Enforces the same unique keys as the `users` table.
fn check_unique(users: &HashMap<UserId, User>, user: &User) -> Result<(), UserError> {
    let others = || users.values().filter(|u| u.id != user.id);

    if others().any(|u| u.email == user.email) {
        return Err(UserError::EmailAlreadyExists(user.email.to_string()));
    }

    if let Some(google_id) = user.google_id.as_deref() {
        if others().any(|u| u.google_id.as_deref() == Some(google_id)) {
            return Err(UserError::GoogleAccountInUse(google_id.to_string()));
        }
    }

    Ok(())
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        // Uniqueness check and insert share one write lock
        let mut users = self.users.write().await;
        check_unique(&users, &user)?;

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        check_unique(&users, &user)?;

        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }
}

#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<HashMap<NoteId, Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create(&self, note: Note) -> Result<Note, NoteError> {
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError> {
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|n| &n.owner == owner)
            .cloned()
            .collect();

        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn find_owned(&self, owner: &UserId, id: &NoteId) -> Result<Option<Note>, NoteError> {
        Ok(self
            .notes
            .read()
            .await
            .get(id)
            .filter(|n| &n.owner == owner)
            .cloned())
    }

    async fn update(&self, note: Note) -> Result<Note, NoteError> {
        let mut notes = self.notes.write().await;

        match notes.get_mut(&note.id) {
            Some(stored) if stored.owner == note.owner => {
                stored.title = note.title.clone();
                stored.content = note.content.clone();
                stored.updated_at = note.updated_at;
                Ok(stored.clone())
            }
            _ => Err(NoteError::NotFound(note.id.to_string())),
        }
    }

    async fn delete_owned(&self, owner: &UserId, id: &NoteId) -> Result<bool, NoteError> {
        let mut notes = self.notes.write().await;

        if notes.get(id).is_some_and(|n| &n.owner == owner) {
            notes.remove(id);
            return Ok(true);
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::domain::note::models::NoteCommand;
    use crate::domain::note::models::NoteContent;
    use crate::domain::note::models::NoteTitle;
    use crate::domain::user::models::UserName;

    fn user(address: &str) -> User {
        User::with_password(
            UserName::new("Alice".to_string()).unwrap(),
            EmailAddress::new(address.to_string()).unwrap(),
            "$argon2id$hash".to_string(),
            None,
        )
    }

    fn note(owner: UserId, title: &str) -> Note {
        Note::new(
            owner,
            NoteCommand {
                title: NoteTitle::new(title.to_string()).unwrap(),
                content: NoteContent::new("Body".to_string()).unwrap(),
            },
        )
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let repository = InMemoryUserRepository::new();

        repository.create(user("alice@example.com")).await.unwrap();
        let result = repository.create(user("alice@example.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_google_subject_is_unique() {
        let repository = InMemoryUserRepository::new();

        let mut first = user("alice@example.com");
        first.google_id = Some("google-sub-1".to_string());
        repository.create(first.clone()).await.unwrap();

        let mut second = user("bob@example.com");
        second.google_id = Some("google-sub-1".to_string());
        let result = repository.create(second).await;
        assert!(matches!(result, Err(UserError::GoogleAccountInUse(_))));

        let mut third = repository.create(user("carol@example.com")).await.unwrap();
        third.google_id = Some("google-sub-1".to_string());
        let result = repository.update(third).await;
        assert!(matches!(result, Err(UserError::GoogleAccountInUse(_))));

        let found = repository.find_by_google_id("google-sub-1").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(first.id));
        assert!(repository.find_by_google_id("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_signups_store_one_user() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.create(user("race@example.com")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_find_by_email_and_update() {
        let repository = InMemoryUserRepository::new();
        let stored = repository.create(user("alice@example.com")).await.unwrap();

        let email = EmailAddress::new("alice@example.com".to_string()).unwrap();
        let mut found = repository.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);

        found.google_id = Some("sub".to_string());
        repository.update(found).await.unwrap();

        let reloaded = repository.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.google_id.as_deref(), Some("sub"));

        let missing = repository.update(user("bob@example.com")).await;
        assert!(matches!(missing, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_notes_listed_newest_first() {
        let repository = InMemoryNoteRepository::new();
        let owner = UserId::new();

        let mut older = note(owner, "older");
        older.created_at = older.created_at - Duration::minutes(5);
        repository.create(older).await.unwrap();
        repository.create(note(owner, "newer")).await.unwrap();
        repository.create(note(UserId::new(), "foreign")).await.unwrap();

        let notes = repository.list_by_owner(&owner).await.unwrap();
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_foreign_note_is_invisible() {
        let repository = InMemoryNoteRepository::new();
        let owner = UserId::new();
        let intruder = UserId::new();

        let stored = repository.create(note(owner, "private")).await.unwrap();

        assert!(repository
            .find_owned(&intruder, &stored.id)
            .await
            .unwrap()
            .is_none());
        assert!(!repository.delete_owned(&intruder, &stored.id).await.unwrap());

        let mut hijacked = stored.clone();
        hijacked.owner = intruder;
        assert!(matches!(
            repository.update(hijacked).await,
            Err(NoteError::NotFound(_))
        ));

        assert!(repository.delete_owned(&owner, &stored.id).await.unwrap());
        assert!(repository
            .find_owned(&owner, &stored.id)
            .await
            .unwrap()
            .is_none());
    }
}
