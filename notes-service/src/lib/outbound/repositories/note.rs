use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteContent;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::NoteTitle;
use crate::domain::note::ports::NoteRepository;
use crate::domain::user::models::UserId;

#[derive(FromRow)]
struct NoteRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = NoteError;

    fn try_from(r: NoteRow) -> Result<Self, Self::Error> {
        Ok(Note {
            id: NoteId(r.id),
            owner: UserId(r.user_id),
            title: NoteTitle::new(r.title)?,
            content: NoteContent::new(r.content)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn create(&self, note: Note) -> Result<Note, NoteError> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(note.id.0)
        .bind(note.owner.0)
        .bind(note.title.as_str())
        .bind(note.content.as_str())
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| NoteError::DatabaseError(e.to_string()))?;

        Ok(note)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM notes
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| NoteError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Note::try_from).collect()
    }

    async fn find_owned(&self, owner: &UserId, id: &NoteId) -> Result<Option<Note>, NoteError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM notes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| NoteError::DatabaseError(e.to_string()))?;

        row.map(Note::try_from).transpose()
    }

    async fn update(&self, note: Note) -> Result<Note, NoteError> {
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET title = $3, content = $4, updated_at = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(note.id.0)
        .bind(note.owner.0)
        .bind(note.title.as_str())
        .bind(note.content.as_str())
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| NoteError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(NoteError::NotFound(note.id.to_string()));
        }

        Ok(note)
    }

    async fn delete_owned(&self, owner: &UserId, id: &NoteId) -> Result<bool, NoteError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(owner.0)
            .execute(&self.pool)
            .await
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
