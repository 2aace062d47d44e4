use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::comment::{Comment, CommentRepository};
use crate::domain::errors::RepositoryError;
use crate::domain::ownership::OwnerRef;

/// PostgreSQL implementation of the CommentRepository trait
pub struct PostgresCommentRepository {
  pool: PgPool,
}

impl PostgresCommentRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
  id: Uuid,
  post_id: Uuid,
  user_id: Uuid,
  text: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
  fn from(row: CommentRow) -> Self {
    Comment {
      id: row.id,
      post_id: row.post_id,
      owner: OwnerRef::Id(row.user_id),
      text: row.text,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
  async fn create(&self, comment: Comment) -> Result<Comment, RepositoryError> {
    let row = sqlx::query_as::<_, CommentRow>(
      r#"
            INSERT INTO comments (id, post_id, user_id, text, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, post_id, user_id, text, created_at, updated_at
            "#,
    )
    .bind(comment.id)
    .bind(comment.post_id)
    .bind(comment.owner.user_id())
    .bind(&comment.text)
    .bind(comment.created_at)
    .bind(comment.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError> {
    let row = sqlx::query_as::<_, CommentRow>(
      r#"
            SELECT id, post_id, user_id, text, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepositoryError> {
    let rows = sqlx::query_as::<_, CommentRow>(
      r#"
            SELECT id, post_id, user_id, text, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id
            "#,
    )
    .bind(post_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn count_for_post(&self, post_id: Uuid) -> Result<i64, RepositoryError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
      .bind(post_id)
      .fetch_one(&self.pool)
      .await?;

    Ok(count)
  }

  async fn update_text(&self, id: Uuid, text: String) -> Result<Comment, RepositoryError> {
    let row = sqlx::query_as::<_, CommentRow>(
      r#"
            UPDATE comments
            SET text = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, post_id, user_id, text, created_at, updated_at
            "#,
    )
    .bind(id)
    .bind(text)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Into::into).ok_or(RepositoryError::NotFound)
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM comments WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }
}
