use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::ownership::OwnerRef;
use crate::domain::post::{Post, PostPatch, PostRepository};
use crate::domain::user::PublicUser;

/// PostgreSQL implementation of the PostRepository trait
///
/// Reads join `users` so posts come back with the owner's public profile.
pub struct PostgresPostRepository {
  pool: PgPool,
}

impl PostgresPostRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

const SELECT_POSTS: &str = r#"
            SELECT
                p.id,
                p.title,
                p.content,
                p.category,
                p.user_id,
                u.email AS owner_email,
                u.name AS owner_name,
                p.created_at,
                p.updated_at
            FROM posts p
            LEFT JOIN users u ON u.id = p.user_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
  id: Uuid,
  title: String,
  content: String,
  category: String,
  user_id: Uuid,
  owner_email: Option<String>,
  owner_name: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
  fn from(row: PostRow) -> Self {
    // Owner rows can be missing; fall back to the bare id
    let owner = match (row.owner_email, row.owner_name) {
      (Some(email), Some(name)) => OwnerRef::Profile(PublicUser {
        id: row.user_id,
        email,
        name,
      }),
      _ => OwnerRef::Id(row.user_id),
    };

    Post {
      id: row.id,
      title: row.title,
      content: row.content,
      category: row.category,
      owner,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepositoryError> {
    let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POSTS} WHERE p.id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Into::into))
  }

  async fn find_all(&self) -> Result<Vec<Post>, RepositoryError> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
      "{SELECT_POSTS} ORDER BY p.created_at DESC, p.id"
    ))
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn create(&self, post: Post) -> Result<Post, RepositoryError> {
    sqlx::query(
      r#"
            INSERT INTO posts (id, title, content, category, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
    )
    .bind(post.id)
    .bind(&post.title)
    .bind(&post.content)
    .bind(&post.category)
    .bind(post.owner.user_id())
    .bind(post.created_at)
    .bind(post.updated_at)
    .execute(&self.pool)
    .await?;

    self
      .find_by_id(post.id)
      .await?
      .ok_or(RepositoryError::NotFound)
  }

  async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepositoryError> {
    let result = sqlx::query(
      r#"
            UPDATE posts
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                updated_at = NOW()
            WHERE id = $1
            "#,
    )
    .bind(id)
    .bind(patch.title)
    .bind(patch.content)
    .bind(patch.category)
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound);
    }

    self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }

  async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>, RepositoryError> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
      "{SELECT_POSTS} ORDER BY p.created_at DESC, p.id OFFSET $1 LIMIT $2"
    ))
    .bind(offset)
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn count(&self) -> Result<i64, RepositoryError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
      .fetch_one(&self.pool)
      .await?;

    Ok(count)
  }

  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepositoryError> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
      "{SELECT_POSTS} WHERE p.user_id = $1 ORDER BY p.created_at DESC, p.id"
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn find_by_category(&self, category: &str) -> Result<Vec<Post>, RepositoryError> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
      "{SELECT_POSTS} WHERE p.category = $1 ORDER BY p.created_at DESC, p.id"
    ))
    .bind(category)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }
}
