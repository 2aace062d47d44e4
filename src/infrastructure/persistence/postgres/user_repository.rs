use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::user::{Email, User, UserRepository};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  name: String,
  password_hash: String,
  created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.email,
      row.name,
      row.password_hash,
      row.created_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, name, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, name, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, email, name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, name, password_hash, created_at
            "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }
}
