use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Comment;
use crate::domain::errors::RepositoryError;

/// Annotation store for comments, scoped to posts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
  async fn create(&self, comment: Comment) -> Result<Comment, RepositoryError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError>;
  /// Oldest first
  async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepositoryError>;
  async fn count_for_post(&self, post_id: Uuid) -> Result<i64, RepositoryError>;
  async fn update_text(&self, id: Uuid, text: String) -> Result<Comment, RepositoryError>;
  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
