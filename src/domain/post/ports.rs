use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Post, PostPatch};
use crate::domain::errors::RepositoryError;

/// Content store for posts
///
/// Listing methods return posts newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepositoryError>;
  async fn find_all(&self) -> Result<Vec<Post>, RepositoryError>;
  async fn create(&self, post: Post) -> Result<Post, RepositoryError>;
  /// Applies the patch; `RepositoryError::NotFound` when the post is gone
  async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepositoryError>;
  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
  async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>, RepositoryError>;
  async fn count(&self) -> Result<i64, RepositoryError>;
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepositoryError>;
  async fn find_by_category(&self, category: &str) -> Result<Vec<Post>, RepositoryError>;
}
