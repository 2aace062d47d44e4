use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::comment::{Comment, CommentRepository};
use crate::domain::errors::RepositoryError;

/// Thread-safe in-memory annotation store
#[derive(Default)]
pub struct InMemoryCommentRepository {
  comments: RwLock<Vec<Comment>>,
}

impl InMemoryCommentRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
  async fn create(&self, comment: Comment) -> Result<Comment, RepositoryError> {
    let mut comments = self.comments.write().await;
    if comments.iter().any(|existing| existing.id == comment.id) {
      return Err(RepositoryError::DuplicateKey(comment.id.to_string()));
    }
    comments.push(comment.clone());
    Ok(comment)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError> {
    let comments = self.comments.read().await;
    Ok(comments.iter().find(|comment| comment.id == id).cloned())
  }

  async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepositoryError> {
    let comments = self.comments.read().await;
    Ok(
      comments
        .iter()
        .filter(|comment| comment.post_id == post_id)
        .cloned()
        .collect(),
    )
  }

  async fn count_for_post(&self, post_id: Uuid) -> Result<i64, RepositoryError> {
    let comments = self.comments.read().await;
    let count = comments
      .iter()
      .filter(|comment| comment.post_id == post_id)
      .count();
    Ok(i64::try_from(count).unwrap_or(i64::MAX))
  }

  async fn update_text(&self, id: Uuid, text: String) -> Result<Comment, RepositoryError> {
    let mut comments = self.comments.write().await;
    let comment = comments
      .iter_mut()
      .find(|comment| comment.id == id)
      .ok_or(RepositoryError::NotFound)?;

    comment.text = text;
    comment.updated_at = Utc::now();
    Ok(comment.clone())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    self.comments.write().await.retain(|comment| comment.id != id);
    Ok(())
  }
}
