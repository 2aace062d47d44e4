use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Comment, DeleteComment, NewComment, PostComments};
use super::ports::CommentRepository;
use crate::domain::errors::{AppError, ErrorKind, RepositoryError};
use crate::domain::ownership::is_owned_by;
use crate::domain::post::ports::PostRepository;

/// Comment lifecycle scoped to a post
pub struct CommentService {
  comment_repo: Arc<dyn CommentRepository>,
  post_repo: Arc<dyn PostRepository>,
}

impl CommentService {
  pub fn new(comment_repo: Arc<dyn CommentRepository>, post_repo: Arc<dyn PostRepository>) -> Self {
    Self {
      comment_repo,
      post_repo,
    }
  }

  /// Adds a comment to an existing post
  ///
  /// The existence check and the insert are separate store calls.
  pub async fn add_comment(&self, input: NewComment) -> Result<Comment, AppError> {
    if input.text.trim().is_empty() {
      return Err(ErrorKind::InvalidRequest.into());
    }

    self
      .post_repo
      .find_by_id(input.post_id)
      .await?
      .ok_or(ErrorKind::PostNotFound)?;

    let comment = Comment::new(input.post_id, input.user_id, input.text);
    let created = self.comment_repo.create(comment).await?;

    tracing::debug!("Comment {} added to post {}", created.id, created.post_id);
    Ok(created)
  }

  pub async fn get_comments_by_post_id(&self, post_id: Uuid) -> Result<PostComments, AppError> {
    let comments = self.comment_repo.find_by_post_id(post_id).await?;
    if comments.is_empty() {
      return Err(ErrorKind::NoCommentsYet.into());
    }

    Ok(PostComments {
      total_comments: comments.len(),
      comments,
    })
  }

  pub async fn get_comment(&self, comment_id: Uuid) -> Result<Comment, AppError> {
    let comment = self
      .comment_repo
      .find_by_id(comment_id)
      .await?
      .ok_or(ErrorKind::CommentNotFound)?;
    Ok(comment)
  }

  pub async fn edit_comment(
    &self,
    comment_id: Uuid,
    user_id: Uuid,
    text: String,
  ) -> Result<Comment, AppError> {
    if text.trim().is_empty() {
      return Err(ErrorKind::InvalidRequest.into());
    }

    let comment = self
      .comment_repo
      .find_by_id(comment_id)
      .await?
      .ok_or(ErrorKind::CommentNotFound)?;

    if !is_owned_by(&comment.owner, &user_id) {
      tracing::warn!("User {} attempted to edit comment {}", user_id, comment_id);
      return Err(ErrorKind::UnauthorizedToEditComment.into());
    }

    // The comment can disappear between the ownership check and the write
    match self.comment_repo.update_text(comment.id, text).await {
      Ok(updated) => Ok(updated),
      Err(RepositoryError::NotFound) => Err(ErrorKind::CommentNotFound.into()),
      Err(e) => Err(e.into()),
    }
  }

  pub async fn delete_comment(&self, input: DeleteComment) -> Result<(), AppError> {
    let (comment_id, user_id) = match (input.comment_id, input.user_id) {
      (Some(comment_id), Some(user_id)) if !comment_id.is_nil() && !user_id.is_nil() => {
        (comment_id, user_id)
      }
      _ => return Err(ErrorKind::InvalidRequest.into()),
    };

    let comment = self
      .comment_repo
      .find_by_id(comment_id)
      .await?
      .ok_or(ErrorKind::CommentNotFound)?;

    if !is_owned_by(&comment.owner, &user_id) {
      tracing::warn!("User {} attempted to delete comment {}", user_id, comment_id);
      return Err(ErrorKind::UnauthorizedToDeleteComment.into());
    }

    self.comment_repo.delete(comment.id).await?;
    tracing::debug!("Comment {} deleted", comment_id);
    Ok(())
  }
}
