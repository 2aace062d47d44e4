use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ownership::OwnerRef;

/// Comment attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id: Uuid,
  pub post_id: Uuid,
  pub owner: OwnerRef,
  pub text: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Comment {
  pub fn new(post_id: Uuid, owner_id: Uuid, text: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      post_id,
      owner: OwnerRef::Id(owner_id),
      text,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Input for adding a comment to a post
#[derive(Debug, Clone)]
pub struct NewComment {
  pub post_id: Uuid,
  pub user_id: Uuid,
  pub text: String,
}

/// Comments of one post with their count
#[derive(Debug, Clone, Serialize)]
pub struct PostComments {
  pub total_comments: usize,
  pub comments: Vec<Comment>,
}

/// Input for deleting a comment
#[derive(Debug, Clone, Default)]
pub struct DeleteComment {
  pub comment_id: Option<Uuid>,
  pub user_id: Option<Uuid>,
}
