use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ownership::OwnerRef;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  pub id: Uuid,
  pub title: String,
  pub content: String,
  pub category: String,
  pub owner: OwnerRef,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Post {
  pub fn new(title: String, content: String, category: String, owner_id: Uuid) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      title,
      content,
      category,
      owner: OwnerRef::Id(owner_id),
      created_at: now,
      updated_at: now,
    }
  }

  /// Applies the set fields of `patch` and bumps `updated_at`
  pub fn apply(&mut self, patch: PostPatch) {
    if let Some(title) = patch.title {
      self.title = title;
    }
    if let Some(content) = patch.content {
      self.content = content;
    }
    if let Some(category) = patch.category {
      self.category = category;
    }
    self.updated_at = Utc::now();
  }
}

/// Partial update of a post's editable fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
  pub title: Option<String>,
  pub content: Option<String>,
  pub category: Option<String>,
}

impl PostPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none() && self.content.is_none() && self.category.is_none()
  }

  /// True when any provided field is empty or whitespace
  pub fn has_blank_field(&self) -> bool {
    [&self.title, &self.content, &self.category]
      .into_iter()
      .flatten()
      .any(|value| value.trim().is_empty())
  }
}

/// 1-indexed page number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u32);

impl Page {
  pub const FIRST: Page = Page(1);

  /// Normalizes a requested page; absent or non-positive values select the first page
  pub fn new(requested: Option<i64>) -> Self {
    match requested {
      Some(page) if page > 0 => Page(u32::try_from(page).unwrap_or(u32::MAX)),
      _ => Self::FIRST,
    }
  }

  pub fn number(self) -> u32 {
    self.0
  }

  /// 0-indexed row offset for the given page size
  pub fn offset(self, per_page: u32) -> i64 {
    (i64::from(self.0) - 1) * i64::from(per_page)
  }
}

impl Default for Page {
  fn default() -> Self {
    Self::FIRST
  }
}

/// Input for creating a post
#[derive(Debug, Clone)]
pub struct CreatePost {
  pub title: String,
  pub content: String,
  pub category: String,
  pub user_id: Uuid,
  pub page: Option<i64>,
}

/// Result of creating a post: the new post and a fresh listing
#[derive(Debug, Clone, Serialize)]
pub struct CreatedPost {
  pub new_post: Post,
  pub posts: Vec<Post>,
  pub total_posts: i64,
  /// Page the listing was taken from, after normalization
  pub page: u32,
}

/// A post with the number of comments attached to it
#[derive(Debug, Clone, Serialize)]
pub struct PostDetails {
  pub post: Post,
  pub total_comments: i64,
}

/// Input for deleting a post
#[derive(Debug, Clone, Default)]
pub struct DeletePost {
  pub post_id: Option<Uuid>,
  pub user_id: Option<Uuid>,
}
