use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::post::{Post, PostPatch, PostRepository};

/// Thread-safe in-memory content store
///
/// Posts are kept in insertion order; listings are newest first.
#[derive(Default)]
pub struct InMemoryPostRepository {
  posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
  pub fn new() -> Self {
    Self::default()
  }

  async fn newest_first<F>(&self, filter: F) -> Vec<Post>
  where
    F: Fn(&Post) -> bool,
  {
    let posts = self.posts.read().await;
    let mut matching: Vec<Post> = posts.iter().rev().filter(|p| filter(p)).cloned().collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matching
  }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepositoryError> {
    let posts = self.posts.read().await;
    Ok(posts.iter().find(|post| post.id == id).cloned())
  }

  async fn find_all(&self) -> Result<Vec<Post>, RepositoryError> {
    Ok(self.newest_first(|_| true).await)
  }

  async fn create(&self, post: Post) -> Result<Post, RepositoryError> {
    let mut posts = self.posts.write().await;
    if posts.iter().any(|existing| existing.id == post.id) {
      return Err(RepositoryError::DuplicateKey(post.id.to_string()));
    }
    posts.push(post.clone());
    Ok(post)
  }

  async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepositoryError> {
    let mut posts = self.posts.write().await;
    let post = posts
      .iter_mut()
      .find(|post| post.id == id)
      .ok_or(RepositoryError::NotFound)?;

    post.apply(patch);
    Ok(post.clone())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    self.posts.write().await.retain(|post| post.id != id);
    Ok(())
  }

  async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>, RepositoryError> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);

    Ok(
      self
        .newest_first(|_| true)
        .await
        .into_iter()
        .skip(offset)
        .take(limit)
        .collect(),
    )
  }

  async fn count(&self) -> Result<i64, RepositoryError> {
    let len = self.posts.read().await.len();
    Ok(i64::try_from(len).unwrap_or(i64::MAX))
  }

  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepositoryError> {
    Ok(self.newest_first(|post| post.owner.user_id() == user_id).await)
  }

  async fn find_by_category(&self, category: &str) -> Result<Vec<Post>, RepositoryError> {
    Ok(self.newest_first(|post| post.category == category).await)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, Utc};

  fn post_at(minutes_ago: i64, category: &str, owner: Uuid) -> Post {
    let mut post = Post::new(
      format!("Post from {} minutes ago", minutes_ago),
      "Body".to_string(),
      category.to_string(),
      owner,
    );
    post.created_at = Utc::now() - Duration::minutes(minutes_ago);
    post
  }

  #[tokio::test]
  async fn test_listing_is_newest_first_and_paginated() {
    let repo = InMemoryPostRepository::new();
    let owner = Uuid::new_v4();
    for minutes_ago in [30, 10, 20] {
      repo.create(post_at(minutes_ago, "misc", owner)).await.unwrap();
    }

    let all = repo.find_all().await.unwrap();
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let page = repo.find_page(1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, all[1].id);
    assert_eq!(repo.count().await.unwrap(), 3);
  }

  #[tokio::test]
  async fn test_filters_by_owner_and_category() {
    let repo = InMemoryPostRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    repo.create(post_at(1, "rust", alice)).await.unwrap();
    repo.create(post_at(2, "go", bob)).await.unwrap();

    assert_eq!(repo.find_by_user_id(alice).await.unwrap().len(), 1);
    assert_eq!(repo.find_by_category("go").await.unwrap()[0].owner.user_id(), bob);
    assert!(repo.find_by_category("zig").await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_update_missing_post() {
    let repo = InMemoryPostRepository::new();

    let result = repo.update(Uuid::new_v4(), PostPatch::default()).await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
  }
}
