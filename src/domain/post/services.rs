use std::sync::Arc;
use uuid::Uuid;

use super::entities::{CreatePost, CreatedPost, DeletePost, Page, Post, PostDetails, PostPatch};
use super::ports::PostRepository;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::errors::{AppError, ErrorKind, RepositoryError};
use crate::domain::ownership::is_owned_by;
use crate::domain::user::UserRepository;

/// Tunables for post listings
#[derive(Debug, Clone, Copy)]
pub struct PostServiceConfig {
  pub posts_per_page: u32,
}

impl Default for PostServiceConfig {
  fn default() -> Self {
    Self { posts_per_page: 10 }
  }
}

/// Post lifecycle, ownership checks and pagination
pub struct PostService {
  post_repo: Arc<dyn PostRepository>,
  comment_repo: Arc<dyn CommentRepository>,
  user_repo: Arc<dyn UserRepository>,
  config: PostServiceConfig,
}

impl PostService {
  pub fn new(
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    user_repo: Arc<dyn UserRepository>,
    config: PostServiceConfig,
  ) -> Self {
    Self {
      post_repo,
      comment_repo,
      user_repo,
      config,
    }
  }

  pub async fn get_all_posts(&self) -> Result<Vec<Post>, AppError> {
    Ok(self.post_repo.find_all().await?)
  }

  /// Creates a post and returns it with the listing for the requested page
  ///
  /// # Errors
  /// `INVALID_REQUEST` for a blank field, `USER_NOT_FOUND` when the author
  /// does not exist. Neither case writes anything.
  pub async fn create_post(&self, input: CreatePost) -> Result<CreatedPost, AppError> {
    if [&input.title, &input.content, &input.category]
      .iter()
      .any(|field| field.trim().is_empty())
    {
      return Err(ErrorKind::InvalidRequest.into());
    }

    self
      .user_repo
      .find_by_id(input.user_id)
      .await?
      .ok_or(ErrorKind::UserNotFound)?;

    let post = Post::new(input.title, input.content, input.category, input.user_id);
    let new_post = self.post_repo.create(post).await?;

    tracing::info!("User {} created post {}", input.user_id, new_post.id);

    let page = Page::new(input.page);
    let per_page = self.config.posts_per_page;
    let posts = self
      .post_repo
      .find_page(page.offset(per_page), i64::from(per_page))
      .await?;
    let total_posts = self.post_repo.count().await?;

    Ok(CreatedPost {
      new_post,
      posts,
      total_posts,
      page: page.number(),
    })
  }

  pub async fn get_post_by_id(&self, post_id: Uuid) -> Result<PostDetails, AppError> {
    let post = self
      .post_repo
      .find_by_id(post_id)
      .await?
      .ok_or(ErrorKind::PostNotFound)?;

    let total_comments = self.comment_repo.count_for_post(post.id).await?;

    Ok(PostDetails {
      post,
      total_comments,
    })
  }

  /// Applies `patch` to a post owned by `user_id`
  pub async fn update_post(
    &self,
    post_id: Uuid,
    patch: PostPatch,
    user_id: Uuid,
  ) -> Result<Post, AppError> {
    if patch.is_empty() || patch.has_blank_field() {
      return Err(ErrorKind::InvalidRequest.into());
    }

    let post = self
      .post_repo
      .find_by_id(post_id)
      .await?
      .ok_or(ErrorKind::PostNotFound)?;

    if !is_owned_by(&post.owner, &user_id) {
      tracing::warn!("User {} attempted to update post {}", user_id, post_id);
      return Err(ErrorKind::UnauthorizedToUpdatePost.into());
    }

    // The post can disappear between the ownership check and the write
    let updated = match self.post_repo.update(post.id, patch).await {
      Ok(updated) => updated,
      Err(RepositoryError::NotFound) => return Err(ErrorKind::PostNotFound.into()),
      Err(e) => return Err(e.into()),
    };
    tracing::debug!("Post {} updated", updated.id);
    Ok(updated)
  }

  /// Deletes a post owned by the requester. Its comments are left in place.
  pub async fn delete_post(&self, input: DeletePost) -> Result<(), AppError> {
    let (post_id, user_id) = match (input.post_id, input.user_id) {
      (Some(post_id), Some(user_id)) if !post_id.is_nil() && !user_id.is_nil() => {
        (post_id, user_id)
      }
      _ => return Err(ErrorKind::InvalidRequest.into()),
    };

    let post = self
      .post_repo
      .find_by_id(post_id)
      .await?
      .ok_or(ErrorKind::PostNotFound)?;

    if !is_owned_by(&post.owner, &user_id) {
      tracing::warn!("User {} attempted to delete post {}", user_id, post_id);
      return Err(ErrorKind::UnauthorizedToDeletePost.into());
    }

    self.post_repo.delete(post.id).await?;
    tracing::info!("Post {} deleted by {}", post_id, user_id);
    Ok(())
  }

  pub async fn get_posts_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, AppError> {
    let posts = self.post_repo.find_by_user_id(user_id).await?;
    if posts.is_empty() {
      return Err(ErrorKind::PostUnavailable.into());
    }
    Ok(posts)
  }

  pub async fn get_posts_by_category(&self, category: &str) -> Result<Vec<Post>, AppError> {
    let posts = self.post_repo.find_by_category(category).await?;
    if posts.is_empty() {
      return Err(ErrorKind::PostNotFound.into());
    }
    Ok(posts)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::comment::ports::MockCommentRepository;
  use crate::domain::ownership::OwnerRef;
  use crate::domain::post::ports::MockPostRepository;
  use crate::domain::user::ports::MockUserRepository;
  use crate::domain::user::{PublicUser, User};

  fn author() -> User {
    User::new(
      "author@example.com".to_string(),
      "Author".to_string(),
      "hash".to_string(),
    )
  }

  fn post_owned_by(owner_id: Uuid) -> Post {
    Post::new(
      "Hello".to_string(),
      "First post".to_string(),
      "general".to_string(),
      owner_id,
    )
  }

  fn service(
    posts: MockPostRepository,
    comments: MockCommentRepository,
    users: MockUserRepository,
  ) -> PostService {
    PostService::new(
      Arc::new(posts),
      Arc::new(comments),
      Arc::new(users),
      PostServiceConfig::default(),
    )
  }

  fn create_input(user_id: Uuid, page: Option<i64>) -> CreatePost {
    CreatePost {
      title: "Hello".to_string(),
      content: "First post".to_string(),
      category: "general".to_string(),
      user_id,
      page,
    }
  }

  #[tokio::test]
  async fn test_get_all_posts_propagates_store_error() {
    let mut posts = MockPostRepository::new();
    posts
      .expect_find_all()
      .returning(|| Err(RepositoryError::QueryFailed("boom".to_string())));

    let svc = service(posts, MockCommentRepository::new(), MockUserRepository::new());
    let result = svc.get_all_posts().await;

    assert!(matches!(
      result,
      Err(AppError::Repository(RepositoryError::QueryFailed(_)))
    ));
  }

  #[tokio::test]
  async fn test_create_post_defaults_to_first_page() {
    for page in [None, Some(0), Some(-1)] {
      let user = author();
      let user_id = user.id;

      let mut users = MockUserRepository::new();
      users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));

      let mut posts = MockPostRepository::new();
      posts.expect_create().times(1).returning(Ok);
      posts
        .expect_find_page()
        .withf(|offset, limit| *offset == 0 && *limit == 10)
        .times(1)
        .returning(|_, _| Ok(vec![]));
      posts.expect_count().returning(|| Ok(1));

      let svc = service(posts, MockCommentRepository::new(), users);
      let created = svc.create_post(create_input(user_id, page)).await.unwrap();

      assert_eq!(created.new_post.owner, OwnerRef::Id(user_id));
      assert_eq!(created.total_posts, 1);
      assert_eq!(created.page, 1);
    }
  }

  #[tokio::test]
  async fn test_create_post_lists_requested_page() {
    let user = author();
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    users
      .expect_find_by_id()
      .returning(move |_| Ok(Some(user.clone())));

    let mut posts = MockPostRepository::new();
    posts.expect_create().returning(Ok);
    posts
      .expect_find_page()
      .withf(|offset, limit| *offset == 20 && *limit == 10)
      .times(1)
      .returning(move |_, _| Ok(vec![post_owned_by(user_id)]));
    posts.expect_count().returning(|| Ok(21));

    let svc = service(posts, MockCommentRepository::new(), users);
    let created = svc
      .create_post(create_input(user_id, Some(3)))
      .await
      .unwrap();

    assert_eq!(created.posts.len(), 1);
    assert_eq!(created.total_posts, 21);
    assert_eq!(created.page, 3);
  }

  #[tokio::test]
  async fn test_create_post_unknown_user_writes_nothing() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let mut posts = MockPostRepository::new();
    posts.expect_create().never();

    let svc = service(posts, MockCommentRepository::new(), users);
    let result = svc.create_post(create_input(Uuid::new_v4(), None)).await;

    assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::UserNotFound));
  }

  #[tokio::test]
  async fn test_create_post_rejects_blank_title() {
    let svc = service(
      MockPostRepository::new(),
      MockCommentRepository::new(),
      MockUserRepository::new(),
    );
    let mut input = create_input(Uuid::new_v4(), None);
    input.title = "  ".to_string();

    let result = svc.create_post(input).await;

    assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::InvalidRequest));
  }

  #[tokio::test]
  async fn test_get_post_by_id_attaches_comment_count() {
    let post = post_owned_by(Uuid::new_v4());
    let post_id = post.id;

    let mut posts = MockPostRepository::new();
    posts
      .expect_find_by_id()
      .returning(move |_| Ok(Some(post.clone())));

    let mut comments = MockCommentRepository::new();
    comments
      .expect_count_for_post()
      .withf(move |id| *id == post_id)
      .returning(|_| Ok(7));

    let svc = service(posts, comments, MockUserRepository::new());
    let details = svc.get_post_by_id(post_id).await.unwrap();

    assert_eq!(details.post.id, post_id);
    assert_eq!(details.total_comments, 7);
  }

  #[tokio::test]
  async fn test_get_post_by_id_missing_post() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().returning(|_| Ok(None));

    let mut comments = MockCommentRepository::new();
    comments.expect_count_for_post().never();

    let svc = service(posts, comments, MockUserRepository::new());
    let result = svc.get_post_by_id(Uuid::new_v4()).await;

    assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::PostNotFound));
  }

  #[tokio::test]
  async fn test_update_post_by_non_owner_is_rejected() {
    let post = post_owned_by(Uuid::new_v4());

    let mut posts = MockPostRepository::new();
    posts
      .expect_find_by_id()
      .returning(move |_| Ok(Some(post.clone())));
    posts.expect_update().never();

    let svc = service(posts, MockCommentRepository::new(), MockUserRepository::new());
    let patch = PostPatch {
      title: Some("Hijacked".to_string()),
      ..Default::default()
    };
    let result = svc.update_post(Uuid::new_v4(), patch, Uuid::new_v4()).await;

    assert_eq!(
      result.unwrap_err().kind(),
      Some(ErrorKind::UnauthorizedToUpdatePost)
    );
  }

  #[tokio::test]
  async fn test_update_post_accepts_embedded_owner_profile() {
    let owner_id = Uuid::new_v4();
    let mut post = post_owned_by(owner_id);
    post.owner = OwnerRef::Profile(PublicUser {
      id: owner_id,
      email: "owner@example.com".to_string(),
      name: "Owner".to_string(),
    });
    let stored = post.clone();

    let mut posts = MockPostRepository::new();
    posts
      .expect_find_by_id()
      .returning(move |_| Ok(Some(stored.clone())));
    posts.expect_update().times(1).returning(move |_, patch| {
      let mut updated = post.clone();
      updated.apply(patch);
      Ok(updated)
    });

    let svc = service(posts, MockCommentRepository::new(), MockUserRepository::new());
    let patch = PostPatch {
      title: Some("Edited".to_string()),
      ..Default::default()
    };
    let updated = svc.update_post(Uuid::new_v4(), patch, owner_id).await.unwrap();

    assert_eq!(updated.title, "Edited");
  }

  #[tokio::test]
  async fn test_update_post_deleted_before_write_is_not_found() {
    let owner_id = Uuid::new_v4();
    let post = post_owned_by(owner_id);

    let mut posts = MockPostRepository::new();
    posts
      .expect_find_by_id()
      .returning(move |_| Ok(Some(post.clone())));
    posts
      .expect_update()
      .times(1)
      .returning(|_, _| Err(RepositoryError::NotFound));

    let svc = service(posts, MockCommentRepository::new(), MockUserRepository::new());
    let patch = PostPatch {
      title: Some("Edited".to_string()),
      ..Default::default()
    };
    let result = svc.update_post(Uuid::new_v4(), patch, owner_id).await;

    assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::PostNotFound));
  }

  #[tokio::test]
  async fn test_update_post_missing_post_writes_nothing() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().returning(|_| Ok(None));
    posts.expect_update().never();

    let svc = service(posts, MockCommentRepository::new(), MockUserRepository::new());
    let patch = PostPatch {
      content: Some("text".to_string()),
      ..Default::default()
    };
    let result = svc.update_post(Uuid::new_v4(), patch, Uuid::new_v4()).await;

    assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::PostNotFound));
  }

  #[tokio::test]
  async fn test_update_post_rejects_empty_patch() {
    let svc = service(
      MockPostRepository::new(),
      MockCommentRepository::new(),
      MockUserRepository::new(),
    );
    let result = svc
      .update_post(Uuid::new_v4(), PostPatch::default(), Uuid::new_v4())
      .await;

    assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::InvalidRequest));
  }

  #[tokio::test]
  async fn test_delete_post_requires_both_ids() {
    let svc = service(
      MockPostRepository::new(),
      MockCommentRepository::new(),
      MockUserRepository::new(),
    );

    for input in [
      DeletePost {
        post_id: None,
        user_id: Some(Uuid::new_v4()),
      },
      DeletePost {
        post_id: Some(Uuid::new_v4()),
        user_id: None,
      },
      DeletePost {
        post_id: Some(Uuid::nil()),
        user_id: Some(Uuid::new_v4()),
      },
    ] {
      let result = svc.delete_post(input).await;
      assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::InvalidRequest));
    }
  }

  #[tokio::test]
  async fn test_delete_post_by_owner_leaves_comments() {
    let owner_id = Uuid::new_v4();
    let post = post_owned_by(owner_id);
    let post_id = post.id;

    let mut posts = MockPostRepository::new();
    posts
      .expect_find_by_id()
      .returning(move |_| Ok(Some(post.clone())));
    posts
      .expect_delete()
      .withf(move |id| *id == post_id)
      .times(1)
      .returning(|_| Ok(()));

    let mut comments = MockCommentRepository::new();
    comments.expect_delete().never();

    let svc = service(posts, comments, MockUserRepository::new());
    svc
      .delete_post(DeletePost {
        post_id: Some(post_id),
        user_id: Some(owner_id),
      })
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn test_delete_post_by_non_owner_is_rejected() {
    let post = post_owned_by(Uuid::new_v4());
    let post_id = post.id;

    let mut posts = MockPostRepository::new();
    posts
      .expect_find_by_id()
      .returning(move |_| Ok(Some(post.clone())));
    posts.expect_delete().never();

    let svc = service(posts, MockCommentRepository::new(), MockUserRepository::new());
    let result = svc
      .delete_post(DeletePost {
        post_id: Some(post_id),
        user_id: Some(Uuid::new_v4()),
      })
      .await;

    assert_eq!(
      result.unwrap_err().kind(),
      Some(ErrorKind::UnauthorizedToDeletePost)
    );
  }

  #[tokio::test]
  async fn test_posts_by_user_empty_is_unavailable() {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_user_id().returning(|_| Ok(vec![]));

    let svc = service(posts, MockCommentRepository::new(), MockUserRepository::new());
    let result = svc.get_posts_by_user_id(Uuid::new_v4()).await;

    assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::PostUnavailable));
  }

  #[tokio::test]
  async fn test_posts_by_category() {
    let owner_id = Uuid::new_v4();
    let mut posts = MockPostRepository::new();
    posts
      .expect_find_by_category()
      .withf(|category| category == "general")
      .returning(move |_| Ok(vec![post_owned_by(owner_id)]));
    posts
      .expect_find_by_category()
      .returning(|_| Ok(vec![]));

    let svc = service(posts, MockCommentRepository::new(), MockUserRepository::new());

    assert_eq!(svc.get_posts_by_category("general").await.unwrap().len(), 1);
    assert_eq!(
      svc.get_posts_by_category("missing").await.unwrap_err().kind(),
      Some(ErrorKind::PostNotFound)
    );
  }
}
