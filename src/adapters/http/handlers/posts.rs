use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{CreatePostRequest, PageQuery, UpdatePostRequest},
  errors::{ApiError, parse_id},
  middleware::CurrentUser,
};
use crate::domain::post::{CreatePost, DeletePost, PostService};

/// GET /api/v1/posts
pub async fn list_posts_handler(
  post_service: web::Data<Arc<PostService>>,
) -> Result<HttpResponse, ApiError> {
  let posts = post_service.get_all_posts().await?;
  Ok(HttpResponse::Ok().json(posts))
}

/// Handler for creating a post
///
/// POST /api/v1/posts?page=N
/// Body: CreatePostRequest (JSON)
/// Response: the new post plus the listing for page N (JSON) with status 201.
/// A missing, non-numeric or non-positive N lists the first page.
pub async fn create_post_handler(
  user: CurrentUser,
  request: web::Json<CreatePostRequest>,
  query: web::Query<PageQuery>,
  post_service: web::Data<Arc<PostService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let created = post_service
    .create_post(CreatePost {
      title: request.title,
      content: request.content,
      category: request.category,
      user_id: user.0.id,
      page: query.page_number(),
    })
    .await?;

  Ok(HttpResponse::Created().json(created))
}

/// GET /api/v1/posts/{id}
pub async fn get_post_handler(
  path: web::Path<String>,
  post_service: web::Data<Arc<PostService>>,
) -> Result<HttpResponse, ApiError> {
  let post_id = parse_id(&path)?;
  let details = post_service.get_post_by_id(post_id).await?;
  Ok(HttpResponse::Ok().json(details))
}

/// PATCH /api/v1/posts/{id}
pub async fn update_post_handler(
  user: CurrentUser,
  path: web::Path<String>,
  request: web::Json<UpdatePostRequest>,
  post_service: web::Data<Arc<PostService>>,
) -> Result<HttpResponse, ApiError> {
  let post_id = parse_id(&path)?;
  request.validate()?;

  let post = post_service
    .update_post(post_id, request.into_inner().into(), user.0.id)
    .await?;

  Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/v1/posts/{id}
///
/// Responds 204. Comments on the post are kept.
pub async fn delete_post_handler(
  user: CurrentUser,
  path: web::Path<String>,
  post_service: web::Data<Arc<PostService>>,
) -> Result<HttpResponse, ApiError> {
  let post_id = parse_id(&path)?;

  post_service
    .delete_post(DeletePost {
      post_id: Some(post_id),
      user_id: Some(user.0.id),
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/posts/user/{user_id}
pub async fn posts_by_user_handler(
  path: web::Path<String>,
  post_service: web::Data<Arc<PostService>>,
) -> Result<HttpResponse, ApiError> {
  let user_id = parse_id(&path)?;
  let posts = post_service.get_posts_by_user_id(user_id).await?;
  Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/v1/posts/category/{category}
pub async fn posts_by_category_handler(
  path: web::Path<String>,
  post_service: web::Data<Arc<PostService>>,
) -> Result<HttpResponse, ApiError> {
  let posts = post_service.get_posts_by_category(&path).await?;
  Ok(HttpResponse::Ok().json(posts))
}
