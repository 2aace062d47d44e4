use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::CommentRequest,
  errors::{ApiError, parse_id},
  middleware::CurrentUser,
};
use crate::domain::comment::{CommentService, DeleteComment, NewComment};

/// POST /api/v1/posts/{id}/comments
pub async fn add_comment_handler(
  user: CurrentUser,
  path: web::Path<String>,
  request: web::Json<CommentRequest>,
  comment_service: web::Data<Arc<CommentService>>,
) -> Result<HttpResponse, ApiError> {
  let post_id = parse_id(&path)?;
  request.validate()?;

  let comment = comment_service
    .add_comment(NewComment {
      post_id,
      user_id: user.0.id,
      text: request.into_inner().text,
    })
    .await?;

  Ok(HttpResponse::Created().json(comment))
}

/// GET /api/v1/posts/{id}/comments
pub async fn comments_for_post_handler(
  path: web::Path<String>,
  comment_service: web::Data<Arc<CommentService>>,
) -> Result<HttpResponse, ApiError> {
  let post_id = parse_id(&path)?;
  let listing = comment_service.get_comments_by_post_id(post_id).await?;
  Ok(HttpResponse::Ok().json(listing))
}

/// GET /api/v1/comments/{id}
pub async fn get_comment_handler(
  path: web::Path<String>,
  comment_service: web::Data<Arc<CommentService>>,
) -> Result<HttpResponse, ApiError> {
  let comment_id = parse_id(&path)?;
  let comment = comment_service.get_comment(comment_id).await?;
  Ok(HttpResponse::Ok().json(comment))
}

/// PATCH /api/v1/comments/{id}
pub async fn edit_comment_handler(
  user: CurrentUser,
  path: web::Path<String>,
  request: web::Json<CommentRequest>,
  comment_service: web::Data<Arc<CommentService>>,
) -> Result<HttpResponse, ApiError> {
  let comment_id = parse_id(&path)?;
  request.validate()?;

  let comment = comment_service
    .edit_comment(comment_id, user.0.id, request.into_inner().text)
    .await?;

  Ok(HttpResponse::Ok().json(comment))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete_comment_handler(
  user: CurrentUser,
  path: web::Path<String>,
  comment_service: web::Data<Arc<CommentService>>,
) -> Result<HttpResponse, ApiError> {
  let comment_id = parse_id(&path)?;

  comment_service
    .delete_comment(DeleteComment {
      comment_id: Some(comment_id),
      user_id: Some(user.0.id),
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}
