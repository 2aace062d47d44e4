use actix_web::{HttpRequest, error, web};
use std::sync::Arc;

use crate::domain::auth::{AuthService, PasswordHasher, TokenIssuer};
use crate::domain::comment::{CommentRepository, CommentService};
use crate::domain::errors::ErrorKind;
use crate::domain::post::{PostRepository, PostService, PostServiceConfig};
use crate::domain::user::UserRepository;

use super::errors::ApiError;
use super::handlers::{auth, comments, health, posts};
use super::middleware::AuthMiddleware;

/// Services shared by every route
#[derive(Clone)]
pub struct AppServices {
  pub auth_service: Arc<AuthService>,
  pub post_service: Arc<PostService>,
  pub comment_service: Arc<CommentService>,
}

impl AppServices {
  /// Wires the services over one set of stores
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    post_config: PostServiceConfig,
  ) -> Self {
    Self {
      auth_service: Arc::new(AuthService::new(
        user_repo.clone(),
        password_hasher,
        token_issuer,
      )),
      post_service: Arc::new(PostService::new(
        post_repo.clone(),
        comment_repo.clone(),
        user_repo,
        post_config,
      )),
      comment_service: Arc::new(CommentService::new(comment_repo, post_repo)),
    }
  }
}

/// Configure the JSON API
///
/// Mount under `/api/v1`. Reads are public; writes and `/auth/me` go through
/// [`AuthMiddleware`] route by route.
///
/// # Routes
///
/// - POST /auth/signup, POST /auth/signin, GET /auth/me
/// - GET, POST /posts
/// - GET /posts/user/{user_id}, GET /posts/category/{category}
/// - GET, PATCH, DELETE /posts/{id}
/// - GET, POST /posts/{id}/comments
/// - GET, PATCH, DELETE /comments/{id}
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, services: AppServices) {
  let require_auth = || AuthMiddleware::new(services.auth_service.clone());

  cfg
    .app_data(web::Data::new(services.auth_service.clone()))
    .app_data(web::Data::new(services.post_service.clone()))
    .app_data(web::Data::new(services.comment_service.clone()))
    .app_data(json_config())
    .app_data(query_config())
    .app_data(path_config())
    .service(
      web::scope("/auth")
        .route("/signup", web::post().to(auth::sign_up_handler))
        .route("/signin", web::post().to(auth::sign_in_handler))
        .route(
          "/me",
          web::get().to(auth::current_user_handler).wrap(require_auth()),
        ),
    )
    .service(
      web::resource("/posts")
        .route(web::get().to(posts::list_posts_handler))
        .route(web::post().to(posts::create_post_handler).wrap(require_auth())),
    )
    .route(
      "/posts/user/{user_id}",
      web::get().to(posts::posts_by_user_handler),
    )
    .route(
      "/posts/category/{category}",
      web::get().to(posts::posts_by_category_handler),
    )
    .service(
      web::resource("/posts/{id}")
        .route(web::get().to(posts::get_post_handler))
        .route(web::patch().to(posts::update_post_handler).wrap(require_auth()))
        .route(web::delete().to(posts::delete_post_handler).wrap(require_auth())),
    )
    .service(
      web::resource("/posts/{id}/comments")
        .route(web::get().to(comments::comments_for_post_handler))
        .route(web::post().to(comments::add_comment_handler).wrap(require_auth())),
    )
    .service(
      web::resource("/comments/{id}")
        .route(web::get().to(comments::get_comment_handler))
        .route(web::patch().to(comments::edit_comment_handler).wrap(require_auth()))
        .route(web::delete().to(comments::delete_comment_handler).wrap(require_auth())),
    );
}

/// Malformed or mistyped JSON bodies answer with `INVALID_REQUEST`
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
    tracing::debug!("Rejected JSON body: {}", err);
    ApiError::Validation(vec![err.to_string()]).into()
  })
}

fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
    tracing::debug!("Rejected query string: {}", err);
    ApiError::Validation(vec![err.to_string()]).into()
  })
}

fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|err: error::PathError, _req: &HttpRequest| {
    tracing::debug!("Rejected path: {}", err);
    ApiError::Domain(ErrorKind::InvalidRequest).into()
  })
}

/// Configure the liveness probe at the application root
pub fn configure_health_route(cfg: &mut web::ServiceConfig) {
  cfg.route("/health", web::get().to(health::health_handler));
}
