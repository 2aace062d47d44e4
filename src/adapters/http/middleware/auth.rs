use actix_web::{
  Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
  body::EitherBody,
  dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::ApiError,
  domain::{auth::AuthService, errors::ErrorKind, user::PublicUser},
};

/// Authentication middleware that validates bearer tokens and attaches the user to the request
///
/// This middleware:
/// 1. Extracts the access token from the Authorization header
/// 2. Resolves it through `AuthService::authenticate`
/// 3. Attaches the `PublicUser` to request extensions for downstream handlers
///
/// Missing or rejected tokens short-circuit with the catalog error response.
pub struct AuthMiddleware {
  auth_service: Arc<AuthService>,
}

impl AuthMiddleware {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let auth_service = self.auth_service.clone();

    Box::pin(async move {
      let user = match extract_bearer_token(&req) {
        Ok(token) => auth_service.authenticate(&token).await.map_err(ApiError::from),
        Err(e) => Err(e),
      };

      let user = match user {
        Ok(user) => user,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract access token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| s.to_string())
    .ok_or(ApiError::Domain(ErrorKind::InvalidCredentials))
}

/// Extractor for the user attached by [`AuthMiddleware`]
///
/// Fails with `INVALID_CREDENTIALS` on routes the middleware does not cover.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

impl FromRequest for CurrentUser {
  type Error = ApiError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
    ready(
      req
        .extensions()
        .get::<PublicUser>()
        .cloned()
        .map(CurrentUser)
        .ok_or(ApiError::Domain(ErrorKind::InvalidCredentials)),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_bearer_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_bearer_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_bearer_token_missing() {
    let req = TestRequest::default().to_srv_request();

    assert!(matches!(
      extract_bearer_token(&req),
      Err(ApiError::Domain(ErrorKind::InvalidCredentials))
    ));
  }

  #[test]
  fn test_extract_bearer_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();

    assert!(extract_bearer_token(&req).is_err());
  }

  #[actix_web::test]
  async fn test_current_user_extractor_requires_middleware() {
    let req = TestRequest::default().to_http_request();

    let result = CurrentUser::extract(&req).await;

    assert!(result.is_err());
  }
}
