use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AuthResponse, SignInRequest, SignUpRequest},
  errors::ApiError,
  middleware::CurrentUser,
};
use crate::domain::auth::AuthService;
use crate::domain::user::{DisplayName, Email, Password};

/// Handler for user sign-up
///
/// POST /api/v1/auth/signup
/// Body: SignUpRequest (JSON)
/// Response: AuthResponse (JSON) with status 201
pub async fn sign_up_handler(
  request: web::Json<SignUpRequest>,
  auth_service: web::Data<Arc<AuthService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let email = Email::new(request.email)?;
  let password = Password::new(request.password)?;
  let name = DisplayName::new(request.name)?;

  let session = auth_service.sign_up(email, password, name).await?;

  Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Handler for user sign-in
///
/// POST /api/v1/auth/signin
/// Body: SignInRequest (JSON)
/// Response: AuthResponse (JSON) with status 200
pub async fn sign_in_handler(
  request: web::Json<SignInRequest>,
  auth_service: web::Data<Arc<AuthService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let email = Email::new(request.email)?;
  let password = Password::for_verification(request.password);

  let session = auth_service.sign_in(email, password).await?;

  Ok(HttpResponse::Ok().json(AuthResponse::from(session)))
}

/// GET /api/v1/auth/me
pub async fn current_user_handler(CurrentUser(user): CurrentUser) -> HttpResponse {
  HttpResponse::Ok().json(user)
}
