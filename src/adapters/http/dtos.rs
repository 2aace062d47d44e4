use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::auth::AuthSession;
use crate::domain::post::PostPatch;
use crate::domain::user::PublicUser;

/// Request for user sign-up
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: String,
}

/// Request for user sign-in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Response after a successful sign-up or sign-in
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
  pub user: PublicUser,
  pub access_token: String,
  pub expires_at: DateTime<Utc>,
}

impl From<AuthSession> for AuthResponse {
  fn from(session: AuthSession) -> Self {
    Self {
      user: session.user,
      access_token: session.access_token.token,
      expires_at: session.access_token.expires_at,
    }
  }
}

/// Request for creating a post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
  #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
  pub title: String,

  #[validate(length(min = 1, message = "Content is required"))]
  pub content: String,

  #[validate(length(min = 1, max = 100, message = "Category must be between 1 and 100 characters"))]
  pub category: String,
}

/// `?page=` query for listings
///
/// Kept as raw text so that a malformed page selects the first page instead
/// of rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
  pub page: Option<String>,
}

impl PageQuery {
  /// The requested page when it is an integer; anything else reads as absent
  pub fn page_number(&self) -> Option<i64> {
    self
      .page
      .as_deref()
      .and_then(|raw| raw.trim().parse::<i64>().ok())
  }
}

/// Partial post update; at least one field must be set
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
  #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
  pub title: Option<String>,

  #[validate(length(min = 1, message = "Content must not be empty"))]
  pub content: Option<String>,

  #[validate(length(min = 1, max = 100, message = "Category must be between 1 and 100 characters"))]
  pub category: Option<String>,
}

impl From<UpdatePostRequest> for PostPatch {
  fn from(request: UpdatePostRequest) -> Self {
    Self {
      title: request.title,
      content: request.content,
      category: request.category,
    }
  }
}

/// Request body for adding or editing a comment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentRequest {
  #[validate(length(min = 1, max = 5000, message = "Text must be between 1 and 5000 characters"))]
  pub text: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Catalog code, e.g. `POST_NOT_FOUND`
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sign_up_request_validation_valid() {
    let request = SignUpRequest {
      email: "test@example.com".to_string(),
      password: "SecureP@ss123".to_string(),
      name: "Test User".to_string(),
    };

    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_sign_up_request_validation_invalid_email() {
    let request = SignUpRequest {
      email: "invalid-email".to_string(),
      password: "SecureP@ss123".to_string(),
      name: "Test User".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_sign_up_request_validation_short_password() {
    let request = SignUpRequest {
      email: "test@example.com".to_string(),
      password: "short".to_string(),
      name: "Test User".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_update_post_request_skips_absent_fields() {
    let json = r#"{"title": "New title"}"#;
    let request: UpdatePostRequest = serde_json::from_str(json).unwrap();

    assert!(request.validate().is_ok());

    let patch = PostPatch::from(request);
    assert_eq!(patch.title.as_deref(), Some("New title"));
    assert!(patch.content.is_none());
  }

  #[test]
  fn test_update_post_request_rejects_empty_field() {
    let request = UpdatePostRequest {
      title: Some(String::new()),
      content: None,
      category: None,
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_page_query_parses_integers_only() {
    let page = |raw: Option<&str>| PageQuery {
      page: raw.map(str::to_string),
    };

    assert_eq!(page(Some("3")).page_number(), Some(3));
    assert_eq!(page(Some(" -2 ")).page_number(), Some(-2));
    assert_eq!(page(Some("abc")).page_number(), None);
    assert_eq!(page(Some("2.5")).page_number(), None);
    assert_eq!(page(Some("")).page_number(), None);
    assert_eq!(page(None).page_number(), None);
  }

  #[test]
  fn test_comment_request_requires_text() {
    let request = CommentRequest {
      text: String::new(),
    };

    assert!(request.validate().is_err());
  }
}
