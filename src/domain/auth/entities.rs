use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::user::PublicUser;

/// Signed access token handed to the client
#[derive(Clone)]
pub struct AccessToken {
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

// Implement Debug without exposing the token
impl fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AccessToken")
      .field("token", &"***")
      .field("expires_at", &self.expires_at)
      .finish()
  }
}

/// Claims carried inside an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
  /// Subject: the authenticated user's id
  pub sub: Uuid,
  /// Issued at (Unix timestamp)
  pub iat: i64,
  /// Expiration time (Unix timestamp)
  pub exp: i64,
}

/// Result of a successful sign-up or sign-in
#[derive(Debug, Clone)]
pub struct AuthSession {
  pub user: PublicUser,
  pub access_token: AccessToken,
}
