use async_trait::async_trait;

use super::entities::{AccessToken, TokenClaims};
use crate::domain::errors::{HashError, TokenError};
use crate::domain::user::{Password, PasswordHash, User};

/// Service trait for one-way password hashing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError>;

  /// Verifies a plain text password against a stored hash in constant time
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, HashError>;
}

/// Service trait for issuing and verifying access tokens
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
  /// Issues a token for the user; fails when the user has no id
  fn issue(&self, user: &User) -> Result<AccessToken, TokenError>;

  /// Verifies signature and expiry, returning the embedded claims
  fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
