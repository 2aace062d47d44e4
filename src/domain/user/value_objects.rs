use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::errors::{AppError, ErrorKind};

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password is too short (minimum 8 characters)")]
  PasswordTooShort,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Name must not be blank")]
  BlankName,
}

// Malformed input is a request problem, whatever the field.
impl From<ValueObjectError> for AppError {
  fn from(error: ValueObjectError) -> Self {
    tracing::debug!("Rejected input: {}", error);
    AppError::Domain(ErrorKind::InvalidRequest)
  }
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();
    let trimmed = email.trim();

    if !trimmed.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    // Normalize to lowercase
    Ok(Self(trimmed.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain-text password, wiped from memory on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password for registration, enforcing length rules
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.chars().count() < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if password.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Wraps a submitted password for verification only; length rules are not applied
  pub fn for_verification(password: impl Into<String>) -> Self {
    Self(password.into())
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object
// ============================================================================

/// Opaque one-way hash produced by the configured `PasswordHasher`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  pub fn new(hash: impl Into<String>) -> Self {
    Self(hash.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PasswordHash(***)")
  }
}

// ============================================================================
// DisplayName Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
  pub fn new(name: impl Into<String>) -> Result<Self, ValueObjectError> {
    let name = name.into();
    let trimmed = name.trim();

    if trimmed.is_empty() {
      return Err(ValueObjectError::BlankName);
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}
