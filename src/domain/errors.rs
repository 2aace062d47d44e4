use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Catalog
// ============================================================================

/// Every domain failure a service can report.
///
/// The discriminant doubles as the index into [`ERROR_CATALOG`], so variants and
/// catalog rows must stay in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
  PostNotFound,
  NoCommentsYet,
  CommentNotFound,
  UnauthorizedToEditComment,
  UnauthorizedToDeleteComment,
  UnauthorizedToUpdatePost,
  UnauthorizedToDeletePost,
  PostUnavailable,
  InvalidRequest,
  UserNotFound,
  EmailAlreadyInUse,
  InvalidCredentials,
}

/// One row of the error catalog
#[derive(Debug)]
pub struct ErrorEntry {
  pub kind: ErrorKind,
  /// Stable machine-readable code exposed to API consumers
  pub code: &'static str,
  /// Human-readable message
  pub message: &'static str,
  /// HTTP-style status classification
  pub status: u16,
}

/// Process-wide error catalog, fixed at compile time.
pub static ERROR_CATALOG: [ErrorEntry; 12] = [
  ErrorEntry {
    kind: ErrorKind::PostNotFound,
    code: "POST_NOT_FOUND",
    message: "Post not found",
    status: 404,
  },
  ErrorEntry {
    kind: ErrorKind::NoCommentsYet,
    code: "NO_COMMENTS_YET",
    message: "This post has no comments yet",
    status: 404,
  },
  ErrorEntry {
    kind: ErrorKind::CommentNotFound,
    code: "COMMENT_NOT_FOUND",
    message: "Comment not found",
    status: 404,
  },
  ErrorEntry {
    kind: ErrorKind::UnauthorizedToEditComment,
    code: "UNAUTHORIZED_TO_EDIT_COMMENT",
    message: "You are not allowed to edit this comment",
    status: 403,
  },
  ErrorEntry {
    kind: ErrorKind::UnauthorizedToDeleteComment,
    code: "UNAUTHORIZED_TO_DELETE_COMMENT",
    message: "You are not allowed to delete this comment",
    status: 403,
  },
  ErrorEntry {
    kind: ErrorKind::UnauthorizedToUpdatePost,
    code: "UNAUTHORIZED_TO_UPDATE_POST",
    message: "You are not allowed to update this post",
    status: 403,
  },
  ErrorEntry {
    kind: ErrorKind::UnauthorizedToDeletePost,
    code: "UNAUTHORIZED_TO_DELETE_POST",
    message: "You are not allowed to delete this post",
    status: 403,
  },
  ErrorEntry {
    kind: ErrorKind::PostUnavailable,
    code: "POST_UNAVAILABLE",
    message: "No posts available for this user",
    status: 404,
  },
  ErrorEntry {
    kind: ErrorKind::InvalidRequest,
    code: "INVALID_REQUEST",
    message: "Invalid request",
    status: 400,
  },
  ErrorEntry {
    kind: ErrorKind::UserNotFound,
    code: "USER_NOT_FOUND",
    message: "User not found",
    status: 404,
  },
  ErrorEntry {
    kind: ErrorKind::EmailAlreadyInUse,
    code: "EMAIL_ALREADY_IN_USE",
    message: "An account with this email already exists",
    status: 409,
  },
  ErrorEntry {
    kind: ErrorKind::InvalidCredentials,
    code: "INVALID_CREDENTIALS",
    message: "Invalid email or password",
    status: 401,
  },
];

impl ErrorKind {
  /// All kinds, in catalog order
  pub const ALL: [ErrorKind; 12] = [
    ErrorKind::PostNotFound,
    ErrorKind::NoCommentsYet,
    ErrorKind::CommentNotFound,
    ErrorKind::UnauthorizedToEditComment,
    ErrorKind::UnauthorizedToDeleteComment,
    ErrorKind::UnauthorizedToUpdatePost,
    ErrorKind::UnauthorizedToDeletePost,
    ErrorKind::PostUnavailable,
    ErrorKind::InvalidRequest,
    ErrorKind::UserNotFound,
    ErrorKind::EmailAlreadyInUse,
    ErrorKind::InvalidCredentials,
  ];

  /// Returns the catalog row for this kind
  pub fn entry(self) -> &'static ErrorEntry {
    &ERROR_CATALOG[self as usize]
  }

  pub fn code(self) -> &'static str {
    self.entry().code
  }

  pub fn message(self) -> &'static str {
    self.entry().message
  }

  pub fn status(self) -> u16 {
    self.entry().status
  }

  /// Looks a kind up by its machine code
  pub fn from_code(code: &str) -> Option<Self> {
    ERROR_CATALOG
      .iter()
      .find(|entry| entry.code == code)
      .map(|entry| entry.kind)
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

// ============================================================================
// Service Error
// ============================================================================

/// Error returned by every service operation.
///
/// `Domain` carries a catalog kind. The remaining variants are infrastructure
/// failures passed through from the adapters untouched.
#[derive(Debug, Error)]
pub enum AppError {
  #[error("{}", .0.message())]
  Domain(ErrorKind),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Token error: {0}")]
  Token(#[from] TokenError),
}

impl AppError {
  /// Returns the catalog kind for domain failures
  pub fn kind(&self) -> Option<ErrorKind> {
    match self {
      AppError::Domain(kind) => Some(*kind),
      _ => None,
    }
  }
}

impl From<ErrorKind> for AppError {
  fn from(kind: ErrorKind) -> Self {
    AppError::Domain(kind)
  }
}

// ============================================================================
// Infrastructure Errors
// ============================================================================

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

/// Access token issuing and verification errors
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("Cannot issue a token without a user id")]
  MissingUserId,

  #[error("Failed to sign token: {0}")]
  SigningFailed(String),

  #[error("Token has expired")]
  Expired,

  #[error("Invalid token: {0}")]
  Invalid(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}
