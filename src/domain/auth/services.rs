use std::sync::Arc;

use super::entities::AuthSession;
use super::ports::{PasswordHasher, TokenIssuer};
use crate::domain::errors::{AppError, ErrorKind, RepositoryError, TokenError};
use crate::domain::user::{
  DisplayName, Email, Password, PasswordHash, PublicUser, User, UserRepository,
};

/// Authentication service: sign-up, sign-in and token authentication
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      token_issuer,
    }
  }

  /// Registers a new user and signs them in
  ///
  /// Performs exactly one write to the identity store.
  ///
  /// # Errors
  /// Returns `EMAIL_ALREADY_IN_USE` if the email is already registered
  pub async fn sign_up(
    &self,
    email: Email,
    password: Password,
    name: DisplayName,
  ) -> Result<AuthSession, AppError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      tracing::debug!("Sign-up rejected, email already registered");
      return Err(ErrorKind::EmailAlreadyInUse.into());
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(
      email.into_inner(),
      name.into_inner(),
      password_hash.into_inner(),
    );

    // A concurrent sign-up can still win the race to the unique index
    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(RepositoryError::DuplicateKey(_)) => {
        return Err(ErrorKind::EmailAlreadyInUse.into());
      }
      Err(e) => return Err(e.into()),
    };

    let access_token = self.token_issuer.issue(&created_user)?;

    tracing::info!("User {} signed up", created_user.id);

    Ok(AuthSession {
      user: PublicUser::from(&created_user),
      access_token,
    })
  }

  /// Authenticates a user by email and password
  ///
  /// Performs no writes.
  ///
  /// # Errors
  /// Returns `INVALID_CREDENTIALS` for an unknown email or a wrong password
  pub async fn sign_in(&self, email: Email, password: Password) -> Result<AuthSession, AppError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(ErrorKind::InvalidCredentials)?;

    let stored_hash = PasswordHash::new(user.password_hash.clone());
    let is_valid = self.password_hasher.verify(&password, &stored_hash).await?;

    if !is_valid {
      tracing::debug!("Sign-in rejected for user {}", user.id);
      return Err(ErrorKind::InvalidCredentials.into());
    }

    let access_token = self.token_issuer.issue(&user)?;

    Ok(AuthSession {
      user: PublicUser::from(&user),
      access_token,
    })
  }

  /// Resolves an access token to the user it was issued for
  ///
  /// # Errors
  /// Returns `INVALID_CREDENTIALS` for a bad or expired token and
  /// `USER_NOT_FOUND` when the token's user no longer exists
  pub async fn authenticate(&self, token: &str) -> Result<PublicUser, AppError> {
    let claims = self.token_issuer.verify(token).map_err(|e| match e {
      TokenError::Expired | TokenError::Invalid(_) => {
        tracing::debug!("Rejected access token: {}", e);
        AppError::Domain(ErrorKind::InvalidCredentials)
      }
      other => AppError::Token(other),
    })?;

    let user = self
      .user_repo
      .find_by_id(claims.sub)
      .await?
      .ok_or(ErrorKind::UserNotFound)?;

    Ok(PublicUser::from(user))
  }
}
