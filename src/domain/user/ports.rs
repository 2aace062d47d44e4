use async_trait::async_trait;
use uuid::Uuid;

use super::entities::User;
use super::value_objects::Email;
use crate::domain::errors::RepositoryError;

/// Identity store: persistence operations for user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, RepositoryError>;
}
