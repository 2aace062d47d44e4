use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::user::{Email, User, UserRepository};

/// Thread-safe in-memory identity store
#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
    Ok(self.users.read().await.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
    let users = self.users.read().await;
    Ok(
      users
        .values()
        .find(|user| user.email == email.as_str())
        .cloned(),
    )
  }

  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    let mut users = self.users.write().await;

    if users.values().any(|existing| existing.email == user.email) {
      return Err(RepositoryError::DuplicateKey(format!(
        "email {} already exists",
        user.email
      )));
    }

    users.insert(user.id, user.clone());
    Ok(user)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_create_and_find() {
    let repo = InMemoryUserRepository::new();
    let user = User::new(
      "a@example.com".to_string(),
      "A".to_string(),
      "hash".to_string(),
    );
    let id = user.id;

    repo.create(user).await.unwrap();

    assert!(repo.find_by_id(id).await.unwrap().is_some());
    let email = Email::new("A@Example.com").unwrap();
    assert_eq!(repo.find_by_email(&email).await.unwrap().unwrap().id, id);
  }

  #[tokio::test]
  async fn test_duplicate_email_is_rejected() {
    let repo = InMemoryUserRepository::new();
    let first = User::new("a@example.com".to_string(), "A".to_string(), "h".to_string());
    let second = User::new("a@example.com".to_string(), "B".to_string(), "h".to_string());

    repo.create(first).await.unwrap();
    let result = repo.create(second).await;

    assert!(matches!(result, Err(RepositoryError::DuplicateKey(_))));
  }
}
