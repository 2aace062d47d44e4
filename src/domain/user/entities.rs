use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing an account in the identity store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// User's email address (unique, lowercase)
  pub email: String,
  /// Display name
  pub name: String,
  /// One-way password hash
  pub password_hash: String,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with the given details
  pub fn new(email: String, name: String, password_hash: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      email,
      name,
      password_hash,
      created_at: Utc::now(),
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      name,
      password_hash,
      created_at,
    }
  }
}

/// Public-safe view of a user, without credential fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
  pub id: Uuid,
  pub email: String,
  pub name: String,
}

impl From<&User> for PublicUser {
  fn from(user: &User) -> Self {
    Self {
      id: user.id,
      email: user.email.clone(),
      name: user.name.clone(),
    }
  }
}

impl From<User> for PublicUser {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      email: user.email,
      name: user.name,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_user_creation() {
    let user = User::new(
      "test@example.com".to_string(),
      "Test User".to_string(),
      "hashed_password".to_string(),
    );

    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.name, "Test User");
    assert!(!user.id.is_nil());
  }

  #[test]
  fn test_public_view_strips_password_hash() {
    let user = User::new(
      "rooped83@test.com".to_string(),
      "Pedro".to_string(),
      "secret-hash".to_string(),
    );

    let public = PublicUser::from(&user);
    assert_eq!(public.id, user.id);
    assert_eq!(public.email, "rooped83@test.com");

    let json = serde_json::to_value(&public).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["name"], "Pedro");
  }
}
