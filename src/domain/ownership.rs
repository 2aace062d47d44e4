//! Owner identity normalization
//!
//! Storage adapters hand owners back in different shapes: a bare user id, or
//! the owner's public profile when the query joined the users table. Every
//! ownership check in the services goes through [`is_owned_by`], which reduces
//! both sides to one canonical string before comparing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::PublicUser;

/// Reference from an owned entity (post, comment) to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
  /// Owner profile embedded by the store
  Profile(PublicUser),
  /// Bare owner id
  Id(Uuid),
}

impl OwnerRef {
  /// The owner's user id, whichever form the reference takes
  pub fn user_id(&self) -> Uuid {
    match self {
      OwnerRef::Profile(profile) => profile.id,
      OwnerRef::Id(id) => *id,
    }
  }
}

impl From<Uuid> for OwnerRef {
  fn from(id: Uuid) -> Self {
    OwnerRef::Id(id)
  }
}

impl From<PublicUser> for OwnerRef {
  fn from(profile: PublicUser) -> Self {
    OwnerRef::Profile(profile)
  }
}

/// Anything that can identify a user for ownership comparison
pub trait OwnerIdentity {
  /// Canonical form: lowercase hyphenated UUID, or the trimmed raw value when it is not a UUID
  fn canonical_id(&self) -> String;
}

impl OwnerIdentity for Uuid {
  fn canonical_id(&self) -> String {
    self.as_hyphenated().to_string()
  }
}

impl OwnerIdentity for PublicUser {
  fn canonical_id(&self) -> String {
    self.id.canonical_id()
  }
}

impl OwnerIdentity for OwnerRef {
  fn canonical_id(&self) -> String {
    self.user_id().canonical_id()
  }
}

impl OwnerIdentity for str {
  fn canonical_id(&self) -> String {
    let trimmed = self.trim();
    match Uuid::parse_str(trimmed) {
      Ok(id) => id.canonical_id(),
      Err(_) => trimmed.to_string(),
    }
  }
}

impl OwnerIdentity for String {
  fn canonical_id(&self) -> String {
    self.as_str().canonical_id()
  }
}

impl<T: OwnerIdentity + ?Sized> OwnerIdentity for &T {
  fn canonical_id(&self) -> String {
    (**self).canonical_id()
  }
}

/// Returns true when `requester` is the owner referenced by `owner`
pub fn is_owned_by(owner: &impl OwnerIdentity, requester: &impl OwnerIdentity) -> bool {
  owner.canonical_id() == requester.canonical_id()
}
