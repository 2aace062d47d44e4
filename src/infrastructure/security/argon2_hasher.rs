use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::ports::PasswordHasher;
use crate::domain::errors::HashError;
use crate::domain::user::{Password, PasswordHash};

/// Argon2id password hasher implementation
///
/// Parameters: 19 MiB memory, 2 iterations, 1 lane, 32-byte output.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, HashError> {
    // Memory cost: 19 MiB = 19456 KiB
    let memory_cost = 19456;
    let time_cost = 2;
    let parallelism = 1;
    let output_len = Some(32);

    let params = Params::new(memory_cost, time_cost, parallelism, output_len).map_err(|e| {
      HashError::HashingFailed(format!("Failed to create Argon2 params: {}", e))
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    Ok(PasswordHash::new(hash.to_string()))
  }

  /// Uses argon2's constant-time comparison
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, HashError> {
    let parsed_hash =
      Argon2PasswordHash::new(hashed_password.as_str()).map_err(|_| HashError::InvalidFormat)?;

    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed_hash)
    {
      Ok(_) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(HashError::VerificationFailed(e.to_string())),
    }
  }
}
