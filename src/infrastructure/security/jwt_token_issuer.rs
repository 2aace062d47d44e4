use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::auth::entities::{AccessToken, TokenClaims};
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::errors::TokenError;
use crate::domain::user::User;

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// HS256 JWT issuer keyed by a shared secret
pub struct JwtTokenIssuer {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  ttl: Duration,
}

impl JwtTokenIssuer {
  /// Lifetimes beyond what `chrono` can represent are clamped; issuing then
  /// fails with `SigningFailed` instead of producing an unrepresentable expiry.
  pub fn new(secret: &str, ttl_seconds: u64) -> Self {
    let ttl = i64::try_from(ttl_seconds)
      .ok()
      .and_then(Duration::try_seconds)
      .unwrap_or(Duration::MAX);

    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      ttl,
    }
  }
}

impl TokenIssuer for JwtTokenIssuer {
  fn issue(&self, user: &User) -> Result<AccessToken, TokenError> {
    if user.id.is_nil() {
      return Err(TokenError::MissingUserId);
    }

    let now = Utc::now();
    let expires_at = now
      .checked_add_signed(self.ttl)
      .ok_or_else(|| TokenError::SigningFailed("token expiry is out of range".to_string()))?;
    let claims = TokenClaims {
      sub: user.id,
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
      .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

    Ok(AccessToken { token, expires_at })
  }

  fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.validate_exp = true;
    validation.leeway = 0;

    decode::<TokenClaims>(token, &self.decoding_key, &validation)
      .map(|data| data.claims)
      .map_err(|e| match e.kind() {
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  fn user() -> User {
    User::new(
      "test@example.com".to_string(),
      "Test".to_string(),
      "hash".to_string(),
    )
  }

  #[test]
  fn test_issue_and_verify() {
    let issuer = JwtTokenIssuer::new("secret", 3600);
    let user = user();

    let token = issuer.issue(&user).unwrap();
    let claims = issuer.verify(&token.token).unwrap();

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(claims.exp, token.expires_at.timestamp());
  }

  #[test]
  fn test_issue_without_user_id_fails() {
    let issuer = JwtTokenIssuer::new("secret", 3600);
    let mut user = user();
    user.id = Uuid::nil();

    assert!(matches!(issuer.issue(&user), Err(TokenError::MissingUserId)));
  }

  #[test]
  fn test_token_signed_with_other_secret_is_invalid() {
    let token = JwtTokenIssuer::new("one", 3600).issue(&user()).unwrap();

    let result = JwtTokenIssuer::new("two", 3600).verify(&token.token);

    assert!(matches!(result, Err(TokenError::Invalid(_))));
  }

  #[test]
  fn test_expired_token() {
    let issuer = JwtTokenIssuer::new("secret", 3600);
    let claims = TokenClaims {
      sub: Uuid::new_v4(),
      iat: Utc::now().timestamp() - 7200,
      exp: Utc::now().timestamp() - 3600,
    };
    let token = encode(
      &Header::new(TOKEN_ALGORITHM),
      &claims,
      &EncodingKey::from_secret(b"secret"),
    )
    .unwrap();

    assert!(matches!(issuer.verify(&token), Err(TokenError::Expired)));
  }

  #[test]
  fn test_unrepresentable_ttl_fails_without_panicking() {
    let user = user();

    for ttl_seconds in [u64::MAX, i64::MAX as u64, 10_000_000_000_000_000] {
      let issuer = JwtTokenIssuer::new("secret", ttl_seconds);

      assert!(matches!(
        issuer.issue(&user),
        Err(TokenError::SigningFailed(_))
      ));
    }
  }

  #[test]
  fn test_garbage_token_is_invalid() {
    let issuer = JwtTokenIssuer::new("secret", 3600);

    assert!(matches!(
      issuer.verify("not-a-jwt"),
      Err(TokenError::Invalid(_))
    ));
  }
}
