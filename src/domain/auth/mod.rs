pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{AccessToken, AuthSession, TokenClaims};
pub use ports::{PasswordHasher, TokenIssuer};
pub use services::AuthService;
