pub mod entities;
pub mod ports;
pub mod value_objects;

pub use entities::{PublicUser, User};
pub use ports::UserRepository;
pub use value_objects::{DisplayName, Email, Password, PasswordHash, ValueObjectError};
