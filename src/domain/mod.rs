pub mod auth;
pub mod comment;
pub mod errors;
pub mod ownership;
pub mod post;
pub mod user;

pub use errors::{AppError, ErrorKind};
