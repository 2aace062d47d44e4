//! In-memory stores
//!
//! Used when no database URL is configured and by the HTTP test suite.

mod comment_repository;
mod post_repository;
mod user_repository;

pub use comment_repository::InMemoryCommentRepository;
pub use post_repository::InMemoryPostRepository;
pub use user_repository::InMemoryUserRepository;
