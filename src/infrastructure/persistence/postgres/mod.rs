pub mod comment_repository;
pub mod post_repository;
pub mod user_repository;

pub use comment_repository::PostgresCommentRepository;
pub use post_repository::PostgresPostRepository;
pub use user_repository::PostgresUserRepository;
