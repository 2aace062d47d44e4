pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{Comment, DeleteComment, NewComment, PostComments};
pub use ports::CommentRepository;
pub use services::CommentService;
