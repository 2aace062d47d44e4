pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{CreatePost, CreatedPost, DeletePost, Page, Post, PostDetails, PostPatch};
pub use ports::PostRepository;
pub use services::{PostService, PostServiceConfig};
