pub mod auth;
pub mod request_id;

pub use auth::{AuthMiddleware, CurrentUser};
pub use request_id::{RequestId, RequestIdMiddleware};
