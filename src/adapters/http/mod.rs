pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use errors::ApiError;
pub use middleware::{AuthMiddleware, CurrentUser, RequestIdMiddleware};
pub use routes::{AppServices, configure_api_routes, configure_health_route};
