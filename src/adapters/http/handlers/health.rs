use actix_web::HttpResponse;

/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({
    "status": "healthy",
    "service": env!("CARGO_PKG_NAME"),
    "version": env!("CARGO_PKG_VERSION"),
  }))
}
