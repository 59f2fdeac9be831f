use actix_web::{get, web, HttpResponse};

use crate::dto::HealthResponse;
use crate::server::AppState;

#[get("/health")]
pub async fn health_check(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tools: app_state.registry.len(),
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
}
