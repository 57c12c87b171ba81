use crate::db::DbPool;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use log::warn;
use serde_json::json;

/// Health check endpoint
///
/// Reports whether the database answers, with the current timestamp.
/// Responds `503 Service Unavailable` when the store cannot be reached.
#[get("/health")]
pub async fn health(pool: web::Data<DbPool>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "database": "ok",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            warn!("Health check failed to reach the database: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "database": "unavailable",
                "timestamp": Utc::now()
            }))
        }
    }
}
