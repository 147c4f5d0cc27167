use actix_web::{get, web, HttpResponse};
use aerorhythm_persistence::Storage;
use serde_json::json;

/// Liveness plus a round trip to the database.
#[get("/health")]
async fn get_health(storage: web::Data<Storage>) -> HttpResponse {
    match storage.connection().ping().await {
        Ok(_) => HttpResponse::Ok().json(json!({"status": "ok", "database": "ok"})),
        Err(e) => {
            tracing::warn!("health check could not reach the database: {}", e);

            HttpResponse::ServiceUnavailable()
                .json(json!({"status": "degraded", "database": "unavailable"}))
        }
    }
}

super::register_routes!(app, { app.service(get_health) });
