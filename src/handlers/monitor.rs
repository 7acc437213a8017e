use actix_web::{web, HttpResponse};

use super::AppState;

fn status(healthy: bool) -> &'static str {
    if healthy {
        "OK"
    } else {
        "PROBLEM"
    }
}

pub async fn monitor(state: web::Data<AppState>) -> HttpResponse {
    let (db_healthy, blobs_healthy) = tokio::join!(state.store.is_healthy(), state.blobs.is_healthy());

    let body = format!(
        "s3 status: {}\ndatabase status: {}\n",
        status(blobs_healthy),
        status(db_healthy)
    );

    if db_healthy && blobs_healthy {
        HttpResponse::Ok().content_type("text/plain").body(body)
    } else {
        log::warn!("Health check failed: database={} s3={}", db_healthy, blobs_healthy);
        HttpResponse::ServiceUnavailable().content_type("text/plain").body(body)
    }
}
