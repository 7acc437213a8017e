use std::sync::Arc;

use actix_web::web;

use crate::blob::BlobStore;
use crate::db::EmployeeStore;
use crate::services::SaveService;

pub mod employee;
pub mod monitor;

/// Everything the handlers need, shared across workers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub saver: SaveService,
    pub max_request_bytes: usize,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/employees")
            .route(web::get().to(employee::list_employees)),
    )
    .service(
        web::resource("/employees/{employee_id}")
            .route(web::get().to(employee::get_employee))
            .route(web::delete().to(employee::delete_employee)),
    )
    .service(
        web::resource("/save")
            .route(web::post().to(employee::save_employee)),
    )
    .service(
        web::resource("/badges")
            .route(web::get().to(employee::list_badges)),
    )
    .service(
        web::resource("/monitor")
            .route(web::get().to(monitor::monitor)),
    );
}
