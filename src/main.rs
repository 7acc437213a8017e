use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use employee_directory::blob::build_blob_store;
use employee_directory::config::{Config, StoreBackend};
use employee_directory::db::{build_store, PostgresStore};
use employee_directory::handlers::{self, AppState};
use employee_directory::services::SaveService;
use employee_directory::utils::thumbnail::PngThumbnailer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    if let StoreBackend::Postgres { database_url } = &config.store {
        // Startup continues without the table; requests will report the failure.
        if let Err(err) = PostgresStore::new(database_url.clone(), config.connect_timeout)
            .ensure_schema()
            .await
        {
            error!("Could not prepare employee table: {}", err);
        }
    }

    let store = build_store(&config).await;
    let blobs = build_blob_store(&config).await;
    let state = AppState {
        saver: SaveService::new(store.clone(), blobs.clone(), Arc::new(PngThumbnailer)),
        store,
        blobs,
        max_request_bytes: config.max_request_bytes,
    };

    info!("Starting server at {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
