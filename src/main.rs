use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use std::sync::Arc;

mod analytics;
mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod store;

use analytics::Analytics;
use analytics::roles::RoleTable;
use config::Config;
use db::init_db;
use store::{RecordStore, mysql::MySqlStore};

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance Insights API"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let roles = match RoleTable::from_path(&config.role_groups_path) {
        Ok(table) => {
            info!(
                roles = table.len(),
                path = %config.role_groups_path,
                "Loaded role group map"
            );
            table
        }
        Err(e) => {
            warn!(error = %e, "Falling back to built-in role group map");
            RoleTable::builtin()
        }
    };

    let pool = init_db(&config.database_url, config.db_max_connections).await;
    let store: Arc<dyn RecordStore> = Arc::new(MySqlStore::new(pool));
    let engine = Data::new(Analytics::new(store, roles));

    let engine_for_probe = engine.clone();
    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    // Probe the store off the startup path, so a cold database shows up in
    // the logs instead of only on the first query.
    actix_web::rt::spawn(async move {
        if let Err(e) = engine_for_probe.ping().await {
            warn!(error = %e, "Record store unreachable at startup");
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(engine.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
