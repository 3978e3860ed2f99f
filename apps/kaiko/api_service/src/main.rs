use actix_web::{App, HttpServer, web};
use common::config::ServiceConfig;
use common::http::{AppState, configure};
use common::logger::{create_child_logger, init_root_logger};
use common::{DatabaseStore, HubOptions, RecordStore, ServiceError};
use migration::{Migrator, MigratorTrait};
use slog::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    // Initialize logging
    tracing_subscriber::fmt::init();
    let root_logger = init_root_logger("api_service");
    let app_logger = create_child_logger(&root_logger, "app");

    let config = ServiceConfig::new()?;
    info!(
        app_logger,
        "Starting api service";
        "host" => &config.host,
        "port" => config.port,
        "chat_detail_concurrency" => config.chat_detail_concurrency,
        "recent_sessions_limit" => config.recent_sessions_limit,
        "unread_policy" => format!("{:?}", config.unread_policy)
    );

    let store = DatabaseStore::connect(&config.database_url, config.sql_logging).await?;

    if config.run_migrations {
        info!(app_logger, "Running database migrations...");
        Migrator::up(store.connection(), None).await?;
        info!(app_logger, "Migrations completed successfully");
    }

    let store: Arc<dyn RecordStore> = Arc::new(store);
    let state = web::Data::new(AppState::new(
        store,
        HubOptions::from(&config),
        create_child_logger(&root_logger, "http"),
    ));

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(config.bind_address())?
        .run();
    let server_handle = server.handle();

    // Run the server until it stops or a termination signal arrives
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!(app_logger, "HTTP server error: {:?}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!(app_logger, "Termination signal received, shutting down");
            server_handle.stop(true).await;
        }
    }

    Ok(())
}
