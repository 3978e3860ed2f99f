use crate::error::ServiceError;
use crate::executor::{HubOptions, QueryExecutor};
use crate::models::{CreateUserRequest, Intent};
use crate::registration;
use crate::store::RecordStore;
use actix_web::{HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use slog::{Logger, error, info};
use std::sync::Arc;

/// Shared per-worker state handed to every handler.
pub struct AppState {
    store: Arc<dyn RecordStore>,
    executor: QueryExecutor,
    logger: Logger,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, options: HubOptions, logger: Logger) -> Self {
        let executor = QueryExecutor::new(store.clone(), options);
        Self {
            store,
            executor,
            logger,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FetchUserQuery {
    #[serde(rename = "privyId", alias = "privy_id")]
    privy_id: Option<String>,
    intent: Option<String>,
}

#[derive(Serialize)]
struct Successful<T: Serialize> {
    status: &'static str,
    #[serde(flatten)]
    body: T,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::Validation(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ServiceError::Validation(format!("Invalid query string: {}", err)).into()
    }))
    .service(
        web::resource("/users")
            .route(web::get().to(fetch_user))
            .route(web::post().to(create_user)),
    )
    .service(web::resource("/api/users/fetch").route(web::get().to(fetch_user)))
    .service(web::resource("/api/users/create").route(web::post().to(create_user)))
    .route("/health", web::get().to(health_check));
}

async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ServiceError> {
    let result = registration::create_user(state.store.as_ref(), body.into_inner()).await;
    log_outcome(&state.logger, "create-user", &result);

    let user = result?;
    info!(state.logger, "Created user {} ({})", user.id, user.privy_id);

    Ok(HttpResponse::Created().json(json!({
        "status": "success",
        "user": user
    })))
}

async fn fetch_user(
    state: web::Data<AppState>,
    query: web::Query<FetchUserQuery>,
) -> Result<HttpResponse, ServiceError> {
    let FetchUserQuery { privy_id, intent } = query.into_inner();

    let Some(privy_id) = privy_id.filter(|id| !id.trim().is_empty()) else {
        return Err(ServiceError::Validation("Missing privyId".to_string()));
    };
    // Older clients omit the intent (or send it empty) and expect the plain
    // user lookup.
    let intent = match intent.as_deref().filter(|raw| !raw.is_empty()) {
        None => Intent::FetchUser,
        Some(raw) => Intent::parse(raw)
            .ok_or_else(|| ServiceError::Validation("Invalid intent".to_string()))?,
    };

    match intent {
        Intent::Confirm => {
            let result = state.executor.confirm(&privy_id).await;
            log_outcome(&state.logger, "confirm", &result);
            let confirmation = result?;

            Ok(HttpResponse::Ok().json(Successful {
                status: "successful",
                body: confirmation,
            }))
        }
        Intent::FetchUser => {
            let result = state.executor.fetch_user(&privy_id).await;
            log_outcome(&state.logger, "fetch-user", &result);
            let user = result?;

            Ok(HttpResponse::Ok().json(json!({
                "status": "successful",
                "user": user
            })))
        }
        Intent::FetchHubData => {
            let result = state.executor.fetch_hub_data(&privy_id).await;
            log_outcome(&state.logger, "fetch-hub-data", &result);
            let snapshot = result?;

            Ok(HttpResponse::Ok().json(Successful {
                status: "successful",
                body: snapshot,
            }))
        }
    }
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now()
    }))
}

/// The caller only sees a generic message for server-side failures, so the
/// underlying error is logged here.
fn log_outcome<T>(logger: &Logger, operation: &str, result: &Result<T, ServiceError>) {
    if let Err(err) = result {
        if err.status_code().is_server_error() {
            error!(logger, "{} failed: {}", operation, err);
        } else {
            info!(logger, "{} rejected: {}", operation, err);
        }
    }
}
