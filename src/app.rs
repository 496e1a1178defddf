use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::database::ListStore;
use crate::handlers::{lists, system};

/// Dependencies shared by every request. Nothing in here is mutated by handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ListStore>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ListStore>, verifier: Arc<dyn TokenVerifier>, config: AppConfig) -> Self {
        Self {
            store,
            verifier,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<dyn ListStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(list_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    let router = if config.security.enable_cors {
        router.layer(cors_layer(&config.security.cors_origins))
    } else {
        router
    };

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/lists", get(lists::index).post(lists::create))
        .route(
            "/lists/:id",
            get(lists::show).patch(lists::update).delete(lists::destroy),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
