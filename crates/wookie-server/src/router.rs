//! Read-only admin HTTP surface

use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use tracing::Instrument;
use wookie_core::errors::{ExError, ExErrorKind};
use wookie_core::model::{Whitelist, WidgetService};
use wookie_core::{WidgetAdmin, WidgetSummary};
use wookie_core_types::RequestContext;
use wookie_store::SqliteGateway;

const HEADER_REQUEST_ID: &str = "x-request-id";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Mutex<SqliteGateway>>,
}

impl AppState {
    pub fn new(gateway: Arc<Mutex<SqliteGateway>>) -> Self {
        Self { gateway }
    }

    /// Run `f` with exclusive access to the gateway on the blocking pool
    async fn with_admin<T, F>(&self, ctx: &RequestContext, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut WidgetAdmin<'_, SqliteGateway>) -> Result<T, ExError> + Send + 'static,
    {
        let gateway = Arc::clone(&self.gateway);
        let joined = tokio::task::spawn_blocking(move || {
            let mut gateway = gateway.lock().map_err(|_| {
                ExError::new(ExErrorKind::Internal).with_message("gateway lock poisoned")
            })?;
            let mut admin = WidgetAdmin::new(&mut *gateway);
            f(&mut admin)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(|e| ApiError::new(e, ctx)),
            Err(join_err) => Err(ApiError::new(
                ExError::new(ExErrorKind::Internal)
                    .with_message(format!("gateway task failed: {}", join_err)),
                ctx,
            )),
        }
    }
}

/// Error response carrying the stable code and the request id
#[derive(Debug)]
pub struct ApiError(ExError);

impl ApiError {
    fn new(err: ExError, ctx: &RequestContext) -> Self {
        Self(err.with_request_id(ctx.request_id.clone()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ExErrorKind::NotFound => StatusCode::NOT_FOUND,
            ExErrorKind::InvalidInput | ExErrorKind::InvalidManifest => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({
            "code": self.0.code(),
            "message": self.0.to_string(),
            "request_id": self.0.request_id().map(|r| r.as_str()),
        });
        (status, Json(body)).into_response()
    }
}

/// Build the router, nested under `context_path` unless it is the root
pub fn build_router(state: AppState, context_path: &str) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/widgets", get(list_widgets))
        .route("/services", get(list_services))
        .route("/whitelist", get(list_whitelist))
        .with_state(state);

    let context_path = crate::config::normalize_context_path(context_path);
    let app = if context_path.is_empty() {
        api
    } else {
        Router::new().nest(&context_path, api)
    };

    app.layer(middleware::from_fn(request_context_mw))
}

/// Tag the request with a [`RequestContext`] and run it inside a span
async fn request_context_mw(mut req: Request, next: Next) -> Response {
    let header = HeaderName::from_static(HEADER_REQUEST_ID);
    let ctx = RequestContext::from_header(
        req.headers()
            .get(&header)
            .and_then(|value| value.to_str().ok()),
    );

    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    req.extensions_mut().insert(ctx.clone());

    let mut res = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(ctx.request_id.as_str()) {
        res.headers_mut().insert(header, value);
    }
    res
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_widgets(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Vec<WidgetSummary>>, ApiError> {
    state
        .with_admin(&ctx, |admin| admin.list_widgets())
        .await
        .map(Json)
}

async fn list_services(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Vec<WidgetService>>, ApiError> {
    state
        .with_admin(&ctx, |admin| admin.list_services())
        .await
        .map(Json)
}

async fn list_whitelist(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<Vec<Whitelist>>, ApiError> {
    state
        .with_admin(&ctx, |admin| admin.list_whitelist())
        .await
        .map(Json)
}
