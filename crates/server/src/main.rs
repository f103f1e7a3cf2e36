use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use relay_api::{dispatch_tool, MissingCustomerLookup, MissingPaymentLookup, RelayContext};
use shared::{
    error::{ApiException, ErrorCode},
    protocol::ToolCallRequest,
};
use stripe_integration::{StripeClient, StripeConfig};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

mod config;

use config::{load_settings, Settings};

#[derive(Clone)]
struct AppState {
    /// Absent until a provider secret key is configured; the tool route
    /// answers with a config error in that state.
    relay: Option<RelayContext>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let state = AppState {
        relay: build_relay(&settings),
    };
    if state.relay.is_none() {
        warn!("STRIPE_SECRET_KEY is not set; tool calls will fail until it is configured");
    }

    let app = build_router(Arc::new(state));
    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "relay listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_relay(settings: &Settings) -> Option<RelayContext> {
    let secret_key = settings.stripe_secret_key.as_deref()?;
    let config =
        StripeConfig::new(secret_key).with_api_base(settings.stripe_api_base.clone());
    Some(RelayContext {
        gateway: Arc::new(StripeClient::new(config)),
        customers: Arc::new(MissingCustomerLookup),
        payments: Arc::new(MissingPaymentLookup),
    })
}

fn build_router(state: Arc<AppState>) -> Router {
    // One permissive CORS policy at the boundary; the calling agent is not
    // same-origin. This also answers OPTIONS pre-flights.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/stripe/call-stripe-tool", post(call_stripe_tool))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn call_stripe_tool(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToolCallRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let Some(relay) = &state.relay else {
        return Err(error_response(ApiException::config(
            "payments provider secret key is not configured",
        )));
    };
    if request.tool_name.trim().is_empty() {
        return Err(error_response(ApiException::invalid_input(
            "toolName is required",
        )));
    }

    match dispatch_tool(relay, &request.tool_name, request.parameters).await {
        Ok(result) => Ok(Json(serde_json::json!({ "result": result }))),
        Err(exception) => Err(error_response(exception)),
    }
}

fn error_response(exception: ApiException) -> (StatusCode, Json<serde_json::Value>) {
    (
        status_for(exception.code),
        Json(serde_json::json!({ "error": exception.message })),
    )
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidInput | ErrorCode::InvalidState => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Upstream | ErrorCode::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
