//! Common routes: healthcheck, health, readiness, version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct SystemInfo {
    environment: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct HealthcheckBody {
    status: &'static str,
    system_info: SystemInfo,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn healthcheck(State(state): State<AppState>) -> Json<HealthcheckBody> {
    Json(HealthcheckBody {
        status: "available",
        system_info: SystemInfo {
            environment: state.config.env.as_str(),
            version: env!("CARGO_PKG_VERSION"),
        },
    })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = sqlx::query("SELECT 1").fetch_optional(&state.pool).await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /v1/healthcheck, /health, /ready (with DB check), /version.
pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/healthcheck", get(healthcheck))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
}
