use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::db::DbPool;
use crate::version::GIT_VERSION;

#[derive(Clone)]
pub struct HealthState {
    pub pool: DbPool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    git_version: &'static str,
}

pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let pool = state.pool.clone();
    let database_ok = tokio::task::spawn_blocking(move || {
        pool.get()
            .ok()
            .and_then(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)).ok())
            .is_some()
    })
    .await
    .unwrap_or(false);

    if !database_ok {
        tracing::warn!("Health check could not reach the database");
    }

    let (status, code) = if database_ok {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthResponse {
            status,
            database: if database_ok { "ok" } else { "unreachable" },
            git_version: GIT_VERSION,
        }),
    )
}
