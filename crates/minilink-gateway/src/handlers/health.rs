use crate::model::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use minilink_core::{MappingStore, UrlCache};
use minilink_generator::CodeGenerator;

/// Load-balancer health probe.
///
/// Overall status follows the cache signal alone: the cache fronts the
/// hot path, and a store outage still serves cached redirects. Store
/// reachability is reported as its own field.
pub async fn health_handler<S, C, G>(
    State(state): State<AppState<S, C, G>>,
) -> (StatusCode, Json<HealthResponse>)
where
    S: MappingStore,
    C: UrlCache,
    G: CodeGenerator,
{
    let summary = state.resolution.health_summary().await;

    let status = if summary.cache_ready {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(HealthResponse::new(summary.cache_ready, summary.store_ready)),
    )
}
