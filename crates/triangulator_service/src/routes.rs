use crate::error::ApiError;
use crate::metrics::Metrics;
use crate::store::PointSetStore;
use axum::{
    extract::{rejection::BytesRejection, DefaultBodyLimit, MatchedPath, Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use pointset_format::{decode_point_set, encode_point_set, triangles_to_binary, Point};
use serde::Serialize;
use std::{sync::Arc, time::Duration, time::Instant};

const OCTET_STREAM: &str = "application/octet-stream";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PointSetStore>,
    pub metrics: Arc<Metrics>,
    pub max_payload_bytes: usize,
    pub request_timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredBody {
    point_set_id: String,
}

pub fn router(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    Router::new()
        .route("/pointset", post(store_point_set))
        .route("/pointset/:id", get(get_point_set))
        .route("/triangulation/:id", get(get_triangulation))
        .route_layer(middleware::from_fn_with_state(metrics, track_requests))
        .layer(DefaultBodyLimit::max(state.max_payload_bytes))
        .with_state(state)
}

async fn track_requests(State(metrics): State<Arc<Metrics>>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".into());
    let response = next.run(req).await;
    metrics
        .http_requests_total
        .with_label_values(&[route.as_str(), response.status().as_str()])
        .inc();
    response
}

/// Identifiers are opaque but must not contain a path separator.
fn check_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() || id.contains(['/', '\\']) {
        return Err(ApiError::InvalidId);
    }
    Ok(())
}

/// Runs `f` on the blocking pool, giving up after `timeout`.
///
/// A job that overruns keeps running to completion; its result is dropped.
async fn run_blocking<T, F>(timeout: Duration, f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(f)).await {
        Err(_) => Err(ApiError::Timeout),
        Ok(Err(join_error)) => Err(ApiError::Internal(format!(
            "blocking task failed: {join_error}"
        ))),
        Ok(Ok(result)) => result,
    }
}

async fn fetch(state: &AppState, id: String) -> Result<Arc<[Point]>, ApiError> {
    let store = state.store.clone();
    run_blocking(state.request_timeout, move || {
        store.get(&id).map_err(ApiError::from)
    })
    .await
}

async fn store_point_set(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge {
                limit: state.max_payload_bytes,
            }
        } else {
            ApiError::UnreadableBody
        }
    })?;

    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    if body.len() > state.max_payload_bytes {
        return Err(ApiError::PayloadTooLarge {
            limit: state.max_payload_bytes,
        });
    }

    let points = decode_point_set(&body).map_err(ApiError::InvalidFormat)?;
    let count = points.len();

    let store = state.store.clone();
    let id = run_blocking(state.request_timeout, move || {
        store.put(points).map_err(ApiError::from)
    })
    .await?;

    state.metrics.point_sets_stored_total.inc();
    tracing::info!(point_set_id = %id, points = count, "Point set stored");

    Ok((StatusCode::CREATED, Json(StoredBody { point_set_id: id })))
}

async fn get_point_set(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    check_id(&id)?;
    let points = fetch(&state, id).await?;
    let bytes = encode_point_set(&points)
        .map_err(|e| ApiError::Internal(format!("encoding stored point set: {e}")))?;
    Ok(([(header::CONTENT_TYPE, OCTET_STREAM)], bytes))
}

async fn get_triangulation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    check_id(&id)?;
    let points = fetch(&state, id.clone()).await?;

    let metrics = state.metrics.clone();
    let (points, triangles) = run_blocking(state.request_timeout, move || {
        let started = Instant::now();
        let triangles = triangulator::triangulate(&points).map_err(ApiError::Triangulation)?;
        metrics
            .triangulation_seconds
            .observe(started.elapsed().as_secs_f64());
        Ok((points, triangles))
    })
    .await?;

    let bytes = triangles_to_binary(&points, &triangles)
        .map_err(|e| ApiError::Internal(format!("encoding triangulation: {e}")))?;

    state
        .metrics
        .triangles_produced_total
        .inc_by(triangles.len() as u64);
    tracing::debug!(
        point_set_id = %id,
        points = points.len(),
        triangles = triangles.len(),
        "Triangulation served"
    );

    Ok(([(header::CONTENT_TYPE, OCTET_STREAM)], bytes))
}
