use axum::{http::StatusCode, routing::get, Router};
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Prometheus collectors for the triangulation service.
///
/// Wrapped in an `Arc` and shared by every request handler.
pub struct Metrics {
    pub registry: Registry,
    /// HTTP requests by matched route and response status.
    pub http_requests_total: IntCounterVec,
    pub point_sets_stored_total: IntCounter,
    pub triangles_produced_total: IntCounter,
    /// Wall time of validation + triangulation, excluding store lookup.
    pub triangulation_seconds: Histogram,
}

impl Metrics {
    /// Creates all collectors and registers them in a custom registry.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("triangulator".into()), None)?;

        macro_rules! reg {
            ($metric:expr) => {{
                let collector = $metric;
                registry.register(Box::new(collector.clone()))?;
                collector
            }};
        }

        Ok(Self {
            http_requests_total: reg!(IntCounterVec::new(
                Opts::new("http_requests_total", "Total HTTP requests handled"),
                &["route", "status"]
            )?),
            point_sets_stored_total: reg!(IntCounter::new(
                "point_sets_stored_total",
                "Total number of point sets accepted and stored"
            )?),
            triangles_produced_total: reg!(IntCounter::new(
                "triangles_produced_total",
                "Total number of triangles returned to clients"
            )?),
            triangulation_seconds: reg!(Histogram::with_opts(
                HistogramOpts::new(
                    "triangulation_seconds",
                    "Time spent validating and triangulating a point set"
                )
                .buckets(prometheus::exponential_buckets(0.0001, 2.0, 16)?)
            )?),
            registry,
        })
    }

    /// Creates an `axum::Router` that serves the metrics on `/metrics`.
    pub fn router(&self) -> Router {
        let registry = self.registry.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let registry = registry.clone();
                async move {
                    let mut buffer = Vec::new();
                    TextEncoder::new()
                        .encode(&registry.gather(), &mut buffer)
                        .map_err(|e| {
                            tracing::error!(error = %e, "Failed to encode metrics");
                            StatusCode::INTERNAL_SERVER_ERROR
                        })?;
                    let body = String::from_utf8(buffer)
                        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
                    Ok::<String, StatusCode>(body)
                }
            }),
        )
    }
}
