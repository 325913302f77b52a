use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// `triangulator_service` - stores 2D point sets and serves their triangulation.
///
/// Point sets are posted and fetched in the little-endian PointSet binary
/// layout; triangulations are returned in the Triangle-set layout.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The listen address of the HTTP API.
    #[arg(long, env = "TRIANGULATOR_LISTEN_ADDR", default_value = "0.0.0.0:5000")]
    pub listen_addr: SocketAddr,

    /// The listen address for the Prometheus metrics server.
    #[arg(
        long,
        env = "TRIANGULATOR_METRICS_LISTEN_ADDR",
        default_value = "0.0.0.0:9091"
    )]
    pub metrics_listen_addr: SocketAddr,

    /// Largest accepted request body, in bytes.
    ///
    /// Larger uploads are answered with 413 Payload Too Large.
    #[arg(long, env = "TRIANGULATOR_MAX_PAYLOAD_BYTES", default_value_t = 50 * 1024 * 1024)]
    pub max_payload_bytes: usize,

    /// Upper bound on a single store lookup or triangulation, in milliseconds.
    ///
    /// Work that overruns is answered with 504 Gateway Timeout; the work
    /// itself is not cancelled.
    #[arg(long, env = "TRIANGULATOR_REQUEST_TIMEOUT_MS", default_value_t = 5000)]
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
