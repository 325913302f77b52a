use dashmap::DashMap;
use pointset_format::Point;
use std::sync::Arc;
use thiserror::Error;

/// Failures of a point-set store lookup or insert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("point set {0} not found")]
    NotFound(String),

    /// Backend cannot be reached.
    #[error("point set store unavailable: {0}")]
    Unavailable(String),

    /// Backend did not answer in time.
    #[error("point set store timed out")]
    Timeout,
}

/// Key -> point list storage. Stored sets are immutable.
///
/// Calls are synchronous; the HTTP layer runs them on the blocking pool.
pub trait PointSetStore: Send + Sync + 'static {
    /// Store a point list and return its new identifier.
    fn put(&self, points: Vec<Point>) -> Result<String, StoreError>;

    fn get(&self, id: &str) -> Result<Arc<[Point]>, StoreError>;
}

/// Process-local store keyed by UUID v4 strings.
#[derive(Default)]
pub struct InMemoryStore {
    sets: DashMap<String, Arc<[Point]>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointSetStore for InMemoryStore {
    fn put(&self, points: Vec<Point>) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        self.sets.insert(id.clone(), points.into());
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Arc<[Point]>, StoreError> {
        self.sets
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }
}
