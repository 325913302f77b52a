//! HTTP front end for point-set storage and triangulation.
//!
//! - `POST /pointset`            store a PointSet binary, answer `{"pointSetId": ..}`
//! - `GET  /pointset/:id`        the stored PointSet binary
//! - `GET  /triangulation/:id`   the Triangle-set binary for a stored PointSet

pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod store;
