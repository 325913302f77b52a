//! Deterministic triangulation of 2D point sets.
//!
//! [`triangulate`] runs the full validation chain and then builds a fan
//! triangulation anchored at the smallest `(x, y)` point. Every operation is
//! a pure function of its input and safe to call from any thread.
//!
//! ```
//! use triangulator::{triangulate, Point, Triangle};
//!
//! let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.5, 1.0)];
//! assert_eq!(triangulate(&points).unwrap(), vec![Triangle::new(0, 1, 2)]);
//! ```

mod error;
mod triangulate;
mod validate;

pub use error::{GeometryError, GeometryResult};
pub use pointset_format::{Point, Triangle};
pub use triangulate::{are_collinear, triangulate, triangulate_value, COLLINEAR_EPSILON};
pub use validate::{validate, validate_value, DUPLICATE_EPSILON, MIN_POINTS};
