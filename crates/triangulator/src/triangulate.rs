use crate::error::GeometryResult;
use crate::validate::{validate, validate_value};
use pointset_format::{Point, Triangle};
use serde_json::Value;
use std::cmp::Ordering;

/// Cross products at or under this magnitude count as zero.
pub const COLLINEAR_EPSILON: f64 = 1e-10;

/// z-component of `(b - a) x (c - a)`.
#[inline]
fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True when every point lies on the line through the first two.
///
/// Fewer than three points is never collinear. Only meaningful when the
/// first two points do not coincide, which duplicate validation guarantees.
pub fn are_collinear(points: &[Point]) -> bool {
    let [p0, p1, rest @ ..] = points else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    rest.iter()
        .all(|&p| cross(*p0, *p1, p).abs() <= COLLINEAR_EPSILON)
}

/// Triangulate a point list.
///
/// Validation failures propagate unchanged. Collinear input yields an empty
/// set. Otherwise the result holds exactly `N - 2` triangles whose indices
/// refer to positions in `points`.
pub fn triangulate(points: &[Point]) -> GeometryResult<Vec<Triangle>> {
    validate(points)?;
    Ok(fan(points))
}

/// [`triangulate`] for a dynamically-typed point list.
pub fn triangulate_value(value: &Value) -> GeometryResult<Vec<Triangle>> {
    let points = validate_value(value)?;
    Ok(fan(&points))
}

/// Fan from the smallest `(x, y)` point over the remaining points in
/// `(x, y)` order. Not Delaunay: non-convex inputs can yield overlapping
/// triangles.
fn fan(points: &[Point]) -> Vec<Triangle> {
    if are_collinear(points) {
        tracing::debug!(points = points.len(), "collinear point set, no triangles");
        return Vec::new();
    }

    if points.len() == 3 {
        return vec![Triangle::new(0, 1, 2)];
    }

    // Stable sort: equal (x, y) keys keep input order.
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (points[a], points[b]);
        pa.x.partial_cmp(&pb.x)
            .unwrap_or(Ordering::Equal)
            .then(pa.y.partial_cmp(&pb.y).unwrap_or(Ordering::Equal))
    });

    let anchor = order[0];
    let triangles: Vec<Triangle> = order
        .windows(2)
        .skip(1)
        .map(|w| Triangle::new(anchor, w[0], w[1]))
        .collect();

    tracing::trace!(
        points = points.len(),
        triangles = triangles.len(),
        anchor,
        "fan triangulation built"
    );
    triangles
}
