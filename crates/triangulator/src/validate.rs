//! Gatekeeping checks run before triangulation.
//!
//! Checks run in a fixed order and stop at the first violation:
//! sequence shape, emptiness, minimum count, per-point structure,
//! per-point finiteness, then pairwise duplicates.

use crate::error::{GeometryError, GeometryResult};
use pointset_format::Point;
use serde_json::Value;
use std::cmp::Ordering;

/// Absolute per-axis tolerance under which two points are the same point.
pub const DUPLICATE_EPSILON: f64 = 1e-10;

/// Smallest point count that can form a triangle.
pub const MIN_POINTS: usize = 3;

fn check_count(count: usize) -> GeometryResult<()> {
    match count {
        0 => Err(GeometryError::EmptySet),
        n if n < MIN_POINTS => Err(GeometryError::InsufficientPoints { count: n }),
        _ => Ok(()),
    }
}

/// NaN is reported ahead of infinity when a point carries both.
fn check_finite(index: usize, p: Point) -> GeometryResult<()> {
    if p.x.is_nan() || p.y.is_nan() {
        return Err(GeometryError::NaN { index });
    }
    if p.x.is_infinite() || p.y.is_infinite() {
        return Err(GeometryError::Infinity { index });
    }
    Ok(())
}

#[inline]
fn coincide(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < DUPLICATE_EPSILON && (a.y - b.y).abs() < DUPLICATE_EPSILON
}

/// Reports the lexicographically smallest `(first, second)` pair of
/// coinciding points, i.e. the pair an all-pairs scan would hit first.
///
/// Sweeps over points sorted by x and only compares neighbours whose x
/// distance is under tolerance, so well-spread input costs O(N log N).
/// Input sharing a single x column degrades to the all-pairs O(N²).
fn check_duplicates(points: &[Point]) -> GeometryResult<()> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .x
            .partial_cmp(&points[b].x)
            .unwrap_or(Ordering::Equal)
    });

    let mut found: Option<(usize, usize)> = None;
    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if points[j].x - points[i].x >= DUPLICATE_EPSILON {
                break;
            }
            if coincide(points[i], points[j]) {
                let pair = (i.min(j), i.max(j));
                found = Some(found.map_or(pair, |best| best.min(pair)));
            }
        }
    }

    match found {
        Some((first, second)) => Err(GeometryError::DuplicatePoint { first, second }),
        None => Ok(()),
    }
}

/// Validate a typed point list.
///
/// Sequence shape and per-point structure hold by construction; the remaining
/// checks (count, finiteness, duplicates) run in order.
pub fn validate(points: &[Point]) -> GeometryResult<()> {
    check_count(points.len())?;
    for (index, &p) in points.iter().enumerate() {
        check_finite(index, p)?;
    }
    check_duplicates(points)
}

/// Validate a dynamically-typed point list and return its typed form.
///
/// Accepts a JSON array of `[x, y]` number pairs.
pub fn validate_value(value: &Value) -> GeometryResult<Vec<Point>> {
    let items = value.as_array().ok_or(GeometryError::NotASequence)?;
    check_count(items.len())?;

    let mut points = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let pair = match item.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            _ => return Err(GeometryError::MalformedPoint { index }),
        };
        let (Some(x), Some(y)) = (pair[0].as_f64(), pair[1].as_f64()) else {
            return Err(GeometryError::NonNumericCoordinate { index });
        };
        let p = Point::new(x, y);
        check_finite(index, p)?;
        points.push(p);
    }

    check_duplicates(&points)?;
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_count_checks() {
        assert_eq!(validate(&[]), Err(GeometryError::EmptySet));
        assert_eq!(
            validate(&pts(&[(0.0, 0.0)])),
            Err(GeometryError::InsufficientPoints { count: 1 })
        );
        assert_eq!(
            validate(&pts(&[(0.0, 0.0), (1.0, 1.0)])),
            Err(GeometryError::InsufficientPoints { count: 2 })
        );
    }

    #[test]
    fn test_count_precedes_finiteness() {
        let err = validate(&pts(&[(f64::NAN, 0.0), (1.0, 1.0)])).unwrap_err();
        assert_eq!(err, GeometryError::InsufficientPoints { count: 2 });
    }

    #[test]
    fn test_nan_and_infinity_are_distinct() {
        let nan = pts(&[(0.0, 0.0), (1.0, f64::NAN), (2.0, 1.0)]);
        assert_eq!(validate(&nan), Err(GeometryError::NaN { index: 1 }));

        let inf = pts(&[(0.0, 0.0), (1.0, 0.0), (f64::NEG_INFINITY, 1.0)]);
        assert_eq!(validate(&inf), Err(GeometryError::Infinity { index: 2 }));
    }

    #[test]
    fn test_finiteness_precedes_duplicates() {
        let raw = pts(&[(0.0, 0.0), (0.0, 0.0), (f64::INFINITY, 1.0)]);
        assert_eq!(validate(&raw), Err(GeometryError::Infinity { index: 2 }));
    }

    #[test]
    fn test_duplicate_within_tolerance() {
        let raw = pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0), (1e-11, -1e-11)]);
        assert_eq!(
            validate(&raw),
            Err(GeometryError::DuplicatePoint { first: 0, second: 3 })
        );
    }

    #[test]
    fn test_near_but_distinct_points_pass() {
        let raw = pts(&[(0.0, 0.0), (1e-9, 0.0), (0.5, 1.0)]);
        assert_eq!(validate(&raw), Ok(()));
    }

    #[test]
    fn test_duplicate_reports_first_pair_in_scan_order() {
        // Pairs (1,4) and (0,3) both coincide; (0,3) comes first.
        let raw = pts(&[(5.0, 5.0), (0.0, 0.0), (2.0, 1.0), (5.0, 5.0), (0.0, 0.0)]);
        assert_eq!(
            validate(&raw),
            Err(GeometryError::DuplicatePoint { first: 0, second: 3 })
        );
    }

    #[test]
    fn test_duplicates_in_shared_x_column() {
        let mut raw: Vec<Point> = (0..50).map(|i| Point::new(1.0, i as f64)).collect();
        raw.push(Point::new(1.0, 17.0));
        assert_eq!(
            validate(&raw),
            Err(GeometryError::DuplicatePoint { first: 17, second: 50 })
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let raw = pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0), (0.0, 0.0)]);
        assert_eq!(validate(&raw), validate(&raw));
        let ok = pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]);
        assert_eq!(validate(&ok), validate(&ok));
    }

    #[test]
    fn test_value_not_a_sequence() {
        for v in [json!({"x": 1}), json!("points"), json!(3), json!(null)] {
            assert_eq!(validate_value(&v), Err(GeometryError::NotASequence));
        }
    }

    #[test]
    fn test_value_counts() {
        assert_eq!(validate_value(&json!([])), Err(GeometryError::EmptySet));
        assert_eq!(
            validate_value(&json!([[0, 0], [1, 1]])),
            Err(GeometryError::InsufficientPoints { count: 2 })
        );
    }

    #[test]
    fn test_value_malformed_point() {
        let v = json!([[0, 0], [1, 0, 3], [0.5, 1]]);
        assert_eq!(validate_value(&v), Err(GeometryError::MalformedPoint { index: 1 }));

        let v = json!([[0, 0], [1, 0], 7]);
        assert_eq!(validate_value(&v), Err(GeometryError::MalformedPoint { index: 2 }));

        let v = json!([[0, 0], [1], [0.5, 1]]);
        assert_eq!(validate_value(&v), Err(GeometryError::MalformedPoint { index: 1 }));
    }

    #[test]
    fn test_value_non_numeric_coordinate() {
        let v = json!([[0, 0], [1, "a"], [0.5, 1]]);
        assert_eq!(
            validate_value(&v),
            Err(GeometryError::NonNumericCoordinate { index: 1 })
        );

        let v = json!([[null, 0], [1, 0], [0.5, 1]]);
        assert_eq!(
            validate_value(&v),
            Err(GeometryError::NonNumericCoordinate { index: 0 })
        );
    }

    #[test]
    fn test_value_accepts_mixed_integers_and_floats() {
        let v = json!([[0, 0], [1, 0.0], [0.5, 1]]);
        let points = validate_value(&v).unwrap();
        assert_eq!(points, pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]));
    }

    #[test]
    fn test_value_duplicate() {
        let v = json!([[0, 0], [1, 0], [0.5, 1], [0, 0]]);
        assert_eq!(
            validate_value(&v),
            Err(GeometryError::DuplicatePoint { first: 0, second: 3 })
        );
    }
}
