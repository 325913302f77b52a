//! Property-based tests for validation and fan triangulation.
//!
//! Run with: cargo test -p triangulator -- proptest

use pointset_format::{binary_to_triangles, triangles_to_binary};
use proptest::prelude::*;
use triangulator::{are_collinear, triangulate, validate, GeometryError, Point};

/// Integer-lattice points keep duplicate and collinearity checks exact.
fn arb_lattice_points(max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-500i32..500, -500i32..500), 3..max).prop_map(|raw| {
        raw.into_iter()
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .collect()
    })
}

proptest! {
    #[test]
    fn proptest_triangle_count_and_index_validity(points in arb_lattice_points(200)) {
        prop_assume!(validate(&points).is_ok());

        let triangles = triangulate(&points).unwrap();
        if are_collinear(&points) {
            prop_assert!(triangles.is_empty());
        } else {
            prop_assert_eq!(triangles.len(), points.len() - 2);
        }
        for tri in &triangles {
            prop_assert!(tri.has_distinct_vertices());
            prop_assert!(tri.indices().iter().all(|&i| i < points.len()));
        }
    }

    #[test]
    fn proptest_triangulate_is_deterministic(points in arb_lattice_points(100)) {
        prop_assert_eq!(triangulate(&points), triangulate(&points));
    }

    #[test]
    fn proptest_validation_is_idempotent(points in arb_lattice_points(100)) {
        prop_assert_eq!(validate(&points), validate(&points));
    }

    #[test]
    fn proptest_points_on_a_line_yield_nothing(
        slope in -20i32..20,
        offset in -100i32..100,
        xs in prop::collection::btree_set(-1000i32..1000, 3..64),
    ) {
        let points: Vec<Point> = xs
            .into_iter()
            .map(|x| Point::new(x as f64, (slope * x + offset) as f64))
            .collect();
        prop_assert_eq!(triangulate(&points), Ok(Vec::new()));
    }

    #[test]
    fn proptest_triangulation_survives_encoding(points in arb_lattice_points(64)) {
        if let Ok(triangles) = triangulate(&points) {
            let bytes = triangles_to_binary(&points, &triangles).unwrap();
            let (decoded_points, decoded_triangles) = binary_to_triangles(&bytes).unwrap();
            prop_assert_eq!(decoded_points, points);
            prop_assert_eq!(decoded_triangles, triangles);
        }
    }

    #[test]
    fn proptest_fewer_than_three_points_rejected(
        raw in prop::collection::vec((-10.0..10.0f64, -10.0..10.0f64), 0..3)
    ) {
        let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        let err = triangulate(&points).unwrap_err();
        if points.is_empty() {
            prop_assert_eq!(err, GeometryError::EmptySet);
        } else {
            prop_assert_eq!(err, GeometryError::InsufficientPoints { count: points.len() });
        }
    }
}
