//! Overlap tests
//!
//! Two shapes matter: circles (spell vs hero) and the square pointer region
//! around a hero center (cursor deflection, click selection). The square is
//! deliberately not a circle: corners of the box count as inside.

use glam::Vec2;

/// True iff two circles overlap
///
/// Touching circles (center distance exactly equal to the sum of radii) do
/// not overlap.
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    (a - b).length() < a_radius + b_radius
}

/// True iff `point` lies within `half_extent` of `center` on both axes
/// (edges included)
#[inline]
pub fn within_square(center: Vec2, half_extent: f32, point: Vec2) -> bool {
    (center.y - point.y).abs() <= half_extent && (center.x - point.x).abs() <= half_extent
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_boundary_is_exclusive() {
        // 3-4-5 triangle: distance is exactly 5
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!(!circles_overlap(a, 2.0, b, 3.0));
        assert!(circles_overlap(a, 2.0, b, 3.01));
    }

    #[test]
    fn test_square_includes_corners() {
        let center = Vec2::new(100.0, 100.0);
        assert!(within_square(center, 20.0, Vec2::new(120.0, 80.0)));
        assert!(!within_square(center, 20.0, Vec2::new(120.5, 100.0)));
        // Corner of the box lies outside the inscribed circle
        let corner = Vec2::new(119.0, 119.0);
        assert!(within_square(center, 20.0, corner));
        assert!(corner.distance(center) > 20.0);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ar in 0.0f32..50.0, br in 0.0f32..50.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ar, b, br), circles_overlap(b, br, a, ar));
        }

        #[test]
        fn prop_horizontal_touch_never_overlaps(x in -500.0f32..500.0, y in -500.0f32..500.0) {
            // Integer-valued radii keep the sum exact in f32
            let a = Vec2::new(x.round(), y.round());
            let b = a + Vec2::new(30.0, 0.0);
            prop_assert!(!circles_overlap(a, 10.0, b, 20.0));
            prop_assert!(circles_overlap(a, 10.0, b - Vec2::new(1.0, 0.0), 20.0));
        }
    }
}
