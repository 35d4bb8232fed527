//! Planar polygon utilities working on the projection plane.

use crate::math::{Point2, Real};
use ordered_float::OrderedFloat;

/// Signed area of a closed polygon, computed by contour integration.
///
/// The integral sums the trapezoids `(x[i+1] - x[i]) * (y[i+1] + y[i]) / 2` below every edge.
/// That sum is negative for a counter-clockwise polygon, so it is negated here: the returned
/// area is **positive for counter-clockwise** polygons and negative for clockwise ones.
pub fn signed_area(poly: &[Point2<Real>]) -> Real {
    if poly.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for (i, a) in poly.iter().enumerate() {
        let b = &poly[(i + 1) % poly.len()];
        sum += (b.x - a.x) * (b.y + a.y);
    }

    -sum * 0.5
}

/// Reverses `poly` if needed so that it is counter-clockwise, and returns its (non-negative) area.
pub fn make_ccw(poly: &mut [Point2<Real>]) -> Real {
    let area = signed_area(poly);

    if area < 0.0 {
        poly.reverse();
        -area
    } else {
        area
    }
}

/// Computes the convex hull of a 2D point cloud, in counter-clockwise order.
///
/// Collinear points along the hull boundary are discarded. Returns an empty polygon if
/// `points` is empty.
pub fn convex_hull2d(points: &[Point2<Real>]) -> Vec<Point2<Real>> {
    let mut pts = points.to_vec();
    pts.sort_by_key(|p| (OrderedFloat(p.x), OrderedFloat(p.y)));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let cross = |o: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>| (a - o).perp(&(b - o));
    let mut hull: Vec<Point2<Real>> = Vec::with_capacity(pts.len() * 2);

    // Lower hull.
    for p in &pts {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            let _ = hull.pop();
        }
        hull.push(*p);
    }

    // Upper hull.
    let lower_len = hull.len() + 1;
    for p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            let _ = hull.pop();
        }
        hull.push(*p);
    }

    let _ = hull.pop();
    hull
}

/// Clips the convex polygon `subject` by the convex, counter-clockwise polygon `clip`.
///
/// This is the Sutherland–Hodgman algorithm: `subject` is successively cut by the inner
/// half-plane of each edge of `clip`. The result is empty if both polygons do not overlap.
pub fn clip_convex_polygons(subject: &[Point2<Real>], clip: &[Point2<Real>]) -> Vec<Point2<Real>> {
    let mut output = subject.to_vec();
    let mut input = Vec::with_capacity(subject.len() + clip.len());

    for (i, a) in clip.iter().enumerate() {
        if output.is_empty() {
            break;
        }

        let b = &clip[(i + 1) % clip.len()];
        let edge = b - a;
        // Positive on the inner (left) side of a counter-clockwise edge.
        let side = |p: &Point2<Real>| edge.perp(&(p - a));

        core::mem::swap(&mut input, &mut output);
        output.clear();

        let mut prev = input[input.len() - 1];
        let mut prev_side = side(&prev);

        for curr in &input {
            let curr_side = side(curr);

            if curr_side >= 0.0 {
                if prev_side < 0.0 {
                    output.push(lerp_crossing(&prev, curr, prev_side, curr_side));
                }
                output.push(*curr);
            } else if prev_side >= 0.0 {
                output.push(lerp_crossing(&prev, curr, prev_side, curr_side));
            }

            prev = *curr;
            prev_side = curr_side;
        }
    }

    output
}

/// Area of the overlap between two convex polygons of arbitrary orientation.
pub fn convex_polygons_overlap_area(a: &[Point2<Real>], b: &[Point2<Real>]) -> Real {
    if a.len() < 3 || b.len() < 3 {
        return 0.0;
    }

    let mut clip = b.to_vec();
    let _ = make_ccw(&mut clip);
    signed_area(&clip_convex_polygons(a, &clip)).abs()
}

#[inline]
fn lerp_crossing(a: &Point2<Real>, b: &Point2<Real>, side_a: Real, side_b: Real) -> Point2<Real> {
    let t = side_a / (side_a - side_b);
    a + (b - a) * t
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(min: Real, max: Real) -> Vec<Point2<Real>> {
        vec![
            Point2::new(min, min),
            Point2::new(max, min),
            Point2::new(max, max),
            Point2::new(min, max),
        ]
    }

    #[test]
    fn area_sign_follows_orientation() {
        let mut sq = square(0.0, 2.0);
        assert_relative_eq!(signed_area(&sq), 4.0);
        sq.reverse();
        assert_relative_eq!(signed_area(&sq), -4.0);
        assert_relative_eq!(make_ccw(&mut sq), 4.0);
        assert_relative_eq!(signed_area(&sq), 4.0);
    }

    #[test]
    fn hull_discards_interior_points() {
        let mut pts = square(-1.0, 1.0);
        pts.push(Point2::origin());
        pts.push(Point2::new(0.5, -0.25));
        pts.push(Point2::new(1.0, 0.0)); // On the boundary.

        let hull = convex_hull2d(&pts);
        assert_eq!(hull.len(), 4);
        assert_relative_eq!(signed_area(&hull), 4.0);
    }

    #[test]
    fn overlap_of_shifted_squares() {
        let a = square(0.0, 2.0);
        let b = square(1.0, 3.0);
        assert_relative_eq!(convex_polygons_overlap_area(&a, &b), 1.0, epsilon = 1.0e-6);

        let far = square(5.0, 6.0);
        assert_eq!(convex_polygons_overlap_area(&a, &far), 0.0);

        let inner = square(0.5, 1.0);
        assert_relative_eq!(convex_polygons_overlap_area(&inner, &a), 0.25, epsilon = 1.0e-6);
    }
}
