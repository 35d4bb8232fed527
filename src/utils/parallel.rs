use crate::math::{Real, Vector};

/// Tests whether `u` and `v` are parallel (or anti-parallel) up to a relative `threshold`.
///
/// The vectors are parallel if `|u·v| > |u||v| - threshold * |u||v|`. A zero vector is never
/// parallel to anything.
#[inline]
pub fn is_parallel(u: &Vector<Real>, v: &Vector<Real>, threshold: Real) -> bool {
    let norms = u.norm() * v.norm();
    u.dot(v).abs() > norms - threshold * norms
}
