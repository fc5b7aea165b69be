//! Segment geometry backing the reference engine's visibility queries.

use ca_core::Vec2;

/// Signed area of the triangle `(a, b, c)` — positive when `c` lies to the
/// left of the directed line `a → b`.
#[inline]
pub fn line_side(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).x * (c - a).y - (b - a).y * (c - a).x
}

/// Squared distance from point `p` to the segment `[a, b]`.
/// Degenerate segments (`a == b`) fall back to point distance.
pub fn dist_sq_point_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let denom = ab.length_sq();
    if denom == 0.0 {
        return p.distance_sq(a);
    }
    let t = ((p - a).dot(ab) / denom).clamp(0.0, 1.0);
    p.distance_sq(a + ab * t)
}

/// `true` if segments `[a, b]` and `[c, d]` intersect, endpoints included.
///
/// Double side-test: each endpoint pair must straddle (or touch) the other
/// segment's supporting line.
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let abc = line_side(a, b, c);
    let abd = line_side(a, b, d);
    let cda = line_side(c, d, a);
    let cdb = line_side(c, d, b);

    if abc * abd > 0.0 || cda * cdb > 0.0 {
        return false;
    }
    // All four collinear: the straddle test is vacuous, so check for
    // actual overlap of the projections.
    if abc == 0.0 && abd == 0.0 && cda == 0.0 && cdb == 0.0 {
        let overlaps = |lo1: f32, hi1: f32, lo2: f32, hi2: f32| {
            lo1.max(lo2) <= hi1.min(hi2)
        };
        return overlaps(a.x.min(b.x), a.x.max(b.x), c.x.min(d.x), c.x.max(d.x))
            && overlaps(a.y.min(b.y), a.y.max(b.y), c.y.min(d.y), c.y.max(d.y));
    }
    true
}

/// Squared distance between segments `[a, b]` and `[c, d]`: zero when they
/// intersect, otherwise the closest endpoint-to-segment distance.
pub fn dist_sq_segment_segment(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> f32 {
    if segments_intersect(a, b, c, d) {
        return 0.0;
    }
    dist_sq_point_segment(a, c, d)
        .min(dist_sq_point_segment(b, c, d))
        .min(dist_sq_point_segment(c, a, b))
        .min(dist_sq_point_segment(d, a, b))
}
