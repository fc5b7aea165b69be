//! The line-of-sight seam between this crate and the simulation engine.

use ca_core::Vec2;

/// Black-box line-of-sight predicate supplied by the simulation engine.
///
/// `query_visibility(a, b, clearance)` answers whether a straight path from
/// `a` to `b` stays at least `clearance` away from every registered
/// obstacle.  The roadmap builder uses the reference agent radius as
/// clearance; per-tick steering uses each agent's own radius.
///
/// # Symmetry
///
/// The builder queries every ordered vertex pair in both directions, so a
/// symmetric oracle yields a symmetric graph.  Nothing here *requires*
/// symmetry — an asymmetric oracle simply produces a directed graph, and
/// shortest paths respect the directions it reports.
///
/// # Thread safety
///
/// `Send + Sync` so the all-pairs scan and the per-agent steering phase can
/// run on Rayon worker threads against a shared oracle.
pub trait VisibilityOracle: Send + Sync {
    fn query_visibility(&self, a: Vec2, b: Vec2, clearance: f32) -> bool;
}

/// The oracle for obstacle-free worlds: every pair of points is mutually
/// visible at any clearance.
pub struct OpenField;

impl VisibilityOracle for OpenField {
    #[inline]
    fn query_visibility(&self, _a: Vec2, _b: Vec2, _clearance: f32) -> bool {
        true
    }
}
