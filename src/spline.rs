//! Closed-loop Catmull-Rom spline
//!
//! Knot spacing follows `distance^alpha` between consecutive control points
//! (0 uniform, 0.5 centripetal, 1 chordal) and each segment is evaluated
//! with the Barry-Goldman pyramid of linear interpolations.
//!
//! The whole loop is parametrized by `t` in [0, 1): segment `i` covers
//! `[i / L, (i + 1) / L)` and `evaluate(i / L)` lands on control point `i`.
//! Other `t` values wrap around.
//!
//! # Precondition
//!
//! Evaluation needs at least [`MIN_SPLINE_POINTS`] control points. Building
//! a shorter spline is allowed but evaluating it is a caller bug: debug
//! builds panic, release builds return garbage. Check
//! [`Spline::is_evaluable`] first.

use glam::Vec2;

use crate::consts::{DEFAULT_ALPHA, NORMAL_EPSILON};

/// Fewest control points a closed Catmull-Rom loop can be evaluated with
pub const MIN_SPLINE_POINTS: usize = 4;

/// Immutable closed Catmull-Rom curve through an ordered point loop
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    points: Vec<Vec2>,
    alpha: f32,
}

impl Spline {
    pub fn new(points: Vec<Vec2>, alpha: f32) -> Self {
        debug_assert!((0.0..=1.0).contains(&alpha), "alpha {alpha} outside [0, 1]");
        Self { points, alpha }
    }

    /// Centripetal spline (alpha 0.5)
    pub fn centripetal(points: Vec<Vec2>) -> Self {
        Self::new(points, DEFAULT_ALPHA)
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enough control points for `evaluate` and `normal`
    #[inline]
    pub fn is_evaluable(&self) -> bool {
        self.points.len() >= MIN_SPLINE_POINTS
    }

    /// Segment containing `t`
    pub fn segment_index(&self, t: f32) -> usize {
        let n = self.points.len();
        ((wrap_t(t) * n as f32).floor() as usize).min(n.saturating_sub(1))
    }

    /// Local parameter of `t` inside its segment, in [0, 1]
    pub fn segment_t(&self, t: f32) -> f32 {
        let n = self.points.len();
        (wrap_t(t) * n as f32 - self.segment_index(t) as f32).clamp(0.0, 1.0)
    }

    /// Point on the curve at `t`
    pub fn evaluate(&self, t: f32) -> Vec2 {
        debug_assert!(
            self.is_evaluable(),
            "spline needs at least {MIN_SPLINE_POINTS} points, has {}",
            self.points.len()
        );
        self.segment_point(self.segment_index(t), self.segment_t(t))
    }

    /// Unit direction of travel at `t` (central difference)
    pub fn tangent(&self, t: f32) -> Vec2 {
        (self.evaluate(t + NORMAL_EPSILON) - self.evaluate(t - NORMAL_EPSILON)).normalize_or_zero()
    }

    /// Unit normal at `t`, pointing to the right of the direction of travel
    ///
    /// The tangent rotated 90 degrees clockwise. The left track edge is
    /// `centre - normal * w / 2`, the right edge `centre + normal * w / 2`.
    pub fn normal(&self, t: f32) -> Vec2 {
        let tangent = self.tangent(t);
        Vec2::new(tangent.y, -tangent.x)
    }

    /// `resolution` points at uniform parameter steps `j / resolution`
    pub fn sample(&self, resolution: usize) -> Vec<Vec2> {
        (0..resolution)
            .map(|j| self.evaluate(j as f32 / resolution as f32))
            .collect()
    }

    /// Length of the closed polyline through `resolution` samples
    pub fn approximate_length(&self, resolution: usize) -> f32 {
        let samples = self.sample(resolution);
        let n = samples.len();
        (0..n)
            .map(|j| samples[j].distance(samples[(j + 1) % n]))
            .sum()
    }

    fn segment_point(&self, i: usize, u: f32) -> Vec2 {
        let n = self.points.len();
        let p0 = self.points[(n + i - 1) % n];
        let p1 = self.points[i % n];
        let p2 = self.points[(i + 1) % n];
        let p3 = self.points[(i + 2) % n];

        let k0 = 0.0;
        let k1 = k0 + self.knot_interval(p0, p1);
        let k2 = k1 + self.knot_interval(p1, p2);
        let k3 = k2 + self.knot_interval(p2, p3);

        let v = k1 + (k2 - k1) * u;
        let a1 = remap(k0, k1, p0, p1, v);
        let a2 = remap(k1, k2, p1, p2, v);
        let a3 = remap(k2, k3, p2, p3, v);
        let b1 = remap(k0, k2, a1, a2, v);
        let b2 = remap(k1, k3, a2, a3, v);
        remap(k1, k2, b1, b2, v)
    }

    #[inline]
    fn knot_interval(&self, a: Vec2, b: Vec2) -> f32 {
        a.distance_squared(b).powf(0.5 * self.alpha)
    }
}

/// Interpolate `c..d` by where `u` sits in `a..b`; coincident knots give `c`
#[inline]
fn remap(a: f32, b: f32, c: Vec2, d: Vec2, u: f32) -> Vec2 {
    let span = b - a;
    if span.abs() <= f32::EPSILON {
        return c;
    }
    c.lerp(d, (u - a) / span)
}

/// Wrap any `t` into [0, 1)
#[inline]
fn wrap_t(t: f32) -> f32 {
    let wrapped = t.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
