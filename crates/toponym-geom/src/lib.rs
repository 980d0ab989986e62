#![warn(missing_docs)]

//! Math curves for the toponym core.
//!
//! Document curves (see `toponym-curve`) convert into the types defined
//! here before any geometric work happens. Everything in this crate is a
//! plain value: reversing a curve produces a new curve, and a [`Loop`] is
//! just an ordered list of [`MathCurve`]s.

use toponym_math::{Point2, Point3, Tolerance, Vec2, Vec3, TAU};

// =============================================================================
// Curve traits
// =============================================================================

/// The kind of a math curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Straight line segment.
    Line,
    /// Circular arc (a full circle is an arc sweeping 2π).
    Arc,
}

/// A parametric curve in the 2D profile plane.
pub trait Curve2d: Send + Sync + std::fmt::Debug {
    /// Evaluate the curve at parameter `t` to get a 2D point.
    fn evaluate(&self, t: f64) -> Point2;

    /// Parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Point at the start of the domain.
    fn start_point(&self) -> Point2 {
        self.evaluate(self.domain().0)
    }

    /// Point at the end of the domain.
    fn end_point(&self) -> Point2 {
        self.evaluate(self.domain().1)
    }
}

/// A parametric curve in 3D space (sweep path segments).
pub trait Curve3d: Send + Sync + std::fmt::Debug {
    /// Evaluate the curve at parameter `t` to get a 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// Parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Clone into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Curve3d>;
}

impl Clone for Box<dyn Curve3d> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// =============================================================================
// Line2d
// =============================================================================

/// A 2D line segment.
///
/// Parameterization: `P(t) = origin + t * direction`, `t ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line2d {
    /// Starting point.
    pub origin: Point2,
    /// Direction (magnitude is the segment length).
    pub direction: Vec2,
}

impl Line2d {
    /// Create from two endpoints.
    pub fn from_points(start: Point2, end: Point2) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }

    /// The same segment traversed end to start.
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.origin + self.direction,
            direction: -self.direction,
        }
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.direction.norm()
    }
}

impl Curve2d for Line2d {
    fn evaluate(&self, t: f64) -> Point2 {
        self.origin + t * self.direction
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

// =============================================================================
// Arc2d
// =============================================================================

/// A circular arc in the profile plane.
///
/// Parameterization: `P(t) = center + radius * (cos θ, sin θ)` with
/// `θ = start_angle + t * sweep`, `t ∈ [0, 1]`. A positive sweep runs
/// counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc2d {
    /// Center of the arc.
    pub center: Point2,
    /// Radius.
    pub radius: f64,
    /// Angle of the start point, in radians.
    pub start_angle: f64,
    /// Signed angular extent, in radians.
    pub sweep: f64,
}

impl Arc2d {
    /// Create an arc from its center and endpoints.
    ///
    /// The radius is taken from the start point. When `start` and `end`
    /// coincide the arc is a full circle in the requested direction.
    pub fn from_points(center: Point2, start: Point2, end: Point2, ccw: bool) -> Self {
        let d_start = start - center;
        let d_end = end - center;
        let start_angle = d_start.y.atan2(d_start.x);
        let end_angle = d_end.y.atan2(d_end.x);
        let mut sweep = end_angle - start_angle;
        if ccw {
            if sweep <= 0.0 {
                sweep += TAU;
            }
        } else if sweep >= 0.0 {
            sweep -= TAU;
        }
        Self {
            center,
            radius: d_start.norm(),
            start_angle,
            sweep,
        }
    }

    /// A full counter-clockwise circle starting at angle 0.
    pub fn full_circle(center: Point2, radius: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: 0.0,
            sweep: TAU,
        }
    }

    /// The same arc traversed end to start.
    pub fn reversed(&self) -> Self {
        Self {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle + self.sweep,
            sweep: -self.sweep,
        }
    }

    /// Whether the arc runs counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        self.sweep > 0.0
    }

    /// Whether the arc closes on itself.
    pub fn is_full_circle(&self) -> bool {
        Tolerance::DEFAULT.angles_equal(self.sweep.abs(), TAU)
    }

    /// Arc length.
    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }
}

impl Curve2d for Arc2d {
    fn evaluate(&self, t: f64) -> Point2 {
        let theta = self.start_angle + t * self.sweep;
        let (sin_t, cos_t) = theta.sin_cos();
        self.center + self.radius * Vec2::new(cos_t, sin_t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

// =============================================================================
// MathCurve
// =============================================================================

/// The canonical directional form of a profile curve.
#[derive(Debug, Clone, PartialEq)]
pub enum MathCurve {
    /// A line segment.
    Line(Line2d),
    /// A circular arc or full circle.
    Arc(Arc2d),
}

impl MathCurve {
    /// The kind of this curve.
    pub fn kind(&self) -> CurveKind {
        match self {
            MathCurve::Line(_) => CurveKind::Line,
            MathCurve::Arc(_) => CurveKind::Arc,
        }
    }

    /// The same curve traversed in the opposite direction.
    ///
    /// Reversing twice yields a curve geometrically equal to the original
    /// (see [`MathCurve::approx_eq`]), not necessarily bit-identical.
    pub fn reversed(&self) -> Self {
        match self {
            MathCurve::Line(l) => MathCurve::Line(l.reversed()),
            MathCurve::Arc(a) => MathCurve::Arc(a.reversed()),
        }
    }

    /// Curve length.
    pub fn length(&self) -> f64 {
        match self {
            MathCurve::Line(l) => l.length(),
            MathCurve::Arc(a) => a.length(),
        }
    }

    /// Geometric equality: same kind, same direction, and coincident
    /// points along the whole parameter range.
    pub fn approx_eq(&self, other: &MathCurve, tol: &Tolerance) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        if let (MathCurve::Arc(a), MathCurve::Arc(b)) = (self, other) {
            if !tol.is_zero(a.radius - b.radius) || !tol.points_equal_2d(&a.center, &b.center) {
                return false;
            }
            // Full circles with different seams or directions are different curves.
            if (a.sweep - b.sweep).abs() > tol.linear.max(tol.angular) * 1e3 {
                return false;
            }
        }
        const SAMPLES: usize = 8;
        (0..=SAMPLES).all(|i| {
            let t = i as f64 / SAMPLES as f64;
            tol.points_equal_2d(&self.evaluate(t), &other.evaluate(t))
        })
    }

    /// Sample points along the curve, excluding the end point.
    ///
    /// Lines contribute their start point only; arcs contribute
    /// `arc_segments` evenly spaced points.
    pub fn sample_points(&self, arc_segments: usize) -> Vec<Point2> {
        match self {
            MathCurve::Line(l) => vec![l.origin],
            MathCurve::Arc(a) => {
                let n = arc_segments.max(1);
                (0..n).map(|i| a.evaluate(i as f64 / n as f64)).collect()
            }
        }
    }
}

impl Curve2d for MathCurve {
    fn evaluate(&self, t: f64) -> Point2 {
        match self {
            MathCurve::Line(l) => l.evaluate(t),
            MathCurve::Arc(a) => a.evaluate(t),
        }
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

impl From<Line2d> for MathCurve {
    fn from(line: Line2d) -> Self {
        MathCurve::Line(line)
    }
}

impl From<Arc2d> for MathCurve {
    fn from(arc: Arc2d) -> Self {
        MathCurve::Arc(arc)
    }
}

// =============================================================================
// Loop
// =============================================================================

/// An ordered sequence of math curves, expected to be closed.
///
/// A loop carries no topology metadata. It is built fresh from a wire and
/// handed straight to the sweep/geometry layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loop {
    curves: Vec<MathCurve>,
}

impl Loop {
    /// Create a loop from curves in traversal order.
    pub fn new(curves: Vec<MathCurve>) -> Self {
        Self { curves }
    }

    /// Curves in traversal order.
    pub fn curves(&self) -> &[MathCurve] {
        &self.curves
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Check if the loop has no curves.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Iterate over the curves in order.
    pub fn iter(&self) -> std::slice::Iter<'_, MathCurve> {
        self.curves.iter()
    }

    /// Start point of the first curve.
    pub fn start_point(&self) -> Option<Point2> {
        self.curves.first().map(|c| c.start_point())
    }

    /// Check that every curve ends where the next one starts, wrapping
    /// around from the last curve to the first. An empty loop is open.
    pub fn is_closed(&self, tol: &Tolerance) -> bool {
        if self.curves.is_empty() {
            return false;
        }
        let n = self.curves.len();
        (0..n).all(|i| {
            let end = self.curves[i].end_point();
            let next_start = self.curves[(i + 1) % n].start_point();
            tol.points_equal_2d(&end, &next_start)
        })
    }

    /// Signed enclosed area (positive for counter-clockwise loops).
    ///
    /// Arcs are sampled, so the value is approximate for curved loops.
    pub fn signed_area(&self) -> f64 {
        let pts: Vec<Point2> = self
            .curves
            .iter()
            .flat_map(|c| c.sample_points(64))
            .collect();
        if pts.len() < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            twice_area += a.x * b.y - b.x * a.y;
        }
        twice_area * 0.5
    }
}

impl<'a> IntoIterator for &'a Loop {
    type Item = &'a MathCurve;
    type IntoIter = std::slice::Iter<'a, MathCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

impl FromIterator<MathCurve> for Loop {
    fn from_iter<I: IntoIterator<Item = MathCurve>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =============================================================================
// 3D path curves
// =============================================================================

/// A 3D line segment.
///
/// Parameterization: `P(t) = origin + t * direction`, `t ∈ [0, 1]`.
#[derive(Debug, Clone)]
pub struct Line3d {
    /// Starting point.
    pub origin: Point3,
    /// Direction (magnitude is the segment length).
    pub direction: Vec3,
}

impl Line3d {
    /// Create a line from two endpoints.
    pub fn from_points(start: Point3, end: Point3) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }
}

impl Curve3d for Line3d {
    fn evaluate(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn unit_square() -> Loop {
        let p = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        (0..4)
            .map(|i| MathCurve::Line(Line2d::from_points(p[i], p[(i + 1) % 4])))
            .collect()
    }

    #[test]
    fn test_line_reversed() {
        let line = Line2d::from_points(Point2::new(1.0, 0.0), Point2::new(0.0, 0.0));
        let rev = line.reversed();
        assert!((rev.start_point() - Point2::new(0.0, 0.0)).norm() < 1e-12);
        assert!((rev.end_point() - Point2::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_arc_from_points_quarter() {
        let arc = Arc2d::from_points(
            Point2::origin(),
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 5.0),
            true,
        );
        assert_relative_eq!(arc.radius, 5.0);
        assert_relative_eq!(arc.sweep, PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(arc.length(), 5.0 * PI / 2.0, epsilon = 1e-10);
        let mid = arc.evaluate(0.5);
        assert!((mid.x - 5.0 * (PI / 4.0).cos()).abs() < 1e-12);
    }

    #[test]
    fn test_arc_clockwise_sweep_is_negative() {
        let arc = Arc2d::from_points(
            Point2::origin(),
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 5.0),
            false,
        );
        assert!(!arc.is_ccw());
        assert_relative_eq!(arc.sweep, -1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_coincident_endpoints_is_full_circle() {
        let p = Point2::new(2.0, 0.0);
        let arc = Arc2d::from_points(Point2::origin(), p, p, true);
        assert!(arc.is_full_circle());
    }

    #[test]
    fn test_reversal_involution() {
        let curves = [
            MathCurve::Line(Line2d::from_points(Point2::new(0.3, -1.0), Point2::new(4.0, 2.5))),
            MathCurve::Arc(Arc2d::from_points(
                Point2::new(1.0, 1.0),
                Point2::new(3.0, 1.0),
                Point2::new(1.0, 3.0),
                true,
            )),
            MathCurve::Arc(Arc2d::from_points(
                Point2::new(-2.0, 0.5),
                Point2::new(-1.0, 0.5),
                Point2::new(-3.0, 0.5),
                false,
            )),
            MathCurve::Arc(Arc2d::full_circle(Point2::new(7.0, 7.0), 0.25)),
        ];
        let tol = Tolerance::DEFAULT;
        for c in &curves {
            let twice = c.reversed().reversed();
            assert!(c.approx_eq(&twice, &tol), "{c:?} != {twice:?}");
            assert!(!c.approx_eq(&c.reversed(), &tol));
        }
    }

    #[test]
    fn test_reversed_swaps_endpoints() {
        let arc = MathCurve::Arc(Arc2d::from_points(
            Point2::origin(),
            Point2::new(1.0, 0.0),
            Point2::new(-1.0, 0.0),
            true,
        ));
        let rev = arc.reversed();
        assert!((rev.start_point() - arc.end_point()).norm() < 1e-12);
        assert!((rev.end_point() - arc.start_point()).norm() < 1e-12);
        // Reversed half circle still passes through the top.
        assert!((rev.evaluate(0.5) - Point2::new(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_approx_eq_rejects_other_kind() {
        let line = MathCurve::Line(Line2d::from_points(Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)));
        let arc = MathCurve::Arc(Arc2d::from_points(
            Point2::origin(),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            true,
        ));
        assert!(!line.approx_eq(&arc, &Tolerance::DEFAULT));
    }

    #[test]
    fn test_loop_closed_and_area() {
        let square = unit_square();
        assert_eq!(square.len(), 4);
        assert!(square.is_closed(&Tolerance::DEFAULT));
        assert_relative_eq!(square.signed_area(), 1.0, epsilon = 1e-12);

        let reversed: Loop = square.iter().rev().map(|c| c.reversed()).collect();
        assert!(reversed.is_closed(&Tolerance::DEFAULT));
        assert_relative_eq!(reversed.signed_area(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_loop_open() {
        let mut curves = unit_square().curves().to_vec();
        curves.pop();
        assert!(!Loop::new(curves).is_closed(&Tolerance::DEFAULT));
        assert!(!Loop::default().is_closed(&Tolerance::DEFAULT));
    }

    #[test]
    fn test_circle_loop_area() {
        let circle = Loop::new(vec![MathCurve::Arc(Arc2d::full_circle(Point2::origin(), 2.0))]);
        assert!(circle.is_closed(&Tolerance::DEFAULT));
        // 64-gon inscribed in r=2 circle
        let expected = 0.5 * 64.0 * 4.0 * (TAU / 64.0).sin();
        assert_relative_eq!(circle.signed_area(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_line3d() {
        let line = Line3d::from_points(Point3::origin(), Point3::new(10.0, 0.0, 0.0));
        let mid = line.evaluate(0.5);
        assert!((mid.x - 5.0).abs() < 1e-12);
    }
}
