//! Document curves.
//!
//! A document curve is the persisted, class-tagged form of a profile
//! curve. It knows how to write its payload into a [`CurveRecord`], how to
//! read one back, and how to turn itself into a [`MathCurve`].

use std::any::Any;
use std::fmt::Debug;

use serde_json::{Map, Value};
use toponym_geom::{Arc2d, Line2d, MathCurve};
use toponym_math::{normalize_angle, Point2, TAU};

use crate::error::{CurveError, CurveResult};
use crate::record::{point_value, CurveRecord, LoadContext};

/// Identity shared by every document curve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurveMeta {
    /// Registered class tag (short form).
    pub class_tag: String,
    /// Stable curve id; the sweep namer uses it as the profile curve id.
    pub id: String,
}

impl CurveMeta {
    fn tagged(class_tag: &str) -> Self {
        Self {
            class_tag: class_tag.to_string(),
            id: String::new(),
        }
    }
}

/// A persisted profile curve.
pub trait Curve: Debug + Send + Sync {
    /// Identity of this curve.
    fn meta(&self) -> &CurveMeta;

    /// Mutable identity of this curve.
    fn meta_mut(&mut self) -> &mut CurveMeta;

    /// Write the class-specific fields into `fields`.
    fn dump_payload(&self, fields: &mut Map<String, Value>);

    /// Read class-specific fields from a record.
    ///
    /// Absent fields leave the current value untouched. A field of the
    /// wrong type is an error.
    fn load(&mut self, record: &CurveRecord, ctx: &LoadContext) -> CurveResult<()>;

    /// The canonical math form, in the curve's own direction.
    fn to_math_curve(&self) -> MathCurve;

    /// Clone into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Curve>;

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// The class tag this instance was created under.
    fn class_tag(&self) -> &str {
        &self.meta().class_tag
    }

    /// Stable curve id (empty when unassigned).
    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Assign the stable curve id.
    fn set_id(&mut self, id: String) {
        self.meta_mut().id = id;
    }
}

impl Clone for Box<dyn Curve> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// =============================================================================
// LineCurve
// =============================================================================

/// A straight segment between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCurve {
    meta: CurveMeta,
    /// Start point.
    pub from: Point2,
    /// End point.
    pub to: Point2,
}

impl LineCurve {
    /// Short class tag.
    pub const CLASS: &'static str = "Line";

    /// Create a line segment.
    pub fn new(from: Point2, to: Point2) -> Self {
        Self {
            meta: CurveMeta::tagged(Self::CLASS),
            from,
            to,
        }
    }
}

impl Default for LineCurve {
    fn default() -> Self {
        Self::new(Point2::origin(), Point2::new(1.0, 0.0))
    }
}

impl Curve for LineCurve {
    fn meta(&self) -> &CurveMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut CurveMeta {
        &mut self.meta
    }

    fn dump_payload(&self, fields: &mut Map<String, Value>) {
        fields.insert("from".into(), point_value(&self.from));
        fields.insert("to".into(), point_value(&self.to));
    }

    fn load(&mut self, record: &CurveRecord, _ctx: &LoadContext) -> CurveResult<()> {
        if let Some(from) = record.point_field("from")? {
            self.from = from;
        }
        if let Some(to) = record.point_field("to")? {
            self.to = to;
        }
        Ok(())
    }

    fn to_math_curve(&self) -> MathCurve {
        MathCurve::Line(Line2d::from_points(self.from, self.to))
    }

    fn clone_box(&self) -> Box<dyn Curve> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Read an optional non-negative `radius`.
fn radius_field(record: &CurveRecord) -> CurveResult<Option<f64>> {
    match record.f64_field("radius")? {
        Some(radius) if radius < 0.0 => Err(CurveError::malformed(&record.class_tag, "radius", "is negative")),
        radius => Ok(radius),
    }
}

// =============================================================================
// ArcCurve
// =============================================================================

/// A circular arc given by center, radius and boundary angles.
///
/// The arc runs from `start_angle` to `end_angle`, counter-clockwise unless
/// `clockwise` is set. Equal angles describe a full turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCurve {
    meta: CurveMeta,
    /// Center point.
    pub center: Point2,
    /// Radius.
    pub radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Traversal direction.
    pub clockwise: bool,
}

impl ArcCurve {
    /// Short class tag.
    pub const CLASS: &'static str = "Arc";

    /// Create an arc.
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) -> Self {
        Self {
            meta: CurveMeta::tagged(Self::CLASS),
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    /// Signed angular extent implied by the boundary angles and direction.
    pub fn sweep(&self) -> f64 {
        let ccw = normalize_angle(self.end_angle - self.start_angle);
        match (ccw == 0.0, self.clockwise) {
            (true, false) => TAU,
            (true, true) => -TAU,
            (false, false) => ccw,
            (false, true) => ccw - TAU,
        }
    }
}

impl Default for ArcCurve {
    fn default() -> Self {
        Self::new(Point2::origin(), 1.0, 0.0, std::f64::consts::FRAC_PI_2, false)
    }
}

impl Curve for ArcCurve {
    fn meta(&self) -> &CurveMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut CurveMeta {
        &mut self.meta
    }

    fn dump_payload(&self, fields: &mut Map<String, Value>) {
        fields.insert("cx".into(), self.center.x.into());
        fields.insert("cy".into(), self.center.y.into());
        fields.insert("radius".into(), self.radius.into());
        fields.insert("startAngle".into(), self.start_angle.into());
        fields.insert("endAngle".into(), self.end_angle.into());
        fields.insert("clockwise".into(), self.clockwise.into());
    }

    fn load(&mut self, record: &CurveRecord, _ctx: &LoadContext) -> CurveResult<()> {
        let cx = record.f64_field("cx")?;
        let cy = record.f64_field("cy")?;
        let radius = radius_field(record)?;
        let start_angle = record.f64_field("startAngle")?;
        let end_angle = record.f64_field("endAngle")?;
        let clockwise = record.bool_field("clockwise")?;

        if let Some(cx) = cx {
            self.center.x = cx;
        }
        if let Some(cy) = cy {
            self.center.y = cy;
        }
        if let Some(radius) = radius {
            self.radius = radius;
        }
        if let Some(a) = start_angle {
            self.start_angle = a;
        }
        if let Some(a) = end_angle {
            self.end_angle = a;
        }
        if let Some(cw) = clockwise {
            self.clockwise = cw;
        }
        Ok(())
    }

    fn to_math_curve(&self) -> MathCurve {
        MathCurve::Arc(Arc2d {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle,
            sweep: self.sweep(),
        })
    }

    fn clone_box(&self) -> Box<dyn Curve> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// CircleCurve
// =============================================================================

/// A full counter-clockwise circle with its seam at angle 0.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCurve {
    meta: CurveMeta,
    /// Center point.
    pub center: Point2,
    /// Radius.
    pub radius: f64,
}

impl CircleCurve {
    /// Short class tag.
    pub const CLASS: &'static str = "Circle";

    /// Create a circle.
    pub fn new(center: Point2, radius: f64) -> Self {
        Self {
            meta: CurveMeta::tagged(Self::CLASS),
            center,
            radius,
        }
    }
}

impl Default for CircleCurve {
    fn default() -> Self {
        Self::new(Point2::origin(), 1.0)
    }
}

impl Curve for CircleCurve {
    fn meta(&self) -> &CurveMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut CurveMeta {
        &mut self.meta
    }

    fn dump_payload(&self, fields: &mut Map<String, Value>) {
        fields.insert("cx".into(), self.center.x.into());
        fields.insert("cy".into(), self.center.y.into());
        fields.insert("radius".into(), self.radius.into());
    }

    fn load(&mut self, record: &CurveRecord, _ctx: &LoadContext) -> CurveResult<()> {
        let cx = record.f64_field("cx")?;
        let cy = record.f64_field("cy")?;
        let radius = radius_field(record)?;

        if let Some(cx) = cx {
            self.center.x = cx;
        }
        if let Some(cy) = cy {
            self.center.y = cy;
        }
        if let Some(radius) = radius {
            self.radius = radius;
        }
        Ok(())
    }

    fn to_math_curve(&self) -> MathCurve {
        MathCurve::Arc(Arc2d::full_circle(self.center, self.radius))
    }

    fn clone_box(&self) -> Box<dyn Curve> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
