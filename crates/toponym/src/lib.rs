#![warn(missing_docs)]

//! Curve persistence, wire building and stable sweep topology names.
//!
//! [`Session`] ties the layers together: it owns the curve registry used
//! to read and write curve records, and the namer configuration applied to
//! every sweep regeneration. The lower layers are re-exported for callers
//! that need them directly.
//!
//! # Example
//!
//! ```
//! use toponym::{Curve, CurveRecord, Session};
//!
//! let session = Session::new();
//! let record = CurveRecord::new("ArcCurve").with("radius", 5.0);
//! let curve = session.build_curve(Some(&record)).unwrap();
//! assert_eq!(curve.class_tag(), "Arc");
//! ```

mod config;

pub use toponym_curve;
pub use toponym_geom;
pub use toponym_math;
pub use toponym_sweep;
pub use toponym_topo;

pub use config::{Config, ConfigError, ConfigResult, IoConfig};
pub use toponym_curve::{Curve, CurveError, CurveRecord, CurveRegistry, DumpContext, DumpOptions, LoadContext};
pub use toponym_sweep::{CurveSweepFaces, NamingReport, SweepGeometry, TopoNamer};
pub use toponym_topo::Shape;

use toponym_curve::ClassAliases;
use tracing::debug;

/// Owns the curve registry and namer for one document.
#[derive(Debug)]
pub struct Session {
    registry: CurveRegistry,
    namer: TopoNamer,
    dump_options: DumpOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session with the built-in curves and default naming.
    pub fn new() -> Self {
        Self {
            registry: CurveRegistry::with_builtin_curves(),
            namer: TopoNamer::new(),
            dump_options: DumpOptions::default(),
        }
    }

    /// A session configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = CurveRegistry::with_builtin_curves();
        registry
            .aliases_mut()
            .extend(&ClassAliases::from(config.aliases.clone()));
        debug!(aliases = registry.aliases().len(), "session configured");
        Self {
            registry,
            namer: TopoNamer::with_config(config.naming.clone()),
            dump_options: DumpOptions {
                long_class_names: config.io.long_class_names,
            },
        }
    }

    /// The curve registry.
    pub fn registry(&self) -> &CurveRegistry {
        &self.registry
    }

    /// Mutable registry, for registering extra curve classes before loading.
    pub fn registry_mut(&mut self) -> &mut CurveRegistry {
        &mut self.registry
    }

    /// The sweep namer.
    pub fn namer(&self) -> &TopoNamer {
        &self.namer
    }

    /// Build a curve from a record; `None` if absent, unknown or malformed.
    pub fn build_curve(&self, record: Option<&CurveRecord>) -> Option<Box<dyn Curve>> {
        self.registry.build_from_dump(record, &LoadContext::new())
    }

    /// Dump a curve with its id, using the session's class-name style.
    pub fn dump_curve(&self, curve: &dyn Curve, ctx: &mut DumpContext) -> CurveRecord {
        self.registry.dump(curve, ctx, true, &self.dump_options)
    }

    /// Name the faces, edges and coedges generated by a sweep.
    pub fn name_sweep(
        &self,
        shape: &mut Shape,
        geometry: &dyn SweepGeometry,
        faces: &CurveSweepFaces,
    ) -> NamingReport {
        self.namer.reconstruct_brep_names(shape, geometry, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;
    use std::collections::HashSet;
    use toponym_curve::{ArcCurve, LineCurve};
    use toponym_geom::Line3d;
    use toponym_math::{Point2, Point3, Tolerance};
    use toponym_sweep::{PathSegment, SweptProfile};

    #[test]
    fn test_configured_alias_and_long_names() {
        let config = Config::from_toml_str(
            r#"
            [io]
            long_class_names = true

            [aliases]
            Segment = "Line"
            "#,
        )
        .unwrap();
        let session = Session::from_config(&config);

        let record = CurveRecord::new("Segment").with("to", vec![2.0, 0.0]);
        let curve = session.build_curve(Some(&record)).unwrap();
        assert_eq!(curve.class_tag(), "Line");

        let dumped = session.dump_curve(curve.as_ref(), &mut DumpContext::new());
        assert_eq!(dumped.class_tag, "Segment");
        assert!(session.build_curve(Some(&dumped)).is_some());
        assert!(session.build_curve(Some(&CurveRecord::new("LineCurve"))).is_some());
    }

    #[test]
    fn test_roundtrip_dump_is_stable() {
        let session = Session::new();
        let mut arc = ArcCurve::new(Point2::new(1.0, 2.0), 3.0, 0.5, 2.5, true);
        arc.set_id("arc-7".into());

        let first = session.dump_curve(&arc, &mut DumpContext::new());
        let rebuilt = session.build_curve(Some(&first)).unwrap();
        let second = session.dump_curve(rebuilt.as_ref(), &mut DumpContext::new());
        assert_eq!(first, second);
        assert_eq!(first.to_value().unwrap()["id"], json!("arc-7"));
    }

    /// Rectangle profile loaded from records, built into a wire, then swept
    /// along two tagged path segments and named.
    #[test]
    fn test_profile_to_named_sweep() {
        let session = Session::new();
        let records = [
            json!({"Class": "Line", "id": "bottom", "from": [0.0, 0.0], "to": [2.0, 0.0]}),
            json!({"Class": "LineCurve", "id": "right", "from": [2.0, 0.0], "to": [2.0, 1.0]}),
            json!({"Class": "Line", "id": "top", "from": [0.0, 1.0], "to": [2.0, 1.0]}),
            json!({"Class": "Line", "id": "left", "from": [0.0, 1.0], "to": [0.0, 0.0]}),
            json!({"Class": "Spline", "id": "ghost"}),
        ];
        let curves: Vec<Box<dyn Curve>> = records
            .into_iter()
            .filter_map(|v| {
                let record = CurveRecord::from_value(v).ok()?;
                session.build_curve(Some(&record))
            })
            .collect();
        assert_eq!(curves.len(), 4);

        // Profile wire; the top edge is stored left to right.
        let mut shape = Shape::new();
        let mut coedges = Vec::new();
        let mut edges = Vec::new();
        for curve in &curves {
            let reversed = curve.id() == "top";
            let e = shape.add_edge(curve.clone(), curve.id());
            coedges.push(shape.add_coedge(e, reversed, curve.id()).unwrap());
            edges.push(e);
        }
        let wire = shape.add_wire(&coedges).unwrap();
        let profile_loop = shape.to_math_loop(wire).unwrap();
        assert!(profile_loop.is_closed(&Tolerance::DEFAULT));
        assert_relative_eq!(profile_loop.signed_area(), 2.0, epsilon = 1e-12);

        let partial = shape
            .to_builder_curves(wire, &HashSet::from([edges[0]]))
            .unwrap();
        let topos: Vec<&str> = partial.iter().map(|b| b.topo.as_str()).collect();
        assert_eq!(topos, ["right", "top", "left"]);

        // One lateral face per profile curve and path segment.
        let path = vec![
            PathSegment::new(
                Line3d::from_points(Point3::origin(), Point3::new(0.0, 0.0, 3.0)),
                "wall-a",
            ),
            PathSegment::new(
                Line3d::from_points(Point3::new(0.0, 0.0, 3.0), Point3::new(4.0, 0.0, 3.0)),
                "wall-b",
            ),
        ];
        let geometry = SweptProfile::new("molding-9", path, curves);
        let mut faces = CurveSweepFaces::new();
        for curve in geometry.sweep_profile() {
            let per_segment = (0..2)
                .map(|_| {
                    let w = shape.add_wire(&[]).unwrap();
                    Some(shape.add_face(&[w]).unwrap())
                })
                .collect();
            faces.insert(curve.id().to_string(), per_segment);
        }

        let report = session.name_sweep(&mut shape, &geometry, &faces);
        assert_eq!(report.faces_named, 8);
        assert!(report.ensure_unique().is_ok());
        let top_b = faces["top"][1].unwrap();
        assert_eq!(shape.face(top_b).unwrap().topo_name.as_deref(), Some("top-wall-b"));
        assert_eq!(shape.tag.as_deref(), Some("molding-9"));

        let downcast = geometry.sweep_profile()[0].as_any().downcast_ref::<LineCurve>();
        assert!(downcast.is_some());
    }
}
