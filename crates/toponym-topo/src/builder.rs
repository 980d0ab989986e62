//! Wire → builder curves / math loop conversion.

use std::collections::HashSet;

use toponym_geom::{Curve2d, Loop, MathCurve};
use toponym_math::Tolerance;
use tracing::debug;

use crate::error::TopoResult;
use crate::{CoedgeId, EdgeId, Shape, WireId};

/// A directed math curve paired with the topology name of its coedge.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderCurve {
    /// The curve in wire traversal direction.
    pub curve: MathCurve,
    /// Topology name of the coedge it came from.
    pub topo: String,
}

impl Shape {
    /// The math curve of a coedge, in wire traversal direction.
    pub fn resolve(&self, coedge: CoedgeId) -> TopoResult<MathCurve> {
        let c = self.coedge(coedge)?;
        let math = self.edge(c.edge)?.curve.to_math_curve();
        Ok(if c.is_reversed { math.reversed() } else { math })
    }

    /// Builder curves for a wire, skipping coedges over `excluded` edges.
    ///
    /// Coedge order is kept as stored; exclusion only drops entries.
    pub fn to_builder_curves(&self, wire: WireId, excluded: &HashSet<EdgeId>) -> TopoResult<Vec<BuilderCurve>> {
        let mut out = Vec::with_capacity(self.wire(wire)?.coedges.len());
        for &id in &self.wire(wire)?.coedges {
            let coedge = self.coedge(id)?;
            if excluded.contains(&coedge.edge) {
                continue;
            }
            out.push(BuilderCurve {
                curve: self.resolve(id)?,
                topo: coedge.topo_name.clone(),
            });
        }
        Ok(out)
    }

    /// The closed math loop of a wire, one curve per coedge.
    pub fn to_math_loop(&self, wire: WireId) -> TopoResult<Loop> {
        self.wire(wire)?
            .coedges
            .iter()
            .map(|&c| self.resolve(c))
            .collect::<TopoResult<Vec<_>>>()
            .map(Loop::new)
    }

    /// Set each coedge's orientation from how the edge curves connect.
    ///
    /// Intended for wires assembled from unoriented curves. The first
    /// coedge is reversed when its curve's start touches the next curve;
    /// every later coedge is reversed when its curve ends (rather than
    /// starts) at the previous coedge's end. Single-coedge wires keep
    /// their flag.
    pub fn infer_orientation(&mut self, wire: WireId, tol: &Tolerance) -> TopoResult<()> {
        let ids = self.wire(wire)?.coedges.clone();
        if ids.len() < 2 {
            return Ok(());
        }
        let mut curves = Vec::with_capacity(ids.len());
        for &id in &ids {
            let edge = self.coedge(id)?.edge;
            curves.push(self.edge(edge)?.curve.to_math_curve());
        }

        let touches = |p, c: &MathCurve| tol.points_equal_2d(&p, &c.start_point()) || tol.points_equal_2d(&p, &c.end_point());

        let mut flags = Vec::with_capacity(ids.len());
        let first_reversed = touches(curves[0].start_point(), &curves[1]) && !touches(curves[0].end_point(), &curves[1]);
        flags.push(first_reversed);
        let mut tail = if first_reversed {
            curves[0].start_point()
        } else {
            curves[0].end_point()
        };

        for (i, curve) in curves.iter().enumerate().skip(1) {
            let reversed = if tol.points_equal_2d(&tail, &curve.start_point()) {
                false
            } else if tol.points_equal_2d(&tail, &curve.end_point()) {
                true
            } else {
                debug!(index = i, "coedge does not connect to its predecessor");
                self.coedge(ids[i])?.is_reversed
            };
            tail = if reversed {
                curve.start_point()
            } else {
                curve.end_point()
            };
            flags.push(reversed);
        }

        for (&id, reversed) in ids.iter().zip(flags) {
            self.coedge_mut(id)?.is_reversed = reversed;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TopoError;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use toponym_curve::{ArcCurve, Curve, LineCurve};
    use toponym_geom::Line2d;
    use toponym_math::Point2;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Box<dyn Curve> {
        Box::new(LineCurve::new(Point2::new(x0, y0), Point2::new(x1, y1)))
    }

    /// Counter-clockwise unit square; the top edge is stored left-to-right
    /// and used reversed.
    fn square(shape: &mut Shape) -> (WireId, Vec<EdgeId>) {
        let specs = [
            (line(0.0, 0.0, 1.0, 0.0), false, "bottom"),
            (line(1.0, 0.0, 1.0, 1.0), false, "right"),
            (line(0.0, 1.0, 1.0, 1.0), true, "top"),
            (line(0.0, 1.0, 0.0, 0.0), false, "left"),
        ];
        let mut edges = Vec::new();
        let mut coedges = Vec::new();
        for (curve, reversed, name) in specs {
            let e = shape.add_edge(curve, name);
            coedges.push(shape.add_coedge(e, reversed, name).unwrap());
            edges.push(e);
        }
        (shape.add_wire(&coedges).unwrap(), edges)
    }

    #[test]
    fn test_two_coedge_scenario() {
        let mut shape = Shape::new();
        let e1 = shape.add_edge(line(0.0, 0.0, 1.0, 0.0), "E1");
        let e2 = shape.add_edge(line(1.0, 0.0, 0.0, 0.0), "E2");
        let c1 = shape.add_coedge(e1, false, "top").unwrap();
        let c2 = shape.add_coedge(e2, true, "bottom").unwrap();
        let w = shape.add_wire(&[c1, c2]).unwrap();

        let curves = shape.to_builder_curves(w, &HashSet::new()).unwrap();
        let expected = MathCurve::Line(Line2d::from_points(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)));
        let tol = Tolerance::DEFAULT;
        assert_eq!(curves.len(), 2);
        assert!(curves[0].curve.approx_eq(&expected, &tol));
        assert_eq!(curves[0].topo, "top");
        assert!(curves[1].curve.approx_eq(&expected, &tol));
        assert_eq!(curves[1].topo, "bottom");
    }

    #[test]
    fn test_resolve_reversed_arc() {
        let mut shape = Shape::new();
        let e = shape.add_edge(Box::new(ArcCurve::new(Point2::origin(), 1.0, 0.0, PI / 2.0, false)), "a");
        let fwd = shape.add_coedge(e, false, "").unwrap();
        let rev = shape.add_coedge(e, true, "").unwrap();

        let f = shape.resolve(fwd).unwrap();
        let r = shape.resolve(rev).unwrap();
        assert!((r.start_point() - f.end_point()).norm() < 1e-12);
        assert!((r.end_point() - f.start_point()).norm() < 1e-12);
        assert!(r.reversed().approx_eq(&f, &Tolerance::DEFAULT));
    }

    #[test]
    fn test_exclusion_preserves_order() {
        let mut shape = Shape::new();
        let (w, edges) = square(&mut shape);
        let excluded = HashSet::from([edges[1]]);
        let topos: Vec<String> = shape
            .to_builder_curves(w, &excluded)
            .unwrap()
            .into_iter()
            .map(|b| b.topo)
            .collect();
        assert_eq!(topos, ["bottom", "top", "left"]);

        let all: Vec<String> = shape
            .to_builder_curves(w, &HashSet::new())
            .unwrap()
            .into_iter()
            .map(|b| b.topo)
            .collect();
        assert_eq!(all, ["bottom", "right", "top", "left"]);
    }

    #[test]
    fn test_math_loop_size_and_closure() {
        let mut shape = Shape::new();
        let (w, _) = square(&mut shape);
        let lp = shape.to_math_loop(w).unwrap();
        assert_eq!(lp.len(), 4);
        assert!(lp.is_closed(&Tolerance::DEFAULT));
        assert_relative_eq!(lp.signed_area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_wire() {
        let mut shape = Shape::new();
        let w = shape.add_wire(&[]).unwrap();
        assert!(shape.to_builder_curves(w, &HashSet::new()).unwrap().is_empty());
        assert!(shape.to_math_loop(w).unwrap().is_empty());
    }

    #[test]
    fn test_dangling_coedge_reported() {
        let mut shape = Shape::new();
        let (w, _) = square(&mut shape);
        let stale = shape.wire(w).unwrap().coedges[2];
        shape.coedges.remove(stale);
        assert_eq!(shape.to_math_loop(w).unwrap_err(), TopoError::MissingCoedge(stale));

        let bogus = shape.wires.insert(Default::default());
        shape.wires.remove(bogus);
        assert_eq!(
            shape.to_builder_curves(bogus, &HashSet::new()).unwrap_err(),
            TopoError::MissingWire(bogus)
        );
    }

    #[test]
    fn test_infer_orientation() {
        let mut shape = Shape::new();
        // Triangle with the first and last curves stored backwards.
        let curves = [
            line(1.0, 0.0, 0.0, 0.0),
            line(1.0, 0.0, 0.0, 1.0),
            line(0.0, 0.0, 0.0, 1.0),
        ];
        let mut coedges = Vec::new();
        for (i, curve) in curves.into_iter().enumerate() {
            let e = shape.add_edge(curve, format!("e{i}"));
            coedges.push(shape.add_coedge(e, false, "").unwrap());
        }
        let w = shape.add_wire(&coedges).unwrap();
        assert!(!shape.to_math_loop(w).unwrap().is_closed(&Tolerance::DEFAULT));

        shape.infer_orientation(w, &Tolerance::DEFAULT).unwrap();
        let flags: Vec<bool> = coedges.iter().map(|&c| shape.coedge(c).unwrap().is_reversed).collect();
        assert_eq!(flags, [true, false, true]);
        assert!(shape.to_math_loop(w).unwrap().is_closed(&Tolerance::DEFAULT));
    }
}
