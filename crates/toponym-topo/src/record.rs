//! Persisted form of a wire.
//!
//! Edges are referenced by tag so a wire record stays valid across
//! sessions, where slotmap ids do not.

use serde::{Deserialize, Serialize};

use crate::error::{TopoError, TopoResult};
use crate::{EdgeId, Shape, WireId};

fn is_false(b: &bool) -> bool {
    !*b
}

/// One coedge of a [`WireRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoedgeRecord {
    /// Tag of the edge used.
    pub edge: String,
    /// Reversal flag, omitted when false.
    #[serde(default, skip_serializing_if = "is_false")]
    pub reversed: bool,
    /// Topology name of the coedge.
    #[serde(default)]
    pub topo: String,
}

/// A wire as an ordered list of coedge records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    /// Coedges in traversal order.
    pub coedges: Vec<CoedgeRecord>,
}

impl WireRecord {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> TopoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> TopoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Shape {
    /// Dump a wire, naming edges by tag.
    pub fn dump_wire(&self, wire: WireId) -> TopoResult<WireRecord> {
        let mut coedges = Vec::new();
        for &id in &self.wire(wire)?.coedges {
            let coedge = self.coedge(id)?;
            coedges.push(CoedgeRecord {
                edge: self.edge(coedge.edge)?.tag.clone(),
                reversed: coedge.is_reversed,
                topo: coedge.topo_name.clone(),
            });
        }
        Ok(WireRecord { coedges })
    }

    /// Recreate a wire from a record, resolving edge tags through `edge_lookup`.
    ///
    /// Nothing is added to the shape unless every tag resolves.
    pub fn load_wire<F>(&mut self, record: &WireRecord, edge_lookup: F) -> TopoResult<WireId>
    where
        F: Fn(&str) -> Option<EdgeId>,
    {
        let edges = record
            .coedges
            .iter()
            .map(|c| {
                edge_lookup(&c.edge)
                    .filter(|&e| self.edges.contains_key(e))
                    .ok_or_else(|| TopoError::UnknownEdgeTag(c.edge.clone()))
            })
            .collect::<TopoResult<Vec<_>>>()?;

        let mut coedges = Vec::with_capacity(edges.len());
        for (edge, rec) in edges.into_iter().zip(&record.coedges) {
            coedges.push(self.add_coedge(edge, rec.reversed, rec.topo.clone())?);
        }
        self.add_wire(&coedges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;
    use toponym_curve::{Curve, LineCurve};
    use toponym_math::Point2;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Box<dyn Curve> {
        Box::new(LineCurve::new(Point2::new(x0, y0), Point2::new(x1, y1)))
    }

    fn two_edge_shape() -> (Shape, WireId) {
        let mut shape = Shape::new();
        let e1 = shape.add_edge(line(0.0, 0.0, 1.0, 0.0), "E1");
        let e2 = shape.add_edge(line(1.0, 0.0, 0.0, 0.0), "E2");
        let c1 = shape.add_coedge(e1, false, "top").unwrap();
        let c2 = shape.add_coedge(e2, true, "bottom").unwrap();
        let w = shape.add_wire(&[c1, c2]).unwrap();
        (shape, w)
    }

    #[test]
    fn test_dump_wire_shape() {
        let (shape, w) = two_edge_shape();
        let record = shape.dump_wire(w).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"coedges": [
                {"edge": "E1", "topo": "top"},
                {"edge": "E2", "reversed": true, "topo": "bottom"}
            ]})
        );
    }

    #[test]
    fn test_load_wire_reproduces_builder_curves() {
        let (mut shape, w) = two_edge_shape();
        let text = shape.dump_wire(w).unwrap().to_json().unwrap();
        let record = WireRecord::from_json(&text).unwrap();

        let tags = shape.edge_tags();
        let copy = shape.load_wire(&record, |tag| tags.get(tag).copied()).unwrap();
        let none = HashSet::new();
        assert_eq!(
            shape.to_builder_curves(copy, &none).unwrap(),
            shape.to_builder_curves(w, &none).unwrap()
        );
    }

    #[test]
    fn test_unknown_tag_adds_nothing() {
        let (mut shape, _) = two_edge_shape();
        let record = WireRecord {
            coedges: vec![
                CoedgeRecord {
                    edge: "E1".into(),
                    reversed: false,
                    topo: String::new(),
                },
                CoedgeRecord {
                    edge: "E9".into(),
                    reversed: false,
                    topo: String::new(),
                },
            ],
        };
        let before = (shape.coedges.len(), shape.wires.len());
        let tags = shape.edge_tags();
        let err = shape.load_wire(&record, |tag| tags.get(tag).copied()).unwrap_err();
        assert_eq!(err, TopoError::UnknownEdgeTag("E9".into()));
        assert_eq!((shape.coedges.len(), shape.wires.len()), before);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record = WireRecord::from_json(r#"{"coedges":[{"edge":"E1"}]}"#).unwrap();
        assert!(!record.coedges[0].reversed);
        assert!(record.coedges[0].topo.is_empty());
    }
}
