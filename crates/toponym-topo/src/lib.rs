#![warn(missing_docs)]

//! Topology store for the toponym core.
//!
//! A [`Shape`] owns edges, coedges, wires and faces in slotmap arenas and
//! hands out typed ids. Edges own their document curve; coedges are
//! directed uses of an edge inside one wire; wires bound faces. Nothing
//! here holds references into another entity, only ids, so entities can be
//! renamed in place without ownership cycles.

mod builder;
mod error;
mod record;

use std::collections::HashMap;

use slotmap::SlotMap;
use toponym_curve::Curve;

pub use builder::BuilderCurve;
pub use error::{TopoError, TopoResult};
pub use record::{CoedgeRecord, WireRecord};

slotmap::new_key_type! {
    /// Unique identifier for an edge.
    pub struct EdgeId;
}

slotmap::new_key_type! {
    /// Unique identifier for a coedge.
    pub struct CoedgeId;
}

slotmap::new_key_type! {
    /// Unique identifier for a wire.
    pub struct WireId;
}

slotmap::new_key_type! {
    /// Unique identifier for a face.
    pub struct FaceId;
}

/// An edge: one document curve shared by the coedges that use it.
#[derive(Debug, Clone)]
pub struct Edge {
    /// The underlying curve, in its own direction.
    pub curve: Box<dyn Curve>,
    /// Caller-assigned tag, used by wire records to refer to the edge.
    pub tag: String,
    /// Topology name assigned by a naming pass.
    pub topo_name: Option<String>,
    /// Coedges using this edge (back references only).
    pub coedges: Vec<CoedgeId>,
}

/// A directed use of an edge within a wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coedge {
    /// The edge being used.
    pub edge: EdgeId,
    /// Whether the wire traverses the edge against its curve direction.
    pub is_reversed: bool,
    /// Topology name carried into builder curves.
    pub topo_name: String,
    /// Owning wire, once the coedge has been placed in one.
    pub wire: Option<WireId>,
}

/// An ordered chain of coedges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wire {
    /// Coedges in traversal order, as given by the caller.
    pub coedges: Vec<CoedgeId>,
    /// Face bounded by this wire, if any.
    pub face: Option<FaceId>,
}

/// A face bounded by one or more wires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Face {
    /// Topology name assigned by a naming pass.
    pub topo_name: Option<String>,
    /// Index of the path segment that generated this face.
    pub face_index_in_path: Option<usize>,
    /// Bounding wires, outer first.
    pub wires: Vec<WireId>,
}

/// Arena-backed store of topology entities.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    /// All edges.
    pub edges: SlotMap<EdgeId, Edge>,
    /// All coedges.
    pub coedges: SlotMap<CoedgeId, Coedge>,
    /// All wires.
    pub wires: SlotMap<WireId, Wire>,
    /// All faces.
    pub faces: SlotMap<FaceId, Face>,
    /// Root tag of the shape (the id of the geometry that produced it).
    pub tag: Option<String>,
}

impl Shape {
    /// Create an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge owning `curve`.
    pub fn add_edge(&mut self, curve: Box<dyn Curve>, tag: impl Into<String>) -> EdgeId {
        self.edges.insert(Edge {
            curve,
            tag: tag.into(),
            topo_name: None,
            coedges: Vec::new(),
        })
    }

    /// Add a coedge over `edge`, not yet placed in a wire.
    pub fn add_coedge(
        &mut self,
        edge: EdgeId,
        is_reversed: bool,
        topo_name: impl Into<String>,
    ) -> TopoResult<CoedgeId> {
        if !self.edges.contains_key(edge) {
            return Err(TopoError::MissingEdge(edge));
        }
        let id = self.coedges.insert(Coedge {
            edge,
            is_reversed,
            topo_name: topo_name.into(),
            wire: None,
        });
        self.edges[edge].coedges.push(id);
        Ok(id)
    }

    /// Add a wire from coedges in traversal order.
    pub fn add_wire(&mut self, coedges: &[CoedgeId]) -> TopoResult<WireId> {
        if let Some(&missing) = coedges.iter().find(|&&c| !self.coedges.contains_key(c)) {
            return Err(TopoError::MissingCoedge(missing));
        }
        let wire = self.wires.insert(Wire {
            coedges: coedges.to_vec(),
            face: None,
        });
        for &c in coedges {
            self.coedges[c].wire = Some(wire);
        }
        Ok(wire)
    }

    /// Add a face bounded by `wires`.
    pub fn add_face(&mut self, wires: &[WireId]) -> TopoResult<FaceId> {
        if let Some(&missing) = wires.iter().find(|&&w| !self.wires.contains_key(w)) {
            return Err(TopoError::MissingWire(missing));
        }
        let face = self.faces.insert(Face {
            wires: wires.to_vec(),
            ..Face::default()
        });
        for &w in wires {
            self.wires[w].face = Some(face);
        }
        Ok(face)
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> TopoResult<&Edge> {
        self.edges.get(id).ok_or(TopoError::MissingEdge(id))
    }

    /// Look up an edge mutably.
    pub fn edge_mut(&mut self, id: EdgeId) -> TopoResult<&mut Edge> {
        self.edges.get_mut(id).ok_or(TopoError::MissingEdge(id))
    }

    /// Look up a coedge.
    pub fn coedge(&self, id: CoedgeId) -> TopoResult<&Coedge> {
        self.coedges.get(id).ok_or(TopoError::MissingCoedge(id))
    }

    /// Look up a coedge mutably.
    pub fn coedge_mut(&mut self, id: CoedgeId) -> TopoResult<&mut Coedge> {
        self.coedges.get_mut(id).ok_or(TopoError::MissingCoedge(id))
    }

    /// Look up a wire.
    pub fn wire(&self, id: WireId) -> TopoResult<&Wire> {
        self.wires.get(id).ok_or(TopoError::MissingWire(id))
    }

    /// Look up a face.
    pub fn face(&self, id: FaceId) -> TopoResult<&Face> {
        self.faces.get(id).ok_or(TopoError::MissingFace(id))
    }

    /// Look up a face mutably.
    pub fn face_mut(&mut self, id: FaceId) -> TopoResult<&mut Face> {
        self.faces.get_mut(id).ok_or(TopoError::MissingFace(id))
    }

    /// Find the first edge carrying `tag`.
    pub fn edge_by_tag(&self, tag: &str) -> Option<EdgeId> {
        self.edges
            .iter()
            .find(|(_, e)| e.tag == tag)
            .map(|(id, _)| id)
    }

    /// Map of edge tag to edge id, for resolving wire records.
    ///
    /// When several edges share a tag the last one inserted wins.
    pub fn edge_tags(&self) -> HashMap<String, EdgeId> {
        self.edges.iter().map(|(id, e)| (e.tag.clone(), id)).collect()
    }

    /// Faces bounded by a wire that uses `edge`, in coedge order, without repeats.
    pub fn edge_faces(&self, edge: EdgeId) -> TopoResult<Vec<FaceId>> {
        let mut faces = Vec::new();
        for &c in &self.edge(edge)?.coedges {
            let face = self
                .coedge(c)?
                .wire
                .and_then(|w| self.wires.get(w))
                .and_then(|w| w.face);
            if let Some(face) = face {
                if !faces.contains(&face) {
                    faces.push(face);
                }
            }
        }
        Ok(faces)
    }

    /// Edges of a face in wire/coedge order, without repeats.
    pub fn face_edges(&self, face: FaceId) -> TopoResult<Vec<EdgeId>> {
        let mut edges = Vec::new();
        for &w in &self.face(face)?.wires {
            for &c in &self.wire(w)?.coedges {
                let edge = self.coedge(c)?.edge;
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        Ok(edges)
    }
}
