//! The sweep topology namer.

use std::collections::{HashMap, HashSet};

use toponym_curve::Curve;
use toponym_topo::{CoedgeId, EdgeId, FaceId, Shape};
use tracing::{debug, warn};

use crate::cache::TopoNameCache;
use crate::config::NamerConfig;
use crate::error::NamingResult;
use crate::report::{Collision, NamingReport};
use crate::{CurveSweepFaces, SweepGeometry};

/// Compose the name of a swept face.
///
/// `"{curve_id}-{path_tag}"`, with an empty tag for untagged segments and
/// an `"{owner}/"` prefix when an owner is given.
pub fn compose_face_name(owner: Option<&str>, curve_id: &str, path_tag: Option<&str>) -> String {
    let tag = path_tag.unwrap_or("");
    match owner {
        Some(owner) => format!("{owner}/{curve_id}-{tag}"),
        None => format!("{curve_id}-{tag}"),
    }
}

/// Claim `raw`, or a disambiguated variant of it if taken.
///
/// The fallback appends `#{index}`, then `~{n}` with the smallest free `n`.
fn commit_name(cache: &mut TopoNameCache, raw: String, index: usize, report: &mut NamingReport) -> String {
    if cache.check_topo_name(&raw) {
        return raw;
    }
    let base = format!("{raw}#{index}");
    let mut candidate = base.clone();
    let mut n = 0;
    while cache.contains(&candidate) {
        n += 1;
        candidate = format!("{base}~{n}");
    }
    cache.insert(candidate.clone());
    debug!(raw = %raw, committed = %candidate, "disambiguated topology name");
    report.collisions.push(Collision {
        raw,
        committed: candidate.clone(),
    });
    candidate
}

/// Assigns topology names to the faces, edges and coedges of a swept shape.
///
/// A namer holds only configuration; every call to
/// [`reconstruct_brep_names`](Self::reconstruct_brep_names) starts from an
/// empty [`TopoNameCache`].
#[derive(Debug, Clone, Default)]
pub struct TopoNamer {
    config: NamerConfig,
}

impl TopoNamer {
    /// A namer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A namer with the given options.
    pub fn with_config(config: NamerConfig) -> Self {
        Self { config }
    }

    /// The namer's options.
    pub fn config(&self) -> &NamerConfig {
        &self.config
    }

    /// Faces generated by `curve`, paired with their path index.
    ///
    /// Holes in the map entry are dropped; the index of every remaining
    /// face is its position in the entry.
    pub fn get_curve_sweep_faces(curve: &dyn Curve, faces: &CurveSweepFaces) -> Vec<(usize, FaceId)> {
        faces
            .get(curve.id())
            .map(|entry| {
                entry
                    .iter()
                    .enumerate()
                    .filter_map(|(i, f)| f.map(|f| (i, f)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Name every face the sweep generated, then their edges and coedges.
    ///
    /// Never fails: collisions are disambiguated and reported, missing
    /// faces are skipped. The shape's root tag is set to the geometry id.
    pub fn reconstruct_brep_names(
        &self,
        shape: &mut Shape,
        geometry: &dyn SweepGeometry,
        faces: &CurveSweepFaces,
    ) -> NamingReport {
        let mut cache = TopoNameCache::new();
        let mut report = NamingReport::default();
        shape.tag = Some(geometry.id().to_string());

        let named = self.name_faces(shape, geometry, faces, &mut cache, &mut report);

        let edge_names = if self.config.name_edges {
            name_edges(shape, &named, &mut cache, &mut report)
        } else {
            HashMap::new()
        };
        if self.config.name_coedges {
            name_coedges(shape, &named, &edge_names, &mut cache, &mut report);
        }

        debug!(
            geometry = %geometry.id(),
            faces = report.faces_named,
            edges = report.edges_named,
            coedges = report.coedges_named,
            collisions = report.collisions.len(),
            "reconstructed sweep topology names"
        );
        report
    }

    fn name_faces(
        &self,
        shape: &mut Shape,
        geometry: &dyn SweepGeometry,
        faces: &CurveSweepFaces,
        cache: &mut TopoNameCache,
        report: &mut NamingReport,
    ) -> Vec<FaceId> {
        let owner = self.config.qualify_with_owner.then(|| geometry.id());
        let path = geometry.sweep_path_3d();
        let mut named = Vec::new();
        let mut seen = HashSet::new();

        for curve in geometry.sweep_profile() {
            let curve_id = curve.id();
            if curve_id.is_empty() || !faces.contains_key(curve_id) {
                debug!(curve = %curve_id, "profile curve generated no faces");
                continue;
            }
            if !seen.insert(curve_id) {
                warn!(curve = %curve_id, "repeated profile curve id, faces already named");
                continue;
            }
            for (index, face_id) in Self::get_curve_sweep_faces(curve.as_ref(), faces) {
                let Some(segment) = path.get(index) else {
                    debug!(curve = %curve_id, index, "face has no matching path segment");
                    continue;
                };
                let raw = compose_face_name(owner, curve_id, segment.tag.as_deref());
                let face = match shape.face_mut(face_id) {
                    Ok(face) => face,
                    Err(err) => {
                        warn!(error = %err, curve = %curve_id, index, "skipping stale face");
                        continue;
                    }
                };
                face.topo_name = Some(commit_name(cache, raw, index, report));
                face.face_index_in_path = Some(index);
                report.faces_named += 1;
                named.push(face_id);
            }
        }
        named
    }
}

/// Name edges after the faces of this pass they bound.
///
/// An edge between two named faces `a <= b` becomes `"{a}>{b}>{k}"`, `k`
/// being its position among the edges `a` shares with `b`. An edge with a
/// single named face `a` becomes `"{a}>{k}"`, `k` being its position in `a`.
/// A face with dangling topology is skipped.
fn name_edges(
    shape: &mut Shape,
    named: &[FaceId],
    cache: &mut TopoNameCache,
    report: &mut NamingReport,
) -> HashMap<EdgeId, String> {
    let named_set: HashSet<FaceId> = named.iter().copied().collect();
    let mut visited = HashSet::new();
    let mut raw_names = Vec::new();

    for &face in named {
        match face_edge_names(shape, face, &named_set, &visited) {
            Ok(face_names) => {
                visited.extend(face_names.iter().map(|(edge, _)| *edge));
                raw_names.extend(face_names);
            }
            Err(err) => warn!(error = %err, "skipping edges of face"),
        }
    }

    let mut names = HashMap::with_capacity(raw_names.len());
    for (edge, (raw, k)) in raw_names {
        let Ok(entry) = shape.edge_mut(edge) else {
            continue;
        };
        let name = commit_name(cache, raw, k, report);
        entry.topo_name = Some(name.clone());
        report.edges_named += 1;
        names.insert(edge, name);
    }
    names
}

/// Raw names of the edges of `face` not yet in `visited`.
fn face_edge_names(
    shape: &Shape,
    face: FaceId,
    named_set: &HashSet<FaceId>,
    visited: &HashSet<EdgeId>,
) -> NamingResult<Vec<(EdgeId, (String, usize))>> {
    let mut raw_names = Vec::new();
    for edge in shape.face_edges(face)? {
        if visited.contains(&edge) {
            continue;
        }
        let mut adjacent: Vec<(String, FaceId)> = Vec::new();
        for f in shape.edge_faces(edge)? {
            if !named_set.contains(&f) {
                continue;
            }
            if let Some(name) = &shape.face(f)?.topo_name {
                adjacent.push((name.clone(), f));
            }
        }
        adjacent.sort();

        let raw = match adjacent.as_slice() {
            [] => continue,
            [(a, fa)] => {
                let k = position(&shape.face_edges(*fa)?, edge);
                (format!("{a}>{k}"), k)
            }
            [(a, fa), (b, fb), ..] => {
                let mut shared = Vec::new();
                for e in shape.face_edges(*fa)? {
                    if shape.edge_faces(e)?.contains(fb) {
                        shared.push(e);
                    }
                }
                let k = position(&shared, edge);
                (format!("{a}>{b}>{k}"), k)
            }
        };
        raw_names.push((edge, raw));
    }
    Ok(raw_names)
}

fn position(edges: &[EdgeId], edge: EdgeId) -> usize {
    edges.iter().position(|&e| e == edge).unwrap_or(0)
}

/// Name each coedge of each named face `"{face}>{edge}"`, where the edge
/// label is its name from this pass or else its tag. A face with dangling
/// topology is skipped.
fn name_coedges(
    shape: &mut Shape,
    named: &[FaceId],
    edge_names: &HashMap<EdgeId, String>,
    cache: &mut TopoNameCache,
    report: &mut NamingReport,
) {
    let mut raw_names = Vec::new();
    for &face in named {
        match face_coedge_names(shape, face, edge_names) {
            Ok(face_names) => raw_names.extend(face_names),
            Err(err) => warn!(error = %err, "skipping coedges of face"),
        }
    }

    for (coedge, raw, k) in raw_names {
        let Ok(entry) = shape.coedge_mut(coedge) else {
            continue;
        };
        entry.topo_name = commit_name(cache, raw, k, report);
        report.coedges_named += 1;
    }
}

fn face_coedge_names(
    shape: &Shape,
    face_id: FaceId,
    edge_names: &HashMap<EdgeId, String>,
) -> NamingResult<Vec<(CoedgeId, String, usize)>> {
    let face = shape.face(face_id)?;
    let face_name = face.topo_name.clone().unwrap_or_default();
    let mut raw_names = Vec::new();
    for &wire in &face.wires {
        for &coedge in &shape.wire(wire)?.coedges {
            let edge = shape.coedge(coedge)?.edge;
            let label = match edge_names.get(&edge) {
                Some(name) => name.as_str(),
                None => shape.edge(edge)?.tag.as_str(),
            };
            let k = raw_names.len();
            raw_names.push((coedge, format!("{face_name}>{label}"), k));
        }
    }
    Ok(raw_names)
}
