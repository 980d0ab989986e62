#![warn(missing_docs)]

//! Stable topology names for swept faces.
//!
//! A sweep (molding, light band) moves a 2D profile along a 3D path. Each
//! profile curve sweeps one face per path segment. [`TopoNamer`] gives
//! every such face a name built from the profile curve's id and the path
//! segment's tag, so the same inputs always produce the same names and
//! higher layers (materials, selections) can re-bind after regeneration.
//!
//! The sweep engine that builds the faces is not part of this crate; it is
//! consumed through the [`SweepGeometry`] trait and a [`CurveSweepFaces`]
//! map from profile curve id to generated faces.

mod cache;
mod config;
mod error;
mod namer;
mod report;

use std::collections::HashMap;

use toponym_curve::Curve;
use toponym_geom::Curve3d;
use toponym_topo::FaceId;

pub use cache::TopoNameCache;
pub use config::NamerConfig;
pub use error::{NamingError, NamingResult};
pub use namer::{compose_face_name, TopoNamer};
pub use report::{Collision, NamingReport};

/// Generated faces per profile curve id.
///
/// Entry `i` of a vector is the face swept along path segment `i`; `None`
/// marks a segment for which no face was generated.
pub type CurveSweepFaces = HashMap<String, Vec<Option<FaceId>>>;

/// One segment of a sweep path.
#[derive(Debug, Clone)]
pub struct PathSegment {
    /// Segment geometry.
    pub curve: Box<dyn Curve3d>,
    /// Stable tag of the segment, e.g. the wall or corner it runs along.
    pub tag: Option<String>,
}

impl PathSegment {
    /// Create a tagged segment.
    pub fn new(curve: impl Curve3d + 'static, tag: impl Into<String>) -> Self {
        Self {
            curve: Box::new(curve),
            tag: Some(tag.into()),
        }
    }

    /// Create a segment without a tag.
    pub fn untagged(curve: impl Curve3d + 'static) -> Self {
        Self {
            curve: Box::new(curve),
            tag: None,
        }
    }
}

/// What the namer needs to know about a sweep.
pub trait SweepGeometry {
    /// Id of the entity owning the sweep.
    fn id(&self) -> &str;

    /// Path segments in order.
    fn sweep_path_3d(&self) -> &[PathSegment];

    /// Profile curves in order. Their ids key the [`CurveSweepFaces`] map.
    fn sweep_profile(&self) -> &[Box<dyn Curve>];
}

/// A plain sweep description: owner id, path and profile.
#[derive(Debug, Clone)]
pub struct SweptProfile {
    /// Owner id.
    pub id: String,
    /// Path segments.
    pub path: Vec<PathSegment>,
    /// Profile curves.
    pub profile: Vec<Box<dyn Curve>>,
}

impl SweptProfile {
    /// Create a sweep description.
    pub fn new(id: impl Into<String>, path: Vec<PathSegment>, profile: Vec<Box<dyn Curve>>) -> Self {
        Self {
            id: id.into(),
            path,
            profile,
        }
    }
}

impl SweepGeometry for SweptProfile {
    fn id(&self) -> &str {
        &self.id
    }

    fn sweep_path_3d(&self) -> &[PathSegment] {
        &self.path
    }

    fn sweep_profile(&self) -> &[Box<dyn Curve>] {
        &self.profile
    }
}
