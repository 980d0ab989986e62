//! Error types for topology lookups.

use thiserror::Error;

use crate::{CoedgeId, EdgeId, FaceId, WireId};

/// Errors raised when a topology id does not resolve.
///
/// A stale id is a caller bug, not a geometric condition, so these are
/// never silently skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopoError {
    /// The wire id is not in the shape.
    #[error("wire {0:?} not found")]
    MissingWire(WireId),

    /// The coedge id is not in the shape.
    #[error("coedge {0:?} not found")]
    MissingCoedge(CoedgeId),

    /// The edge id is not in the shape.
    #[error("edge {0:?} not found")]
    MissingEdge(EdgeId),

    /// The face id is not in the shape.
    #[error("face {0:?} not found")]
    MissingFace(FaceId),

    /// A wire record names an edge tag with no matching edge.
    #[error("no edge tagged `{0}`")]
    UnknownEdgeTag(String),

    /// A wire record could not be (de)serialized.
    #[error("wire record JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for TopoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result alias for topology operations.
pub type TopoResult<T> = Result<T, TopoError>;
