//! Outcome of a naming pass.

use crate::error::{NamingError, NamingResult};

/// A composed name that collided and the name committed instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Name as composed.
    pub raw: String,
    /// Name after disambiguation.
    pub committed: String,
}

/// Counts and collisions from one `reconstruct_brep_names` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingReport {
    /// Faces that received a name.
    pub faces_named: usize,
    /// Edges that received a name.
    pub edges_named: usize,
    /// Coedges that received a name.
    pub coedges_named: usize,
    /// Every collision, in the order it happened.
    pub collisions: Vec<Collision>,
}

impl NamingReport {
    /// Whether any composed name had to be disambiguated.
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Fail with the first collision, for callers that treat one as fatal.
    pub fn ensure_unique(&self) -> NamingResult<()> {
        match self.collisions.first() {
            None => Ok(()),
            Some(c) => Err(NamingError::DuplicateTopoName {
                name: c.raw.clone(),
                committed: c.committed.clone(),
            }),
        }
    }
}
