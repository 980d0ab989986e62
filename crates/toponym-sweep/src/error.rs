//! Error types for the sweep namer.

use thiserror::Error;
use toponym_topo::TopoError;

/// Errors raised while naming sweep topology.
///
/// The namer itself recovers from all of these; they surface through logs
/// and through [`NamingReport::ensure_unique`](crate::NamingReport::ensure_unique).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// A composed name was already assigned in the current pass.
    #[error("duplicate topology name `{name}` (committed as `{committed}`)")]
    DuplicateTopoName {
        /// The name as composed.
        name: String,
        /// The disambiguated name actually committed.
        committed: String,
    },

    /// A face, wire, coedge or edge id did not resolve.
    #[error(transparent)]
    Topo(#[from] TopoError),
}

/// Result alias for naming operations.
pub type NamingResult<T> = Result<T, NamingError>;
