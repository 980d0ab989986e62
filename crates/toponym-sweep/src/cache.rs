//! Per-pass record of assigned names.

use std::collections::HashSet;

use tracing::warn;

/// Names assigned during one naming pass, in assignment order.
///
/// A cache lives for exactly one `reconstruct_brep_names` call.
#[derive(Debug, Default)]
pub struct TopoNameCache {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl TopoNameCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name` for this pass.
    ///
    /// Returns `false` (and logs `DuplicateTopoName`) if it was already taken.
    pub fn check_topo_name(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            warn!(name = %name, "DuplicateTopoName: name already assigned in this pass");
            return false;
        }
        self.insert(name.to_string());
        true
    }

    /// Whether `name` is taken, without logging.
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub(crate) fn insert(&mut self, name: String) {
        if self.seen.insert(name.clone()) {
            self.order.push(name);
        }
    }

    /// Assigned names in order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Number of assigned names.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no name has been assigned.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
