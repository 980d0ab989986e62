//! Namer options.

use serde::Deserialize;

/// Options for [`TopoNamer`](crate::TopoNamer).
///
/// Deserializes from the `[naming]` table of the session config; missing
/// keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamerConfig {
    /// Prefix face names with `"{geometry id}/"` so names from different
    /// sweeps in one document cannot clash.
    pub qualify_with_owner: bool,
    /// Name edges after the faces they separate.
    pub name_edges: bool,
    /// Name coedges after their face and edge.
    pub name_coedges: bool,
}

impl Default for NamerConfig {
    fn default() -> Self {
        Self {
            qualify_with_owner: false,
            name_edges: true,
            name_coedges: true,
        }
    }
}
