//! Legacy class-name aliases.
//!
//! Older documents spell class tags out in full (`ArcCurve`); current ones
//! use the short form (`Arc`). Both must load to the same type.

use std::collections::{BTreeMap, HashMap};

/// Bidirectional long ↔ short class tag table.
#[derive(Debug, Clone, Default)]
pub struct ClassAliases {
    long_to_short: HashMap<String, String>,
    short_to_long: HashMap<String, String>,
}

impl ClassAliases {
    /// Empty table: every tag resolves to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default table for the built-in curve classes.
    pub fn builtin() -> Self {
        let mut aliases = Self::new();
        aliases.insert("LineCurve", "Line");
        aliases.insert("ArcCurve", "Arc");
        aliases.insert("CircleCurve", "Circle");
        aliases
    }

    /// Add (or replace) an alias pair.
    pub fn insert(&mut self, long: impl Into<String>, short: impl Into<String>) {
        let long = long.into();
        let short = short.into();
        if let Some(old_short) = self.long_to_short.insert(long.clone(), short.clone()) {
            if old_short != short {
                self.short_to_long.remove(&old_short);
            }
        }
        self.short_to_long.insert(short, long);
    }

    /// Resolve a tag to its short form. Unknown tags pass through unchanged.
    pub fn resolve<'a>(&'a self, tag: &'a str) -> &'a str {
        self.long_to_short.get(tag).map(String::as_str).unwrap_or(tag)
    }

    /// The long form of a short tag, if one is registered.
    pub fn long_name(&self, short: &str) -> Option<&str> {
        self.short_to_long.get(short).map(String::as_str)
    }

    /// Number of alias pairs.
    pub fn len(&self) -> usize {
        self.long_to_short.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.long_to_short.is_empty()
    }

    /// Merge another table into this one; entries in `other` win.
    pub fn extend(&mut self, other: &ClassAliases) {
        for (long, short) in &other.long_to_short {
            self.insert(long.clone(), short.clone());
        }
    }
}

impl From<BTreeMap<String, String>> for ClassAliases {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut aliases = Self::new();
        for (long, short) in map {
            aliases.insert(long, short);
        }
        aliases
    }
}
