//! Serialized curve records and the contexts threaded through dump/load.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use toponym_math::Point2;

use crate::error::{CurveError, CurveResult};

/// Record key holding the curve's stable id when metadata is dumped.
pub const ID_FIELD: &str = "id";

/// A dumped curve: its class tag plus a curve-specific payload.
///
/// The payload is kept as loose JSON fields; only the concrete curve type
/// knows what they mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    /// Class tag (short tag or a long alias).
    #[serde(rename = "Class")]
    pub class_tag: String,
    /// Curve-specific fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CurveRecord {
    /// Create an empty record for a class tag.
    pub fn new(class_tag: impl Into<String>) -> Self {
        Self {
            class_tag: class_tag.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> CurveResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Deserialize from a JSON value.
    pub fn from_value(value: Value) -> CurveResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> CurveResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> CurveResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The stable curve id, if the record carries metadata.
    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Read an optional number. A present non-number is an error.
    pub fn f64_field(&self, key: &str) -> CurveResult<Option<f64>> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| CurveError::malformed(&self.class_tag, key, "is not a number")),
        }
    }

    /// Read an optional boolean. A present non-boolean is an error.
    pub fn bool_field(&self, key: &str) -> CurveResult<Option<bool>> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_bool()
                .map(Some)
                .ok_or_else(|| CurveError::malformed(&self.class_tag, key, "is not a boolean")),
        }
    }

    /// Read an optional `[x, y]` point.
    pub fn point_field(&self, key: &str) -> CurveResult<Option<Point2>> {
        let Some(v) = self.fields.get(key) else {
            return Ok(None);
        };
        if v.is_null() {
            return Ok(None);
        }
        let coords = v
            .as_array()
            .filter(|a| a.len() == 2)
            .and_then(|a| Some((a[0].as_f64()?, a[1].as_f64()?)));
        match coords {
            Some((x, y)) => Ok(Some(Point2::new(x, y))),
            None => Err(CurveError::malformed(
                &self.class_tag,
                key,
                "is not an [x, y] pair",
            )),
        }
    }
}

/// Encode a point as an `[x, y]` JSON array.
pub fn point_value(p: &Point2) -> Value {
    Value::from(vec![p.x, p.y])
}

/// Options controlling how a curve is dumped.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Write the long (human-readable) alias instead of the short tag.
    pub long_class_names: bool,
}

/// State shared across the dumps of one document.
#[derive(Debug, Default)]
pub struct DumpContext {
    dumped_ids: Vec<String>,
}

impl DumpContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, id: &str) {
        if !id.is_empty() {
            self.dumped_ids.push(id.to_string());
        }
    }

    /// Ids of dumped curves, in dump order.
    pub fn dumped_ids(&self) -> &[String] {
        &self.dumped_ids
    }

    /// How many times a curve id has been dumped in this context.
    pub fn times_dumped(&self, id: &str) -> usize {
        self.dumped_ids.iter().filter(|d| d.as_str() == id).count()
    }
}

/// State shared across the loads of one document.
#[derive(Debug, Default, Clone)]
pub struct LoadContext {
    id_remap: HashMap<String, String>,
}

impl LoadContext {
    /// Create a context that keeps ids as stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that renames stored ids, e.g. when pasting a copy
    /// of a document fragment next to the original.
    pub fn with_id_remap(id_remap: HashMap<String, String>) -> Self {
        Self { id_remap }
    }

    /// Map a stored id to the id the loaded curve should carry.
    pub fn remap_id(&self, id: &str) -> String {
        self.id_remap
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}
