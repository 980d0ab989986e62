//! Class-tag registry: builds curves from records and dumps them back.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::alias::ClassAliases;
use crate::curves::{ArcCurve, CircleCurve, Curve, LineCurve};
use crate::error::{CurveError, CurveResult};
use crate::record::{CurveRecord, DumpContext, DumpOptions, LoadContext, ID_FIELD};

/// Produces a blank curve instance for a class tag.
pub trait CurveFactory: Send + Sync {
    /// Create a curve with default payload.
    fn create(&self) -> Box<dyn Curve>;
}

impl<F> CurveFactory for F
where
    F: Fn() -> Box<dyn Curve> + Send + Sync,
{
    fn create(&self) -> Box<dyn Curve> {
        self()
    }
}

/// Maps class tags to curve factories.
///
/// Built once at startup and only read while documents load.
#[derive(Default)]
pub struct CurveRegistry {
    factories: HashMap<String, Box<dyn CurveFactory>>,
    aliases: ClassAliases,
}

impl fmt::Debug for CurveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("CurveRegistry")
            .field("tags", &tags)
            .field("aliases", &self.aliases)
            .finish()
    }
}

impl CurveRegistry {
    /// Create an empty registry with no aliases.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the line, arc and circle classes and their long aliases.
    pub fn with_builtin_curves() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
            aliases: ClassAliases::builtin(),
        };
        registry.register_class(LineCurve::CLASS, || {
            Box::new(LineCurve::default()) as Box<dyn Curve>
        });
        registry.register_class(ArcCurve::CLASS, || {
            Box::new(ArcCurve::default()) as Box<dyn Curve>
        });
        registry.register_class(CircleCurve::CLASS, || {
            Box::new(CircleCurve::default()) as Box<dyn Curve>
        });
        registry
    }

    /// Register a factory under a class tag. The last registration wins.
    pub fn register_class(&mut self, tag: impl Into<String>, factory: impl CurveFactory + 'static) {
        let tag = tag.into();
        if self.factories.insert(tag.clone(), Box::new(factory)).is_some() {
            debug!(tag = %tag, "replaced curve class registration");
        }
    }

    /// Check whether a tag (or its long alias) has a factory.
    pub fn is_registered(&self, tag: &str) -> bool {
        self.factory(tag).is_some()
    }

    /// The alias table.
    pub fn aliases(&self) -> &ClassAliases {
        &self.aliases
    }

    /// Mutable access to the alias table.
    pub fn aliases_mut(&mut self) -> &mut ClassAliases {
        &mut self.aliases
    }

    fn factory(&self, tag: &str) -> Option<(&str, &dyn CurveFactory)> {
        let resolved = self.aliases.resolve(tag);
        self.factories
            .get_key_value(resolved)
            .or_else(|| self.factories.get_key_value(tag))
            .map(|(k, f)| (k.as_str(), f.as_ref()))
    }

    /// Create a blank curve for a tag, stamped with the registered tag.
    pub fn instantiate(&self, tag: &str) -> Option<Box<dyn Curve>> {
        let (registered, factory) = self.factory(tag)?;
        let mut curve = factory.create();
        curve.meta_mut().class_tag = registered.to_string();
        Some(curve)
    }

    /// Dump a curve to a record.
    ///
    /// With `include_metadata` the curve id is written under `id`.
    pub fn dump(
        &self,
        curve: &dyn Curve,
        ctx: &mut DumpContext,
        include_metadata: bool,
        options: &DumpOptions,
    ) -> CurveRecord {
        let tag = curve.class_tag();
        let class_tag = if options.long_class_names {
            self.aliases.long_name(tag).unwrap_or(tag)
        } else {
            tag
        };
        let mut record = CurveRecord::new(class_tag);
        curve.dump_payload(&mut record.fields);
        if include_metadata && !curve.id().is_empty() {
            record
                .fields
                .insert(ID_FIELD.to_string(), curve.id().to_string().into());
        }
        ctx.record(curve.id());
        record
    }

    /// Load a record into an existing curve.
    ///
    /// A stored id replaces the curve's id (after remapping through `ctx`).
    pub fn load(&self, curve: &mut dyn Curve, record: &CurveRecord, ctx: &LoadContext) -> CurveResult<()> {
        curve.load(record, ctx)?;
        if let Some(id) = record.id() {
            curve.set_id(ctx.remap_id(id));
        }
        Ok(())
    }

    /// Build a curve from a record, reporting why it could not be built.
    ///
    /// A missing record is `Ok(None)`; an unknown class is
    /// [`CurveError::UnknownCurveType`].
    pub fn try_build_from_dump(
        &self,
        record: Option<&CurveRecord>,
        ctx: &LoadContext,
    ) -> CurveResult<Option<Box<dyn Curve>>> {
        let Some(record) = record else {
            return Ok(None);
        };
        let mut curve = self
            .instantiate(&record.class_tag)
            .ok_or_else(|| CurveError::UnknownCurveType(record.class_tag.clone()))?;
        self.load(curve.as_mut(), record, ctx)?;
        Ok(Some(curve))
    }

    /// Build a curve from a record.
    ///
    /// Unknown classes and malformed payloads are logged and yield `None`.
    pub fn build_from_dump(&self, record: Option<&CurveRecord>, ctx: &LoadContext) -> Option<Box<dyn Curve>> {
        match self.try_build_from_dump(record, ctx) {
            Ok(curve) => curve,
            Err(err @ CurveError::UnknownCurveType(_)) => {
                warn!(error = %err, "UnknownCurveType: skipping curve record");
                None
            }
            Err(err) => {
                warn!(error = %err, "failed to load curve record");
                None
            }
        }
    }
}
