#![warn(missing_docs)]

//! Document curves and their class-tagged records.
//!
//! A [`CurveRegistry`] maps class tags (`"Line"`, `"Arc"`, `"Circle"`, or
//! any tag registered at startup) to factories. Records store the tag under
//! `Class` next to the curve's own fields, so a document can be read back
//! without knowing its curve types in advance. Legacy long tags such as
//! `"ArcCurve"` resolve through [`ClassAliases`] before lookup.

mod alias;
mod curves;
mod error;
mod record;
mod registry;

pub use alias::ClassAliases;
pub use curves::{ArcCurve, CircleCurve, Curve, CurveMeta, LineCurve};
pub use error::{CurveError, CurveResult};
pub use record::{point_value, CurveRecord, DumpContext, DumpOptions, LoadContext, ID_FIELD};
pub use registry::{CurveFactory, CurveRegistry};
