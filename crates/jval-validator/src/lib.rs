//! A JSON Schema validation engine over `serde_json::Value`.
//!
//! The engine walks an instance document in lockstep with a pre-built
//! [`Schema`] tree and collects every violation it finds; it never stops
//! at the first failure. Build a [`Validator`] once to check many
//! instances against one schema, or use the one-shot [`validate`].
//!
//! ```
//! use serde_json::json;
//!
//! let schema = json!({ "type": "integer", "minimum": 5 });
//! let report = jval_validator::validate(&json!(3), &schema).unwrap();
//! assert!(!report.valid);
//! assert_eq!(report.violations[0].keyword(), "minimum");
//! ```

mod report;
mod validates;

use serde_json::Value;

pub use jval_schema::{KeyOrIndex, Keys, Schema, SchemaError, SchemaType};
pub use report::ValidationReport;
pub use validates::{Violation, ViolationKind};

use report::Collector;
use validates::Context;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Engine knobs. `max_depth` bounds the walk so that a self-referencing
/// schema cannot recurse without limit; once exceeded, descent stops and
/// a single `maxDepth` violation is reported.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A schema compiled for repeated use.
///
/// The schema tree is immutable after construction, so a `Validator` can
/// be shared across threads and used for concurrent validation calls.
#[derive(Debug)]
pub struct Validator {
    schema: Schema,
    options: Options,
}

impl Validator {
    pub fn new(schema: &Value) -> Result<Self, SchemaError> {
        Self::with_options(schema, Options::default())
    }

    pub fn with_options(schema: &Value, options: Options) -> Result<Self, SchemaError> {
        Ok(Self {
            schema: Schema::try_from(schema)?,
            options,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Walks the whole instance and returns every violation found, in
    /// depth-first, left-to-right order. Malformed instances never fail
    /// the call itself; they simply fail individual checks.
    pub fn validate(&self, instance: &Value) -> ValidationReport {
        let ctx = Context {
            root: &self.schema,
            max_depth: self.options.max_depth,
        };
        let mut collector = Collector::default();
        validates::validate(&ctx, &self.schema, &Keys::default(), instance, &mut collector);
        collector.into_report()
    }
}

/// One-shot validation of an instance document against a schema document.
///
/// Fails only when the schema itself cannot be built.
pub fn validate(instance: &Value, schema: &Value) -> Result<ValidationReport, SchemaError> {
    Ok(Validator::new(schema)?.validate(instance))
}
