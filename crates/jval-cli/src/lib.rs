use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use jval_validator::{Options, Validator};
use serde_json::Value;

pub use crate::args::{AppArgs, Colors};

pub mod args;
pub mod log;

/// Runs one validation: load both documents, build the schema, walk the
/// instance and print every violation to stdout.
pub fn execute(args: AppArgs) -> Result<(), anyhow::Error> {
    let schema_doc = load_json(&args.schema)?;
    let instance = load_json(&args.input)?;

    let validator = Validator::with_options(
        &schema_doc,
        Options {
            max_depth: args.max_depth,
        },
    )
    .map_err(|error| anyhow!("{} at `{}`", error, error.keys()))
    .with_context(|| format!("invalid schema `{}`", args.schema.display()))?;

    tracing::debug!(
        schema = %args.schema.display(),
        input = %args.input.display(),
        "validating"
    );

    let report = validator.validate(&instance);
    for violation in &report.violations {
        println!("{violation}");
    }

    if report.valid {
        tracing::info!(input = %args.input.display(), "the document is valid");
        Ok(())
    } else {
        Err(anyhow!(
            "`{}` has {} violations",
            args.input.display(),
            report.violations.len()
        ))
    }
}

fn load_json(path: &Path) -> Result<Value, anyhow::Error> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("failed to parse `{}`", path.display()))
}
