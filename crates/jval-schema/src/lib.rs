//! Typed JSON Schema model for the `jval` validator.
//!
//! A schema document is parsed once into a [`Schema`] tree via
//! `Schema::try_from(&serde_json::Value)` and reused for any number of
//! validation runs. Locations inside documents are addressed with
//! [`Keys`], shared by the schema builder and the instance walker.

mod builder;
mod keys;
pub mod pattern;
mod schema;

use thiserror::Error;

pub use keys::{KeyOrIndex, Keys};
pub use schema::{BoolOrSchema, OneOrMultiTypes, Schema, SchemaType};

pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

pub const REF_PREFIX: &str = "#/$defs/";

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid json")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid schema")]
    InvalidSchema(#[from] SchemaError),
}

/// A structural problem in the schema document itself.
///
/// Fatal to the whole validation call, unlike instance violations which
/// are collected. `keys` points at the offending keyword inside the
/// schema document.
#[derive(Clone, Debug, Error)]
pub enum SchemaError {
    #[error("keyword {keyword} has unexpected type")]
    UnexpectedType { keys: Keys, keyword: &'static str },
    #[error("invalid pattern {pattern}, {error}")]
    InvalidPattern {
        keys: Keys,
        pattern: String,
        error: String,
    },
    #[error("unknown ref {name}")]
    UnknownRef { keys: Keys, name: String },
    #[error("invalid schema value, {error}")]
    InvalidSchemaValue { keys: Keys, error: String },
}

impl SchemaError {
    pub fn keys(&self) -> &Keys {
        match self {
            SchemaError::UnexpectedType { keys, .. } => keys,
            SchemaError::InvalidPattern { keys, .. } => keys,
            SchemaError::UnknownRef { keys, .. } => keys,
            SchemaError::InvalidSchemaValue { keys, .. } => keys,
        }
    }
}
