//! Typed error enum for the `mealplanr-openapi` library API.
//!
//! Library consumers can match on specific variants. The CLI (`main.rs`)
//! converts these to `anyhow::Error` at the binary boundary for richer
//! context messages.

use std::fmt;

use crate::descriptor::Method;

/// Errors produced by `mealplanr-openapi` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File I/O failure (reading a route manifest).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A model schema in the manifest is structurally malformed.
    #[error(transparent)]
    Schema(#[from] mealplanr_schema::SchemaError),

    /// An endpoint requires a body or response but supplies no schema.
    ///
    /// Supply a `schema` inline or reference a manifest model via `model`.
    #[error("{method} endpoint for '{resource}' requires a {slot} but no schema was supplied")]
    MissingSchema {
        /// Method of the offending endpoint.
        method: Method,
        /// Resource name of the offending endpoint.
        resource: String,
        /// Which schema slot is missing.
        slot: SchemaSlot,
    },

    /// An endpoint requires a path id but names no query parameter for it.
    #[error(
        "{method} endpoint for '{resource}' requires a path id \
         but no parameter name was supplied"
    )]
    MissingPathIdName {
        /// Method of the offending endpoint.
        method: Method,
        /// Resource name of the offending endpoint.
        resource: String,
    },

    /// A route references a model name absent from the manifest's `models`.
    #[error("route manifest references unknown model '{name}'")]
    UnknownModel {
        /// The unresolved model name.
        name: String,
    },
}

/// Which schema slot of an endpoint config is being reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSlot {
    /// The request body schema.
    RequestBody,
    /// The `"200"` response schema.
    ResponseBody,
}

impl fmt::Display for SchemaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RequestBody => "request body schema",
            Self::ResponseBody => "response body schema",
        })
    }
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;
