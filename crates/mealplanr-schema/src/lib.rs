//! Typed model-schema tree and internal-field sanitizer for the mealplanr API.
//!
//! Document models are reflected into JSON-Schema-shaped YAML by the data
//! layer. This crate parses that YAML into a tagged [`SchemaNode`] tree and
//! provides [`sanitize`], which removes storage-layer bookkeeping fields
//! (`_id`, `createdAt`, `updatedAt`) from every nested object level plus a
//! caller-supplied top-level omit list, without touching the input tree.
//!
//! Both this crate and `mealplanr-openapi` (descriptor generation) treat the
//! schema tree as data: transformations return new trees and never mutate
//! their arguments.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod node;
mod sanitize;

pub use error::SchemaError;
pub use node::{Properties, SchemaKind, SchemaNode};
pub use sanitize::{sanitize, sanitize_with, INTERNAL_FIELDS};
