//! Typed error enum for schema parsing.
//!
//! Malformed structure is rejected once, when YAML is converted into a
//! [`SchemaNode`](crate::SchemaNode) tree. The sanitizer itself is total:
//! a node with no nested structure is a valid leaf, never an error.

/// Errors produced when converting YAML into a typed schema tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A schema node must be a YAML mapping.
    #[error("schema node must be a mapping, found {found}")]
    NotAMapping {
        /// YAML kind of the offending value (`string`, `sequence`, ...).
        found: &'static str,
    },

    /// A schema node has no `type` key.
    #[error("schema node is missing its 'type' key")]
    MissingType,

    /// The `type` key holds a non-string value.
    #[error("schema 'type' must be a string, found {found}")]
    TypeNotString {
        /// YAML kind of the offending value.
        found: &'static str,
    },

    /// An object schema carries a `properties` key that is not a mapping.
    #[error("'properties' of an object schema must be a mapping, found {found}")]
    PropertiesNotAMapping {
        /// YAML kind of the offending value.
        found: &'static str,
    },

    /// A property name is not a string.
    #[error("property names must be strings, found {found}")]
    PropertyNameNotString {
        /// YAML kind of the offending key.
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time assertion that `SchemaError` is `Send + Sync`.
    /// Required for use across thread boundaries and inside wrapper errors.
    const _: () = {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaError>();
    };
}
