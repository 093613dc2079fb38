//! Route manifest loaded from YAML.
//!
//! Externalizes the per-endpoint configuration (method, metadata, body and
//! response requirements, error responses) and the reflected model schemas
//! so they live next to the API definition instead of being hardcoded in
//! route-registration source.
//!
//! # File format
//!
//! ```yaml
//! info:
//!   title: mealplanr API
//!   version: 1.0.0
//!
//! models:
//!   ingredient:
//!     type: object
//!     properties:
//!       _id: { type: string }
//!       name: { type: string, description: Name of the ingredient }
//!
//! routes:
//!   - path: /ingredients
//!     method: post
//!     resource: ingredient
//!     tag: ingredients
//!     summary: Create an ingredient
//!     description: Creates a new ingredient document.
//!     requires_auth: true
//!     body:
//!       required: true
//!       model: ingredient
//!     response:
//!       required: true
//!       model: ingredient
//!     error_responses:
//!       "409": { description: Ingredient already exists }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use mealplanr_schema::SchemaNode;
use serde::{Deserialize, Serialize};

use crate::descriptor::{BodySpec, EndpointConfig, ErrorResponse, Method, PathId};
use crate::error::{Error, Result};

/// Route manifest: API metadata, named model schemas, and route entries.
///
/// Loaded from a YAML file via [`RouteManifest::load`], then turned into a
/// document via [`ApiDocument::from_manifest`](crate::ApiDocument::from_manifest).
#[derive(Debug, Deserialize)]
pub struct RouteManifest {
    /// API metadata for the generated document.
    pub info: ApiInfo,

    /// Reflected model schemas, referenced from routes by name.
    #[serde(default)]
    pub models: BTreeMap<String, SchemaNode>,

    /// One entry per endpoint.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// API metadata embedded in the generated document's `info` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    /// API title.
    pub title: String,
    /// API version string.
    pub version: String,
    /// Optional API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One endpoint entry of the manifest.
#[derive(Debug, Deserialize)]
pub struct RouteEntry {
    /// Document path the operation is registered under (e.g., `/ingredients`).
    pub path: String,
    /// HTTP method.
    pub method: Method,
    /// Resource name referenced in generated descriptions.
    pub resource: String,
    /// Swagger tag.
    pub tag: String,
    /// Short operation summary.
    #[serde(default)]
    pub summary: String,
    /// Longer operation description.
    #[serde(default)]
    pub description: String,
    /// Whether the endpoint requires the auth header pair.
    #[serde(default)]
    pub requires_auth: bool,
    /// Path-identifier requirement.
    #[serde(default)]
    pub path_id: PathIdConfig,
    /// Request body requirement.
    #[serde(default)]
    pub body: BodyConfig,
    /// Response body requirement.
    #[serde(default)]
    pub response: BodyConfig,
    /// Non-success responses keyed by status-code string.
    #[serde(default)]
    pub error_responses: BTreeMap<String, ErrorResponse>,
}

/// Path-identifier requirement as written in the manifest.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathIdConfig {
    /// Whether the endpoint addresses a single document by id.
    pub required: bool,
    /// Query parameter name carrying the id.
    pub name: Option<String>,
}

/// Body or response requirement as written in the manifest.
///
/// The schema comes either inline (`schema`) or by reference to a manifest
/// model (`model`); an inline schema wins when both are present.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Whether a body is part of the endpoint contract.
    pub required: bool,
    /// Name of a manifest model to embed.
    pub model: Option<String>,
    /// Inline schema, overriding `model`.
    pub schema: Option<SchemaNode>,
    /// Extra top-level fields to strip from the schema.
    pub omit: Vec<String>,
}

impl RouteManifest {
    /// Load a manifest from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the YAML cannot be
    /// parsed, or an embedded model schema is structurally malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_yaml_ng::from_str(&content)?;
        Ok(manifest)
    }
}

impl RouteEntry {
    /// Resolve this entry against the manifest's models into a builder input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownModel`] when a referenced model name is
    /// absent from `models`.
    pub fn endpoint_config(
        &self,
        models: &BTreeMap<String, SchemaNode>,
    ) -> Result<EndpointConfig> {
        Ok(EndpointConfig {
            method: self.method,
            resource: self.resource.clone(),
            tag: self.tag.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            requires_auth: self.requires_auth,
            path_id: PathId {
                required: self.path_id.required,
                name: self.path_id.name.clone(),
            },
            request_body: self.body.resolve(models)?,
            response_body: self.response.resolve(models)?,
            error_responses: self.error_responses.clone(),
        })
    }
}

impl BodyConfig {
    fn resolve(&self, models: &BTreeMap<String, SchemaNode>) -> Result<BodySpec> {
        let schema = match (&self.schema, &self.model) {
            (Some(inline), _) => Some(inline.clone()),
            (None, Some(name)) => Some(
                models
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::UnknownModel { name: name.clone() })?,
            ),
            (None, None) => None,
        };
        Ok(BodySpec {
            required: self.required,
            schema,
            omit: self.omit.clone(),
        })
    }
}
