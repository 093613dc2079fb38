//! Assembly of built descriptors into a serializable Swagger document.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{ApiInfo, RouteManifest};
use crate::descriptor::{build, MethodDescriptorSet};
use crate::error::Result;

/// Swagger document version emitted by the generator.
const SWAGGER_VERSION: &str = "2.0";

/// Top-level Swagger document assembled from built descriptor sets.
///
/// Paths keep registration order. Serializes directly to the YAML consumed
/// by documentation UIs and client generators.
#[derive(Debug, Serialize)]
pub struct ApiDocument {
    /// Swagger document version.
    pub swagger: String,
    /// API metadata.
    pub info: ApiInfo,
    /// Operations keyed by path, in registration order.
    pub paths: IndexMap<String, MethodDescriptorSet>,
}

impl ApiDocument {
    /// Create an empty document with the given metadata.
    #[must_use]
    pub fn new(info: ApiInfo) -> Self {
        Self {
            swagger: SWAGGER_VERSION.to_string(),
            info,
            paths: IndexMap::new(),
        }
    }

    /// Build every manifest route and assemble the resulting document.
    ///
    /// # Errors
    ///
    /// Returns the first builder or model-resolution error encountered;
    /// there is no partial-result mode.
    pub fn from_manifest(manifest: &RouteManifest) -> Result<Self> {
        let mut document = Self::new(manifest.info.clone());
        for route in &manifest.routes {
            let config = route.endpoint_config(&manifest.models)?;
            document.insert(&route.path, build(&config)?);
        }
        Ok(document)
    }

    /// Merge a descriptor set into the entry for `path`.
    ///
    /// Populated method slots of `set` replace existing ones, so several
    /// routes can share a path and a later registration wins per method.
    pub fn insert(&mut self, path: &str, set: MethodDescriptorSet) {
        if let Some(existing) = self.paths.get_mut(path) {
            existing.merge(set);
        } else {
            self.paths.insert(path.to_string(), set);
        }
    }

    /// Serialize the document to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(crate::error::Error::from)
    }
}
