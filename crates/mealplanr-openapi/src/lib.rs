#![allow(clippy::doc_markdown)] // README uses "OpenAPI" proper noun throughout
#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod descriptor;
mod document;
mod error;

/// Content type produced by every generated operation.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Reserved status key for the success response; caller-supplied error
/// responses can never overwrite it.
pub const OK_STATUS: &str = "200";

/// Header carrying the refresh token on authenticated endpoints.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh";

/// Header carrying the access token on authenticated endpoints.
pub const ACCESS_TOKEN_HEADER: &str = "authorization";

pub use config::{ApiInfo, BodyConfig, PathIdConfig, RouteEntry, RouteManifest};
pub use descriptor::{
    build, BodySpec, EndpointConfig, ErrorResponse, Method, MethodDescriptorSet,
    OperationDescriptor, ParameterLocation, ParameterSpec, PathId, ResponseSpec,
};
pub use document::ApiDocument;
pub use error::{Error, Result, SchemaSlot};
