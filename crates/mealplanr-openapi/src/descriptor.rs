//! Per-endpoint descriptor building.
//!
//! [`build`] turns one [`EndpointConfig`] into a [`MethodDescriptorSet`]
//! with exactly one populated HTTP-method slot. Parameter assembly is an
//! explicit ordered list of contributor functions, so the output order
//! [path-id?, body?, refresh-header, access-header] is a testable value
//! rather than implicit code order.

use std::collections::BTreeMap;
use std::fmt;

use mealplanr_schema::{sanitize, SchemaNode, INTERNAL_FIELDS};
use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};

use crate::error::{Error, Result, SchemaSlot};
use crate::{ACCESS_TOKEN_HEADER, JSON_CONTENT_TYPE, OK_STATUS, REFRESH_TOKEN_HEADER};

/// HTTP methods used by the CRUD route surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        })
    }
}

/// Path-identifier requirement of an endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathId {
    /// Whether the endpoint addresses a single document by id.
    pub required: bool,
    /// Query parameter name carrying the id (e.g., `ingredientId`).
    pub name: Option<String>,
}

/// Request- or response-body requirement of an endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodySpec {
    /// Whether a body is part of the endpoint contract.
    pub required: bool,
    /// Reflected model schema to embed, sanitized first.
    pub schema: Option<SchemaNode>,
    /// Extra top-level fields to strip from the schema.
    pub omit: Vec<String>,
}

/// A caller-supplied non-success response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description shown in the docs UI.
    pub description: String,
    /// Optional response schema, embedded as-is.
    #[serde(default)]
    pub schema: Option<SchemaNode>,
}

/// Complete configuration of one CRUD endpoint.
///
/// Owned by the caller for the duration of one [`build`] call; the builder
/// never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    /// HTTP method the descriptor is slotted under.
    pub method: Method,
    /// Resource name referenced in generated descriptions (e.g., `ingredient`).
    pub resource: String,
    /// Swagger tag grouping the operation.
    pub tag: String,
    /// Short operation summary.
    pub summary: String,
    /// Longer operation description.
    pub description: String,
    /// Whether the endpoint requires the auth header pair.
    pub requires_auth: bool,
    /// Path-identifier requirement.
    pub path_id: PathId,
    /// Request body requirement.
    pub request_body: BodySpec,
    /// Response body requirement.
    pub response_body: BodySpec,
    /// Non-success responses, keyed by status-code string.
    pub error_responses: BTreeMap<String, ErrorResponse>,
}

/// Where a parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Query string parameter.
    Query,
    /// Request body parameter.
    Body,
    /// Request header parameter.
    Header,
}

/// One entry of an operation's `parameters` array, in standard Swagger shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Parameter location (`in`).
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Human-readable description.
    pub description: String,
    /// Whether the parameter is mandatory.
    pub required: bool,
    /// Primitive type for query parameters.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Schema for body and header parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
}

/// One entry of an operation's `responses` map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSpec {
    /// Human-readable description.
    pub description: String,
    /// Optional response schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
}

/// The generated documentation metadata for one HTTP operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    /// Short operation summary.
    pub summary: String,
    /// Longer operation description.
    pub description: String,
    /// Swagger tags.
    pub tags: Vec<String>,
    /// Produced content types; always `application/json`.
    pub produces: Vec<String>,
    /// Ordered parameter list.
    pub parameters: Vec<ParameterSpec>,
    /// Responses keyed by status-code string.
    pub responses: BTreeMap<String, ResponseSpec>,
}

/// Per-method operation slots for one path; exactly one slot is populated
/// per [`build`] call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MethodDescriptorSet {
    /// `GET` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<OperationDescriptor>,
    /// `POST` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<OperationDescriptor>,
    /// `PUT` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<OperationDescriptor>,
    /// `DELETE` operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<OperationDescriptor>,
}

impl MethodDescriptorSet {
    /// Borrow the operation slotted under `method`, if any.
    #[must_use]
    pub fn operation(&self, method: Method) -> Option<&OperationDescriptor> {
        self.slot(method).as_ref()
    }

    /// Move populated slots of `other` into `self`; later entries win.
    pub fn merge(&mut self, other: Self) {
        let Self {
            get,
            post,
            put,
            delete,
        } = other;
        for (slot, incoming) in [
            (&mut self.get, get),
            (&mut self.post, post),
            (&mut self.put, put),
            (&mut self.delete, delete),
        ] {
            if incoming.is_some() {
                *slot = incoming;
            }
        }
    }

    fn slot(&self, method: Method) -> &Option<OperationDescriptor> {
        match method {
            Method::Get => &self.get,
            Method::Post => &self.post,
            Method::Put => &self.put,
            Method::Delete => &self.delete,
        }
    }

    fn slot_mut(&mut self, method: Method) -> &mut Option<OperationDescriptor> {
        match method {
            Method::Get => &mut self.get,
            Method::Post => &mut self.post,
            Method::Put => &mut self.put,
            Method::Delete => &mut self.delete,
        }
    }
}

/// Parameter sources in their fixed output order: path-id query parameter,
/// sanitized body parameter, auth header pair.
const CONTRIBUTORS: [fn(&EndpointConfig) -> Result<Vec<ParameterSpec>>; 3] =
    [path_id_param, request_body_param, auth_header_params];

/// Build the descriptor set for one endpoint.
///
/// Seeds the responses with the reserved `"200": OK` entry, merges in the
/// caller's error responses, assembles parameters via the contributor list,
/// and slots the finished operation under the configured method. Pure and
/// synchronous; the config is never mutated.
///
/// # Errors
///
/// Fails fast with [`Error::MissingSchema`] when a required body or response
/// has no schema, and [`Error::MissingPathIdName`] when a required path id
/// has no parameter name.
pub fn build(config: &EndpointConfig) -> Result<MethodDescriptorSet> {
    let mut responses = BTreeMap::new();
    responses.insert(
        OK_STATUS.to_string(),
        ResponseSpec {
            description: "OK".to_string(),
            schema: ok_response_schema(config)?,
        },
    );
    for (status, error) in &config.error_responses {
        // "200" is reserved for the success entry
        if status == OK_STATUS {
            continue;
        }
        responses.insert(
            status.clone(),
            ResponseSpec {
                description: error.description.clone(),
                schema: error.schema.clone(),
            },
        );
    }

    let mut parameters = Vec::new();
    for contribute in CONTRIBUTORS {
        parameters.extend(contribute(config)?);
    }

    let operation = OperationDescriptor {
        summary: config.summary.clone(),
        description: config.description.clone(),
        tags: vec![config.tag.clone()],
        produces: vec![JSON_CONTENT_TYPE.to_string()],
        parameters,
        responses,
    };

    let mut set = MethodDescriptorSet::default();
    *set.slot_mut(config.method) = Some(operation);
    Ok(set)
}

/// Sanitized schema for the `"200"` response, when one is configured.
///
/// Only caller-listed omit fields are stripped from the top level here;
/// the request-body path additionally appends [`INTERNAL_FIELDS`].
fn ok_response_schema(config: &EndpointConfig) -> Result<Option<SchemaNode>> {
    if !config.response_body.required {
        return Ok(None);
    }
    let schema = config
        .response_body
        .schema
        .as_ref()
        .ok_or_else(|| missing_schema(config, SchemaSlot::ResponseBody))?;
    Ok(Some(sanitize(schema, &config.response_body.omit)))
}

fn path_id_param(config: &EndpointConfig) -> Result<Vec<ParameterSpec>> {
    if !config.path_id.required {
        return Ok(Vec::new());
    }
    let name = config
        .path_id
        .name
        .as_ref()
        .ok_or_else(|| Error::MissingPathIdName {
            method: config.method,
            resource: config.resource.clone(),
        })?;
    Ok(vec![ParameterSpec {
        name: name.clone(),
        location: ParameterLocation::Query,
        description: format!("Id of the {}", config.resource),
        required: true,
        param_type: Some("string".to_string()),
        schema: None,
    }])
}

fn request_body_param(config: &EndpointConfig) -> Result<Vec<ParameterSpec>> {
    if !config.request_body.required {
        return Ok(Vec::new());
    }
    let schema = config
        .request_body
        .schema
        .as_ref()
        .ok_or_else(|| missing_schema(config, SchemaSlot::RequestBody))?;

    // Effective omit list: caller fields plus the storage bookkeeping set,
    // so internal fields never appear in accepted request bodies.
    let mut omit = config.request_body.omit.clone();
    omit.extend(INTERNAL_FIELDS.iter().map(ToString::to_string));

    Ok(vec![ParameterSpec {
        name: "body".to_string(),
        location: ParameterLocation::Body,
        description: format!("Create {} body object", config.resource),
        required: true,
        param_type: None,
        schema: Some(sanitize(schema, &omit)),
    }])
}

fn auth_header_params(config: &EndpointConfig) -> Result<Vec<ParameterSpec>> {
    if !config.requires_auth {
        return Ok(Vec::new());
    }
    Ok(vec![
        token_header(REFRESH_TOKEN_HEADER, "refreshToken"),
        token_header(ACCESS_TOKEN_HEADER, "accessToken"),
    ])
}

/// Required string/uuid header parameter carrying a session token.
fn token_header(name: &str, description: &str) -> ParameterSpec {
    let mut extra = Mapping::new();
    extra.insert(
        Value::String("format".to_string()),
        Value::String("uuid".to_string()),
    );
    let mut schema = SchemaNode::primitive("string");
    schema.extra = extra;

    ParameterSpec {
        name: name.to_string(),
        location: ParameterLocation::Header,
        description: description.to_string(),
        required: true,
        param_type: None,
        schema: Some(schema),
    }
}

fn missing_schema(config: &EndpointConfig, slot: SchemaSlot) -> Error {
    Error::MissingSchema {
        method: config.method,
        resource: config.resource.clone(),
        slot,
    }
}

#[cfg(test)]
mod tests {
    use mealplanr_schema::SchemaKind;
    use pretty_assertions::assert_eq;

    use super::*;

    fn ingredient_schema() -> SchemaNode {
        serde_yaml_ng::from_str(
            r"
type: object
properties:
  _id:
    type: string
  name:
    type: string
  createdAt:
    type: string
  updatedAt:
    type: string
",
        )
        .expect("fixture should parse")
    }

    fn base_config(method: Method) -> EndpointConfig {
        EndpointConfig {
            method,
            resource: "ingredient".to_string(),
            tag: "ingredients".to_string(),
            summary: "Manage ingredients".to_string(),
            description: "CRUD endpoint for ingredients".to_string(),
            requires_auth: false,
            path_id: PathId::default(),
            request_body: BodySpec::default(),
            response_body: BodySpec::default(),
            error_responses: BTreeMap::new(),
        }
    }

    #[test]
    fn parameters_come_in_fixed_order() {
        let mut config = base_config(Method::Put);
        config.requires_auth = true;
        config.path_id = PathId {
            required: true,
            name: Some("ingredientId".to_string()),
        };
        config.request_body = BodySpec {
            required: true,
            schema: Some(ingredient_schema()),
            omit: Vec::new(),
        };

        let set = build(&config).unwrap();
        let op = set.operation(Method::Put).unwrap();

        let order: Vec<(&str, ParameterLocation)> = op
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.location))
            .collect();
        assert_eq!(
            order,
            vec![
                ("ingredientId", ParameterLocation::Query),
                ("body", ParameterLocation::Body),
                ("x-refresh", ParameterLocation::Header),
                ("authorization", ParameterLocation::Header),
            ]
        );
    }

    #[test]
    fn only_the_requested_method_slot_is_set() {
        let set = build(&base_config(Method::Put)).unwrap();
        assert!(set.get.is_none());
        assert!(set.post.is_none());
        assert!(set.put.is_some());
        assert!(set.delete.is_none());
    }

    #[test]
    fn post_ingredient_end_to_end() {
        let mut config = base_config(Method::Post);
        config.requires_auth = true;
        config.request_body = BodySpec {
            required: true,
            schema: Some(ingredient_schema()),
            omit: Vec::new(),
        };
        config.error_responses.insert(
            "404".to_string(),
            ErrorResponse {
                description: "Not found".to_string(),
                schema: None,
            },
        );

        let set = build(&config).unwrap();
        let op = set.operation(Method::Post).unwrap();

        // Body schema reduced to {name}; internal fields stripped at the top
        // via the effective omit list.
        let body = &op.parameters[0];
        let SchemaKind::Object {
            properties: Some(props),
        } = &body.schema.as_ref().unwrap().kind
        else {
            panic!("expected object schema");
        };
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["name"]);

        assert_eq!(op.parameters[1].name, "x-refresh");
        assert_eq!(op.parameters[2].name, "authorization");

        let statuses: Vec<&str> = op.responses.keys().map(String::as_str).collect();
        assert_eq!(statuses, vec!["200", "404"]);
        assert_eq!(op.responses["200"].description, "OK");
        assert!(op.responses["200"].schema.is_none());
        assert_eq!(op.responses["404"].description, "Not found");
    }

    #[test]
    fn response_schema_keeps_caller_visible_top_level_fields() {
        let mut config = base_config(Method::Get);
        config.response_body = BodySpec {
            required: true,
            schema: Some(ingredient_schema()),
            omit: vec!["updatedAt".to_string()],
        };

        let set = build(&config).unwrap();
        let op = set.operation(Method::Get).unwrap();

        // Only the caller's omit applies at the top level of responses.
        let schema = op.responses["200"].schema.as_ref().unwrap();
        let SchemaKind::Object {
            properties: Some(props),
        } = &schema.kind
        else {
            panic!("expected object schema");
        };
        assert_eq!(
            props.keys().collect::<Vec<_>>(),
            vec!["_id", "name", "createdAt"]
        );
    }

    #[test]
    fn reserved_ok_status_cannot_be_overwritten() {
        let mut config = base_config(Method::Get);
        config.error_responses.insert(
            "200".to_string(),
            ErrorResponse {
                description: "hijacked".to_string(),
                schema: None,
            },
        );

        let set = build(&config).unwrap();
        let op = set.operation(Method::Get).unwrap();
        assert_eq!(op.responses["200"].description, "OK");
    }

    #[test]
    fn required_body_without_schema_fails_fast() {
        let mut config = base_config(Method::Post);
        config.request_body.required = true;

        assert!(matches!(
            build(&config),
            Err(Error::MissingSchema {
                method: Method::Post,
                slot: SchemaSlot::RequestBody,
                ..
            })
        ));
    }

    #[test]
    fn required_path_id_without_name_fails_fast() {
        let mut config = base_config(Method::Delete);
        config.path_id.required = true;

        assert!(matches!(
            build(&config),
            Err(Error::MissingPathIdName {
                method: Method::Delete,
                ..
            })
        ));
    }

    #[test]
    fn auth_headers_use_uuid_format() {
        let mut config = base_config(Method::Get);
        config.requires_auth = true;

        let set = build(&config).unwrap();
        let op = set.operation(Method::Get).unwrap();

        for param in &op.parameters {
            let schema = param.schema.as_ref().unwrap();
            assert_eq!(
                schema.kind,
                SchemaKind::Primitive {
                    type_name: "string".to_string()
                }
            );
            assert_eq!(
                schema.extra.get("format").and_then(Value::as_str),
                Some("uuid")
            );
            assert!(param.required);
        }
    }

    #[test]
    fn config_is_not_mutated() {
        let mut config = base_config(Method::Post);
        config.request_body = BodySpec {
            required: true,
            schema: Some(ingredient_schema()),
            omit: vec!["name".to_string()],
        };
        let before = config.clone();
        let _ = build(&config).unwrap();
        assert_eq!(config, before);
    }
}
