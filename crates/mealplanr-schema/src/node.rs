//! Tagged schema tree parsed from reflected model YAML.
//!
//! The data layer reflects each document model into a JSON-Schema-shaped
//! YAML mapping (`type`, `properties`, `items`, plus free-form metadata such
//! as `description` or `required`). [`SchemaNode`] gives that shape a typed,
//! exhaustive form so recursive transforms are checked by the compiler
//! instead of relying on ad-hoc `type` string inspection.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml_ng::{Mapping, Value};

use crate::error::SchemaError;

/// Ordered property map of an object schema.
///
/// Field order is the model's declared order and survives into generated
/// documentation.
pub type Properties = IndexMap<String, SchemaNode>;

/// One node of a reflected model schema.
///
/// The structural part lives in [`SchemaKind`]; everything else the reflection
/// emitted (`description`, `required`, `format`, `unique`, ...) is carried in
/// `extra` and passes through transformations unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Structural variant of this node.
    pub kind: SchemaKind,
    /// Schema metadata other than `type` / `properties` / `items`.
    pub extra: Mapping,
}

/// Structural variants of a schema node.
///
/// An `Object` without `properties` and an `Array` without object items are
/// valid leaves; recursion stops there.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// `type: object`, optionally with named properties.
    Object {
        /// Nested properties, absent for an opaque object.
        properties: Option<Properties>,
    },
    /// `type: array`, optionally with an item schema.
    Array {
        /// Schema of the array elements, absent for an untyped array.
        items: Option<Box<SchemaNode>>,
    },
    /// Any other `type` value (`string`, `number`, `boolean`, ...).
    Primitive {
        /// The declared type name.
        type_name: String,
    },
}

impl SchemaNode {
    /// Build a primitive node with no extra metadata.
    #[must_use]
    pub fn primitive(type_name: &str) -> Self {
        Self {
            kind: SchemaKind::Primitive {
                type_name: type_name.to_string(),
            },
            extra: Mapping::new(),
        }
    }

    /// Build an object node from named properties.
    #[must_use]
    pub fn object(properties: Properties) -> Self {
        Self {
            kind: SchemaKind::Object {
                properties: Some(properties),
            },
            extra: Mapping::new(),
        }
    }

    /// Rebuild the YAML form of this node.
    ///
    /// Structural keys come first (`type`, then `properties` / `items`),
    /// followed by the passthrough metadata in its original order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Mapping::new();
        match &self.kind {
            SchemaKind::Object { properties } => {
                map.insert(val_s("type"), val_s("object"));
                if let Some(props) = properties {
                    let mut out = Mapping::new();
                    for (name, node) in props {
                        out.insert(val_s(name), node.to_value());
                    }
                    map.insert(val_s("properties"), Value::Mapping(out));
                }
            }
            SchemaKind::Array { items } => {
                map.insert(val_s("type"), val_s("array"));
                if let Some(items) = items {
                    map.insert(val_s("items"), items.to_value());
                }
            }
            SchemaKind::Primitive { type_name } => {
                map.insert(val_s("type"), val_s(type_name));
            }
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        Value::Mapping(map)
    }
}

impl TryFrom<Value> for SchemaNode {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, SchemaError> {
        let Value::Mapping(mut map) = value else {
            return Err(SchemaError::NotAMapping {
                found: value_kind(&value),
            });
        };

        let type_name = match map.remove("type") {
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(SchemaError::TypeNotString {
                    found: value_kind(&other),
                })
            }
            None => return Err(SchemaError::MissingType),
        };

        let kind = match type_name.as_str() {
            "object" => SchemaKind::Object {
                properties: match map.remove("properties") {
                    None => None,
                    Some(Value::Mapping(props)) => Some(parse_properties(props)?),
                    Some(other) => {
                        return Err(SchemaError::PropertiesNotAMapping {
                            found: value_kind(&other),
                        })
                    }
                },
            },
            "array" => SchemaKind::Array {
                items: match map.remove("items") {
                    None => None,
                    Some(items) => Some(Box::new(Self::try_from(items)?)),
                },
            },
            _ => SchemaKind::Primitive { type_name },
        };

        Ok(Self { kind, extra: map })
    }
}

/// Parse a `properties` mapping, preserving declaration order.
fn parse_properties(props: Mapping) -> Result<Properties, SchemaError> {
    let mut out = Properties::with_capacity(props.len());
    for (key, value) in props {
        let Value::String(name) = key else {
            return Err(SchemaError::PropertyNameNotString {
                found: value_kind(&key),
            });
        };
        out.insert(name, SchemaNode::try_from(value)?);
    }
    Ok(out)
}

/// Human-readable YAML kind for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        _ => "tagged value",
    }
}

/// Shorthand for `Value::String`.
fn val_s(s: &str) -> Value {
    Value::String(s.to_string())
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(D::Error::custom)
    }
}
