//! Internal-field sanitization of model schemas.
//!
//! Reflected model schemas include storage-layer bookkeeping fields on every
//! stored (sub-)document. Those must never appear in request bodies accepted
//! from clients, so the sanitizer strips them from every nested object level
//! before a schema is embedded in a descriptor.

use crate::node::{Properties, SchemaKind, SchemaNode};

/// Field names maintained by the storage layer on every stored document.
///
/// The policy of what counts as internal bookkeeping is data, not code:
/// [`sanitize_with`] takes the set explicitly, [`sanitize`] applies this one.
pub const INTERNAL_FIELDS: &[&str] = &["_id", "createdAt", "updatedAt"];

/// Sanitize a model schema with the default [`INTERNAL_FIELDS`] set.
///
/// Returns a new tree in which the internal fields are removed from every
/// nested object and array-of-object `properties` level, and the `omit`
/// names are removed from the top-level properties. The input is never
/// mutated. Omit names that match nothing are a no-op — schemas evolve
/// independently of omit lists.
#[must_use]
pub fn sanitize(schema: &SchemaNode, omit: &[String]) -> SchemaNode {
    sanitize_with(schema, omit, INTERNAL_FIELDS)
}

/// Sanitize a model schema with an explicit internal-field set.
///
/// The recursive pass strips `internal` names from the `properties` of every
/// nested object and array-of-object node; the root level is only affected
/// by the `omit` list. Nodes without nested structure (opaque objects,
/// arrays of primitives, primitives) are left untouched.
#[must_use]
pub fn sanitize_with(schema: &SchemaNode, omit: &[String], internal: &[&str]) -> SchemaNode {
    let mut copy = schema.clone();
    if let SchemaKind::Object {
        properties: Some(props),
    } = &mut copy.kind
    {
        scrub_properties(props, internal);
        props.retain(|name, _| !omit.iter().any(|o| o == name));
    }
    copy
}

/// Strip `internal` names from every object level below `props`.
fn scrub_properties(props: &mut Properties, internal: &[&str]) {
    for node in props.values_mut() {
        scrub_node(node, internal);
    }
}

fn scrub_node(node: &mut SchemaNode, internal: &[&str]) {
    match &mut node.kind {
        SchemaKind::Object {
            properties: Some(props),
        } => {
            scrub_properties(props, internal);
            props.retain(|name, _| !internal.contains(&name.as_str()));
        }
        SchemaKind::Array { items: Some(items) } => {
            if let SchemaKind::Object {
                properties: Some(props),
            } = &mut items.kind
            {
                scrub_properties(props, internal);
                props.retain(|name, _| !internal.contains(&name.as_str()));
            }
        }
        SchemaKind::Object { properties: None }
        | SchemaKind::Array { items: None }
        | SchemaKind::Primitive { .. } => {}
    }
}
