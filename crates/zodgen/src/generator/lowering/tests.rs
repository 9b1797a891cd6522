use oas3::spec::ObjectSchema;
use serde_json::json;

use super::*;
use crate::generator::model::{AdditionalMembers, CompositionKeyword, Items, SchemaKind};

fn schema(value: serde_json::Value) -> ObjectSchema {
  serde_json::from_value(value).expect("test schema should deserialize")
}

fn lower(value: serde_json::Value) -> (SchemaNode, GenerationStats) {
  let spec: Spec = serde_json::from_value(json!({
    "openapi": "3.1.0",
    "info": { "title": "t", "version": "1" },
    "paths": {}
  }))
  .unwrap();
  let mut stats = GenerationStats::default();
  let lowerer = Lowerer::new(&spec);
  let node = lowerer.lower("Test", &schema(value), &mut stats);
  (node, stats)
}

#[test]
fn enum_wins_over_type_tag() {
  let (node, _) = lower(json!({ "type": "string", "enum": ["a", "b"] }));
  assert_eq!(node.kind, SchemaKind::Enum);
  assert_eq!(node.enum_values, vec![json!("a"), json!("b")]);
}

#[test]
fn const_lowers_to_single_enum_value() {
  let (node, _) = lower(json!({ "const": 42 }));
  assert_eq!(node.kind, SchemaKind::Enum);
  assert_eq!(node.enum_values, vec![json!(42)]);
}

#[test]
fn object_wins_over_composition_but_keeps_the_group() {
  let (node, _) = lower(json!({
    "properties": { "id": { "type": "integer" } },
    "oneOf": [ { "type": "string" }, { "type": "number" } ]
  }));
  assert_eq!(node.kind, SchemaKind::Object);
  let children = node.composition_children(CompositionKeyword::OneOf).unwrap();
  assert_eq!(children.len(), 2);
}

#[test]
fn nullable_union_tag_sets_flag_and_primary_kind() {
  let (node, _) = lower(json!({ "type": ["string", "null"] }));
  assert_eq!(node.kind, SchemaKind::String);
  assert!(node.nullable);
}

#[test]
fn null_only_tag_is_null_kind() {
  let (node, _) = lower(json!({ "type": "null" }));
  assert_eq!(node.kind, SchemaKind::Null);
}

#[test]
fn multiple_non_null_tags_fall_back_to_any_with_warning() {
  let (node, stats) = lower(json!({ "type": ["string", "integer"] }));
  assert_eq!(node.kind, SchemaKind::Any);
  assert_eq!(stats.warnings.len(), 1);
  assert!(stats.warnings[0].to_string().contains("Test"));
}

#[test]
fn numeric_constraints_are_extracted() {
  let (node, _) = lower(json!({
    "type": "integer",
    "minimum": 0,
    "exclusiveMaximum": 100,
    "multipleOf": 5
  }));
  assert_eq!(node.kind, SchemaKind::Integer);
  assert_eq!(node.constraints.minimum, Some(0.0));
  assert_eq!(node.constraints.exclusive_maximum, Some(100.0));
  assert_eq!(node.constraints.multiple_of, Some(5.0));
}

#[test]
fn string_constraints_are_extracted() {
  let (node, _) = lower(json!({
    "type": "string",
    "minLength": 1,
    "maxLength": 10,
    "pattern": "^a+$",
    "format": "email"
  }));
  assert_eq!(node.constraints.min_length, Some(1));
  assert_eq!(node.constraints.max_length, Some(10));
  assert_eq!(node.constraints.pattern.as_deref(), Some("^a+$"));
  assert_eq!(node.constraints.format.as_deref(), Some("email"));
}

#[test]
fn array_items_lower_recursively() {
  let (node, _) = lower(json!({
    "type": "array",
    "items": { "type": "string" },
    "minItems": 1
  }));
  assert_eq!(node.kind, SchemaKind::Array);
  let Some(Items::Single(item)) = &node.items else {
    panic!("expected single item schema");
  };
  assert_eq!(item.kind, SchemaKind::String);
}

#[test]
fn untyped_items_still_classify_as_array() {
  let (node, _) = lower(json!({ "items": { "type": "integer" } }));
  assert_eq!(node.kind, SchemaKind::Array);
}

#[test]
fn additional_properties_variants() {
  let (open, _) = lower(json!({ "type": "object", "additionalProperties": true }));
  assert_eq!(open.additional, AdditionalMembers::Open);

  let (closed, _) = lower(json!({ "type": "object", "additionalProperties": false }));
  assert_eq!(closed.additional, AdditionalMembers::Closed);

  let (typed, _) = lower(json!({ "type": "object", "additionalProperties": { "type": "number" } }));
  let AdditionalMembers::Schema(inner) = &typed.additional else {
    panic!("expected typed catch-all");
  };
  assert_eq!(inner.kind, SchemaKind::Number);
}

#[test]
fn references_stay_references() {
  let (node, _) = lower(json!({
    "type": "object",
    "properties": { "pet": { "$ref": "#/components/schemas/Pet" } },
    "required": ["pet"]
  }));
  let pet = &node.members["pet"];
  assert_eq!(pet.kind, SchemaKind::Reference);
  assert_eq!(pet.reference.as_deref(), Some("#/components/schemas/Pet"));
  assert!(node.required.contains("pet"));
}

#[test]
fn read_only_and_default_are_carried() {
  let (node, _) = lower(json!({ "type": "string", "readOnly": true, "default": "x" }));
  assert!(node.read_only);
  assert_eq!(node.default, Some(json!("x")));
}

#[test]
fn discriminator_mapping_is_ordered() {
  let (node, _) = lower(json!({
    "oneOf": [
      { "$ref": "#/components/schemas/Cat" },
      { "$ref": "#/components/schemas/Dog" }
    ],
    "discriminator": {
      "propertyName": "petType",
      "mapping": {
        "cat": "#/components/schemas/Cat",
        "dog": "#/components/schemas/Dog"
      }
    }
  }));
  assert_eq!(node.kind, SchemaKind::Composition(CompositionKeyword::OneOf));
  let discriminator = node.discriminator.as_ref().unwrap();
  assert_eq!(discriminator.property, "petType");
  assert_eq!(
    discriminator.mapping,
    vec![
      ("cat".to_string(), "#/components/schemas/Cat".to_string()),
      ("dog".to_string(), "#/components/schemas/Dog".to_string())
    ]
  );
}
