use std::collections::BTreeMap;

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet},
};

use crate::generator::{
  metrics::{GenerationStats, GenerationWarning},
  model::{
    AdditionalMembers, CompositionGroup, CompositionKeyword, Constraints, DiscriminatorInfo, Items, SchemaKind,
    SchemaNode,
  },
};

/// Lowers the parsed document tree into [`SchemaNode`]s.
///
/// References stay references: lowering never expands a `$ref`, it only
/// records the pointer for the resolver and graph builder. Nodes are built
/// once here and immutable afterwards.
pub(crate) struct Lowerer<'a> {
  spec: &'a Spec,
}

impl<'a> Lowerer<'a> {
  pub(crate) fn new(spec: &'a Spec) -> Self {
    Self { spec }
  }

  /// Lowers every named component schema. Schemas that fail to resolve are
  /// skipped with a warning, matching the all-or-nothing error surface only
  /// for structural failures later in the pipeline.
  pub(crate) fn lower_components(&self, stats: &mut GenerationStats) -> BTreeMap<String, SchemaNode> {
    let mut declarations = BTreeMap::new();

    if let Some(components) = &self.spec.components {
      for (name, schema_ref) in &components.schemas {
        match schema_ref {
          ObjectOrReference::Ref { ref_path, .. } => {
            declarations.insert(name.clone(), SchemaNode::reference(ref_path.clone()));
          }
          ObjectOrReference::Object(schema) => {
            declarations.insert(name.clone(), self.lower(name, schema, stats));
          }
        }
      }
    }

    declarations
  }

  pub(crate) fn lower_object_or_ref(
    &self,
    context: &str,
    schema_ref: &ObjectOrReference<ObjectSchema>,
    stats: &mut GenerationStats,
  ) -> SchemaNode {
    match schema_ref {
      ObjectOrReference::Ref { ref_path, .. } => SchemaNode::reference(ref_path.clone()),
      ObjectOrReference::Object(schema) => self.lower(context, schema, stats),
    }
  }

  /// Lowers one schema object. `context` names the enclosing declaration or
  /// property for warning messages.
  pub(crate) fn lower(&self, context: &str, schema: &ObjectSchema, stats: &mut GenerationStats) -> SchemaNode {
    let tags = TypeTags::of(schema);
    let kind = self.classify(context, schema, &tags, stats);

    let mut enum_values = schema.enum_values.clone();
    if enum_values.is_empty()
      && let Some(const_value) = &schema.const_value
    {
      enum_values.push(const_value.clone());
    }

    let members = schema
      .properties
      .iter()
      .map(|(name, prop)| {
        let child_context = format!("{context}.{name}");
        (name.clone(), self.lower_object_or_ref(&child_context, prop, stats))
      })
      .collect();

    let items = self.lower_items(context, schema, stats);
    let compositions = self.lower_compositions(context, schema, stats);
    let additional = self.lower_additional(context, schema, stats);

    let discriminator = schema.discriminator.as_ref().map(|d| DiscriminatorInfo {
      property: d.property_name.clone(),
      mapping: d
        .mapping
        .as_ref()
        .map(|mapping| mapping.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default(),
    });

    SchemaNode::builder()
      .kind(kind)
      .members(members)
      .required(schema.required.iter().cloned().collect())
      .maybe_items(items)
      .enum_values(enum_values)
      .compositions(compositions)
      .constraints(constraints_of(schema))
      .additional(additional)
      .maybe_discriminator(discriminator)
      .nullable(tags.nullable)
      .read_only(schema.read_only.unwrap_or(false))
      .maybe_default(schema.default.clone())
      .maybe_description(schema.description.clone())
      .build()
  }

  /// Assigns the single primary kind, in dispatch priority order:
  /// enum/const, object, string, number/integer, boolean, array, oneOf,
  /// anyOf, allOf, not, then the `any` fallback.
  fn classify(&self, context: &str, schema: &ObjectSchema, tags: &TypeTags, stats: &mut GenerationStats) -> SchemaKind {
    if !schema.enum_values.is_empty() || schema.const_value.is_some() {
      return SchemaKind::Enum;
    }

    if tags.degenerate {
      stats.record_warning(GenerationWarning::UnsupportedShape {
        context: context.to_string(),
        message: "multiple non-null type tags".to_string(),
      });
      return SchemaKind::Any;
    }

    let has_object_shape =
      !schema.properties.is_empty() || schema.additional_properties.is_some() || tags.primary == Some(SchemaType::Object);
    if has_object_shape {
      return SchemaKind::Object;
    }

    match tags.primary {
      Some(SchemaType::String) => return SchemaKind::String,
      Some(SchemaType::Number) => return SchemaKind::Number,
      Some(SchemaType::Integer) => return SchemaKind::Integer,
      Some(SchemaType::Boolean) => return SchemaKind::Boolean,
      Some(SchemaType::Array) => return SchemaKind::Array,
      _ => {}
    }

    if schema.items.is_some() {
      return SchemaKind::Array;
    }

    if !schema.one_of.is_empty() {
      return SchemaKind::Composition(CompositionKeyword::OneOf);
    }
    if !schema.any_of.is_empty() {
      return SchemaKind::Composition(CompositionKeyword::AnyOf);
    }
    if !schema.all_of.is_empty() {
      return SchemaKind::Composition(CompositionKeyword::AllOf);
    }
    if !schema.not.is_empty() {
      return SchemaKind::Composition(CompositionKeyword::Not);
    }

    if tags.null_only {
      return SchemaKind::Null;
    }

    SchemaKind::Any
  }

  fn lower_items(&self, context: &str, schema: &ObjectSchema, stats: &mut GenerationStats) -> Option<Items> {
    let items = schema.items.as_deref()?;
    match items {
      Schema::Object(schema_ref) => {
        let child_context = format!("{context}[]");
        Some(Items::Single(Box::new(self.lower_object_or_ref(
          &child_context,
          schema_ref,
          stats,
        ))))
      }
      Schema::Boolean(_) => Some(Items::Single(Box::new(SchemaNode::any()))),
    }
  }

  fn lower_compositions(
    &self,
    context: &str,
    schema: &ObjectSchema,
    stats: &mut GenerationStats,
  ) -> Vec<CompositionGroup> {
    let groups = [
      (CompositionKeyword::OneOf, &schema.one_of),
      (CompositionKeyword::AnyOf, &schema.any_of),
      (CompositionKeyword::AllOf, &schema.all_of),
      (CompositionKeyword::Not, &schema.not),
    ];

    groups
      .into_iter()
      .filter(|(_, children)| !children.is_empty())
      .map(|(keyword, children)| CompositionGroup {
        keyword,
        children: children
          .iter()
          .map(|child| self.lower_object_or_ref(context, child, stats))
          .collect(),
      })
      .collect()
  }

  fn lower_additional(&self, context: &str, schema: &ObjectSchema, stats: &mut GenerationStats) -> AdditionalMembers {
    match &schema.additional_properties {
      None => AdditionalMembers::Open,
      Some(Schema::Boolean(flag)) => {
        if flag.0 {
          AdditionalMembers::Open
        } else {
          AdditionalMembers::Closed
        }
      }
      Some(Schema::Object(schema_ref)) => {
        let child_context = format!("{context}.*");
        AdditionalMembers::Schema(Box::new(self.lower_object_or_ref(&child_context, schema_ref, stats)))
      }
    }
  }
}

/// Type-tag summary of a schema: the primary non-null tag, whether `null`
/// appears (modelling nullable unions), and whether more than one non-null
/// tag makes the shape degenerate.
struct TypeTags {
  primary: Option<SchemaType>,
  nullable: bool,
  null_only: bool,
  degenerate: bool,
}

impl TypeTags {
  fn of(schema: &ObjectSchema) -> Self {
    let mut tags: Vec<SchemaType> = match &schema.schema_type {
      None => vec![],
      Some(SchemaTypeSet::Single(tag)) => vec![*tag],
      Some(SchemaTypeSet::Multiple(tags)) => tags.clone(),
    };

    let nullable = tags.contains(&SchemaType::Null);
    tags.retain(|tag| *tag != SchemaType::Null);

    Self {
      primary: tags.first().copied(),
      nullable,
      null_only: nullable && tags.is_empty(),
      degenerate: tags.len() > 1,
    }
  }
}

fn constraints_of(schema: &ObjectSchema) -> Constraints {
  Constraints {
    minimum: schema.minimum.as_ref().and_then(serde_json::Number::as_f64),
    maximum: schema.maximum.as_ref().and_then(serde_json::Number::as_f64),
    exclusive_minimum: schema.exclusive_minimum.as_ref().and_then(serde_json::Number::as_f64),
    exclusive_maximum: schema.exclusive_maximum.as_ref().and_then(serde_json::Number::as_f64),
    multiple_of: schema.multiple_of.as_ref().and_then(serde_json::Number::as_f64),
    min_length: schema.min_length,
    max_length: schema.max_length,
    pattern: schema.pattern.clone(),
    format: schema.format.clone(),
    min_items: schema.min_items,
    max_items: schema.max_items,
  }
}

#[cfg(test)]
mod tests;
