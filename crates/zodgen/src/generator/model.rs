use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Primary kind of one schema unit. Exactly one per node; the synthesizer
/// dispatches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchemaKind {
  Enum,
  Object,
  String,
  Number,
  Integer,
  Boolean,
  Null,
  Array,
  Composition(CompositionKeyword),
  Reference,
  Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompositionKeyword {
  OneOf,
  AnyOf,
  AllOf,
  Not,
}

/// Validation constraints carried by a node. Which fields are meaningful
/// depends on the node's kind; canonicalization happens at synthesis time.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Constraints {
  pub minimum: Option<f64>,
  pub maximum: Option<f64>,
  pub exclusive_minimum: Option<f64>,
  pub exclusive_maximum: Option<f64>,
  pub multiple_of: Option<f64>,
  pub min_length: Option<u64>,
  pub max_length: Option<u64>,
  pub pattern: Option<String>,
  pub format: Option<String>,
  pub min_items: Option<u64>,
  pub max_items: Option<u64>,
}

impl Constraints {
  pub(crate) fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

/// Array item shape: one schema for every element, or a fixed tuple.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Items {
  Single(Box<SchemaNode>),
  Tuple(Vec<SchemaNode>),
}

/// `additionalProperties` handling for object nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum AdditionalMembers {
  /// Absent or `true`: open record, unknown values pass through.
  #[default]
  Open,
  /// `false`: closed record.
  Closed,
  /// A schema: typed catch-all.
  Schema(Box<SchemaNode>),
}

/// One composition keyword's children. A node can carry several groups
/// (`allOf` next to `oneOf` is legal); the synthesizer merges the
/// non-primary groups instead of discarding them.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompositionGroup {
  pub keyword: CompositionKeyword,
  pub children: Vec<SchemaNode>,
}

/// Discriminator metadata for `oneOf` unions. The mapping preserves the
/// document's (sorted) entry order so output stays deterministic.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DiscriminatorInfo {
  pub property: String,
  pub mapping: Vec<(String, String)>,
}

/// One parsed unit of a JSON-Schema-like definition.
///
/// Built once by lowering, immutable afterwards. `kind` is the primary
/// dispatch tag; composition nodes may still carry sibling members and
/// constraints, which the synthesizer merges rather than discards.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub(crate) struct SchemaNode {
  pub kind: SchemaKind,
  #[builder(default)]
  pub members: IndexMap<String, SchemaNode>,
  #[builder(default)]
  pub required: BTreeSet<String>,
  pub items: Option<Items>,
  #[builder(default)]
  pub compositions: Vec<CompositionGroup>,
  #[builder(default)]
  pub enum_values: Vec<serde_json::Value>,
  pub reference: Option<String>,
  #[builder(default)]
  pub constraints: Constraints,
  #[builder(default)]
  pub additional: AdditionalMembers,
  pub discriminator: Option<DiscriminatorInfo>,
  #[builder(default)]
  pub nullable: bool,
  #[builder(default)]
  pub read_only: bool,
  pub default: Option<serde_json::Value>,
  pub description: Option<String>,
}

impl SchemaNode {
  /// An unconstrained node (`{}` / `true` schema).
  pub(crate) fn any() -> Self {
    Self::builder().kind(SchemaKind::Any).build()
  }

  pub(crate) fn reference(pointer: impl Into<String>) -> Self {
    Self::builder()
      .kind(SchemaKind::Reference)
      .reference(pointer.into())
      .build()
  }

  pub(crate) fn primitive(kind: SchemaKind) -> Self {
    Self::builder().kind(kind).build()
  }

  /// True when the node matches only the `null` literal.
  pub(crate) fn is_null_only(&self) -> bool {
    self.kind == SchemaKind::Null
  }

  /// Children of the given composition keyword, if that group exists.
  pub(crate) fn composition_children(&self, keyword: CompositionKeyword) -> Option<&[SchemaNode]> {
    self
      .compositions
      .iter()
      .find(|group| group.keyword == keyword)
      .map(|group| group.children.as_slice())
  }
}

/// A named, top-level schema bound to an identifier, emitted as one
/// reusable declaration. `name` is the raw component key from the document;
/// `ident` is the normalized target-language identifier.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NamedDeclaration {
  pub name: String,
  pub ident: String,
  pub node: SchemaNode,
}
