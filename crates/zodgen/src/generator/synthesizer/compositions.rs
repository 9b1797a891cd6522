use indexmap::IndexMap;

use super::{Synthesizer, objects};
use crate::generator::{
  ast::ZodExpr,
  errors::GenerationResult,
  metrics::GenerationWarning,
  model::{AdditionalMembers, CompositionKeyword, DiscriminatorInfo, SchemaKind, SchemaNode},
};

/// Synthesizes one composition group of `node`. The discriminator applies
/// only to `oneOf`; `anyOf` produces the same union shape (exclusivity is a
/// validation-time concern, not a type-shape one).
pub(super) fn synthesize(
  synthesizer: &Synthesizer<'_>,
  context: &str,
  node: &SchemaNode,
  keyword: CompositionKeyword,
) -> GenerationResult<ZodExpr> {
  let children = node.composition_children(keyword).unwrap_or(&[]);

  match keyword {
    CompositionKeyword::OneOf => union(synthesizer, context, children, node.discriminator.as_ref()),
    CompositionKeyword::AnyOf => union(synthesizer, context, children, None),
    CompositionKeyword::AllOf => all_of(synthesizer, context, node, children),
    CompositionKeyword::Not => negation(synthesizer, context, children),
  }
}

/// Discriminated union when a discriminator property plus variant mapping
/// is present, otherwise an undiscriminated union. A `null` branch folds
/// into a single nullable wrapper rather than a duplicated null variant.
fn union(
  synthesizer: &Synthesizer<'_>,
  context: &str,
  children: &[SchemaNode],
  discriminator: Option<&DiscriminatorInfo>,
) -> GenerationResult<ZodExpr> {
  if let Some(discriminator) = discriminator
    && !discriminator.mapping.is_empty()
  {
    let variants = discriminator
      .mapping
      .iter()
      .map(|(_, pointer)| synthesizer.reference_expr(pointer))
      .collect::<GenerationResult<Vec<_>>>()?;
    return Ok(ZodExpr::DiscriminatedUnion {
      discriminator: discriminator.property.clone(),
      variants,
    });
  }

  let had_null = children.iter().any(SchemaNode::is_null_only);
  let variants = children
    .iter()
    .filter(|child| !child.is_null_only())
    .enumerate()
    .map(|(i, child)| synthesizer.synthesize(&format!("{context}|{i}"), child))
    .collect::<GenerationResult<Vec<_>>>()?;

  let expr = match variants.len() {
    0 => {
      if had_null {
        return Ok(ZodExpr::Null);
      }
      synthesizer.warn(GenerationWarning::UnsupportedShape {
        context: context.to_string(),
        message: "union with no variants".to_string(),
      });
      ZodExpr::Any
    }
    1 => variants.into_iter().next().unwrap_or(ZodExpr::Any),
    _ => ZodExpr::Union(variants),
  };

  Ok(if had_null { expr.nullable() } else { expr })
}

/// `allOf` merging: inline object branches flatten into one object whose
/// required set is the union of each branch's required names. Any reference
/// branch switches to an intersection instead, preserving the dependency
/// edge rather than duplicating the referenced shape.
fn all_of(
  synthesizer: &Synthesizer<'_>,
  context: &str,
  node: &SchemaNode,
  children: &[SchemaNode],
) -> GenerationResult<ZodExpr> {
  if children.is_empty() {
    synthesizer.warn(GenerationWarning::UnsupportedShape {
      context: context.to_string(),
      message: "allOf with no branches".to_string(),
    });
    return Ok(ZodExpr::Any);
  }

  // Sibling members belong to this group only when the node dispatched
  // here as its primary kind; an object node with an allOf sibling group
  // has already consumed its own members.
  let siblings = if node.kind == SchemaKind::Composition(CompositionKeyword::AllOf) {
    Some(node)
  } else {
    None
  };

  let flattenable = children
    .iter()
    .all(|child| child.kind == SchemaKind::Object && child.compositions.is_empty());
  if flattenable {
    return objects::synthesize(synthesizer, context, &flatten(siblings, children));
  }

  let mut exprs = children
    .iter()
    .enumerate()
    .map(|(i, child)| synthesizer.synthesize(&format!("{context}&{i}"), child))
    .collect::<GenerationResult<Vec<_>>>()?;

  if let Some(siblings) = siblings
    && !siblings.members.is_empty()
  {
    exprs.push(objects::synthesize(synthesizer, context, &sibling_object(siblings))?);
  }

  let base = exprs.remove(0);
  if exprs.is_empty() {
    return Ok(base);
  }

  Ok(ZodExpr::Intersection {
    base: Box::new(base),
    rest: exprs,
  })
}

/// Merges inline branches (and the node's own sibling members, when they
/// belong to this group) into one object node. Later branches override
/// earlier ones; sibling members override every branch.
fn flatten(siblings: Option<&SchemaNode>, children: &[SchemaNode]) -> SchemaNode {
  let mut members = IndexMap::new();
  let mut required = std::collections::BTreeSet::new();
  let mut additional = AdditionalMembers::Open;

  for child in children {
    for (name, member) in &child.members {
      members.insert(name.clone(), member.clone());
    }
    required.extend(child.required.iter().cloned());
    if additional == AdditionalMembers::Open {
      additional = child.additional.clone();
    }
  }

  if let Some(node) = siblings {
    for (name, member) in &node.members {
      members.insert(name.clone(), member.clone());
    }
    required.extend(node.required.iter().cloned());
    if node.additional != AdditionalMembers::Open {
      additional = node.additional.clone();
    }
  }

  SchemaNode::builder()
    .kind(SchemaKind::Object)
    .members(members)
    .required(required)
    .additional(additional)
    .build()
}

fn sibling_object(node: &SchemaNode) -> SchemaNode {
  SchemaNode::builder()
    .kind(SchemaKind::Object)
    .members(node.members.clone())
    .required(node.required.clone())
    .additional(node.additional.clone())
    .build()
}

/// `not`: a refinement predicate wrapping the child's inverse-match check.
/// The result is "anything satisfying this refinement", not a structural
/// type.
fn negation(synthesizer: &Synthesizer<'_>, context: &str, children: &[SchemaNode]) -> GenerationResult<ZodExpr> {
  let Some(child) = children.first() else {
    synthesizer.warn(GenerationWarning::UnsupportedShape {
      context: context.to_string(),
      message: "not with no child".to_string(),
    });
    return Ok(ZodExpr::Any);
  };

  let child_expr = synthesizer.synthesize(&format!("{context}!"), child)?;
  Ok(ZodExpr::NegatedRefinement(Box::new(child_expr)))
}
