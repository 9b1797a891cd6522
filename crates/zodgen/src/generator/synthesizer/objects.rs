use super::Synthesizer;
use crate::generator::{
  ast::{CatchAll, ObjectMember, ZodExpr},
  errors::GenerationResult,
  model::{AdditionalMembers, SchemaNode},
};

/// Object synthesis: one member expression per property, optional unless
/// required, `readOnly` as an immutability marker that leaves optionality
/// untouched, and `additionalProperties` as the catch-all policy.
pub(super) fn synthesize(synthesizer: &Synthesizer<'_>, context: &str, node: &SchemaNode) -> GenerationResult<ZodExpr> {
  let mut members = Vec::with_capacity(node.members.len());

  for (name, child) in &node.members {
    let child_context = format!("{context}.{name}");
    let expr = synthesizer.synthesize(&child_context, child)?;
    members.push(ObjectMember {
      key: name.clone(),
      expr,
      optional: !node.required.contains(name),
      read_only: child.read_only,
      default: child.default.clone(),
    });
  }

  let catch_all = match &node.additional {
    AdditionalMembers::Open => CatchAll::Open,
    AdditionalMembers::Closed => CatchAll::Closed,
    AdditionalMembers::Schema(schema) => {
      let schema_context = format!("{context}.*");
      CatchAll::Schema(Box::new(synthesizer.synthesize(&schema_context, schema)?))
    }
  };

  Ok(ZodExpr::Object { members, catch_all })
}
