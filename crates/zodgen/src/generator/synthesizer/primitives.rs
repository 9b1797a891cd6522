use regex::Regex;

use super::Synthesizer;
use crate::generator::{
  ast::{StringCheck, StringFormat, ZodExpr, checks},
  errors::GenerationResult,
  metrics::GenerationWarning,
  model::{Items, SchemaNode},
};

/// String synthesis: base expression, the single most-specific format
/// refinement, canonicalized length bounds, then the pattern.
pub(super) fn string(synthesizer: &Synthesizer<'_>, context: &str, node: &SchemaNode) -> ZodExpr {
  let constraints = &node.constraints;
  let mut string_checks = Vec::new();

  if let Some(format) = &constraints.format
    && let Some(refinement) = StringFormat::from_format(format)
  {
    string_checks.push(StringCheck::Format(refinement));
  }

  string_checks.extend(checks::string_checks(constraints));

  if let Some(pattern) = &constraints.pattern {
    let format_owns_shape = constraints
      .format
      .as_deref()
      .is_some_and(StringFormat::suppresses_pattern);

    if !format_owns_shape {
      if Regex::new(pattern).is_ok() {
        string_checks.push(StringCheck::Regex(pattern.clone()));
      } else {
        synthesizer.warn(GenerationWarning::InvalidPattern {
          context: context.to_string(),
          pattern: pattern.clone(),
        });
      }
    }
  }

  ZodExpr::String { checks: string_checks }
}

/// Numeric synthesis with canonicalized bounds: at most one lower and one
/// upper bound survive, the exclusive form winning ties.
pub(super) fn number(synthesizer: &Synthesizer<'_>, node: &SchemaNode, integer: bool) -> ZodExpr {
  ZodExpr::Number {
    integer,
    coerce: synthesizer.coerce_scalars(),
    checks: checks::number_checks(&node.constraints),
  }
}

pub(super) fn array(synthesizer: &Synthesizer<'_>, context: &str, node: &SchemaNode) -> GenerationResult<ZodExpr> {
  match &node.items {
    Some(Items::Tuple(items)) => {
      let exprs = items
        .iter()
        .enumerate()
        .map(|(i, item)| synthesizer.synthesize(&format!("{context}[{i}]"), item))
        .collect::<GenerationResult<Vec<_>>>()?;
      Ok(ZodExpr::Tuple(exprs))
    }
    Some(Items::Single(item)) => {
      let item_expr = synthesizer.synthesize(&format!("{context}[]"), item)?;
      Ok(ZodExpr::Array {
        item: Box::new(item_expr),
        checks: checks::array_checks(&node.constraints),
      })
    }
    None => Ok(ZodExpr::Array {
      item: Box::new(ZodExpr::Any),
      checks: checks::array_checks(&node.constraints),
    }),
  }
}

/// Enum/const synthesis: a literal-union expression preserving value order
/// and literal types. A `null` literal folds into the nullable wrapper
/// instead of becoming a branch.
pub(super) fn enumeration(synthesizer: &Synthesizer<'_>, context: &str, node: &SchemaNode) -> ZodExpr {
  let had_null = node.enum_values.iter().any(serde_json::Value::is_null);
  let values: Vec<serde_json::Value> = node
    .enum_values
    .iter()
    .filter(|value| !value.is_null())
    .cloned()
    .collect();

  if values.is_empty() {
    if had_null {
      return ZodExpr::Null;
    }
    synthesizer.warn(GenerationWarning::UnsupportedShape {
      context: context.to_string(),
      message: "empty enum".to_string(),
    });
    return ZodExpr::Any;
  }

  let expr = if values.len() == 1 {
    ZodExpr::Literal(values.into_iter().next().unwrap_or_default())
  } else if values.iter().all(serde_json::Value::is_string) {
    ZodExpr::EnumOf(
      values
        .iter()
        .filter_map(|value| value.as_str().map(str::to_string))
        .collect(),
    )
  } else {
    ZodExpr::LiteralUnion(values)
  };

  if had_null { expr.nullable() } else { expr }
}
