mod compositions;
mod objects;
mod primitives;

use std::{cell::RefCell, collections::BTreeSet};

use crate::generator::{
  ast::ZodExpr,
  errors::GenerationResult,
  metrics::GenerationWarning,
  model::{SchemaKind, SchemaNode},
  resolver::RefResolver,
};

/// Whether scalar values arrive as wire strings and must be coerced before
/// validation. Applied explicitly at synthesis time, never silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CoercionMode {
  #[default]
  None,
  WireStrings,
}

/// Schema Model -> Zod type expression.
///
/// Dispatches exhaustively on the node's primary kind, canonicalizes
/// constraints, and merges sibling composition groups so nothing the node
/// carries is discarded. Unmatched shapes degrade to `z.any()` through the
/// warning channel; unresolved references are fatal.
pub(crate) struct Synthesizer<'a> {
  resolver: &'a RefResolver,
  cyclic: &'a BTreeSet<String>,
  coercion: CoercionMode,
  warnings: RefCell<Vec<GenerationWarning>>,
}

impl<'a> Synthesizer<'a> {
  pub(crate) fn new(resolver: &'a RefResolver, cyclic: &'a BTreeSet<String>) -> Self {
    Self::with_coercion(resolver, cyclic, CoercionMode::None)
  }

  pub(crate) fn with_coercion(
    resolver: &'a RefResolver,
    cyclic: &'a BTreeSet<String>,
    coercion: CoercionMode,
  ) -> Self {
    Self {
      resolver,
      cyclic,
      coercion,
      warnings: RefCell::new(Vec::new()),
    }
  }

  pub(crate) fn take_warnings(&self) -> Vec<GenerationWarning> {
    self.warnings.take()
  }

  pub(crate) fn warn(&self, warning: GenerationWarning) {
    self.warnings.borrow_mut().push(warning);
  }

  fn coerce_scalars(&self) -> bool {
    self.coercion == CoercionMode::WireStrings
  }

  /// Synthesizes the expression for one node. Kind-specific rules first,
  /// then sibling composition groups, then the nullable wrapper, applied
  /// exactly once.
  pub(crate) fn synthesize(&self, context: &str, node: &SchemaNode) -> GenerationResult<ZodExpr> {
    let primary = self.synthesize_kind(context, node)?;

    let consumed = match node.kind {
      SchemaKind::Composition(keyword) => Some(keyword),
      _ => None,
    };

    let mut rest = Vec::new();
    for group in &node.compositions {
      if consumed == Some(group.keyword) {
        continue;
      }
      rest.push(compositions::synthesize(self, context, node, group.keyword)?);
    }

    let expr = if rest.is_empty() {
      primary
    } else {
      ZodExpr::Intersection {
        base: Box::new(primary),
        rest,
      }
    };

    Ok(if node.nullable { expr.nullable() } else { expr })
  }

  fn synthesize_kind(&self, context: &str, node: &SchemaNode) -> GenerationResult<ZodExpr> {
    match node.kind {
      SchemaKind::Enum => Ok(primitives::enumeration(self, context, node)),
      SchemaKind::Object => objects::synthesize(self, context, node),
      SchemaKind::String => Ok(primitives::string(self, context, node)),
      SchemaKind::Number => Ok(primitives::number(self, node, false)),
      SchemaKind::Integer => Ok(primitives::number(self, node, true)),
      SchemaKind::Boolean => Ok(ZodExpr::Boolean {
        coerce: self.coerce_scalars(),
      }),
      SchemaKind::Null => Ok(ZodExpr::Null),
      SchemaKind::Array => primitives::array(self, context, node),
      SchemaKind::Composition(keyword) => compositions::synthesize(self, context, node, keyword),
      SchemaKind::Reference => self.reference(context, node),
      SchemaKind::Any => Ok(ZodExpr::Any),
    }
  }

  fn reference(&self, context: &str, node: &SchemaNode) -> GenerationResult<ZodExpr> {
    let Some(pointer) = &node.reference else {
      self.warn(GenerationWarning::UnsupportedShape {
        context: context.to_string(),
        message: "reference node without a pointer".to_string(),
      });
      return Ok(ZodExpr::Any);
    };
    self.reference_expr(pointer)
  }

  /// Resolves a pointer into a reference expression, lazily wrapped when
  /// the target participates in a cycle. References are never inlined.
  pub(crate) fn reference_expr(&self, pointer: &str) -> GenerationResult<ZodExpr> {
    let ident = self.resolver.resolve(pointer)?;
    let raw = self.resolver.resolve_raw(pointer)?;
    Ok(ZodExpr::Reference {
      ident,
      lazy: self.cyclic.contains(&raw),
    })
  }
}
