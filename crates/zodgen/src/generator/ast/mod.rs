pub(crate) mod checks;
mod render;

pub(crate) use checks::{ArrayCheck, NumberCheck, StringCheck, StringFormat};

/// A composable Zod constructor expression. Rendering is deterministic:
/// identical trees always produce byte-identical text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ZodExpr {
  Any,
  Null,
  Boolean {
    coerce: bool,
  },
  String {
    checks: Vec<StringCheck>,
  },
  Number {
    integer: bool,
    coerce: bool,
    checks: Vec<NumberCheck>,
  },
  Literal(serde_json::Value),
  /// `z.enum([...])` — only valid for all-string literal sets.
  EnumOf(Vec<String>),
  /// Union of heterogeneous literals, value order preserved.
  LiteralUnion(Vec<serde_json::Value>),
  Object {
    members: Vec<ObjectMember>,
    catch_all: CatchAll,
  },
  Array {
    item: Box<ZodExpr>,
    checks: Vec<ArrayCheck>,
  },
  Tuple(Vec<ZodExpr>),
  Union(Vec<ZodExpr>),
  DiscriminatedUnion {
    discriminator: String,
    variants: Vec<ZodExpr>,
  },
  /// `base.and(rest[0]).and(rest[1])...`
  Intersection {
    base: Box<ZodExpr>,
    rest: Vec<ZodExpr>,
  },
  /// "Anything not matching the child": `z.any().refine(...)`.
  NegatedRefinement(Box<ZodExpr>),
  /// A resolved identifier, never inline-expanded. `lazy` references wrap
  /// in `z.lazy(() => ...)` because the target participates in a cycle.
  Reference {
    ident: String,
    lazy: bool,
  },
  Nullable(Box<ZodExpr>),
}

/// One property of an object expression. Decorators render in a fixed
/// order: `.readonly()`, `.optional()`, `.default(...)`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ObjectMember {
  pub key: String,
  pub expr: ZodExpr,
  pub optional: bool,
  pub read_only: bool,
  pub default: Option<serde_json::Value>,
}

impl ObjectMember {
  pub(crate) fn new(key: impl Into<String>, expr: ZodExpr) -> Self {
    Self {
      key: key.into(),
      expr,
      optional: false,
      read_only: false,
      default: None,
    }
  }

  pub(crate) fn optional(mut self) -> Self {
    self.optional = true;
    self
  }
}

/// Unknown-key handling for object expressions.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum CatchAll {
  /// Open record: unknown values pass through.
  #[default]
  Open,
  /// Closed record: unknown keys are rejected.
  Closed,
  /// Typed catch-all schema.
  Schema(Box<ZodExpr>),
}

impl ZodExpr {
  pub(crate) fn string() -> Self {
    Self::String { checks: vec![] }
  }

  pub(crate) fn number() -> Self {
    Self::Number {
      integer: false,
      coerce: false,
      checks: vec![],
    }
  }

  /// Wraps in a nullable marker exactly once; an already-nullable
  /// expression is returned unchanged.
  pub(crate) fn nullable(self) -> Self {
    match self {
      Self::Nullable(_) | Self::Null => self,
      other => Self::Nullable(Box::new(other)),
    }
  }
}

#[cfg(test)]
mod tests;
