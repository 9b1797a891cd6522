use std::fmt::{self, Write as _};

use super::{ArrayCheck, CatchAll, NumberCheck, ObjectMember, StringCheck, ZodExpr};
use crate::generator::naming::identifiers::is_plain_key;

const INDENT: &str = "  ";

impl ZodExpr {
  pub(crate) fn render(&self) -> String {
    let mut out = String::new();
    self.write(&mut out, 0);
    out
  }

  fn write(&self, out: &mut String, depth: usize) {
    match self {
      Self::Any => out.push_str("z.any()"),
      Self::Null => out.push_str("z.null()"),
      Self::Boolean { coerce } => {
        out.push_str(if *coerce { "z.coerce.boolean()" } else { "z.boolean()" });
      }
      Self::String { checks } => {
        out.push_str("z.string()");
        for check in checks {
          write_string_check(out, check);
        }
      }
      Self::Number {
        integer,
        coerce,
        checks,
      } => {
        out.push_str(if *coerce { "z.coerce.number()" } else { "z.number()" });
        if *integer {
          out.push_str(".int()");
        }
        for check in checks {
          write_number_check(out, check);
        }
      }
      Self::Literal(value) => {
        let _ = write!(out, "z.literal({})", json_literal(value));
      }
      Self::EnumOf(values) => {
        let quoted: Vec<String> = values.iter().map(|v| json_string(v)).collect();
        let _ = write!(out, "z.enum([{}])", quoted.join(", "));
      }
      Self::LiteralUnion(values) => {
        let literals: Vec<String> = values.iter().map(|v| format!("z.literal({})", json_literal(v))).collect();
        let _ = write!(out, "z.union([{}])", literals.join(", "));
      }
      Self::Object { members, catch_all } => {
        write_object(out, members, depth);
        match catch_all {
          CatchAll::Open => out.push_str(".passthrough()"),
          CatchAll::Closed => out.push_str(".strict()"),
          CatchAll::Schema(schema) => {
            out.push_str(".catchall(");
            schema.write(out, depth);
            out.push(')');
          }
        }
      }
      Self::Array { item, checks } => {
        out.push_str("z.array(");
        item.write(out, depth);
        out.push(')');
        for check in checks {
          write_array_check(out, check);
        }
      }
      Self::Tuple(items) => {
        out.push_str("z.tuple([");
        write_list(out, items, depth);
        out.push_str("])");
      }
      Self::Union(variants) => {
        out.push_str("z.union([");
        write_list(out, variants, depth);
        out.push_str("])");
      }
      Self::DiscriminatedUnion {
        discriminator,
        variants,
      } => {
        let _ = write!(out, "z.discriminatedUnion({}, [", json_string(discriminator));
        write_list(out, variants, depth);
        out.push_str("])");
      }
      Self::Intersection { base, rest } => {
        base.write(out, depth);
        for expr in rest {
          out.push_str(".and(");
          expr.write(out, depth);
          out.push(')');
        }
      }
      Self::NegatedRefinement(negated) => {
        out.push_str("z.any().refine((value) => !(");
        negated.write(out, depth);
        out.push_str(").safeParse(value).success)");
      }
      Self::Reference { ident, lazy } => {
        if *lazy {
          let _ = write!(out, "z.lazy(() => {ident})");
        } else {
          out.push_str(ident);
        }
      }
      Self::Nullable(inner) => {
        inner.write(out, depth);
        out.push_str(".nullable()");
      }
    }
  }
}

impl fmt::Display for ZodExpr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render())
  }
}

fn write_object(out: &mut String, members: &[ObjectMember], depth: usize) {
  if members.is_empty() {
    out.push_str("z.object({})");
    return;
  }

  out.push_str("z.object({\n");
  for member in members {
    for _ in 0..=depth {
      out.push_str(INDENT);
    }
    write_member(out, member, depth + 1);
    out.push_str(",\n");
  }
  for _ in 0..depth {
    out.push_str(INDENT);
  }
  out.push_str("})");
}

fn write_member(out: &mut String, member: &ObjectMember, depth: usize) {
  if is_plain_key(&member.key) {
    out.push_str(&member.key);
  } else {
    out.push_str(&json_string(&member.key));
  }
  out.push_str(": ");
  member.expr.write(out, depth);

  if member.read_only {
    out.push_str(".readonly()");
  }
  if member.optional {
    out.push_str(".optional()");
  }
  if let Some(default) = &member.default {
    let _ = write!(out, ".default({})", json_literal(default));
  }
}

fn write_list(out: &mut String, exprs: &[ZodExpr], depth: usize) {
  for (i, expr) in exprs.iter().enumerate() {
    if i > 0 {
      out.push_str(", ");
    }
    expr.write(out, depth);
  }
}

fn write_string_check(out: &mut String, check: &StringCheck) {
  let _ = match check {
    StringCheck::Format(format) => write!(out, ".{}()", format.method()),
    StringCheck::Length(n) => write!(out, ".length({n})"),
    StringCheck::Min(n) => write!(out, ".min({n})"),
    StringCheck::Max(n) => write!(out, ".max({n})"),
    StringCheck::Regex(pattern) => write!(out, ".regex(/{}/)", escape_regex_literal(pattern)),
  };
}

fn write_number_check(out: &mut String, check: &NumberCheck) {
  let _ = match check {
    NumberCheck::Gt(n) => write!(out, ".gt({})", format_number(*n)),
    NumberCheck::Gte(n) => write!(out, ".gte({})", format_number(*n)),
    NumberCheck::Lt(n) => write!(out, ".lt({})", format_number(*n)),
    NumberCheck::Lte(n) => write!(out, ".lte({})", format_number(*n)),
    NumberCheck::MultipleOf(n) => write!(out, ".multipleOf({})", format_number(*n)),
  };
}

fn write_array_check(out: &mut String, check: &ArrayCheck) {
  let _ = match check {
    ArrayCheck::Length(n) => write!(out, ".length({n})"),
    ArrayCheck::Min(n) => write!(out, ".min({n})"),
    ArrayCheck::Max(n) => write!(out, ".max({n})"),
  };
}

/// Numbers print as integers when they are whole, keeping `5` from
/// rendering as `5.0` in the emitted TypeScript.
fn format_number(value: f64) -> String {
  if value.fract() == 0.0 && value.is_finite() && value.abs() < 9e15 {
    format!("{}", value as i64)
  } else {
    format!("{value}")
  }
}

fn json_literal(value: &serde_json::Value) -> String {
  // Serializing an in-memory Value cannot fail.
  serde_json::to_string(value).expect("JSON literal serialization")
}

fn json_string(value: &str) -> String {
  serde_json::to_string(value).expect("JSON string serialization")
}

/// Escapes unescaped `/` so the pattern can live inside a `/.../` regex
/// literal without terminating it early.
fn escape_regex_literal(pattern: &str) -> String {
  let mut out = String::with_capacity(pattern.len());
  let mut escaped = false;
  for c in pattern.chars() {
    if c == '/' && !escaped {
      out.push('\\');
    }
    escaped = c == '\\' && !escaped;
    out.push(c);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_unescaped_slashes_only() {
    assert_eq!(escape_regex_literal("a/b"), "a\\/b");
    assert_eq!(escape_regex_literal("a\\/b"), "a\\/b");
    assert_eq!(escape_regex_literal("\\\\/"), "\\\\\\/");
  }

  #[test]
  fn whole_numbers_render_without_fraction() {
    assert_eq!(format_number(5.0), "5");
    assert_eq!(format_number(-2.0), "-2");
    assert_eq!(format_number(0.5), "0.5");
  }
}
