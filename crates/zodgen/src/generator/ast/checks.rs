use crate::generator::model::Constraints;

/// String refinements keyed by `format`. Only the single most-specific
/// match applies; unknown formats fall through with no refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringFormat {
  Email,
  Uuid,
  Url,
  DateTime,
  Date,
  Time,
  Duration,
  Ip,
}

impl StringFormat {
  pub(crate) fn from_format(format: &str) -> Option<Self> {
    match format {
      "email" | "idn-email" => Some(Self::Email),
      "uuid" => Some(Self::Uuid),
      "uri" | "url" | "iri" => Some(Self::Url),
      "date-time" => Some(Self::DateTime),
      "date" => Some(Self::Date),
      "time" => Some(Self::Time),
      "duration" => Some(Self::Duration),
      "ipv4" | "ipv6" | "ip" => Some(Self::Ip),
      _ => None,
    }
  }

  pub(crate) fn method(self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::Uuid => "uuid",
      Self::Url => "url",
      Self::DateTime => "datetime",
      Self::Date => "date",
      Self::Time => "time",
      Self::Duration => "duration",
      Self::Ip => "ip",
    }
  }

  /// Formats whose values are not free-form strings; a sibling `pattern`
  /// would fight the format refinement, so it is dropped for these.
  pub(crate) fn suppresses_pattern(format: &str) -> bool {
    matches!(
      format,
      "date" | "date-time" | "duration" | "time" | "binary" | "byte" | "uuid"
    )
  }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StringCheck {
  Format(StringFormat),
  /// Exact length; canonical replacement for equal min/max bounds.
  Length(u64),
  Min(u64),
  Max(u64),
  Regex(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NumberCheck {
  /// Exclusive lower bound.
  Gt(f64),
  /// Inclusive lower bound.
  Gte(f64),
  Lt(f64),
  Lte(f64),
  MultipleOf(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArrayCheck {
  Length(u64),
  Min(u64),
  Max(u64),
}

/// Canonicalizes string bounds: `minLength == maxLength` collapses to one
/// exact-length check, never both bounds alongside it. The pattern is
/// appended separately by the synthesizer once validated.
pub(crate) fn string_checks(constraints: &Constraints) -> Vec<StringCheck> {
  let mut checks = Vec::new();

  match (constraints.min_length, constraints.max_length) {
    (Some(min), Some(max)) if min == max => checks.push(StringCheck::Length(min)),
    (min, max) => {
      if let Some(min) = min {
        checks.push(StringCheck::Min(min));
      }
      if let Some(max) = max {
        checks.push(StringCheck::Max(max));
      }
    }
  }

  checks
}

/// Canonicalizes numeric bounds to at most one lower and one upper bound.
///
/// When an inclusive and an exclusive bound resolve to the same boundary
/// value the exclusive form wins; otherwise the stricter bound wins. The
/// output never contains both `gte(n)` and `gt(n)`.
pub(crate) fn number_checks(constraints: &Constraints) -> Vec<NumberCheck> {
  let mut checks = Vec::new();

  match (constraints.minimum, constraints.exclusive_minimum) {
    (Some(min), Some(exclusive)) => {
      if exclusive >= min {
        checks.push(NumberCheck::Gt(exclusive));
      } else {
        checks.push(NumberCheck::Gte(min));
      }
    }
    (Some(min), None) => checks.push(NumberCheck::Gte(min)),
    (None, Some(exclusive)) => checks.push(NumberCheck::Gt(exclusive)),
    (None, None) => {}
  }

  match (constraints.maximum, constraints.exclusive_maximum) {
    (Some(max), Some(exclusive)) => {
      if exclusive <= max {
        checks.push(NumberCheck::Lt(exclusive));
      } else {
        checks.push(NumberCheck::Lte(max));
      }
    }
    (Some(max), None) => checks.push(NumberCheck::Lte(max)),
    (None, Some(exclusive)) => checks.push(NumberCheck::Lt(exclusive)),
    (None, None) => {}
  }

  if let Some(step) = constraints.multiple_of {
    checks.push(NumberCheck::MultipleOf(step));
  }

  checks
}

/// Canonicalizes array bounds; `minItems == maxItems` collapses to one
/// exact-length check.
pub(crate) fn array_checks(constraints: &Constraints) -> Vec<ArrayCheck> {
  let mut checks = Vec::new();

  match (constraints.min_items, constraints.max_items) {
    (Some(min), Some(max)) if min == max => checks.push(ArrayCheck::Length(min)),
    (min, max) => {
      if let Some(min) = min {
        checks.push(ArrayCheck::Min(min));
      }
      if let Some(max) = max {
        checks.push(ArrayCheck::Max(max));
      }
    }
  }

  checks
}
