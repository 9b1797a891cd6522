use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Words that cannot be used as bare identifiers in the emitted TypeScript
/// module. Includes strict-mode and module-context reserved words.
pub(crate) static RESERVED_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do", "else", "enum",
    "export", "extends", "false", "finally", "for", "function", "if", "import", "in", "instanceof", "new", "null",
    "return", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
    "let", "static", "await", "async", "implements", "interface", "package", "private", "protected", "public",
    // Not keywords, but shadowing these breaks every emitted expression.
    "z", "undefined",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static PLAIN_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Case style applied to declaration identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum IdentCase {
  #[default]
  Pascal,
  Camel,
}

/// Naming convention threaded explicitly through every resolver call.
///
/// Carried as a value rather than read from ambient state so two runs with
/// different conventions can never observe each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NamingConvention {
  pub case: IdentCase,
  /// Appended when the cased result collides with a reserved word.
  pub reserved_suffix: String,
}

impl Default for NamingConvention {
  fn default() -> Self {
    Self {
      case: IdentCase::Pascal,
      reserved_suffix: "Schema".to_string(),
    }
  }
}

/// Transliterates to ASCII, replaces invalid characters with underscores,
/// collapses consecutive underscores, and trims leading/trailing ones.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Converts a raw component name into a target-language identifier under
/// the given convention.
///
/// Rules: sanitize, apply the case style, prefix digit-led results, and
/// suffix reserved words with the convention's suffix.
pub(crate) fn to_identifier(name: &str, convention: &NamingConvention) -> String {
  let sanitized = sanitize(name);
  if sanitized.is_empty() {
    return match convention.case {
      IdentCase::Pascal => "Unnamed".to_string(),
      IdentCase::Camel => "unnamed".to_string(),
    };
  }

  let mut ident = match convention.case {
    IdentCase::Pascal => sanitized.to_pascal_case(),
    IdentCase::Camel => sanitized.to_camel_case(),
  };

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    let prefix = match convention.case {
      IdentCase::Pascal => 'T',
      IdentCase::Camel => '_',
    };
    ident.insert(0, prefix);
  }

  if RESERVED_IDENTIFIERS.contains(ident.as_str()) {
    ident.push_str(&convention.reserved_suffix);
  }

  ident
}

/// Ensures a name is unique within a set of used names, appending a numeric
/// suffix if needed.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

/// True when a member key can appear unquoted in an object literal.
/// Reserved words are legal as literal keys, so only the shape matters.
pub(crate) fn is_plain_key(key: &str) -> bool {
  PLAIN_KEY_RE.is_match(key)
}
