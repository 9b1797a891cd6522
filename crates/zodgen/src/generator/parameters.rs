use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use crate::generator::{
  ast::{CatchAll, ObjectMember, ZodExpr},
  errors::{GenerationResult, GeneratorError},
  metrics::GenerationWarning,
  model::{SchemaKind, SchemaNode},
  resolver::RefResolver,
  synthesizer::{CoercionMode, Synthesizer},
};

static TEMPLATE_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Where a parameter travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Path,
  Query,
  Header,
  Cookie,
}

impl ParameterLocation {
  pub(crate) fn all() -> [Self; 4] {
    [Self::Path, Self::Query, Self::Header, Self::Cookie]
  }

  /// Query, header, and cookie values arrive as wire strings and must be
  /// coerced before validation. Path parameters follow the document's
  /// declared types uncoerced.
  fn coercion(self) -> CoercionMode {
    match self {
      Self::Path => CoercionMode::None,
      Self::Query | Self::Header | Self::Cookie => CoercionMode::WireStrings,
    }
  }
}

/// One lowered operation parameter, before grouping.
#[derive(Debug, Clone)]
pub(crate) struct RawParameter {
  pub name: String,
  pub location: ParameterLocation,
  pub required: bool,
  pub node: SchemaNode,
}

/// Per-location object expressions for one operation. Locations with no
/// parameters stay `None`.
#[derive(Debug, Clone, Default)]
pub(crate) struct MergedParameterGroups {
  pub path: Option<ZodExpr>,
  pub query: Option<ZodExpr>,
  pub header: Option<ZodExpr>,
  pub cookie: Option<ZodExpr>,
}

impl MergedParameterGroups {
  pub(crate) fn get(&self, location: ParameterLocation) -> Option<&ZodExpr> {
    match location {
      ParameterLocation::Path => self.path.as_ref(),
      ParameterLocation::Query => self.query.as_ref(),
      ParameterLocation::Header => self.header.as_ref(),
      ParameterLocation::Cookie => self.cookie.as_ref(),
    }
  }

  fn set(&mut self, location: ParameterLocation, expr: ZodExpr) {
    let slot = match location {
      ParameterLocation::Path => &mut self.path,
      ParameterLocation::Query => &mut self.query,
      ParameterLocation::Header => &mut self.header,
      ParameterLocation::Cookie => &mut self.cookie,
    };
    *slot = Some(expr);
  }

  pub(crate) fn len(&self) -> usize {
    ParameterLocation::all()
      .into_iter()
      .filter(|location| self.get(*location).is_some())
      .count()
  }
}

/// Groups an operation's parameters by location into one object expression
/// per location.
///
/// Array-valued query parameters stay one array-typed member regardless of
/// wire delimiting; duplicate names within one location are fatal. Path
/// template parameters missing from the declarations are synthesized as
/// required strings.
pub(crate) struct ParameterMerger<'a> {
  resolver: &'a RefResolver,
  cyclic: &'a BTreeSet<String>,
}

impl<'a> ParameterMerger<'a> {
  pub(crate) fn new(resolver: &'a RefResolver, cyclic: &'a BTreeSet<String>) -> Self {
    Self { resolver, cyclic }
  }

  pub(crate) fn merge(
    &self,
    operation_id: &str,
    path: &str,
    parameters: &[RawParameter],
    warnings: &mut Vec<GenerationWarning>,
  ) -> GenerationResult<MergedParameterGroups> {
    let mut groups = MergedParameterGroups::default();

    for location in ParameterLocation::all() {
      let mut members = Vec::new();
      let mut seen = BTreeSet::new();

      let located = parameters.iter().filter(|p| p.location == location);
      let synthesizer = Synthesizer::with_coercion(self.resolver, self.cyclic, location.coercion());

      for parameter in located {
        if !seen.insert(parameter.name.clone()) {
          return Err(GeneratorError::DuplicateParameter {
            operation: operation_id.to_string(),
            location,
            name: parameter.name.clone(),
          });
        }

        let context = format!("{operation_id}.{}.{}", location, parameter.name);
        let expr = synthesizer.synthesize(&context, &parameter.node)?;
        members.push(ObjectMember {
          key: parameter.name.clone(),
          expr,
          optional: !parameter.required,
          read_only: false,
          default: parameter.node.default.clone(),
        });
      }

      if location == ParameterLocation::Path {
        for name in undeclared_template_params(path, &seen) {
          members.push(ObjectMember::new(name, ZodExpr::string()));
        }
      }

      warnings.extend(synthesizer.take_warnings());

      if !members.is_empty() {
        groups.set(
          location,
          ZodExpr::Object {
            members,
            catch_all: CatchAll::Open,
          },
        );
      }
    }

    Ok(groups)
  }
}

/// Builds a required-string fallback for a parameter that carries no
/// schema.
pub(crate) fn untyped_parameter_node() -> SchemaNode {
  SchemaNode::primitive(SchemaKind::String)
}

fn undeclared_template_params(path: &str, declared: &BTreeSet<String>) -> Vec<String> {
  let mut seen = BTreeSet::new();
  TEMPLATE_PARAM_RE
    .captures_iter(path)
    .filter_map(|captures| captures.get(1).map(|m| m.as_str().to_string()))
    .filter(|name| !declared.contains(name) && seen.insert(name.clone()))
    .collect()
}

#[cfg(test)]
mod tests;
