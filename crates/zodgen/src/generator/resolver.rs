use std::collections::{BTreeMap, BTreeSet};

use oas3::Spec;

use crate::generator::{
  errors::{GenerationResult, GeneratorError},
  naming::identifiers::{NamingConvention, to_identifier},
};

/// Component namespaces addressable through `#/components/...` pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum RefNamespace {
  Schemas,
  Responses,
  Parameters,
  Examples,
  Headers,
  Links,
}

impl RefNamespace {
  fn segment(self) -> &'static str {
    match self {
      Self::Schemas => "schemas",
      Self::Responses => "responses",
      Self::Parameters => "parameters",
      Self::Examples => "examples",
      Self::Headers => "headers",
      Self::Links => "links",
    }
  }

  fn all() -> [Self; 6] {
    [
      Self::Schemas,
      Self::Responses,
      Self::Parameters,
      Self::Examples,
      Self::Headers,
      Self::Links,
    ]
  }
}

/// Maps `$ref` pointers to canonical identifiers.
///
/// Resolution is pure: the resolver is built once from the document's
/// component tables and the explicit naming convention, and every call is a
/// lookup with no side effects. A malformed pointer base or a name missing
/// from the addressed namespace is a fatal
/// [`GeneratorError::UnresolvedReference`].
#[derive(Debug, Clone)]
pub(crate) struct RefResolver {
  convention: NamingConvention,
  known: BTreeMap<RefNamespace, BTreeSet<String>>,
}

impl RefResolver {
  pub(crate) fn new(convention: NamingConvention) -> Self {
    Self {
      convention,
      known: RefNamespace::all().into_iter().map(|ns| (ns, BTreeSet::new())).collect(),
    }
  }

  pub(crate) fn from_spec(spec: &Spec, convention: NamingConvention) -> Self {
    let mut resolver = Self::new(convention);
    if let Some(components) = &spec.components {
      resolver.register(RefNamespace::Schemas, components.schemas.keys());
      resolver.register(RefNamespace::Responses, components.responses.keys());
      resolver.register(RefNamespace::Parameters, components.parameters.keys());
      resolver.register(RefNamespace::Examples, components.examples.keys());
      resolver.register(RefNamespace::Headers, components.headers.keys());
      resolver.register(RefNamespace::Links, components.links.keys());
    }
    resolver
  }

  pub(crate) fn register<'a>(&mut self, namespace: RefNamespace, names: impl IntoIterator<Item = &'a String>) {
    let entry = self.known.entry(namespace).or_default();
    entry.extend(names.into_iter().cloned());
  }

  /// Resolves a schema pointer to its normalized identifier.
  pub(crate) fn resolve(&self, pointer: &str) -> GenerationResult<String> {
    self.resolve_in(RefNamespace::Schemas, pointer)
  }

  /// Resolves a schema pointer to the raw component name it addresses.
  /// Used where graph nodes are keyed by document names.
  pub(crate) fn resolve_raw(&self, pointer: &str) -> GenerationResult<String> {
    self.raw_name(RefNamespace::Schemas, pointer)
  }

  /// Resolves a pointer within one namespace, applying the naming
  /// convention to the trailing segment.
  pub(crate) fn resolve_in(&self, namespace: RefNamespace, pointer: &str) -> GenerationResult<String> {
    let name = self.raw_name(namespace, pointer)?;
    Ok(to_identifier(&name, &self.convention))
  }

  fn raw_name(&self, namespace: RefNamespace, pointer: &str) -> GenerationResult<String> {
    let unresolved = || GeneratorError::UnresolvedReference {
      pointer: pointer.to_string(),
    };

    let base = format!("#/components/{}/", namespace.segment());
    let name = pointer.strip_prefix(&base).ok_or_else(unresolved)?;
    if name.is_empty() || name.contains('/') {
      return Err(unresolved());
    }

    let known = self.known.get(&namespace).ok_or_else(unresolved)?;
    if !known.contains(name) {
      return Err(unresolved());
    }

    Ok(name.to_string())
  }
}
