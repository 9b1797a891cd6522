use crate::generator::parameters::ParameterLocation;

/// Fatal generation failures. These abort the whole run with no partial
/// output; recoverable conditions go through the warning channel instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
  /// A `$ref` pointer with a malformed base or an unknown component name.
  #[error("unresolved reference '{pointer}'")]
  UnresolvedReference { pointer: String },

  /// A circular dependency that fails the safe self-reference test. The
  /// path lists the cycle's declarations in traversal order from the entry
  /// declaration.
  #[error("circular dependency: {}", path.join(" -> "))]
  CircularDependency { path: Vec<String> },

  /// Two parameters with the same name in one location of one operation.
  #[error("duplicate parameter '{name}' in {location} for operation '{operation}'")]
  DuplicateParameter {
    operation: String,
    location: ParameterLocation,
    name: String,
  },
}

pub type GenerationResult<T> = Result<T, GeneratorError>;
