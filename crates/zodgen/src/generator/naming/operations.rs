use inflections::Inflect;

use super::identifiers::{NamingConvention, to_identifier};
use crate::generator::parameters::ParameterLocation;

/// Derives a stable operation id when the document omits `operationId`.
/// `GET /pets/{petId}` becomes `get_pets_by_id`.
pub(crate) fn generate_operation_id(method: &str, path: &str) -> String {
  let path_parts: Vec<&str> = path
    .split('/')
    .filter(|s| !s.is_empty())
    .map(|s| {
      if s.starts_with('{') && s.ends_with('}') {
        "by_id"
      } else {
        s
      }
    })
    .collect();

  let method_lower = method.to_lowercase();
  if path_parts.is_empty() {
    method_lower
  } else {
    format!("{}_{}", method_lower, path_parts.join("_"))
  }
}

/// Identifier of the per-location parameter group declaration for one
/// operation, e.g. `ListPetsQueryParams`.
pub(crate) fn parameter_group_ident(
  operation_id: &str,
  location: ParameterLocation,
  convention: &NamingConvention,
) -> String {
  let op = to_identifier(operation_id, convention);
  let loc = location.to_string().to_pascal_case();
  format!("{op}{loc}Params")
}
