use super::*;
use crate::generator::{
  model::{Items, SchemaKind, SchemaNode},
  naming::identifiers::NamingConvention,
};

fn resolver() -> RefResolver {
  RefResolver::new(NamingConvention::default())
}

fn parameter(name: &str, location: ParameterLocation, required: bool, node: SchemaNode) -> RawParameter {
  RawParameter {
    name: name.to_string(),
    location,
    required,
    node,
  }
}

fn merge(path: &str, parameters: &[RawParameter]) -> GenerationResult<MergedParameterGroups> {
  let resolver = resolver();
  let cyclic = BTreeSet::new();
  let merger = ParameterMerger::new(&resolver, &cyclic);
  let mut warnings = Vec::new();
  merger.merge("listPets", path, parameters, &mut warnings)
}

#[test]
fn groups_parameters_by_location() {
  let groups = merge(
    "/pets/{petId}",
    &[
      parameter(
        "petId",
        ParameterLocation::Path,
        true,
        SchemaNode::primitive(SchemaKind::Integer),
      ),
      parameter(
        "limit",
        ParameterLocation::Query,
        false,
        SchemaNode::primitive(SchemaKind::Integer),
      ),
      parameter(
        "x-request-id",
        ParameterLocation::Header,
        false,
        SchemaNode::primitive(SchemaKind::String),
      ),
    ],
  )
  .unwrap();

  assert_eq!(groups.len(), 3);
  assert!(groups.cookie.is_none());
  assert!(groups.path.as_ref().unwrap().render().contains("petId: z.number().int()"));
}

#[test]
fn query_scalars_are_coerced_path_is_not() {
  let groups = merge(
    "/pets/{petId}",
    &[
      parameter(
        "petId",
        ParameterLocation::Path,
        true,
        SchemaNode::primitive(SchemaKind::Integer),
      ),
      parameter(
        "limit",
        ParameterLocation::Query,
        false,
        SchemaNode::primitive(SchemaKind::Integer),
      ),
    ],
  )
  .unwrap();

  assert!(groups.path.unwrap().render().contains("z.number().int()"));
  assert!(groups.query.unwrap().render().contains("z.coerce.number().int().optional()"));
}

#[test]
fn array_query_parameter_is_one_array_member() {
  let tags = SchemaNode::builder()
    .kind(SchemaKind::Array)
    .items(Items::Single(Box::new(SchemaNode::primitive(SchemaKind::String))))
    .build();
  let groups = merge("/pets", &[parameter("tags", ParameterLocation::Query, false, tags)]).unwrap();

  let rendered = groups.query.unwrap().render();
  assert!(rendered.contains("tags: z.array(z.string()).optional()"));
}

#[test]
fn duplicate_names_in_one_location_are_fatal() {
  let err = merge(
    "/pets",
    &[
      parameter(
        "filter",
        ParameterLocation::Query,
        false,
        SchemaNode::primitive(SchemaKind::String),
      ),
      parameter(
        "filter",
        ParameterLocation::Query,
        true,
        SchemaNode::primitive(SchemaKind::Integer),
      ),
    ],
  )
  .unwrap_err();

  assert_eq!(
    err,
    GeneratorError::DuplicateParameter {
      operation: "listPets".to_string(),
      location: ParameterLocation::Query,
      name: "filter".to_string(),
    }
  );
}

#[test]
fn same_name_in_different_locations_is_allowed() {
  let groups = merge(
    "/pets/{id}",
    &[
      parameter(
        "id",
        ParameterLocation::Path,
        true,
        SchemaNode::primitive(SchemaKind::String),
      ),
      parameter(
        "id",
        ParameterLocation::Query,
        false,
        SchemaNode::primitive(SchemaKind::String),
      ),
    ],
  )
  .unwrap();
  assert_eq!(groups.len(), 2);
}

#[test]
fn undeclared_path_template_params_are_synthesized_required() {
  let groups = merge("/stores/{storeId}/pets/{petId}", &[]).unwrap();
  let rendered = groups.path.unwrap().render();
  assert!(rendered.contains("storeId: z.string(),"));
  assert!(rendered.contains("petId: z.string(),"));
  assert!(!rendered.contains("optional"));
}

#[test]
fn optional_parameters_render_optional() {
  let groups = merge(
    "/pets",
    &[parameter(
      "limit",
      ParameterLocation::Query,
      false,
      SchemaNode::primitive(SchemaKind::Integer),
    )],
  )
  .unwrap();
  assert!(groups.query.unwrap().render().contains(".optional()"));
}

#[test]
fn empty_locations_stay_absent() {
  let groups = merge("/health", &[]).unwrap();
  assert_eq!(groups.len(), 0);
  assert!(groups.path.is_none() && groups.query.is_none());
}
