//! Orchestration for the OpenAPI to Zod schema generation pipeline.
//!
//! The orchestrator runs the whole batch synchronously: lower the component
//! schemas, build the dependency graph, judge cycles, fix emission order,
//! synthesize every declaration and operation, and assemble the final
//! module text. Fatal errors abort with no partial output; recoverable
//! degradations land in the stats' warning channel.

use std::collections::{BTreeSet, HashSet};

use oas3::spec::{ObjectOrReference, ObjectSchema, Operation, Parameter, ParameterIn, PathItem};

use crate::generator::{
  codegen, cycles,
  errors::GeneratorError,
  graph::{DependencyGraph, reference_targets},
  lowering::Lowerer,
  metrics::{GenerationStats, GenerationWarning},
  model::{NamedDeclaration, SchemaNode},
  naming::{
    identifiers::{NamingConvention, ensure_unique, to_identifier},
    operations::{generate_operation_id, parameter_group_ident},
  },
  parameters::{MergedParameterGroups, ParameterLocation, ParameterMerger, RawParameter, untyped_parameter_node},
  resolver::RefResolver,
  synthesizer::Synthesizer,
  toposort::topo_sort,
};

/// Options controlling one generation run.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
  /// Emit every component schema, not just the ones reachable from the
  /// retained operations.
  pub all_schemas: bool,
  /// Restrict generation to these operation ids.
  pub only_operations: Option<HashSet<String>>,
  /// Drop these operation ids before generation.
  pub excluded_operations: Option<HashSet<String>>,
}

/// Metadata about the source document, used for the file header.
#[derive(Debug, Clone)]
pub struct CodeMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

/// One emitted schema declaration with its topological emission position.
#[derive(Debug, Clone)]
pub struct EmittedDeclaration {
  pub ident: String,
  pub source: String,
  pub position: usize,
  pub cyclic: bool,
}

/// A parameter-group declaration belonging to one operation.
#[derive(Debug, Clone)]
pub struct ParameterDeclaration {
  pub location: ParameterLocation,
  pub ident: String,
  pub source: String,
}

/// Everything synthesized for one operation. Downstream emitters combine
/// these into request/response types and data-fetching hooks.
#[derive(Debug, Clone)]
pub struct OperationBindings {
  pub operation_id: String,
  pub method: String,
  pub path: String,
  pub parameters: Vec<ParameterDeclaration>,
  pub request_body: Option<String>,
  pub responses: Vec<(String, String)>,
}

/// Result of a successful generation run.
#[derive(Debug)]
pub struct GeneratedOutput {
  pub code: String,
  pub declarations: Vec<EmittedDeclaration>,
  pub operations: Vec<OperationBindings>,
  pub stats: GenerationStats,
}

pub struct Orchestrator {
  spec: oas3::Spec,
  options: GeneratorOptions,
  convention: NamingConvention,
}

impl Orchestrator {
  pub fn new(spec: oas3::Spec, options: GeneratorOptions) -> Self {
    Self {
      spec,
      options,
      convention: NamingConvention::default(),
    }
  }

  pub fn metadata(&self) -> CodeMetadata {
    CodeMetadata {
      title: self.spec.info.title.clone(),
      version: self.spec.info.version.clone(),
      description: self.spec.info.description.clone(),
    }
  }

  /// Runs the full pipeline and assembles the module without a header.
  pub fn generate(&self) -> Result<GeneratedOutput, GeneratorError> {
    let mut stats = GenerationStats::default();

    let lowerer = Lowerer::new(&self.spec);
    let declarations = lowerer.lower_components(&mut stats);
    let resolver = RefResolver::from_spec(&self.spec, self.convention.clone());

    let graph = DependencyGraph::build(&declarations, &resolver)?;
    let cycle_details = cycles::detect_cycles(&graph);
    for cycle in &cycle_details {
      if !cycles::is_safe_cycle(&graph, cycle) {
        return Err(GeneratorError::CircularDependency { path: cycle.clone() });
      }
      stats.record_cycle(cycle.clone());
    }
    let cyclic = cycles::cyclic_members(&cycle_details);

    let (operations, operation_roots) =
      self.convert_operations(&lowerer, &resolver, &cyclic, &mut stats)?;

    let retained: BTreeSet<String> = if self.options.all_schemas || operations.is_empty() {
      declarations.keys().cloned().collect()
    } else {
      let reachable = graph.expand_reachable(&operation_roots);
      declarations.keys().filter(|name| reachable.contains(*name)).cloned().collect()
    };
    stats.record_orphaned_schemas(declarations.len() - retained.len());

    let names: Vec<String> = declarations.keys().filter(|name| retained.contains(*name)).cloned().collect();
    let ordered = topo_sort(&names, |name| graph.dependencies_of(name).cloned().collect());

    let named = self.bind_identifiers(&ordered, &declarations, &mut stats);

    let synthesizer = Synthesizer::new(&resolver, &cyclic);
    let mut emitted = Vec::with_capacity(named.len());

    for (position, declaration) in named.iter().enumerate() {
      let expr = synthesizer.synthesize(&declaration.name, &declaration.node)?;
      let is_cyclic = cyclic.contains(&declaration.name);
      let source = codegen::declaration_source(&declaration.ident, &expr, is_cyclic);
      emitted.push(EmittedDeclaration {
        ident: declaration.ident.clone(),
        source,
        position,
        cyclic: is_cyclic,
      });
      stats.record_declaration();
    }
    stats.record_warnings(synthesizer.take_warnings());

    let blocks: Vec<String> = emitted
      .iter()
      .map(|declaration| declaration.source.clone())
      .chain(
        operations
          .iter()
          .flat_map(|operation| operation.parameters.iter().map(|p| p.source.clone())),
      )
      .collect();
    let code = codegen::render_module(&blocks);

    Ok(GeneratedOutput {
      code,
      declarations: emitted,
      operations,
      stats,
    })
  }

  /// Runs [`Self::generate`] and prepends the auto-generation banner.
  pub fn generate_with_header(&self, source_path: &str) -> Result<GeneratedOutput, GeneratorError> {
    let mut output = self.generate()?;
    let metadata = self.metadata();
    let header = codegen::render_header(
      &metadata.title,
      &metadata.version,
      metadata.description.as_deref(),
      source_path,
    );
    output.code = format!("{header}\n{}", output.code);
    Ok(output)
  }

  /// Binds each retained declaration to its normalized identifier, in
  /// emission order. Identifiers must be unique after normalization; a
  /// collision is degraded with a numeric suffix and a warning.
  fn bind_identifiers(
    &self,
    ordered: &[String],
    declarations: &std::collections::BTreeMap<String, SchemaNode>,
    stats: &mut GenerationStats,
  ) -> Vec<NamedDeclaration> {
    let mut used_idents = BTreeSet::new();
    let mut named = Vec::with_capacity(ordered.len());

    for name in ordered {
      let Some(node) = declarations.get(name) else {
        continue;
      };

      let ident = to_identifier(name, &self.convention);
      let unique = ensure_unique(&ident, &used_idents);
      if unique != ident {
        stats.record_warning(GenerationWarning::UnsupportedShape {
          context: name.clone(),
          message: format!("identifier collision, renamed to {unique}"),
        });
      }
      used_idents.insert(unique.clone());

      named.push(NamedDeclaration {
        name: name.clone(),
        ident: unique,
        node: node.clone(),
      });
    }

    named
  }

  fn convert_operations(
    &self,
    lowerer: &Lowerer<'_>,
    resolver: &RefResolver,
    cyclic: &BTreeSet<String>,
    stats: &mut GenerationStats,
  ) -> Result<(Vec<OperationBindings>, BTreeSet<String>), GeneratorError> {
    let mut operations = Vec::new();
    let mut roots = BTreeSet::new();

    let Some(paths) = &self.spec.paths else {
      return Ok((operations, roots));
    };

    let mut path_entries: Vec<_> = paths.iter().collect();
    path_entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (path, path_item) in path_entries {
      let mut methods: Vec<_> = path_item.methods().into_iter().collect();
      methods.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

      for (method, operation) in methods {
        let method_str = method.as_str().to_lowercase();
        let operation_id = operation
          .operation_id
          .clone()
          .unwrap_or_else(|| generate_operation_id(&method_str, path));

        if !self.is_operation_retained(&operation_id) {
          continue;
        }

        let bindings = self.convert_operation(
          lowerer,
          resolver,
          cyclic,
          &operation_id,
          &method_str,
          path,
          path_item,
          operation,
          &mut roots,
          stats,
        )?;
        stats.record_operation();
        operations.push(bindings);
      }
    }

    Ok((operations, roots))
  }

  fn is_operation_retained(&self, operation_id: &str) -> bool {
    if let Some(only) = &self.options.only_operations
      && !only.contains(operation_id)
    {
      return false;
    }
    if let Some(excluded) = &self.options.excluded_operations
      && excluded.contains(operation_id)
    {
      return false;
    }
    true
  }

  #[allow(clippy::too_many_arguments)]
  fn convert_operation(
    &self,
    lowerer: &Lowerer<'_>,
    resolver: &RefResolver,
    cyclic: &BTreeSet<String>,
    operation_id: &str,
    method: &str,
    path: &str,
    path_item: &PathItem,
    operation: &Operation,
    roots: &mut BTreeSet<String>,
    stats: &mut GenerationStats,
  ) -> Result<OperationBindings, GeneratorError> {
    let raw_parameters = self.lower_parameters(lowerer, operation_id, path_item, operation, stats);
    for parameter in &raw_parameters {
      roots.extend(reference_targets(&parameter.node, resolver)?);
    }

    let merger = ParameterMerger::new(resolver, cyclic);
    let mut warnings = Vec::new();
    let groups = merger.merge(operation_id, path, &raw_parameters, &mut warnings)?;
    stats.record_warnings(warnings);
    stats.record_parameter_groups(groups.len());

    let parameters = self.parameter_declarations(operation_id, &groups);

    let synthesizer = Synthesizer::new(resolver, cyclic);
    let request_body = self.convert_request_body(lowerer, resolver, &synthesizer, operation_id, operation, roots, stats)?;
    let responses = self.convert_responses(lowerer, resolver, &synthesizer, operation_id, operation, roots, stats)?;
    stats.record_warnings(synthesizer.take_warnings());

    Ok(OperationBindings {
      operation_id: operation_id.to_string(),
      method: method.to_string(),
      path: path.to_string(),
      parameters,
      request_body,
      responses,
    })
  }

  /// Collects path-item and operation parameters, the operation's own
  /// entries overriding path-item entries of the same name and location.
  fn lower_parameters(
    &self,
    lowerer: &Lowerer<'_>,
    operation_id: &str,
    path_item: &PathItem,
    operation: &Operation,
    stats: &mut GenerationStats,
  ) -> Vec<RawParameter> {
    let mut collected: Vec<Parameter> = path_item
      .parameters
      .iter()
      .filter_map(|parameter| parameter.resolve(&self.spec).ok())
      .collect();

    for parameter in operation.parameters.iter().filter_map(|p| p.resolve(&self.spec).ok()) {
      collected.retain(|existing| existing.location != parameter.location || existing.name != parameter.name);
      collected.push(parameter);
    }

    collected
      .into_iter()
      .map(|parameter| {
        let location = match parameter.location {
          ParameterIn::Path => ParameterLocation::Path,
          ParameterIn::Query => ParameterLocation::Query,
          ParameterIn::Header => ParameterLocation::Header,
          ParameterIn::Cookie => ParameterLocation::Cookie,
        };

        let context = format!("{operation_id}.{}.{}", location, parameter.name);
        let node = match &parameter.schema {
          Some(schema_ref) => lowerer.lower_object_or_ref(&context, schema_ref, stats),
          None => {
            stats.record_warning(GenerationWarning::MissingParameterSchema {
              operation_id: operation_id.to_string(),
              name: parameter.name.clone(),
            });
            untyped_parameter_node()
          }
        };

        let required = location == ParameterLocation::Path || parameter.required.unwrap_or(false);
        RawParameter {
          name: parameter.name,
          location,
          required,
          node,
        }
      })
      .collect()
  }

  fn parameter_declarations(&self, operation_id: &str, groups: &MergedParameterGroups) -> Vec<ParameterDeclaration> {
    ParameterLocation::all()
      .into_iter()
      .filter_map(|location| {
        groups.get(location).map(|expr| {
          let ident = parameter_group_ident(operation_id, location, &self.convention);
          ParameterDeclaration {
            location,
            source: codegen::declaration_source(&ident, expr, false),
            ident,
          }
        })
      })
      .collect()
  }

  #[allow(clippy::too_many_arguments)]
  fn convert_request_body(
    &self,
    lowerer: &Lowerer<'_>,
    resolver: &RefResolver,
    synthesizer: &Synthesizer<'_>,
    operation_id: &str,
    operation: &Operation,
    roots: &mut BTreeSet<String>,
    stats: &mut GenerationStats,
  ) -> Result<Option<String>, GeneratorError> {
    let Some(body_ref) = &operation.request_body else {
      return Ok(None);
    };
    let Ok(body) = body_ref.resolve(&self.spec) else {
      return Ok(None);
    };

    let Some(schema_ref) = json_media_schema(&body.content, operation_id, stats) else {
      return Ok(None);
    };

    let context = format!("{operation_id}.requestBody");
    let node = lowerer.lower_object_or_ref(&context, &schema_ref, stats);
    roots.extend(reference_targets(&node, resolver)?);
    let expr = synthesizer.synthesize(&context, &node)?;
    Ok(Some(expr.render()))
  }

  #[allow(clippy::too_many_arguments)]
  fn convert_responses(
    &self,
    lowerer: &Lowerer<'_>,
    resolver: &RefResolver,
    synthesizer: &Synthesizer<'_>,
    operation_id: &str,
    operation: &Operation,
    roots: &mut BTreeSet<String>,
    stats: &mut GenerationStats,
  ) -> Result<Vec<(String, String)>, GeneratorError> {
    let mut converted = Vec::new();

    let Some(responses) = &operation.responses else {
      return Ok(converted);
    };

    for (status, response_ref) in responses {
      let Ok(response) = response_ref.resolve(&self.spec) else {
        continue;
      };
      let Some(schema_ref) = json_media_schema(&response.content, operation_id, stats) else {
        continue;
      };

      let context = format!("{operation_id}.{status}");
      let node = lowerer.lower_object_or_ref(&context, &schema_ref, stats);
      roots.extend(reference_targets(&node, resolver)?);
      let expr = synthesizer.synthesize(&context, &node)?;
      converted.push((status.clone(), expr.render()));
    }

    Ok(converted)
  }
}

/// Picks the JSON media type's schema from a content map; other media
/// types are skipped with a warning when no JSON variant exists.
fn json_media_schema(
  content: &std::collections::BTreeMap<String, oas3::spec::MediaType>,
  operation_id: &str,
  stats: &mut GenerationStats,
) -> Option<ObjectOrReference<ObjectSchema>> {
  if let Some((_, media)) = content.iter().find(|(name, _)| name.contains("json")) {
    return media.schema.clone();
  }

  if let Some(media_type) = content.keys().next() {
    stats.record_warning(GenerationWarning::SkippedMediaType {
      operation_id: operation_id.to_string(),
      media_type: media_type.clone(),
    });
  }

  None
}
