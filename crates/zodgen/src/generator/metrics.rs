use strum::Display;

/// Statistics about one generation run, including the non-fatal warning
/// channel. Warnings never fail the run; fatal conditions are
/// [`GeneratorError`](crate::generator::errors::GeneratorError)s instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub declarations_emitted: usize,
  pub operations_converted: usize,
  pub parameter_groups_merged: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub orphaned_schemas_count: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_declaration(&mut self) {
    self.declarations_emitted += 1;
  }

  pub fn record_operation(&mut self) {
    self.operations_converted += 1;
  }

  pub fn record_parameter_groups(&mut self, count: usize) {
    self.parameter_groups_merged += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_orphaned_schemas(&mut self, count: usize) {
    self.orphaned_schemas_count = count;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Schema '{context}': {message}; falling back to z.any()")]
  UnsupportedShape { context: String, message: String },
  #[strum(to_string = "Schema '{schema_name}' could not be resolved: {error}")]
  SchemaResolutionFailed { schema_name: String, error: String },
  #[strum(to_string = "Schema '{context}': invalid regex pattern '{pattern}', constraint dropped")]
  InvalidPattern { context: String, pattern: String },
  #[strum(to_string = "[{operation_id}] parameter '{name}' has no schema, defaulting to z.string()")]
  MissingParameterSchema { operation_id: String, name: String },
  #[strum(to_string = "[{operation_id}] skipped non-JSON media type '{media_type}'")]
  SkippedMediaType { operation_id: String, media_type: String },
}

impl GenerationWarning {
  /// Warnings that mean an item was skipped entirely rather than degraded.
  pub fn is_skipped_item(&self) -> bool {
    matches!(
      self,
      Self::SchemaResolutionFailed { .. } | Self::SkippedMediaType { .. }
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn record_cycle_tracks_count_and_detail() {
    let mut stats = GenerationStats::default();
    stats.record_cycle(vec!["A".into(), "B".into()]);
    assert_eq!(stats.cycles_detected, 1);
    assert_eq!(stats.cycle_details, vec![vec!["A".to_string(), "B".to_string()]]);
  }

  #[test]
  fn warning_display_is_human_readable() {
    let warning = GenerationWarning::UnsupportedShape {
      context: "Pet.tag".into(),
      message: "unrecognized type tag".into(),
    };
    assert_eq!(
      warning.to_string(),
      "Schema 'Pet.tag': unrecognized type tag; falling back to z.any()"
    );
  }
}
