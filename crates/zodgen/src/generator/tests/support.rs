use std::collections::HashSet;

use oas3::Spec;

use crate::generator::orchestrator::{GeneratedOutput, GeneratorOptions, Orchestrator};

pub(super) fn parse_spec(spec_json: &str) -> Spec {
  oas3::from_json(spec_json).expect("failed to parse test spec")
}

pub(super) fn string_set(values: &[&str]) -> HashSet<String> {
  values.iter().map(|value| (*value).to_string()).collect()
}

pub(super) fn generate(spec_json: &str) -> GeneratedOutput {
  Orchestrator::new(parse_spec(spec_json), GeneratorOptions::default())
    .generate()
    .expect("generation should succeed")
}

pub(super) fn generate_all_schemas(spec_json: &str) -> GeneratedOutput {
  let options = GeneratorOptions {
    all_schemas: true,
    ..GeneratorOptions::default()
  };
  Orchestrator::new(parse_spec(spec_json), options)
    .generate()
    .expect("generation should succeed")
}

pub(super) fn assert_contains(code: &str, expected: &str, context: &str) {
  assert!(code.contains(expected), "missing {context}: expected '{expected}'");
}

pub(super) fn assert_not_contains(code: &str, pattern: &str, context: &str) {
  assert!(!code.contains(pattern), "{context}: '{pattern}' should not appear");
}
