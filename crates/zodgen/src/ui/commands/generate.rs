use std::{
  collections::HashSet,
  path::{Path, PathBuf},
};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    metrics::GenerationStats,
    orchestrator::{GeneratedOutput, GeneratorOptions, Orchestrator},
  },
  ui::{Colors, GenerateCommand},
  utils::spec::load_spec,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub all_schemas: bool,
  pub only_operations: Option<HashSet<String>>,
  pub excluded_operations: Option<HashSet<String>>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      input,
      output,
      all_schemas,
      only,
      exclude,
      verbose,
      quiet,
    } = command;

    Self {
      input,
      output,
      all_schemas,
      only_operations: only.map(|ops| ops.into_iter().collect()),
      excluded_operations: exclude.map(|ops| ops.into_iter().collect()),
      verbose,
      quiet,
    }
  }

  async fn load_spec(&self) -> anyhow::Result<oas3::Spec> {
    load_spec(&self.input).await
  }

  fn options(&self) -> GeneratorOptions {
    GeneratorOptions {
      all_schemas: self.all_schemas,
      only_operations: self.only_operations.clone(),
      excluded_operations: self.excluded_operations.clone(),
    }
  }

  async fn write_output(&self, code: &str) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent()
      && parent != Path::new("")
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, code).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating Zod schemas...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Declarations emitted:", stats.declarations_emitted.to_string());
    self.stat("Operations converted:", stats.operations_converted.to_string());
    if stats.parameter_groups_merged > 0 {
      self.stat("Parameter groups:", stats.parameter_groups_merged.to_string());
    }

    self.print_cycles(stats);
    if stats.orphaned_schemas_count > 0 && self.config.verbose {
      self.stat("Orphaned schemas:", stats.orphaned_schemas_count.to_string());
    }
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Recursive types:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() {
      return;
    }

    self.stat("Warnings:", stats.warnings.len().to_string());

    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_skipped_item() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated Zod schemas".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let spec = config.load_spec().await?;

  logger.log_generating();
  let orchestrator = Orchestrator::new(spec, config.options());
  let source_path = config.input.display().to_string();

  let GeneratedOutput { code, stats, .. } = orchestrator.generate_with_header(&source_path)?;
  logger.print_statistics(&stats);

  logger.log_writing();
  config.write_output(&code).await?;

  logger.log_success();
  Ok(())
}
