use crate::generator::ast::ZodExpr;

/// Renders one exported schema declaration plus its inferred type alias.
///
/// Cyclic declarations get an explicit `z.ZodTypeAny` annotation so the
/// emitted module typechecks despite the lazy self-reference.
pub(crate) fn declaration_source(ident: &str, expr: &ZodExpr, cyclic: bool) -> String {
  let annotation = if cyclic { ": z.ZodTypeAny" } else { "" };
  format!(
    "export const {ident}{annotation} = {};\nexport type {ident} = z.infer<typeof {ident}>;\n",
    expr.render()
  )
}

/// Assembles declaration blocks into one module with the zod import.
pub(crate) fn render_module(blocks: &[String]) -> String {
  let mut out = String::from("import { z } from \"zod\";\n");
  for block in blocks {
    out.push('\n');
    out.push_str(block);
  }
  out
}

/// Prepends the auto-generation banner used by the CLI's default output.
pub(crate) fn render_header(title: &str, version: &str, description: Option<&str>, source_path: &str) -> String {
  let description = description.unwrap_or("No description provided").replace('\n', "\n// ");
  format!(
    "// AUTO-GENERATED CODE - DO NOT EDIT!\n//\n// {title}\n// Source: {source_path}\n// Version: {version}\n//\n// {description}\n"
  )
}
