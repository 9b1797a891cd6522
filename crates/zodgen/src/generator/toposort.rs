use std::collections::BTreeSet;

/// Orders names so each appears after everything it depends on.
///
/// DFS post-order with permanent/temporary marks: a node mid-visit is
/// treated as already satisfied, so cycles do not recurse forever (strict
/// cycle rejection is the cycle detector's job, run beforehand).
/// Declarations with no dependency relation keep their order in `names`.
/// Dependencies outside `names` are ignored.
pub(crate) fn topo_sort<F>(names: &[String], deps_of: F) -> Vec<String>
where
  F: Fn(&str) -> Vec<String>,
{
  let known: BTreeSet<&str> = names.iter().map(String::as_str).collect();
  let mut ordered = Vec::with_capacity(names.len());
  let mut permanent = BTreeSet::new();
  let mut temporary = BTreeSet::new();

  for name in names {
    visit(name, &known, &deps_of, &mut permanent, &mut temporary, &mut ordered);
  }

  ordered
}

fn visit<F>(
  name: &str,
  known: &BTreeSet<&str>,
  deps_of: &F,
  permanent: &mut BTreeSet<String>,
  temporary: &mut BTreeSet<String>,
  ordered: &mut Vec<String>,
) where
  F: Fn(&str) -> Vec<String>,
{
  if permanent.contains(name) || temporary.contains(name) {
    return;
  }

  temporary.insert(name.to_string());
  for dep in deps_of(name) {
    if known.contains(dep.as_str()) {
      visit(&dep, known, deps_of, permanent, temporary, ordered);
    }
  }
  temporary.remove(name);

  permanent.insert(name.to_string());
  ordered.push(name.to_string());
}

/// A named unit of source text with no further structure, orderable by the
/// same algorithm as schema declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CodeBlock {
  pub name: String,
  pub source: String,
}

/// Orders arbitrary named code blocks given only a reference-extraction
/// function over their source text. Delegates to [`topo_sort`] unchanged.
pub(crate) fn sort_code_blocks<F>(blocks: Vec<CodeBlock>, extract_refs: F) -> Vec<CodeBlock>
where
  F: Fn(&str) -> Vec<String>,
{
  let names: Vec<String> = blocks.iter().map(|b| b.name.clone()).collect();
  let ordered = topo_sort(&names, |name| {
    blocks
      .iter()
      .find(|b| b.name == name)
      .map(|b| extract_refs(&b.source))
      .unwrap_or_default()
  });

  let mut blocks = blocks;
  blocks.sort_by_key(|block| ordered.iter().position(|name| *name == block.name));
  blocks
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;

  fn sort_with(names: &[&str], deps: &[(&str, &[&str])]) -> Vec<String> {
    let table: BTreeMap<String, Vec<String>> = deps
      .iter()
      .map(|(name, targets)| {
        (
          (*name).to_string(),
          targets.iter().map(|t| (*t).to_string()).collect(),
        )
      })
      .collect();
    let names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
    topo_sort(&names, |name| table.get(name).cloned().unwrap_or_default())
  }

  fn position(ordered: &[String], name: &str) -> usize {
    ordered.iter().position(|n| n == name).unwrap()
  }

  #[test]
  fn dependencies_come_first() {
    let ordered = sort_with(&["A", "B", "C"], &[("A", &["B"]), ("B", &["C"])]);
    assert_eq!(ordered, vec!["C", "B", "A"]);
  }

  #[test]
  fn transitive_dependencies_are_respected() {
    let ordered = sort_with(
      &["App", "Widget", "Theme", "Color"],
      &[("App", &["Widget"]), ("Widget", &["Theme"]), ("Theme", &["Color"])],
    );
    assert!(position(&ordered, "Color") < position(&ordered, "Theme"));
    assert!(position(&ordered, "Theme") < position(&ordered, "Widget"));
    assert!(position(&ordered, "Widget") < position(&ordered, "App"));
  }

  #[test]
  fn unrelated_declarations_keep_source_order() {
    let ordered = sort_with(&["Zeta", "Alpha", "Mu"], &[]);
    assert_eq!(ordered, vec!["Zeta", "Alpha", "Mu"]);
  }

  #[test]
  fn mixed_related_and_unrelated_stay_stable() {
    let ordered = sort_with(&["A", "X", "B"], &[("A", &["B"])]);
    assert_eq!(ordered, vec!["B", "A", "X"]);
  }

  #[test]
  fn cycles_do_not_recurse_forever() {
    let ordered = sort_with(&["A", "B"], &[("A", &["B"]), ("B", &["A"])]);
    assert_eq!(ordered.len(), 2);
    assert!(ordered.contains(&"A".to_string()) && ordered.contains(&"B".to_string()));
  }

  #[test]
  fn self_dependency_is_satisfied_mid_visit() {
    let ordered = sort_with(&["A"], &[("A", &["A"])]);
    assert_eq!(ordered, vec!["A"]);
  }

  #[test]
  fn external_dependencies_are_ignored() {
    let ordered = sort_with(&["A"], &[("A", &["NotDeclared"])]);
    assert_eq!(ordered, vec!["A"]);
  }

  #[test]
  fn orders_arbitrary_code_blocks() {
    let blocks = vec![
      CodeBlock {
        name: "handler".into(),
        source: "const handler = () => helper();".into(),
      },
      CodeBlock {
        name: "helper".into(),
        source: "const helper = () => 1;".into(),
      },
    ];

    let ordered = sort_code_blocks(blocks, |source| {
      ["handler", "helper"]
        .iter()
        .filter(|name| source.contains(&format!("{name}()")))
        .map(|name| (*name).to_string())
        .collect()
    });

    assert_eq!(ordered[0].name, "helper");
    assert_eq!(ordered[1].name, "handler");
  }
}
