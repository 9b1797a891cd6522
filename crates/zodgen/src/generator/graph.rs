use std::collections::{BTreeMap, BTreeSet};

use petgraph::{graphmap::DiGraphMap, visit::Dfs};

use crate::generator::{
  errors::GenerationResult,
  model::{AdditionalMembers, Items, SchemaNode},
  resolver::RefResolver,
};

/// Identifier -> directly referenced identifiers, with a breakability mark
/// per edge. Built fresh per run from each declaration's schema tree and
/// read-only afterwards.
///
/// An edge is breakable when every occurrence of the reference inside the
/// source declaration sits under an optional member, a nullable wrapper, or
/// a collection position. Breakability feeds the safe-cycle predicate; the
/// graph itself permits self-edges (they signal recursive types, judged by
/// the cycle detector's caller).
#[derive(Debug, Default)]
pub(crate) struct DependencyGraph {
  edges: BTreeMap<String, BTreeMap<String, bool>>,
}

impl DependencyGraph {
  /// Walks every declaration, recording one-hop reference edges. Never
  /// expands references transitively; an unknown pointer is fatal.
  pub(crate) fn build(
    declarations: &BTreeMap<String, SchemaNode>,
    resolver: &RefResolver,
  ) -> GenerationResult<Self> {
    let mut graph = Self::default();

    for (name, node) in declarations {
      let mut targets = BTreeMap::new();
      collect_edges(node, resolver, false, &mut targets)?;
      graph.edges.insert(name.clone(), targets);
    }

    Ok(graph)
  }

  pub(crate) fn nodes(&self) -> impl Iterator<Item = &String> {
    self.edges.keys()
  }

  pub(crate) fn dependencies_of(&self, name: &str) -> impl Iterator<Item = &String> {
    self.edges.get(name).into_iter().flat_map(BTreeMap::keys)
  }

  /// Breakability of the `from -> to` edge, if it exists.
  pub(crate) fn edge_breakable(&self, from: &str, to: &str) -> Option<bool> {
    self.edges.get(from).and_then(|deps| deps.get(to)).copied()
  }

  /// Expands a root set with everything transitively reachable from it.
  pub(crate) fn expand_reachable(&self, roots: &BTreeSet<String>) -> BTreeSet<String> {
    let graph = DiGraphMap::<&str, ()>::from_edges(
      self
        .edges
        .iter()
        .flat_map(|(node, deps)| deps.keys().map(move |dep| (node.as_str(), dep.as_str()))),
    );

    let mut expanded = roots.clone();
    for start in roots {
      if graph.contains_node(start.as_str()) {
        let mut dfs = Dfs::new(&graph, start.as_str());
        while let Some(node) = dfs.next(&graph) {
          expanded.insert(node.to_string());
        }
      }
    }
    expanded
  }
}

/// Declaration names directly referenced anywhere below `node`. Used to
/// seed reachability from operation request/response/parameter schemas.
pub(crate) fn reference_targets(node: &SchemaNode, resolver: &RefResolver) -> GenerationResult<BTreeSet<String>> {
  let mut targets = BTreeMap::new();
  collect_edges(node, resolver, true, &mut targets)?;
  Ok(targets.into_keys().collect())
}

/// Records reference edges below `node`. `breakable` is sticky: once the
/// walk has passed through an optional, nullable, or collection position,
/// everything beneath it is reachable lazily. A reference seen both
/// breakably and unbreakably stays unbreakable.
fn collect_edges(
  node: &SchemaNode,
  resolver: &RefResolver,
  breakable: bool,
  targets: &mut BTreeMap<String, bool>,
) -> GenerationResult<()> {
  if let Some(pointer) = &node.reference {
    let target = resolver.resolve_raw(pointer)?;
    targets
      .entry(target)
      .and_modify(|existing| *existing &= breakable)
      .or_insert(breakable);
  }

  for (member_name, member) in &node.members {
    let member_breakable = breakable || !node.required.contains(member_name) || member.nullable;
    collect_edges(member, resolver, member_breakable, targets)?;
  }

  match &node.items {
    Some(Items::Single(item)) => collect_edges(item, resolver, true, targets)?,
    Some(Items::Tuple(items)) => {
      for item in items {
        collect_edges(item, resolver, true, targets)?;
      }
    }
    None => {}
  }

  if let AdditionalMembers::Schema(schema) = &node.additional {
    collect_edges(schema, resolver, true, targets)?;
  }

  for group in &node.compositions {
    for child in &group.children {
      collect_edges(child, resolver, breakable || child.nullable, targets)?;
    }
  }

  Ok(())
}
