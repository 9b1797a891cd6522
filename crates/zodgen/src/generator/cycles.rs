use std::collections::BTreeSet;

use crate::generator::graph::DependencyGraph;

/// Detects cycles with a three-color DFS over the dependency graph.
///
/// White = unvisited, gray = on the current recursion stack, black =
/// finished. A gray node re-encountered on the current path is a cycle,
/// reported as the ordered path slice starting at the re-encountered node.
/// Length-1 self-cycles surface through the same mechanism. Whether a given
/// cycle shape is a renderable recursive type or a fatal mutual cycle is
/// the caller's decision, via [`is_safe_cycle`].
pub(crate) fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
  let mut visited = BTreeSet::new();
  let mut rec_stack = BTreeSet::new();
  let mut path = Vec::new();
  let mut cycles = Vec::new();

  for node in graph.nodes() {
    if !visited.contains(node.as_str()) {
      dfs(graph, node, &mut visited, &mut rec_stack, &mut path, &mut cycles);
    }
  }

  cycles
}

fn dfs(
  graph: &DependencyGraph,
  node: &str,
  visited: &mut BTreeSet<String>,
  rec_stack: &mut BTreeSet<String>,
  path: &mut Vec<String>,
  cycles: &mut Vec<Vec<String>>,
) {
  visited.insert(node.to_string());
  rec_stack.insert(node.to_string());
  path.push(node.to_string());

  for dep in graph.dependencies_of(node) {
    if !visited.contains(dep.as_str()) {
      dfs(graph, dep, visited, rec_stack, path, cycles);
    } else if rec_stack.contains(dep.as_str())
      && let Some(cycle_start) = path.iter().position(|n| n == dep)
    {
      cycles.push(path[cycle_start..].to_vec());
    }
  }

  path.pop();
  rec_stack.remove(node);
}

/// The explicit safe self-reference policy: a cycle is safe iff every edge
/// on it (including the closing edge back to the entry) is breakable, i.e.
/// passes through an optional, nullable, or collection member. Safe cycles
/// render as lazily-referencing recursive types; unsafe ones are fatal.
pub(crate) fn is_safe_cycle(graph: &DependencyGraph, cycle: &[String]) -> bool {
  if cycle.is_empty() {
    return true;
  }

  cycle.iter().enumerate().all(|(i, from)| {
    let to = &cycle[(i + 1) % cycle.len()];
    graph.edge_breakable(from, to).unwrap_or(false)
  })
}

/// All declarations participating in any of the given cycles.
pub(crate) fn cyclic_members(cycles: &[Vec<String>]) -> BTreeSet<String> {
  cycles.iter().flatten().cloned().collect()
}
