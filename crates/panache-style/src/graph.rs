//! Whole-library inheritance checks using `petgraph`.
//!
//! Resolution only ever walks one chain. This graph looks at every
//! definition at once so a style library can be checked before use:
//! parents that do not exist, cycles, and a parents-first ordering.

use std::collections::HashMap;

use panache_common::error::{PanacheError, Result};
use petgraph::graph::NodeIndex;

use crate::registry::StyleRegistry;

/// Inheritance graph of a registry. Edges point from parent to child.
#[derive(Debug)]
pub struct InheritanceGraph {
    graph: petgraph::Graph<String, ()>,
    dangling: Vec<(String, String)>,
}

impl InheritanceGraph {
    /// Builds the graph of all definitions in `registry`.
    pub fn from_registry(registry: &StyleRegistry) -> Self {
        let mut graph = petgraph::Graph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
        for style in registry.definitions() {
            let idx = graph.add_node(style.name().to_owned());
            let _ = nodes.insert(style.name(), idx);
        }

        let mut dangling = Vec::new();
        for style in registry.definitions() {
            let Some(parent) = style.parent() else {
                continue;
            };
            match (nodes.get(parent), nodes.get(style.name())) {
                (Some(&from), Some(&to)) => {
                    let _ = graph.add_edge(from, to, ());
                }
                _ => dangling.push((style.name().to_owned(), parent.to_owned())),
            }
        }

        Self { graph, dangling }
    }

    /// Number of styles in the graph.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if the graph has no styles.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// `(style, parent)` pairs whose parent is not defined.
    pub fn dangling_parents(&self) -> &[(String, String)] {
        &self.dangling
    }

    /// All inheritance cycles, each sorted by name, in name order.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut names: Vec<String> = scc
                    .iter()
                    .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                    .collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Returns all styles with every parent before its children.
    ///
    /// # Errors
    ///
    /// Returns [`PanacheError::CyclicInheritance`] if any cycle exists.
    pub fn resolve_order(&self) -> Result<Vec<String>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => {
                let chain = self
                    .cycles()
                    .into_iter()
                    .next()
                    .or_else(|| {
                        self.graph
                            .node_weight(cycle.node_id())
                            .map(|name| vec![name.clone()])
                    })
                    .unwrap_or_default();
                Err(PanacheError::CyclicInheritance { chain })
            }
        }
    }
}
