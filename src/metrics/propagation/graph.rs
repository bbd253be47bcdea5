//! Relative-import dependency graph with cycle detection

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::SourceLoader;
use crate::models::project::ProjectStructureReport;

/// Per-module result of the traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleNode {
    pub module_name: String,
    /// Other modules reachable through this module's imports
    pub affected_modules: BTreeSet<PathBuf>,
    pub has_cycle_dependency: bool,
}

impl ModuleNode {
    fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            ..Default::default()
        }
    }
}

/// Module path to node, ordered by path
pub type ModuleTree = BTreeMap<PathBuf, ModuleNode>;

/// Import graph restricted to the analysed universe
///
/// Nodes are module paths, an edge `a -> b` means `a` imports `b` through a
/// relative specifier. Imports leaving the universe are dropped.
pub struct DependencyGraph {
    graph: DiGraph<PathBuf, ()>,
    names: Vec<String>,
    index: HashMap<PathBuf, NodeIndex>,
}

impl DependencyGraph {
    /// Parse every module once and collect its local imports
    pub fn build(report: &ProjectStructureReport, loader: &mut SourceLoader) -> Self {
        let mut graph = DiGraph::new();
        let mut names = Vec::new();
        let mut index = HashMap::new();

        for (path, name) in report.modules() {
            let node = graph.add_node(path.clone());
            names.push(name.clone());
            index.insert(path.clone(), node);
        }

        for (path, _) in report.modules() {
            let analysis = loader.load_or_empty(path);
            let from = index[path];
            for target in analysis.relative_targets() {
                if let Some(&to) = index.get(target) {
                    graph.update_edge(from, to, ());
                }
            }
        }

        debug!(
            "dependency graph: {} module(s), {} import edge(s)",
            graph.node_count(),
            graph.edge_count()
        );
        Self { graph, names, index }
    }

    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct local imports of `path`
    pub fn imports_of(&self, path: &Path) -> Vec<&Path> {
        let Some(&node) = self.index.get(path) else {
            return Vec::new();
        };
        let mut targets: Vec<&Path> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|target| self.graph[target].as_path())
            .collect();
        targets.sort();
        targets
    }

    /// Depth-first traversal from every module as root
    ///
    /// The traversal is path-sensitive: it follows every simple import path,
    /// so its cost grows with the number of distinct paths in the graph.
    pub fn module_tree(&self) -> ModuleTree {
        let mut nodes: Vec<ModuleNode> = self.names.iter().map(ModuleNode::new).collect();

        for root in self.graph.node_indices() {
            let mut path = vec![root];
            self.visit(root, &mut path, &mut nodes);
        }

        self.graph
            .node_indices()
            .zip(nodes)
            .map(|(node, module)| (self.graph[node].clone(), module))
            .collect()
    }

    fn visit(&self, current: NodeIndex, path: &mut Vec<NodeIndex>, nodes: &mut [ModuleNode]) {
        for target in self.graph.neighbors_directed(current, Direction::Outgoing) {
            if let Some(start) = path.iter().position(|node| *node == target) {
                self.register_cycle(&path[start..], nodes);
                continue;
            }
            path.push(target);
            self.visit(target, path, nodes);
            path.pop();
        }

        // post-order: every ancestor on the path reaches `current`
        let module = &self.graph[current];
        for ancestor in &path[..path.len() - 1] {
            if *ancestor != current {
                nodes[ancestor.index()].affected_modules.insert(module.clone());
            }
        }
    }

    fn register_cycle(&self, cycle: &[NodeIndex], nodes: &mut [ModuleNode]) {
        let chain: Vec<String> = cycle
            .iter()
            .chain(cycle.first())
            .map(|node| self.graph[*node].display().to_string())
            .collect();
        debug!("import cycle: {}", chain.join(" --> "));

        for member in cycle {
            let entry = &mut nodes[member.index()];
            entry.has_cycle_dependency = true;
            for other in cycle {
                if other != member {
                    entry.affected_modules.insert(self.graph[*other].clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::{canonical, project};

    #[test]
    fn test_chain_reach() {
        let (dir, report, mut loader) = project(&[
            ("src/a.ts", "import { b } from './b';\nexport function a() {}"),
            ("src/b.ts", "import { c } from './c';\nexport function b() {}"),
            ("src/c.ts", "export function c() {}"),
        ]);
        let graph = DependencyGraph::build(&report, &mut loader);
        assert_eq!(graph.module_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let tree = graph.module_tree();
        let a = &tree[&canonical(&dir, "src/a.ts")];
        let b = &tree[&canonical(&dir, "src/b.ts")];
        let c = &tree[&canonical(&dir, "src/c.ts")];

        assert_eq!(a.affected_modules.len(), 2);
        assert_eq!(b.affected_modules.len(), 1);
        assert!(c.affected_modules.is_empty());
        assert!(!a.has_cycle_dependency);
        assert_eq!(a.module_name, "a");
    }

    #[test]
    fn test_cycle_terminates_and_marks_members() {
        let (dir, report, mut loader) = project(&[
            ("src/a.ts", "import { b } from './b';\nexport function a() {}"),
            ("src/b.ts", "import { c } from './c';\nexport function b() {}"),
            ("src/c.ts", "import { a } from './a';\nexport function c() {}"),
            ("src/d.ts", "import { a } from './a';\nexport function d() {}"),
        ]);
        let tree = DependencyGraph::build(&report, &mut loader).module_tree();

        for name in ["a", "b", "c"] {
            let node = &tree[&canonical(&dir, &format!("src/{}.ts", name))];
            assert!(node.has_cycle_dependency, "{} should be in a cycle", name);
            assert_eq!(node.affected_modules.len(), 2);
        }

        let d = &tree[&canonical(&dir, "src/d.ts")];
        assert!(!d.has_cycle_dependency);
        assert_eq!(d.affected_modules.len(), 3);
    }

    #[test]
    fn test_self_import() {
        let (dir, report, mut loader) = project(&[("src/a.ts", "import { a } from './a';\nexport function a() {}")]);
        let tree = DependencyGraph::build(&report, &mut loader).module_tree();

        let a = &tree[&canonical(&dir, "src/a.ts")];
        assert!(a.has_cycle_dependency);
        assert!(a.affected_modules.is_empty());
    }

    #[test]
    fn test_imports_of() {
        let (dir, report, mut loader) = project(&[
            ("src/a.ts", "import { b } from './b';\nimport { b as c } from './b';\nexport function a() {}"),
            ("src/b.ts", "export function b() {}"),
        ]);
        let graph = DependencyGraph::build(&report, &mut loader);
        let b = canonical(&dir, "src/b.ts");
        assert_eq!(graph.imports_of(&canonical(&dir, "src/a.ts")), vec![b.as_path()]);
        assert!(graph.imports_of(&b).is_empty());
    }
}
