//! Directed link graph between notes.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

/// A note in a [`LinkGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Resolved file, or `None` for a dangling link.
    pub path: Option<PathBuf>,
    /// Names this note links to.
    pub outgoing: BTreeSet<String>,
    /// Names of notes linking here.
    pub incoming: BTreeSet<String>,
    /// Hops from the graph's root at discovery.
    pub depth: usize,
    /// True once the note's own links were followed.
    pub expanded: bool,
}

impl GraphNode {
    pub fn new(path: Option<PathBuf>, depth: usize) -> Self {
        Self {
            path,
            outgoing: BTreeSet::new(),
            incoming: BTreeSet::new(),
            depth,
            expanded: false,
        }
    }

    pub fn is_dangling(&self) -> bool {
        self.path.is_none()
    }
}

/// Note relationships discovered from a root note, keyed by note name.
///
/// # Examples
///
/// ```
/// use notegraph::domain::{GraphNode, LinkGraph};
/// use std::path::PathBuf;
///
/// let mut graph = LinkGraph::new("home", PathBuf::from("/notes/home.md"));
/// graph.insert_node("todo", GraphNode::new(None, 1));
/// graph.add_edge("home", "todo");
///
/// assert!(graph.node("home").unwrap().outgoing.contains("todo"));
/// assert!(graph.node("todo").unwrap().incoming.contains("home"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkGraph {
    root: String,
    nodes: BTreeMap<String, GraphNode>,
}

impl LinkGraph {
    /// Creates a graph containing only the root note at depth 0.
    pub fn new(root: impl Into<String>, root_path: PathBuf) -> Self {
        let root = root.into();
        let mut nodes = BTreeMap::new();
        nodes.insert(root.clone(), GraphNode::new(Some(root_path), 0));
        Self { root, nodes }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.nodes.get(name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut GraphNode> {
        self.nodes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Inserts `node` under `name` unless a node with that name exists.
    pub fn insert_node(&mut self, name: &str, node: GraphNode) {
        self.nodes.entry(name.to_string()).or_insert(node);
    }

    /// Records `from -> to`. Both nodes must already exist.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        if !self.contains(from) || !self.contains(to) {
            return;
        }
        if let Some(source) = self.nodes.get_mut(from) {
            source.outgoing.insert(to.to_string());
        }
        if let Some(target) = self.nodes.get_mut(to) {
            target.incoming.insert(from.to_string());
        }
    }

    /// Iterates nodes in name order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &GraphNode)> {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Names of nodes whose link could not be resolved to a file.
    pub fn dangling(&self) -> impl Iterator<Item = &str> {
        self.nodes()
            .filter(|(_, node)| node.is_dangling())
            .map(|(name, _)| name)
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.outgoing.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
