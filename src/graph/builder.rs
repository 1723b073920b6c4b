//! Breadth-first construction of the link graph around a note.

use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::domain::{GraphNode, LinkGraph};
use crate::index::IndexStore;
use crate::infra::FileSystem;
use crate::nav::Resolver;
use crate::settings::Settings;

/// Builds [`LinkGraph`]s, serving recent ones from the store's graph cache.
pub struct GraphBuilder<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    resolver: Resolver<'a, F>,
    settings: &'a Settings,
}

impl<'a, F: FileSystem + ?Sized> GraphBuilder<'a, F> {
    pub fn new(fs: &'a F, root: &'a Path, settings: &'a Settings) -> Self {
        Self {
            fs,
            resolver: Resolver::new(fs, root, settings),
            settings,
        }
    }

    /// Returns the graph of notes reachable from `current_name` within
    /// `max_depth` hops.
    ///
    /// `current_path` is the file of the start note; every other note is
    /// located through the resolver, relative to the note linking to it.
    /// Links that resolve to nothing become dangling nodes.
    pub fn build(
        &self,
        store: &mut IndexStore,
        current_name: &str,
        current_path: &Path,
        max_depth: usize,
        now: Instant,
    ) -> LinkGraph {
        if let Some(cached) = store.graphs.get(current_name, max_depth, now) {
            return cached.clone();
        }

        let graph = self.traverse(store, current_name, current_path, max_depth);
        debug!(
            root = current_name,
            nodes = graph.len(),
            edges = graph.edge_count(),
            "built link graph"
        );
        store
            .graphs
            .insert(current_name, graph.clone(), max_depth, now);
        graph
    }

    fn traverse(
        &self,
        store: &mut IndexStore,
        current_name: &str,
        current_path: &Path,
        max_depth: usize,
    ) -> LinkGraph {
        let mut graph = LinkGraph::new(current_name, current_path.to_path_buf());
        let mut queue = VecDeque::from([(current_name.to_string(), 0usize)]);
        let mut processed: HashSet<String> = HashSet::new();

        while let Some((name, depth)) = queue.pop_front() {
            if depth > max_depth || !processed.insert(name.clone()) {
                continue;
            }
            let Some(path) = graph.node(&name).and_then(|n| n.path.clone()) else {
                continue;
            };
            if let Some(node) = graph.node_mut(&name) {
                node.expanded = true;
            }

            let links = store
                .links
                .extract(self.fs, &path, self.settings.link_line_cap);
            for target in links {
                if target == name {
                    continue;
                }
                if !graph.contains(&target) {
                    let resolved = self.resolver.resolve(store, &target, Some(path.as_path()));
                    graph.insert_node(&target, GraphNode::new(resolved, depth + 1));
                }
                graph.add_edge(&name, &target);
                if depth < max_depth && !processed.contains(&target) {
                    queue.push_back((target, depth + 1));
                }
            }
        }

        graph
    }
}
