//! Time-to-live cache of built link graphs.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::domain::LinkGraph;

/// A cached graph and when it was built.
#[derive(Debug, Clone)]
pub struct GraphEntry {
    graph: LinkGraph,
    max_depth: usize,
    built_at: Instant,
}

impl GraphEntry {
    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    /// True once the entry is at least `ttl` old.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.built_at) >= ttl
    }
}

/// Graphs keyed by the name of their root note.
///
/// An entry is served while younger than the TTL and built with the same
/// depth bound. Entries older than twice the TTL are dropped whenever a new
/// graph is stored.
#[derive(Debug)]
pub struct GraphCache {
    entries: HashMap<String, GraphEntry>,
    ttl: Duration,
}

impl GraphCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Returns the fresh graph rooted at `name`, if any.
    pub fn get(&self, name: &str, max_depth: usize, now: Instant) -> Option<&LinkGraph> {
        let entry = self.entries.get(name)?;
        if entry.max_depth != max_depth || entry.is_expired(now, self.ttl) {
            return None;
        }
        trace!(root = name, "graph cache hit");
        Some(&entry.graph)
    }

    /// Stores `graph` under `name`, then evicts entries older than 2×TTL.
    pub fn insert(&mut self, name: &str, graph: LinkGraph, max_depth: usize, now: Instant) {
        self.entries.insert(
            name.to_string(),
            GraphEntry {
                graph,
                max_depth,
                built_at: now,
            },
        );
        let horizon = self.ttl.saturating_mul(2);
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.built_at) <= horizon);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TTL: Duration = Duration::from_millis(5000);

    fn graph(root: &str) -> LinkGraph {
        LinkGraph::new(root, PathBuf::from(format!("/n/{root}.md")))
    }

    #[test]
    fn fresh_entry_is_served() {
        let mut cache = GraphCache::new(TTL);
        let now = Instant::now();
        cache.insert("home", graph("home"), 3, now);

        let hit = cache.get("home", 3, now + Duration::from_millis(4999));
        assert_eq!(hit.map(LinkGraph::root), Some("home"));
    }

    #[test]
    fn entry_expires_at_ttl() {
        let mut cache = GraphCache::new(TTL);
        let now = Instant::now();
        cache.insert("home", graph("home"), 3, now);

        assert!(cache.get("home", 3, now + TTL).is_none());
    }

    #[test]
    fn different_depth_is_a_miss() {
        let mut cache = GraphCache::new(TTL);
        let now = Instant::now();
        cache.insert("home", graph("home"), 1, now);

        assert!(cache.get("home", 3, now).is_none());
    }

    #[test]
    fn insert_evicts_entries_older_than_twice_ttl() {
        let mut cache = GraphCache::new(TTL);
        let start = Instant::now();
        cache.insert("old", graph("old"), 3, start);
        cache.insert("recent", graph("recent"), 3, start + Duration::from_secs(6));

        cache.insert("new", graph("new"), 3, start + Duration::from_secs(11));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("old", 3, start + Duration::from_secs(11)).is_none());
    }

    #[test]
    fn expired_entry_reports_expired() {
        let now = Instant::now();
        let entry = GraphEntry {
            graph: graph("x"),
            max_depth: 3,
            built_at: now,
        };

        assert!(!entry.is_expired(now, TTL));
        assert!(entry.is_expired(now + TTL, TTL));
    }
}
