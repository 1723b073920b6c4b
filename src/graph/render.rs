//! Text renderings of a [`LinkGraph`].

use std::collections::HashSet;
use std::fmt::Write;

use crate::domain::LinkGraph;

/// Renders outgoing links from the root as an indented tree.
///
/// Dangling links are marked `(missing)`; notes already shown are marked
/// `(see above)` and not expanded again.
pub fn render_tree(graph: &LinkGraph) -> String {
    let mut out = String::new();
    out.push_str(graph.root());
    out.push('\n');
    let mut seen = HashSet::from([graph.root().to_string()]);
    write_children(graph, graph.root(), "", &mut seen, &mut out);
    out
}

fn write_children(
    graph: &LinkGraph,
    name: &str,
    prefix: &str,
    seen: &mut HashSet<String>,
    out: &mut String,
) {
    let Some(node) = graph.node(name) else {
        return;
    };
    let count = node.outgoing.len();
    for (i, child) in node.outgoing.iter().enumerate() {
        let (branch, indent) = if i + 1 == count {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let marker = match graph.node(child) {
            Some(n) if n.is_dangling() => " (missing)",
            _ if seen.contains(child) => " (see above)",
            _ => "",
        };
        let _ = writeln!(out, "{prefix}{branch}{child}{marker}");
        if marker.is_empty() {
            seen.insert(child.clone());
            write_children(graph, child, &format!("{prefix}{indent}"), seen, out);
        }
    }
}

/// Renders the graph in Graphviz DOT format.
pub fn render_dot(graph: &LinkGraph) -> String {
    let mut out = String::from("digraph notes {\n");
    for (name, node) in graph.nodes() {
        let style = if name == graph.root() {
            " [style=bold]"
        } else if node.is_dangling() {
            " [style=dashed]"
        } else {
            ""
        };
        let _ = writeln!(out, "    {}{style};", quote(name));
    }
    for (name, node) in graph.nodes() {
        for target in &node.outgoing {
            let _ = writeln!(out, "    {} -> {};", quote(name), quote(target));
        }
    }
    out.push_str("}\n");
    out
}

/// Renders the graph as pretty-printed JSON.
pub fn render_json(graph: &LinkGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(graph)
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GraphNode;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn sample() -> LinkGraph {
        let mut graph = LinkGraph::new("home", PathBuf::from("/n/home.md"));
        graph.insert_node("a", GraphNode::new(Some(PathBuf::from("/n/a.md")), 1));
        graph.insert_node("b", GraphNode::new(Some(PathBuf::from("/n/b.md")), 1));
        graph.insert_node("ghost", GraphNode::new(None, 2));
        graph.add_edge("home", "a");
        graph.add_edge("home", "b");
        graph.add_edge("a", "b");
        graph.add_edge("a", "ghost");
        graph.add_edge("b", "home");
        graph
    }

    #[test]
    fn tree_marks_dangling_and_repeated_notes() {
        let expected = "\
home
├── a
│   ├── b
│   │   └── home (see above)
│   └── ghost (missing)
└── b (see above)
";
        assert_eq!(render_tree(&sample()), expected);
    }

    #[test]
    fn tree_of_isolated_note_is_its_name() {
        let graph = LinkGraph::new("alone", PathBuf::from("/n/alone.md"));
        assert_eq!(render_tree(&graph), "alone\n");
    }

    #[test]
    fn dot_lists_nodes_then_edges() {
        let expected = "\
digraph notes {
    \"a\";
    \"b\";
    \"ghost\" [style=dashed];
    \"home\" [style=bold];
    \"a\" -> \"b\";
    \"a\" -> \"ghost\";
    \"b\" -> \"home\";
    \"home\" -> \"a\";
    \"home\" -> \"b\";
}
";
        assert_eq!(render_dot(&sample()), expected);
    }

    #[test]
    fn dot_escapes_quotes() {
        let graph = LinkGraph::new("say \"hi\"", PathBuf::from("/n/x.md"));
        assert!(render_dot(&graph).contains(r#""say \"hi\"" [style=bold];"#));
    }

    #[test]
    fn json_contains_nodes() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();
        assert_eq!(json["root"], "home");
        assert_eq!(json["nodes"]["ghost"]["path"], serde_json::Value::Null);
        assert_eq!(json["nodes"]["a"]["outgoing"][0], "b");
    }
}
